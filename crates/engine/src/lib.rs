//! Transaction ledger core.
//!
//! Records income and outcome transactions against categories, keeps the
//! balance invariant on the validated creation path and imports CSV batches.
//! Storage goes through sea-orm; build an [`Engine`] with an explicit
//! `DatabaseConnection`.

pub use categories::Category;
pub use commands::CreateTransactionCmd;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Balance, Engine, EngineBuilder, Ledger};
pub use records::{TransactionRecord, read_path, read_records};
pub use transactions::{Transaction, TransactionKind};

mod categories;
mod commands;
mod error;
mod money;
mod ops;
mod records;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;
