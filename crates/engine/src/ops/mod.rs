use sea_orm::DatabaseConnection;

use crate::{EngineError, ResultEngine};

mod balances;
mod categories;
mod import;
mod transactions;
mod validation;

pub use balances::Balance;
pub use transactions::Ledger;

/// Rows per bulk insert statement and titles per `IN` lookup, keeping bound
/// parameters under SQLite's limit.
const INSERT_CHUNK: usize = 500;

/// Run a block inside a DB transaction, committing on success.
///
/// Any early return (`?` or `Err`) drops the open transaction, which rolls it
/// back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = sea_orm::TransactionTrait::begin(&$self.database).await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The ledger engine.
///
/// Every public operation opens its own database transaction and hands it to
/// the components it runs, so reads and writes of one operation share the
/// same view of the ledger.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} title must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
