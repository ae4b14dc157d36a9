use std::{io::Read, path::Path};

use chrono::{TimeDelta, Utc};
use sea_orm::prelude::*;

use crate::{
    EngineError, ResultEngine, Transaction, TransactionRecord, read_path, read_records,
    transactions,
};

use super::{Engine, INSERT_CHUNK, validation::apply_to_balance, with_tx};

impl Engine {
    /// Imports every CSV row read from `reader`.
    ///
    /// The whole source is parsed before the database is touched, so a
    /// malformed row aborts the import with nothing persisted.
    pub async fn import_transactions<R: Read>(&self, reader: R) -> ResultEngine<Vec<Transaction>> {
        let records = read_records(reader)?;
        self.import_records(records).await
    }

    /// Imports the CSV file at `path`.
    pub async fn import_file(&self, path: impl AsRef<Path>) -> ResultEngine<Vec<Transaction>> {
        let records = read_path(path)?;
        self.import_records(records).await
    }

    /// Persists already parsed records in bulk.
    ///
    /// Categories of the whole batch are resolved in one pass, then all
    /// transactions are inserted. Both steps share one DB transaction, so a
    /// failure leaves neither new categories nor transactions behind.
    ///
    /// This is the trusted path: balances are not checked, so the ledger total
    /// may end up negative. The totals must still fit in cents, otherwise the
    /// batch fails with [`EngineError::MaxBalanceReached`].
    ///
    /// Rows get strictly increasing `created_at` values, so listing returns
    /// them in input order.
    pub async fn import_records(
        &self,
        records: Vec<TransactionRecord>,
    ) -> ResultEngine<Vec<Transaction>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        with_tx!(self, |db_tx| {
            let balance = Self::balance_in(&db_tx).await?;
            records.iter().try_fold(balance, |balance, record| {
                apply_to_balance(balance, record.kind, record.value)
            })?;

            let titles: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
            let categories = Self::resolve_categories_in(&db_tx, &titles).await?;

            let started_at = Utc::now();
            let imported = records
                .iter()
                .zip(0i64..)
                .map(|(record, position)| -> ResultEngine<Transaction> {
                    let category = categories.get(record.category.as_str()).ok_or_else(|| {
                        EngineError::KeyNotFound(format!("category {}", record.category))
                    })?;
                    Ok(Transaction::new(
                        record.title.clone(),
                        record.kind,
                        record.value,
                        category.id,
                        started_at + TimeDelta::microseconds(position),
                    ))
                })
                .collect::<ResultEngine<Vec<_>>>()?;

            for chunk in imported.chunks(INSERT_CHUNK) {
                transactions::Entity::insert_many(chunk.iter().map(transactions::ActiveModel::from))
                    .exec(&db_tx)
                    .await?;
            }

            tracing::info!(
                transactions = imported.len(),
                categories = categories.len(),
                "import completed"
            );

            Ok(imported)
        })
    }
}
