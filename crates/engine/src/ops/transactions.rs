use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Category, CreateTransactionCmd, EngineError, ResultEngine, Transaction, categories,
    transactions,
};

use super::{Balance, Engine, normalize_required_name, validation::validate_transaction, with_tx};

/// The listed transactions together with the totals they add up to.
#[derive(Clone, Debug)]
pub struct Ledger {
    pub transactions: Vec<(Transaction, Category)>,
    pub balance: Balance,
}

impl Engine {
    /// Creates one transaction after validating it against the current
    /// balance.
    ///
    /// The category is looked up by title and created when missing. A
    /// rejected transaction leaves no trace: neither the transaction nor a new
    /// category is persisted.
    pub async fn create_transaction(
        &self,
        cmd: CreateTransactionCmd,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let balance = Self::balance_in(&db_tx).await?;
            let kind = validate_transaction(&cmd.kind, cmd.value, &balance)?;
            let title = normalize_required_name(&cmd.title, "transaction")?;
            let category_title = normalize_required_name(&cmd.category, "category")?;

            let mut resolved =
                Self::resolve_categories_in(&db_tx, &[category_title.as_str()]).await?;
            let category = resolved.remove(category_title.as_str()).ok_or_else(|| {
                EngineError::KeyNotFound(format!("category {category_title}"))
            })?;

            let tx = Transaction::new(title, kind, cmd.value, category.id, Utc::now());
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;

            tracing::info!(
                transaction_id = %tx.id,
                kind = kind.as_str(),
                value = %tx.value,
                "transaction created"
            );

            Ok(tx)
        })
    }

    /// Deletes a transaction. Its category is kept even when no other
    /// transaction references it.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
            model.delete(&db_tx).await?;

            tracing::info!(%transaction_id, "transaction deleted");

            Ok(())
        })
    }

    /// Returns one transaction.
    pub async fn transaction(&self, transaction_id: Uuid) -> ResultEngine<Transaction> {
        transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?
            .try_into()
    }

    /// Lists the ledger, oldest first, each transaction with its category.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<(Transaction, Category)>> {
        Self::list_transactions_in(&self.database).await
    }

    /// Lists the ledger and computes its balance from the same read
    /// transaction, so the totals always match the listed rows.
    pub async fn ledger(&self) -> ResultEngine<Ledger> {
        with_tx!(self, |db_tx| {
            let transactions = Self::list_transactions_in(&db_tx).await?;
            let balance = Self::balance_in(&db_tx).await?;
            Ok(Ledger {
                transactions,
                balance,
            })
        })
    }

    async fn list_transactions_in<C: ConnectionTrait>(
        db: &C,
    ) -> ResultEngine<Vec<(Transaction, Category)>> {
        let rows = transactions::Entity::find()
            .find_also_related(categories::Entity)
            .order_by_asc(transactions::Column::CreatedAt)
            .all(db)
            .await?;

        rows.into_iter()
            .map(|(model, category)| -> ResultEngine<(Transaction, Category)> {
                let category = category.ok_or_else(|| {
                    EngineError::KeyNotFound(format!("category {}", model.category_id))
                })?;
                Ok((Transaction::try_from(model)?, Category::from(category)))
            })
            .collect()
    }
}
