use sea_orm::{ConnectionTrait, QuerySelect, prelude::*, sea_query::Expr};
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine, TransactionKind, transactions};

use super::Engine;

/// Ledger totals at the time they were computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub income: MoneyCents,
    pub outcome: MoneyCents,
    /// `income - outcome`.
    pub total: MoneyCents,
}

impl Engine {
    /// Computes the current totals from the persisted transactions.
    ///
    /// Nothing is cached: every call reads the ledger again.
    pub async fn balance(&self) -> ResultEngine<Balance> {
        Self::balance_in(&self.database).await
    }

    pub(super) async fn balance_in<C: ConnectionTrait>(db: &C) -> ResultEngine<Balance> {
        let sums: Vec<(String, Option<i64>)> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Kind)
            .column_as(Expr::col(transactions::Column::Value).sum(), "total")
            .group_by(transactions::Column::Kind)
            .into_tuple()
            .all(db)
            .await?;

        let mut balance = Balance::default();
        for (kind, sum) in sums {
            let sum = MoneyCents::new(sum.unwrap_or_default());
            match TransactionKind::try_from(kind.as_str())? {
                TransactionKind::Income => balance.income += sum,
                TransactionKind::Outcome => balance.outcome += sum,
            }
        }
        balance.total = balance
            .income
            .checked_sub(balance.outcome)
            .ok_or_else(|| EngineError::MaxBalanceReached("ledger total".to_string()))?;

        Ok(balance)
    }
}
