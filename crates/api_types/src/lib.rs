//! Request and response bodies of the HTTP API.
//!
//! Amounts always travel as integer cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub title: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Balance {
        pub income: i64,
        pub outcome: i64,
        pub total: i64,
    }
}

pub mod transaction {
    use super::*;

    use crate::{balance::Balance, category::CategoryView};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Outcome,
    }

    /// Request body for creating a transaction.
    ///
    /// `type` is kept as text: an unknown value is rejected by the engine with
    /// a typed error instead of a deserialization failure.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub title: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub value: i64,
        pub category: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub title: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub value: i64,
        pub category_id: Uuid,
        /// Present when the category was loaded along with the transaction.
        pub category: Option<CategoryView>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
        pub balance: Balance,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionImported {
        pub transactions: Vec<TransactionView>,
    }
}
