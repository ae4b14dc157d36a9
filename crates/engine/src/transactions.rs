//! Transaction primitives.
//!
//! A `Transaction` moves the ledger balance up (`income`) or down
//! (`outcome`) by its value and always points to a category.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Outcome,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "outcome" => Ok(Self::Outcome),
            other => Err(EngineError::InvalidType(format!(
                "the type must be income or outcome, got '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub kind: TransactionKind,
    pub value: MoneyCents,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(
        title: String,
        kind: TransactionKind,
        value: MoneyCents,
        category_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            kind,
            value,
            category_id,
            created_at,
        }
    }

    /// Contribution of the transaction to the ledger total.
    pub fn signed_value(&self) -> MoneyCents {
        match self.kind {
            TransactionKind::Income => self.value,
            TransactionKind::Outcome => MoneyCents::ZERO - self.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub kind: String,
    pub value: i64,
    pub category_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id),
            title: ActiveValue::Set(tx.title.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            value: ActiveValue::Set(tx.value.cents()),
            category_id: ActiveValue::Set(tx.category_id),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            value: MoneyCents::new(model.value),
            category_id: model.category_id,
            created_at: model.created_at,
        })
    }
}
