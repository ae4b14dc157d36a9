//! Command structs for engine operations.
//!
//! The type text is kept as received so the engine, not the caller, decides
//! whether it names a valid kind.

use crate::MoneyCents;

/// Create a single validated transaction.
#[derive(Clone, Debug)]
pub struct CreateTransactionCmd {
    pub title: String,
    pub kind: String,
    pub value: MoneyCents,
    pub category: String,
}

impl CreateTransactionCmd {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        kind: impl Into<String>,
        value: MoneyCents,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            value,
            category: category.into(),
        }
    }

    #[must_use]
    pub fn income(title: impl Into<String>, value: MoneyCents, category: impl Into<String>) -> Self {
        Self::new(title, "income", value, category)
    }

    #[must_use]
    pub fn outcome(
        title: impl Into<String>,
        value: MoneyCents,
        category: impl Into<String>,
    ) -> Self {
        Self::new(title, "outcome", value, category)
    }
}
