//! Acceptance rules for the validated creation path.

use crate::{EngineError, MoneyCents, ResultEngine, TransactionKind};

use super::Balance;

/// Decides whether a transaction of `kind` and `value` may be created on top
/// of `balance`, returning the parsed kind.
///
/// An outcome may consume the whole total but never more.
pub(super) fn validate_transaction(
    kind: &str,
    value: MoneyCents,
    balance: &Balance,
) -> ResultEngine<TransactionKind> {
    let kind = TransactionKind::try_from(kind)?;

    if value.is_negative() {
        return Err(EngineError::InvalidAmount(
            "value must not be negative".to_string(),
        ));
    }

    if kind == TransactionKind::Outcome && value > balance.total {
        return Err(EngineError::InsufficientBalance(format!(
            "outcome of {value} exceeds the balance of {}",
            balance.total
        )));
    }

    apply_to_balance(*balance, kind, value)?;

    Ok(kind)
}

/// Returns `balance` with `value` booked on the `kind` side.
///
/// Fails with [`EngineError::MaxBalanceReached`] when a total no longer fits
/// in `i64` cents, so the stored sums always stay summable.
pub(super) fn apply_to_balance(
    balance: Balance,
    kind: TransactionKind,
    value: MoneyCents,
) -> ResultEngine<Balance> {
    let overflow = || {
        EngineError::MaxBalanceReached(format!(
            "{} total cannot grow by {value}",
            kind.as_str()
        ))
    };

    let mut next = balance;
    match kind {
        TransactionKind::Income => {
            next.income = balance.income.checked_add(value).ok_or_else(overflow)?;
        }
        TransactionKind::Outcome => {
            next.outcome = balance.outcome.checked_add(value).ok_or_else(overflow)?;
        }
    }
    next.total = next.income.checked_sub(next.outcome).ok_or_else(overflow)?;

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(total: i64) -> Balance {
        Balance {
            income: MoneyCents::new(total),
            outcome: MoneyCents::ZERO,
            total: MoneyCents::new(total),
        }
    }

    #[test]
    fn rejects_unknown_type() {
        let err = validate_transaction("transfer", MoneyCents::new(1), &balance(100)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidType(_)));
    }

    #[test]
    fn income_ignores_balance() {
        let kind = validate_transaction("income", MoneyCents::new(10_000), &balance(0)).unwrap();
        assert_eq!(kind, TransactionKind::Income);
    }

    #[test]
    fn outcome_up_to_total_is_accepted() {
        let kind = validate_transaction("outcome", MoneyCents::new(100), &balance(100)).unwrap();
        assert_eq!(kind, TransactionKind::Outcome);
    }

    #[test]
    fn outcome_over_total_is_rejected() {
        let err = validate_transaction("outcome", MoneyCents::new(101), &balance(100)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientBalance(
                "outcome of 1.01 exceeds the balance of 1.00".to_string()
            )
        );
    }

    #[test]
    fn outcome_against_negative_total_is_rejected() {
        let err = validate_transaction("outcome", MoneyCents::ZERO, &balance(-1)).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientBalance(_)));
    }

    #[test]
    fn negative_value_is_rejected() {
        let err = validate_transaction("income", MoneyCents::new(-1), &balance(0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn income_overflowing_the_total_is_rejected() {
        let current = balance(i64::MAX / 2 + 1);
        let err =
            validate_transaction("income", MoneyCents::new(i64::MAX / 2 + 1), &current).unwrap_err();
        assert!(matches!(err, EngineError::MaxBalanceReached(_)));
    }

    #[test]
    fn apply_to_balance_books_each_side() {
        let after = apply_to_balance(balance(100), TransactionKind::Outcome, MoneyCents::new(30))
            .unwrap();
        assert_eq!(after.income, MoneyCents::new(100));
        assert_eq!(after.outcome, MoneyCents::new(30));
        assert_eq!(after.total, MoneyCents::new(70));

        let err = apply_to_balance(balance(0), TransactionKind::Income, MoneyCents::new(i64::MAX))
            .and_then(|b| apply_to_balance(b, TransactionKind::Income, MoneyCents::new(1)))
            .unwrap_err();
        assert!(matches!(err, EngineError::MaxBalanceReached(_)));
    }
}
