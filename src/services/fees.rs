//! Overdue fee calculation and fee balance bookkeeping

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    config::PolicyConfig,
    error::{AppError, AppResult},
    models::{loan::Loan, patron::Patron},
};

/// Fee owed for `loan` if it were returned on `today`
pub fn overdue_fee(policy: &PolicyConfig, loan: &Loan, today: NaiveDate) -> Decimal {
    Decimal::from(loan.days_overdue(today)) * policy.fee_per_day
}

/// Sum of overdue fees over all of the patron's active loans
pub fn total_overdue_fees(policy: &PolicyConfig, patron: &Patron, today: NaiveDate) -> Decimal {
    patron
        .loans
        .iter()
        .map(|loan| overdue_fee(policy, loan, today))
        .sum()
}

/// Post a charge onto the patron's balance
pub fn accrue_fee(patron: &mut Patron, amount: Decimal) {
    if amount > Decimal::ZERO {
        patron.outstanding_fees += amount;
    }
}

/// Pay `amount` off the patron's balance and return what is left.
///
/// The amount must be positive and no larger than what is owed.
pub fn settle_fee(patron: &mut Patron, amount: Decimal) -> AppResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "payment must be positive, got {}",
            amount
        )));
    }
    if amount > patron.outstanding_fees {
        return Err(AppError::Validation(format!(
            "payment of {} exceeds outstanding fees of {}",
            amount, patron.outstanding_fees
        )));
    }

    patron.outstanding_fees = (patron.outstanding_fees - amount).max(Decimal::ZERO);
    Ok(patron.outstanding_fees)
}
