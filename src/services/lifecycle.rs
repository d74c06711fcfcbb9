//! Loan lifecycle: the only place patron loans and item copy counts change
//!
//! Callers gate these functions with the eligibility checks; the functions
//! themselves still refuse to lend a copy that is not on the shelf.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::PolicyConfig,
    error::{AppError, AppResult},
    models::{item::Item, loan::Loan, patron::Patron},
    services::{
        eligibility::{self, DenialReason},
        fees,
    },
};

/// Result of a return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReturnOutcome {
    pub returned: bool,
    /// Overdue fee posted to the patron's balance
    pub fee_charged: Decimal,
}

impl ReturnOutcome {
    pub fn not_returned() -> Self {
        Self {
            returned: false,
            fee_charged: Decimal::ZERO,
        }
    }
}

/// Lend one copy of `item` to `patron` starting `today`
pub fn borrow(
    policy: &PolicyConfig,
    patron: &mut Patron,
    item: &mut Item,
    today: NaiveDate,
) -> AppResult<Loan> {
    if !item.is_available() {
        return Err(AppError::Denied(DenialReason::ItemNotAvailable));
    }

    let period = eligibility::loan_period_days(policy, patron.category(policy), item.category);
    let loan = Loan::new(item, today, period);

    item.on_loan += 1;
    patron.loans.push(loan.clone());

    Ok(loan)
}

/// Take back the patron's loan of `item`, charging any overdue fee.
///
/// Nothing changes when the patron does not hold the item.
pub fn return_item(
    policy: &PolicyConfig,
    patron: &mut Patron,
    item: &mut Item,
    today: NaiveDate,
) -> ReturnOutcome {
    let Some(position) = patron.loans.iter().position(|loan| loan.item_id == item.id) else {
        return ReturnOutcome::not_returned();
    };

    let loan = patron.loans.remove(position);
    let fee = fees::overdue_fee(policy, &loan, today);

    item.on_loan = item.on_loan.saturating_sub(1);
    fees::accrue_fee(patron, fee);

    ReturnOutcome {
        returned: true,
        fee_charged: fee,
    }
}
