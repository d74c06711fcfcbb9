//! Loan model and related types

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::ItemCategory;
use super::item::Item;

/// An active binding of one item to one patron.
///
/// The loan keeps the item's identity and a snapshot of its name and
/// category taken when it was created; it never holds the item itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub item_id: i32,
    pub item_name: String,
    pub category: ItemCategory,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl Loan {
    pub fn new(item: &Item, start_date: NaiveDate, period_days: i64) -> Self {
        Self {
            item_id: item.id,
            item_name: item.name.clone(),
            category: item.category,
            start_date,
            due_date: start_date + Duration::days(period_days),
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.due_date
    }

    /// Whole days past the due date, zero when not overdue
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        (today - self.due_date).num_days().max(0)
    }
}

/// Loan with its overdue state computed for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub item_id: i32,
    pub item_name: String,
    pub category: ItemCategory,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub is_overdue: bool,
    pub days_overdue: i64,
    /// Fee that would be charged if the item were returned today
    pub overdue_fee: Decimal,
}

impl LoanDetails {
    pub fn new(loan: &Loan, today: NaiveDate, overdue_fee: Decimal) -> Self {
        Self {
            item_id: loan.item_id,
            item_name: loan.item_name.clone(),
            category: loan.category,
            start_date: loan.start_date,
            due_date: loan.due_date,
            is_overdue: loan.is_overdue(today),
            days_overdue: loan.days_overdue(today),
            overdue_fee,
        }
    }
}

impl std::fmt::Display for LoanDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_overdue {
            write!(f, "{} (OVERDUE by {} days)", self.item_name, self.days_overdue)
        } else {
            write!(f, "{} (Due: {})", self.item_name, self.due_date)
        }
    }
}
