//! Patron model and related types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{ItemCategory, PatronCategory, Training};
use super::loan::{Loan, LoanDetails};
use crate::config::PolicyConfig;

/// A registered library member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patron {
    pub id: i32,
    pub name: String,
    pub age: u32,
    /// Amount owed to the library, never negative
    #[serde(default)]
    pub outstanding_fees: Decimal,
    #[serde(default)]
    pub gardening_training: bool,
    #[serde(default)]
    pub carpentry_training: bool,
    #[serde(default)]
    pub makerspace_training: bool,
    /// Active loans in the order they were created
    #[serde(default)]
    pub loans: Vec<Loan>,
}

impl Patron {
    pub fn new(id: i32, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            outstanding_fees: Decimal::ZERO,
            gardening_training: false,
            carpentry_training: false,
            makerspace_training: false,
            loans: Vec::new(),
        }
    }

    pub fn category(&self, policy: &PolicyConfig) -> PatronCategory {
        policy.patron_category(self.age)
    }

    pub fn has_training(&self, training: Training) -> bool {
        match training {
            Training::Gardening => self.gardening_training,
            Training::Carpentry => self.carpentry_training,
            Training::Makerspace => self.makerspace_training,
        }
    }

    pub fn has_outstanding_fees(&self) -> bool {
        self.outstanding_fees > Decimal::ZERO
    }

    pub fn loan_for(&self, item_id: i32) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.item_id == item_id)
    }

    pub fn holds(&self, item_id: i32) -> bool {
        self.loan_for(item_id).is_some()
    }

    pub fn loans_in_category(&self, category: ItemCategory) -> usize {
        self.loans.iter().filter(|loan| loan.category == category).count()
    }
}

impl std::fmt::Display for Patron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (ID: {}, Age: {}, Loans: {}, Fees: ${:.2})",
            self.name,
            self.id,
            self.age,
            self.loans.len(),
            self.outstanding_fees
        )
    }
}

/// Short patron representation for search results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatronShort {
    pub id: i32,
    pub name: String,
    pub age: u32,
    pub category: PatronCategory,
    pub nb_loans: usize,
    pub outstanding_fees: Decimal,
}

impl PatronShort {
    pub fn new(patron: &Patron, policy: &PolicyConfig) -> Self {
        Self {
            id: patron.id,
            name: patron.name.clone(),
            age: patron.age,
            category: patron.category(policy),
            nb_loans: patron.loans.len(),
            outstanding_fees: patron.outstanding_fees,
        }
    }
}

/// Full patron view including loans and accrued overdue fees
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatronDetails {
    pub id: i32,
    pub name: String,
    pub age: u32,
    pub category: PatronCategory,
    pub outstanding_fees: Decimal,
    pub gardening_training: bool,
    pub carpentry_training: bool,
    pub makerspace_training: bool,
    pub loans: Vec<LoanDetails>,
    /// Sum of the overdue fees the current loans would incur today
    pub overdue_fees: Decimal,
}

/// Create patron request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePatron {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: i32,
    #[serde(default)]
    pub gardening_training: bool,
    #[serde(default)]
    pub carpentry_training: bool,
    #[serde(default)]
    pub makerspace_training: bool,
}

/// Patron search filters; all given filters must match
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PatronQuery {
    /// Exact name, case-insensitive
    pub name: Option<String>,
    pub age: Option<u32>,
}

impl PatronQuery {
    pub fn matches(&self, patron: &Patron) -> bool {
        let name_matches = self
            .name
            .as_deref()
            .map_or(true, |name| patron.name.to_lowercase() == name.trim().to_lowercase());
        name_matches && self.age.map_or(true, |age| patron.age == age)
    }
}

/// Fee payment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct FeePayment {
    pub amount: Decimal,
}

/// Result of a fee payment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeePaymentReceipt {
    pub paid: Decimal,
    pub remaining: Decimal,
    pub fully_paid: bool,
}
