//! Eligibility rules for borrowing, returning and makerspace access
//!
//! Every check here is a pure function of the policy and a snapshot of
//! patron and item state. Checks run in a fixed order and the first
//! failing rule decides the reason reported to the caller.

use crate::{
    config::PolicyConfig,
    error::{AppError, AppResult},
    models::{
        enums::{ItemCategory, PatronCategory, Training},
        item::Item,
        patron::Patron,
    },
};

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    ItemNotAvailable,
    NotBorrowable,
    LoanLimitReached,
    OutstandingFees,
    NotOldEnough,
    TrainingRequired,
    CategoryLimitReached(ItemCategory),
    AlreadyBorrowed,
    DuplicateCategory,
    NotOnLoan,
    MustBeOlder,
    MakerspaceTrainingRequired,
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenialReason::ItemNotAvailable => write!(f, "item not available"),
            DenialReason::NotBorrowable => write!(f, "item is not borrowable"),
            DenialReason::LoanLimitReached => write!(f, "maximum loan limit reached"),
            DenialReason::OutstandingFees => write!(f, "outstanding fees"),
            DenialReason::NotOldEnough => write!(f, "not old enough"),
            DenialReason::TrainingRequired => write!(f, "training required"),
            DenialReason::CategoryLimitReached(category) => {
                write!(f, "limit reached for {}", category)
            }
            DenialReason::AlreadyBorrowed => write!(f, "already borrowing this item"),
            DenialReason::DuplicateCategory => write!(f, "already borrowing this category"),
            DenialReason::NotOnLoan => write!(f, "not on loan to this patron"),
            DenialReason::MustBeOlder => write!(f, "must be older"),
            DenialReason::MakerspaceTrainingRequired => write!(f, "makerspace training required"),
        }
    }
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenialReason),
}

impl Decision {
    fn from_denial(denial: Option<DenialReason>) -> Self {
        denial.map_or(Decision::Allowed, Decision::Denied)
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// `"allowed"`, or the message of the rule that failed
    pub fn reason(&self) -> String {
        match self {
            Decision::Allowed => "allowed".to_string(),
            Decision::Denied(reason) => reason.to_string(),
        }
    }

    /// Turn a denial into an error for callers that must stop on it
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(reason) => Err(AppError::Denied(reason)),
        }
    }
}

/// Can `patron` borrow a copy of `item` right now?
pub fn check_borrow(policy: &PolicyConfig, patron: &Patron, item: &Item) -> Decision {
    Decision::from_denial(first_borrow_denial(policy, patron, item))
}

fn first_borrow_denial(policy: &PolicyConfig, patron: &Patron, item: &Item) -> Option<DenialReason> {
    if !item.is_available() {
        return Some(DenialReason::ItemNotAvailable);
    }

    if !item.category.is_borrowable() {
        return Some(DenialReason::NotBorrowable);
    }

    let patron_category = patron.category(policy);
    if patron.loans.len() >= policy.max_loans_for(patron_category) as usize {
        return Some(DenialReason::LoanLimitReached);
    }

    if patron.has_outstanding_fees() {
        return Some(DenialReason::OutstandingFees);
    }

    if let Some(training) = item.category.required_training() {
        if patron.age < policy.minimum_age_for(item.category) {
            return Some(DenialReason::NotOldEnough);
        }
        if !patron.has_training(training) {
            return Some(DenialReason::TrainingRequired);
        }
    }

    let same_category = patron.loans_in_category(item.category);
    if let Some(cap) = policy.category_cap(patron_category, item.category) {
        if same_category >= cap as usize {
            return Some(DenialReason::CategoryLimitReached(item.category));
        }
    }

    if patron.holds(item.id) {
        return Some(DenialReason::AlreadyBorrowed);
    }

    if policy.restrict_duplicate_category && same_category > 0 {
        return Some(DenialReason::DuplicateCategory);
    }

    None
}

/// Does `patron` hold a loan for `item_id` that can be returned?
pub fn check_return(patron: &Patron, item_id: i32) -> Decision {
    if patron.holds(item_id) {
        Decision::Allowed
    } else {
        Decision::Denied(DenialReason::NotOnLoan)
    }
}

/// May `patron` use the makerspace?
pub fn check_makerspace_access(policy: &PolicyConfig, patron: &Patron) -> Decision {
    let denial = if patron.age < policy.makerspace_min_age {
        Some(DenialReason::MustBeOlder)
    } else if !patron.has_training(Training::Makerspace) {
        Some(DenialReason::MakerspaceTrainingRequired)
    } else if policy.makerspace_requires_clear_balance && patron.has_outstanding_fees() {
        Some(DenialReason::OutstandingFees)
    } else {
        None
    };
    Decision::from_denial(denial)
}

/// Days a patron of `patron` category keeps an item of `item` category
pub fn loan_period_days(policy: &PolicyConfig, patron: PatronCategory, item: ItemCategory) -> i64 {
    policy.loan_period_days(patron, item)
}
