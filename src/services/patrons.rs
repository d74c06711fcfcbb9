//! Patron registration, details, fee payments and makerspace access

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    config::PolicyConfig,
    error::{AppError, AppResult},
    models::{
        loan::LoanDetails,
        patron::{CreatePatron, FeePaymentReceipt, Patron, PatronDetails, PatronQuery, PatronShort},
    },
    repository::Repository,
    services::{
        eligibility::{self, Decision},
        fees,
    },
};

#[derive(Clone)]
pub struct PatronsService {
    repository: Repository,
    policy: Arc<PolicyConfig>,
}

impl PatronsService {
    pub fn new(repository: Repository, policy: Arc<PolicyConfig>) -> Self {
        Self { repository, policy }
    }

    /// Register a new patron
    pub fn create_patron(&self, data: CreatePatron) -> AppResult<PatronShort> {
        data.validate()?;

        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        let age = u32::try_from(data.age)
            .map_err(|_| AppError::Validation(format!("invalid age {}", data.age)))?;

        let mut library = self.repository.lock()?;
        let mut patron = Patron::new(library.patrons.next_id(), name, age);
        patron.gardening_training = data.gardening_training;
        patron.carpentry_training = data.carpentry_training;
        patron.makerspace_training = data.makerspace_training;

        let short = PatronShort::new(&patron, &self.policy);
        library.patrons.insert(patron)?;

        tracing::info!(patron_id = short.id, category = %short.category, "Patron registered");
        Ok(short)
    }

    pub fn search_patrons(&self, query: &PatronQuery) -> AppResult<Vec<PatronShort>> {
        let library = self.repository.lock()?;
        let found = library
            .patrons
            .search(query)
            .into_iter()
            .map(|patron| PatronShort::new(patron, &self.policy))
            .collect();
        Ok(found)
    }

    /// Patron with loans and the overdue fees they would incur on `today`
    pub fn get_patron_details(&self, id: i32, today: NaiveDate) -> AppResult<PatronDetails> {
        let library = self.repository.lock()?;
        let patron = library.patrons.get_by_id(id)?;

        let loans = patron
            .loans
            .iter()
            .map(|loan| LoanDetails::new(loan, today, fees::overdue_fee(&self.policy, loan, today)))
            .collect();

        Ok(PatronDetails {
            id: patron.id,
            name: patron.name.clone(),
            age: patron.age,
            category: patron.category(&self.policy),
            outstanding_fees: patron.outstanding_fees,
            gardening_training: patron.gardening_training,
            carpentry_training: patron.carpentry_training,
            makerspace_training: patron.makerspace_training,
            loans,
            overdue_fees: fees::total_overdue_fees(&self.policy, patron, today),
        })
    }

    /// Pay part or all of a patron's outstanding fees
    pub fn pay_fee(&self, id: i32, amount: Decimal) -> AppResult<FeePaymentReceipt> {
        let mut library = self.repository.lock()?;
        let patron = library.patrons.get_by_id_mut(id)?;

        let remaining = fees::settle_fee(patron, amount)?;

        tracing::info!(patron_id = id, paid = %amount, remaining = %remaining, "Fee payment recorded");
        Ok(FeePaymentReceipt {
            paid: amount,
            remaining,
            fully_paid: remaining.is_zero(),
        })
    }

    pub fn check_makerspace_access(&self, id: i32) -> AppResult<Decision> {
        let library = self.repository.lock()?;
        let patron = library.patrons.get_by_id(id)?;

        let decision = eligibility::check_makerspace_access(&self.policy, patron);
        if let Decision::Denied(reason) = decision {
            tracing::debug!(patron_id = id, %reason, "Makerspace access denied");
        }
        Ok(decision)
    }
}
