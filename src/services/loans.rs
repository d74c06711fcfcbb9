//! Loan management service

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    config::PolicyConfig,
    error::AppResult,
    models::loan::{Loan, LoanDetails},
    repository::{Library, Repository},
    services::{
        eligibility::{self, Decision},
        fees,
        lifecycle::{self, ReturnOutcome},
    },
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: Arc<PolicyConfig>,
}

impl LoansService {
    pub fn new(repository: Repository, policy: Arc<PolicyConfig>) -> Self {
        Self { repository, policy }
    }

    /// Get active loans for a patron
    pub fn get_patron_loans(&self, patron_id: i32, today: NaiveDate) -> AppResult<Vec<LoanDetails>> {
        let library = self.repository.lock()?;
        let patron = library.patrons.get_by_id(patron_id)?;

        Ok(patron
            .loans
            .iter()
            .map(|loan| LoanDetails::new(loan, today, fees::overdue_fee(&self.policy, loan, today)))
            .collect())
    }

    /// Would the patron be allowed to borrow the item?
    pub fn check_borrow(&self, patron_id: i32, item_id: i32) -> AppResult<Decision> {
        let library = self.repository.lock()?;
        Self::borrow_decision(&self.policy, &library, patron_id, item_id)
    }

    /// Borrow an item, failing with the denial reason when a rule forbids it
    pub fn borrow(&self, patron_id: i32, item_id: i32, today: NaiveDate) -> AppResult<Loan> {
        let mut library = self.repository.lock()?;

        let decision = Self::borrow_decision(&self.policy, &library, patron_id, item_id)?;
        if let Decision::Denied(reason) = decision {
            tracing::debug!(patron_id, item_id, %reason, "Borrow denied");
        }
        decision.into_result()?;

        let Library { items, patrons } = &mut *library;
        let patron = patrons.get_by_id_mut(patron_id)?;
        let item = items.get_by_id_mut(item_id)?;
        let loan = lifecycle::borrow(&self.policy, patron, item, today)?;

        tracing::info!(patron_id, item_id, due_date = %loan.due_date, "Item borrowed");
        Ok(loan)
    }

    /// Could the patron return the item?
    pub fn check_return(&self, patron_id: i32, item_id: i32) -> AppResult<Decision> {
        let library = self.repository.lock()?;
        let patron = library.patrons.get_by_id(patron_id)?;
        Ok(eligibility::check_return(patron, item_id))
    }

    /// Return an item; `returned` is false when the patron did not hold it
    pub fn return_item(&self, patron_id: i32, item_id: i32, today: NaiveDate) -> AppResult<ReturnOutcome> {
        let mut library = self.repository.lock()?;
        let Library { items, patrons } = &mut *library;

        let patron = patrons.get_by_id_mut(patron_id)?;
        if !eligibility::check_return(patron, item_id).is_allowed() {
            tracing::debug!(patron_id, item_id, "Return refused, item not on loan to patron");
            return Ok(ReturnOutcome::not_returned());
        }

        let item = items.get_by_id_mut(item_id)?;
        let outcome = lifecycle::return_item(&self.policy, patron, item, today);

        tracing::info!(patron_id, item_id, fee_charged = %outcome.fee_charged, "Item returned");
        Ok(outcome)
    }

    /// Count active loans
    pub fn count_active(&self) -> AppResult<usize> {
        let library = self.repository.lock()?;
        Ok(library.patrons.iter().map(|p| p.loans.len()).sum())
    }

    /// Count overdue loans
    pub fn count_overdue(&self, today: NaiveDate) -> AppResult<usize> {
        let library = self.repository.lock()?;
        Ok(library
            .patrons
            .iter()
            .flat_map(|p| p.loans.iter())
            .filter(|loan| loan.is_overdue(today))
            .count())
    }

    fn borrow_decision(
        policy: &PolicyConfig,
        library: &Library,
        patron_id: i32,
        item_id: i32,
    ) -> AppResult<Decision> {
        let patron = library.patrons.get_by_id(patron_id)?;
        let item = library.items.get_by_id(item_id)?;
        Ok(eligibility::check_borrow(policy, patron, item))
    }
}
