//! Business logic services

pub mod catalog;
pub mod eligibility;
pub mod fees;
pub mod lifecycle;
pub mod loans;
pub mod patrons;

use std::sync::Arc;

use crate::{config::PolicyConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronsService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services over one repository and one borrowing policy
    pub fn new(repository: Repository, policy: PolicyConfig) -> Self {
        let policy = Arc::new(policy);
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            patrons: patrons::PatronsService::new(repository.clone(), policy.clone()),
            loans: loans::LoansService::new(repository, policy),
        }
    }
}
