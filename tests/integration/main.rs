//! Integration tests for bat-server
//!
//! Drives the full axum router in-process with `tower::ServiceExt::oneshot`
//! over a small fixture library, and exercises the JSON store against
//! temporary directories.

mod common;

mod test_catalog;
mod test_loans;
mod test_persistence;
