//! Data models for BAT

pub mod enums;
pub mod item;
pub mod loan;
pub mod patron;

// Re-export commonly used types
pub use enums::{ItemCategory, PatronCategory, Training};
pub use item::Item;
pub use loan::{Loan, LoanDetails};
pub use patron::{Patron, PatronDetails, PatronShort};
