//! Operation Router
//!
//! Static one-to-one mapping from an operational category to the backend
//! endpoint that serves it. Pure, no I/O.

use crate::error::BankQueryError;
use crate::models::Category;
use crate::Result;

/// Resolve the backend endpoint for a category.
///
/// Exhaustive over the closed set: `Unknown` is rejected here rather than
/// falling through to a default endpoint, so an unmapped category is a
/// classification failure, not a routing decision. Adding a category forces
/// updating both the classifier's label set and this table.
pub fn route(category: Category) -> Result<&'static str> {
    match category {
        Category::Balance => Ok("account/balance"),
        Category::MiniStatement => Ok("account/mini-statement"),
        Category::LastTransaction => Ok("account/transactions"),
        Category::LoanBalance => Ok("account/loan-balance"),
        Category::Unknown => Err(BankQueryError::UnrecognizedQuery),
    }
}
