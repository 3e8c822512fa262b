//! Core data models for the banking query pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Query =================
//

/// One incoming banking request. Created per request, owned by the pipeline
/// for the request's lifetime, discarded after the reply is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuery {
    pub account_number: String,
    pub query_text: String,
}

//
// ================= Category =================
//

/// Closed set of banking intents the classifier can produce.
///
/// Only the four operational variants may reach the router; `Unknown` is
/// rejected before routing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Balance,
    MiniStatement,
    LastTransaction,
    LoanBalance,
    Unknown,
}

impl Category {
    /// Labels the classifier prompt offers to the generation service, in
    /// the order they appear in the prompt.
    pub const OPERATIONAL_LABELS: [&'static str; 4] = [
        "balance",
        "mini_statement",
        "last_transaction",
        "loan_balance",
    ];

    /// Map a raw generation-service reply to a category.
    ///
    /// Trims whitespace and lowercases before comparing. Anything that is
    /// not an exact label match (partial matches, extra words, empty
    /// output) is `Unknown`.
    pub fn parse(label: &str) -> Category {
        match label.trim().to_lowercase().as_str() {
            "balance" => Category::Balance,
            "mini_statement" => Category::MiniStatement,
            "last_transaction" => Category::LastTransaction,
            "loan_balance" => Category::LoanBalance,
            _ => Category::Unknown,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Balance => "balance",
            Category::MiniStatement => "mini_statement",
            Category::LastTransaction => "last_transaction",
            Category::LoanBalance => "loan_balance",
            Category::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Reply =================
//

/// Final output of one successfully completed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryReply {
    pub response: String,
}
