use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// A stored expense as returned by the server.
    ///
    /// `amount` is a positive decimal number; the engine stores integer
    /// cents, so it always carries at most two fractional digits.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i32,
        pub amount: f64,
        pub category: String,
        /// Serialized as `%Y-%m-%d`.
        pub date: NaiveDate,
        pub description: Option<String>,
    }

    /// Request body for creating an expense. The server assigns the id.
    ///
    /// `date` stays a string so a malformed value comes back as a
    /// structured `{error}` response instead of a body-parse rejection.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount: f64,
        pub category: String,
        pub date: String,
        pub description: Option<String>,
    }
}
