use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An expense booked against a stitching challan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub expense_date: NaiveDate,
    pub challan_no: Option<String>,
    pub ledger_id: Option<String>,
    pub manual_ledger_id: Option<String>,
    pub expense_for: Vec<String>,
    pub other_expense_description: Option<String>,
    pub amount_before_gst: f64,
    pub sgst: Option<String>,
    pub cgst: Option<String>,
    pub igst: Option<String>,
    pub cost: f64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// `expense_for` with the `"Other"` entry replaced by the free-text
    /// description when one was given.
    #[must_use]
    pub fn expense_for_display(&self) -> Vec<String> {
        let description = self
            .other_expense_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        self.expense_for
            .iter()
            .map(|item| match (item.as_str(), description) {
                ("Other", Some(d)) => d.to_string(),
                _ => item.clone(),
            })
            .collect()
    }
}
