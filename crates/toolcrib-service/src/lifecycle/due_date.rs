//! Due date parsing.

use chrono::NaiveDate;

use toolcrib_core::error::AppError;

/// Accepted due date format.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date. Surrounding whitespace is rejected.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, AppError> {
    if raw.trim() != raw {
        return Err(AppError::invalid_input(format!(
            "Invalid due date '{raw}': expected YYYY-MM-DD without surrounding spaces"
        )));
    }
    NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).map_err(|e| {
        AppError::invalid_input(format!(
            "Invalid due date '{raw}': expected YYYY-MM-DD ({e})"
        ))
    })
}
