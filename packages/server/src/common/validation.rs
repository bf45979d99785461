//! Custom field validators and error flattening for request bodies.

use chrono::{NaiveDate, Utc};
use validator::{ValidationError, ValidationErrors};

/// Rejects empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Rejects today and future dates.
pub fn past_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value >= Utc::now().date_naive() {
        return Err(ValidationError::new("past_date"));
    }
    Ok(())
}

/// Flatten validation errors into their per-field messages, sorted for
/// a deterministic response body.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, err.code),
            })
        })
        .collect();
    messages.sort();
    messages
}
