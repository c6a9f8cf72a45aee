use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::error::{AppError, AppResult};

pub mod company_service;
pub mod customer_pricing_service;
pub mod customer_service;
pub mod order_service;
pub mod product_service;

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

/// Trims `value` and rejects it when empty or longer than `max_len` chars.
pub(crate) fn required_text(value: &str, field: &str, max_len: usize) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

/// Like [`required_text`], but blank input becomes `None`.
pub(crate) fn optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> AppResult<Option<String>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => required_text(v, field, max_len).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_bounds() {
        assert_eq!(required_text("  Widget ", "name", 10).unwrap(), "Widget");
        assert!(required_text("   ", "name", 10).is_err());
        assert!(required_text("abcdefghijk", "name", 10).is_err());
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  "), "phone", 15).unwrap(), None);
        assert_eq!(optional_text(None, "phone", 15).unwrap(), None);
        assert_eq!(
            optional_text(Some(" 555-0100 "), "phone", 15).unwrap(),
            Some("555-0100".to_string())
        );
        assert!(optional_text(Some("1234567890123456"), "phone", 15).is_err());
    }
}
