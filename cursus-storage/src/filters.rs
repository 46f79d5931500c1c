//! Safe query filtering helpers
//!
//! Free-text filter values are validated before reaching a LIKE clause,
//! wildcards are escaped so user input cannot widen a match, and date
//! filters are expanded to inclusive day bounds.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Filter value validation
pub mod validation {
    use cursus_interfaces::DatabaseError;

    /// Ceiling on free-text filter values
    pub const MAX_FILTER_LENGTH: usize = 200;

    /// Reject filter values that are implausibly long or carry control
    /// characters.
    pub fn validate_query_input(input: &str) -> Result<(), DatabaseError> {
        if input.chars().count() > MAX_FILTER_LENGTH {
            return Err(DatabaseError::Validation {
                message: format!("Filtre trop long ({} caractères maximum)", MAX_FILTER_LENGTH),
            });
        }
        if input.chars().any(|c| c.is_control()) {
            return Err(DatabaseError::Validation {
                message: "Filtre invalide".to_string(),
            });
        }
        Ok(())
    }
}

/// Strip LIKE wildcards from a user-supplied pattern fragment so input
/// cannot widen a substring match. The caller wraps the result in `%...%`.
pub fn sanitize_like(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '%' | '_' | '\\')).collect()
}

/// Inclusive lower bound of a date filter: start of day, UTC
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid midnight"))
}

/// Inclusive upper bound of a date filter: end of day at millisecond
/// precision (23:59:59.999)
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_milli_opt(23, 59, 59, 999).expect("valid end of day"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_like() {
        assert_eq!(sanitize_like("10%"), "10");
        assert_eq!(sanitize_like("a_b"), "ab");
        assert_eq!(sanitize_like("plain"), "plain");
        assert_eq!(sanitize_like("back\\slash"), "backslash");
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(day_start(date).to_rfc3339(), "2024-01-31T00:00:00+00:00");
        assert_eq!(
            day_end(date).timestamp_millis() - day_start(date).timestamp_millis(),
            86_399_999
        );
    }

    #[test]
    fn test_validate_query_input() {
        assert!(validation::validate_query_input("appel").is_ok());
        assert!(validation::validate_query_input("a\x00b").is_err());
        assert!(validation::validate_query_input(&"x".repeat(300)).is_err());
    }
}
