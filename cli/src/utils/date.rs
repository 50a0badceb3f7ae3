use chrono::{Duration, NaiveDate};

/// Parse a calendar date string (YYYY-MM-DD).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Format a date back to the YYYY-MM-DD form the dashboard renders.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The `steps` consecutive calendar days after `start`.
///
/// Forecast dates are plain calendar days; weekends and holidays are not
/// skipped.
pub fn future_dates(start: NaiveDate, steps: usize) -> Vec<NaiveDate> {
    (1..=steps as i64).map(|n| start + Duration::days(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_roundtrip() {
        let date = parse_date("2024-03-09").unwrap();
        assert_eq!(format_date(date), "2024-03-09");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("not-a-date").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert!(parse_date(" 2024-03-09 ").is_some());
    }

    #[test]
    fn test_future_dates_are_contiguous() {
        let start = parse_date("2024-02-27").unwrap();
        let dates = future_dates(start, 4);
        assert_eq!(dates.len(), 4);
        assert_eq!(format_date(dates[0]), "2024-02-28");
        // Leap year: Feb 29 exists in 2024
        assert_eq!(format_date(dates[1]), "2024-02-29");
        assert_eq!(format_date(dates[2]), "2024-03-01");
        assert_eq!(format_date(dates[3]), "2024-03-02");
    }

    #[test]
    fn test_future_dates_empty_horizon() {
        let start = parse_date("2024-01-01").unwrap();
        assert!(future_dates(start, 0).is_empty());
    }
}
