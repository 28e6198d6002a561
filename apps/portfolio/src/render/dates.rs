use chrono::NaiveDate;

pub const PRESENT: &str = "Present";
pub const INVALID_DATE: &str = "Invalid Date Format";

/// Display styles for stored ISO dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `15 June, 1990`
    DayMonthYear,
    /// `June, 1990`
    MonthYear,
    /// `1990`
    Year,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            DateStyle::DayMonthYear => "%d %B, %Y",
            DateStyle::MonthYear => "%B, %Y",
            DateStyle::Year => "%Y",
        }
    }
}

/// Formats `YYYY-MM-DD` (optionally followed by `T...`) for display.
/// Empty input stays empty; anything unparseable becomes `Invalid Date Format`.
pub fn format_date(value: &str, style: DateStyle) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format(style.pattern()).to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// Like [`format_date`], but a missing end date reads `Present`.
pub fn format_end_date(value: &str, style: DateStyle) -> String {
    if value.trim().is_empty() {
        PRESENT.to_string()
    } else {
        format_date(value, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles() {
        assert_eq!(format_date("1990-06-15", DateStyle::DayMonthYear), "15 June, 1990");
        assert_eq!(format_date("1990-06-15", DateStyle::MonthYear), "June, 1990");
        assert_eq!(format_date("1990-06-15", DateStyle::Year), "1990");
    }

    #[test]
    fn test_time_suffix_is_ignored() {
        assert_eq!(
            format_date("2025-09-15T00:00:00", DateStyle::MonthYear),
            "September, 2025"
        );
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(format_date("", DateStyle::Year), "");
        assert_eq!(format_date("2020-02-31", DateStyle::Year), INVALID_DATE);
        assert_eq!(format_date("15.06.1990", DateStyle::Year), INVALID_DATE);
    }

    #[test]
    fn test_missing_end_date_is_present() {
        assert_eq!(format_end_date("", DateStyle::Year), "Present");
        assert_eq!(format_end_date("2019-01-01", DateStyle::Year), "2019");
    }
}
