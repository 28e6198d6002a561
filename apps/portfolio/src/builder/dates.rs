/// Converts `DD.MM.YYYY` to `YYYY-MM-DD`.
///
/// Syntactic check only: segments are ASCII digits of length 2, 2 and 4, day in 1..=31,
/// month in 1..=12 and year >= 1900. `31.02.2020` passes.
pub fn normalize_date(input: &str) -> Option<String> {
    let parts: Vec<&str> = input.trim().split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return None;
    }

    let in_range = |segment: &str, min: u32, max: u32| {
        segment.bytes().all(|b| b.is_ascii_digit())
            && segment
                .parse::<u32>()
                .map(|v| (min..=max).contains(&v))
                .unwrap_or(false)
    };

    if in_range(day, 1, 31) && in_range(month, 1, 12) && in_range(year, 1900, 9999) {
        Some(format!("{year}-{month}-{day}"))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_date_converts() {
        assert_eq!(normalize_date("15.06.1990").as_deref(), Some("1990-06-15"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(normalize_date(" 01.01.2000 ").as_deref(), Some("2000-01-01"));
    }

    #[test]
    fn test_day_out_of_range() {
        assert_eq!(normalize_date("32.06.1990"), None);
        assert_eq!(normalize_date("00.06.1990"), None);
    }

    #[test]
    fn test_month_out_of_range() {
        assert_eq!(normalize_date("15.13.1990"), None);
    }

    #[test]
    fn test_year_before_1900() {
        assert_eq!(normalize_date("15.06.1899"), None);
    }

    #[test]
    fn test_segment_length_mismatch() {
        assert_eq!(normalize_date("15.6.1990"), None);
        assert_eq!(normalize_date("15.06.90"), None);
    }

    #[test]
    fn test_wrong_separator_or_shape() {
        assert_eq!(normalize_date("1990-06-15"), None);
        assert_eq!(normalize_date("15.06.1990.1"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_non_numeric_segments() {
        assert_eq!(normalize_date("ab.06.1990"), None);
    }

    #[test]
    fn test_signed_segments_are_rejected() {
        assert_eq!(normalize_date("+1.06.1990"), None);
        assert_eq!(normalize_date("15.+6.1990"), None);
        assert_eq!(normalize_date("15.06.+990"), None);
    }

    #[test]
    fn test_not_calendar_validated() {
        assert_eq!(normalize_date("31.02.2020").as_deref(), Some("2020-02-31"));
    }
}
