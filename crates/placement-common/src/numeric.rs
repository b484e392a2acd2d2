//! Numeric parsing and formatting utilities.

/// Cell spellings treated as a missing value by the loader.
pub const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

/// Returns true when the trimmed value is one of [`MISSING_TOKENS`].
///
/// # Examples
///
/// ```
/// use placement_common::is_missing_token;
///
/// assert!(is_missing_token("  NaN "));
/// assert!(is_missing_token(""));
/// assert!(!is_missing_token("0"));
/// ```
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Error returned by [`parse_f64`] for text that is not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotANumber;

/// Parses a string as `f64`.
///
/// Returns `Ok(None)` for missing tokens and [`NotANumber`] for text that is
/// neither missing nor a finite number.
pub fn parse_f64(value: &str) -> Result<Option<f64>, NotANumber> {
    if is_missing_token(value) {
        return Ok(None);
    }
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(NotANumber),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use placement_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a fraction in `[0, 1]` as a percentage with two decimals.
///
/// ```
/// use placement_common::format_percent;
///
/// assert_eq!(format_percent(2.0 / 3.0), "66.67%");
/// ```
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing_token("NA"));
        assert!(is_missing_token(" null "));
        assert!(is_missing_token("None"));
        assert!(!is_missing_token("Placed"));
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), Ok(None));
        assert_eq!(parse_f64("NaN"), Ok(None));
        assert_eq!(parse_f64("  67.5 "), Ok(Some(67.5)));
        assert_eq!(parse_f64("270000"), Ok(Some(270000.0)));
        assert_eq!(parse_f64("sixty"), Err(NotANumber));
        assert_eq!(parse_f64("inf"), Err(NotANumber));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.6884), "68.84%");
    }
}
