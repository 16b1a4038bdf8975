//! Shared helpers for dtype checks, numeric parsing and value formatting.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType holds text-like or label-like values.
#[inline]
pub fn is_categorical_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Boolean | DataType::Categorical(_, _) | DataType::Enum(_, _)
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust,ignore
/// use eda_quality::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$12,000"), "12000");
/// assert_eq!(clean_numeric_string(" 7.5% "), "7.5");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a finite numeric value.
///
/// Handles currency symbols, percentages and thousands separators. Spellings
/// such as "NaN" or "inf" are rejected so they stay categorical.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Render an optional float for tables; `None` and NaN become an empty cell.
pub fn format_optional_float(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.*}", precision, v),
        _ => String::new(),
    }
}

/// Render a share in [0, 1] as a percentage.
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Escape a value for use inside a Markdown table cell.
pub fn escape_markdown_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::Date));
        assert!(!is_numeric_dtype(&DataType::Null));
    }

    #[test]
    fn test_is_categorical_dtype() {
        assert!(is_categorical_dtype(&DataType::String));
        assert!(is_categorical_dtype(&DataType::Boolean));
        assert!(!is_categorical_dtype(&DataType::Date));
        assert!(!is_categorical_dtype(&DataType::Float32));
    }

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(clean_numeric_string("£2,500"), "2500");
        assert_eq!(clean_numeric_string(" 12.5% "), "12.5");
        assert_eq!(clean_numeric_string("10 000 000"), "10000000");
        assert_eq!(clean_numeric_string("abc"), "abc");
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_numeric_string("140"), Some(140.0));
        assert_eq!(parse_numeric_string("$3,000.25"), Some(3000.25));
        assert_eq!(parse_numeric_string("-0.5"), Some(-0.5));
        assert_eq!(parse_numeric_string("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_string(""), None);
        assert_eq!(parse_numeric_string("ID_1"), None);
        assert_eq!(parse_numeric_string("NaN"), None);
        assert_eq!(parse_numeric_string("inf"), None);
    }

    #[test]
    fn test_format_optional_float() {
        assert_eq!(format_optional_float(Some(1.23456), 2), "1.23");
        assert_eq!(format_optional_float(None, 2), "");
        assert_eq!(format_optional_float(Some(f64::NAN), 2), "");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(0.25), "25.0%");
        assert_eq!(format_share(0.0), "0.0%");
    }

    #[test]
    fn test_escape_markdown_cell() {
        assert_eq!(escape_markdown_cell("a|b"), "a\\|b");
        assert_eq!(escape_markdown_cell("line\nbreak"), "line break");
    }
}
