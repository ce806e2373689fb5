//! Input sanitizers and display formatting shared by every page

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

/// Email shape accepted by the user form
#[allow(clippy::unwrap_used)]
pub(crate) static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());

/// Keep only ASCII digits
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Keep ASCII digits and the first decimal point
#[must_use]
pub fn decimal_only(input: &str) -> String {
    let mut seen_point = false;
    input
        .chars()
        .filter(|c| match *c {
            '0'..='9' => true,
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect()
}

/// Whether `email` has the shape `local@domain.tld`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Case-insensitive substring match; an empty needle always matches
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parse an API timestamp or a bare `YYYY-MM-DD` date
#[must_use]
pub fn parse_api_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Value for an `<input type="date">` seeded from an API timestamp
#[must_use]
pub fn date_input_value(raw: &str) -> String {
    raw.split('T').next().unwrap_or_default().to_string()
}

/// Normalize a date input to ISO-8601 UTC midnight, e.g. `2024-05-01T00:00:00.000Z`
///
/// # Errors
///
/// Returns a validation error for `field` if the input is not a date.
pub fn to_iso_timestamp(raw: &str, field: &str) -> Result<String> {
    parse_api_date(raw)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| Error::validation(field, format!("Fecha inválida: {raw}")))
}

/// Locale date string (`dd/mm/yyyy`), or the raw value when unparseable
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_api_date(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%d/%m/%Y").to_string(),
    )
}

/// Locale date-time string, `N/A` when missing
#[must_use]
pub fn format_datetime(raw: Option<&str>) -> String {
    match raw {
        None => "N/A".to_string(),
        Some(raw) => parse_api_date(raw).map_or_else(
            || raw.to_string(),
            |dt| dt.format("%d/%m/%Y, %H:%M:%S").to_string(),
        ),
    }
}

/// `Sí`/`No` for boolean flags
#[must_use]
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "Sí" } else { "No" }
}

/// Parse a form field holding an integer
///
/// # Errors
///
/// Returns a validation error for `field` when empty or not an integer.
pub fn parse_int_field(raw: &str, field: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::validation(field, "Debe ser un número entero"))
}

/// Parse a form field holding a decimal amount
///
/// # Errors
///
/// Returns a validation error for `field` when empty or not a number.
pub fn parse_decimal_field(raw: &str, field: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::validation(field, "Debe ser un número"))
}

/// Deserialize a number that may arrive as JSON number or numeric string
///
/// # Errors
///
/// Fails when the value is neither a number nor a numeric string.
pub fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("12a3", "123")]
    #[case("abc", "")]
    #[case("007", "007")]
    #[case("-5", "5")]
    #[case("1.5", "15")]
    fn test_digits_only(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(digits_only(input), expected);
    }

    #[rstest]
    #[case("12.50", "12.50")]
    #[case("1.2.3", "1.23")]
    #[case("$4,99", "499")]
    #[case(".5", ".5")]
    fn test_decimal_only(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decimal_only(input), expected);
    }

    #[rstest]
    #[case("a@b.com", true)]
    #[case("Ana.Perez@Delicrem.CO", true)]
    #[case("not-an-email", false)]
    #[case("a@b", false)]
    #[case("", false)]
    fn test_is_valid_email(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Lácteos Ana", "ana"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Pedro", "ana"));
    }

    #[test]
    fn test_iso_timestamp_from_date_input() {
        assert_eq!(
            to_iso_timestamp("2024-05-01", "fecha_entrega").unwrap(),
            "2024-05-01T00:00:00.000Z"
        );
        assert_eq!(
            to_iso_timestamp("2024-05-01T00:00:00.000Z", "fecha_entrega").unwrap(),
            "2024-05-01T00:00:00.000Z"
        );
        let err = to_iso_timestamp("mañana", "fecha_entrega").unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "fecha_entrega"));
    }

    #[test]
    fn test_date_input_value() {
        assert_eq!(date_input_value("2024-05-01T00:00:00.000Z"), "2024-05-01");
        assert_eq!(date_input_value("2024-05-01"), "2024-05-01");
        assert_eq!(date_input_value(""), "");
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(format_date("2024-05-01T10:00:00Z"), "01/05/2024");
        assert_eq!(format_date("garbage"), "garbage");
        assert_eq!(format_datetime(Some("2024-05-01T10:20:30Z")), "01/05/2024, 10:20:30");
        assert_eq!(format_datetime(None), "N/A");
        assert_eq!(yes_no(true), "Sí");
        assert_eq!(yes_no(false), "No");
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_int_field(" 42 ", "cantidad").unwrap(), 42);
        assert!(parse_int_field("", "cantidad").is_err());
        assert!((parse_decimal_field("12.5", "precio").unwrap() - 12.5).abs() < f64::EPSILON);
        assert!(parse_decimal_field(".", "precio").is_err());
    }

    #[test]
    fn test_lenient_f64() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "lenient_f64")]
            precio: Option<f64>,
        }

        let from_number: Row = serde_json::from_str(r#"{"precio": 3.5}"#).unwrap();
        let from_string: Row = serde_json::from_str(r#"{"precio": "3.50"}"#).unwrap();
        let missing: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(from_number.precio, Some(3.5));
        assert_eq!(from_string.precio, Some(3.5));
        assert_eq!(missing.precio, None);
        assert!(serde_json::from_str::<Row>(r#"{"precio": "caro"}"#).is_err());
    }

    proptest! {
        #[test]
        fn digits_only_output_is_all_digits(input in ".*") {
            let out = digits_only(&input);
            prop_assert!(out.chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn decimal_only_has_at_most_one_point(input in ".*") {
            let out = decimal_only(&input);
            prop_assert!(out.chars().filter(|c| *c == '.').count() <= 1);
        }
    }
}
