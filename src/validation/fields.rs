//! Rules for individual fields: names, money amounts, date ranges and
//! report file names.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::DateRange;

use super::FieldError;

/// Letters of any script, combining marks, spaces and `.`, `-`, `'`.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M} .\-']+$").expect("name pattern is valid"));

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("filename pattern is valid"));

/// An amount with an optional currency label before or after it. The label is
/// a currency sign, a three-letter code or the pound's Arabic name; the number
/// may group thousands with `,`.
static CURRENCY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:\p{Sc}|[A-Z]{3}|جنيه)\s*)?(-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)(?:\s*(?:\p{Sc}|[A-Z]{3}|جنيه))?$",
    )
    .expect("currency pattern is valid")
});

const MAX_FILENAME_CHARS: usize = 200;

/// Validates and normalizes a person or area name.
///
/// The name is trimmed, then must have between `min_chars` and `max_chars`
/// characters and contain only letters, spaces, `.`, `-` or `'`.
///
/// # Examples
///
/// ```
/// use salary_manager::validation::validate_name;
///
/// assert_eq!(validate_name("name", "  Warehouse ", 2, 100).unwrap(), "Warehouse");
/// assert!(validate_name("name", "   ", 2, 100).is_err());
/// assert!(validate_name("name", "Bay 7", 2, 100).is_err());
/// ```
pub fn validate_name(
    field: &str,
    raw: &str,
    min_chars: usize,
    max_chars: usize,
) -> Result<String, FieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FieldError::new(field, "is required"));
    }

    let chars = name.chars().count();
    if chars < min_chars {
        return Err(FieldError::new(
            field,
            format!("must be at least {} characters", min_chars),
        ));
    }
    if chars > max_chars {
        return Err(FieldError::new(
            field,
            format!("must be at most {} characters", max_chars),
        ));
    }

    if !NAME_PATTERN.is_match(name) {
        return Err(FieldError::new(field, "contains characters that are not allowed"));
    }

    Ok(name.to_string())
}

/// Validates a monetary amount and rounds it to cents.
///
/// # Examples
///
/// ```
/// use salary_manager::validation::validate_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let max = Decimal::from(1_000_000);
/// let value = validate_amount("base_salary", Decimal::from_str("500.005").unwrap(), max).unwrap();
/// assert_eq!(value, Decimal::from_str("500.01").unwrap());
/// assert!(validate_amount("base_salary", Decimal::from(-1), max).is_err());
/// ```
pub fn validate_amount(field: &str, value: Decimal, max: Decimal) -> Result<Decimal, FieldError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FieldError::new(field, "must not be negative"));
    }

    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded > max {
        return Err(FieldError::new(field, format!("must not exceed {}", max)));
    }

    if rounded.is_zero() {
        // Normalizes "-0" to a plain zero.
        return Ok(Decimal::ZERO);
    }
    Ok(rounded)
}

/// Parses a monetary amount typed into a form.
///
/// An empty input is an error when `required`, otherwise it means zero.
/// Currency labels and thousands separators are tolerated.
///
/// # Examples
///
/// ```
/// use salary_manager::validation::parse_amount;
/// use rust_decimal::Decimal;
///
/// let max = Decimal::from(100_000);
/// assert_eq!(parse_amount("allowance", "", max, false).unwrap(), Decimal::ZERO);
/// assert!(parse_amount("base_salary", "", max, true).is_err());
/// assert!(parse_amount("allowance", "fifty", max, false).is_err());
/// ```
pub fn parse_amount(
    field: &str,
    raw: &str,
    max: Decimal,
    required: bool,
) -> Result<Decimal, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        if required {
            return Err(FieldError::new(field, "is required"));
        }
        return Ok(Decimal::ZERO);
    }

    let value = Decimal::from_str(trimmed)
        .ok()
        .or_else(|| parse_currency_input(trimmed))
        .ok_or_else(|| FieldError::new(field, "must be a number"))?;
    validate_amount(field, value, max)
}

/// Reads an amount written with a currency label or thousands separators,
/// such as `"1,250.50 EGP"`.
///
/// Returns `None` unless the whole input is one such amount; stray words or
/// other grouping conventions are not guessed at.
///
/// # Examples
///
/// ```
/// use salary_manager::validation::parse_currency_input;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(
///     parse_currency_input("1,250.50 EGP"),
///     Some(Decimal::from_str("1250.50").unwrap())
/// );
/// assert_eq!(parse_currency_input("n/a"), None);
/// assert_eq!(parse_currency_input("1.250,50"), None);
/// ```
pub fn parse_currency_input(raw: &str) -> Option<Decimal> {
    let captures = CURRENCY_AMOUNT.captures(raw.trim())?;
    let number = captures.get(1)?.as_str().replace(',', "");
    Decimal::from_str(&number).ok()
}

/// Validates a report date range: start must not be after end, and the span
/// must not exceed `max_days`.
pub fn validate_date_range(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
    max_days: i64,
) -> Result<DateRange, FieldError> {
    if start > end {
        return Err(FieldError::new(
            "date_range",
            "start date must not be after end date",
        ));
    }

    let range = DateRange::new(start, end);
    if range.span_days() > max_days {
        return Err(FieldError::new(
            "date_range",
            format!("must not span more than {} days", max_days),
        ));
    }

    Ok(range)
}

/// Makes a user-supplied file name safe to create on common file systems.
///
/// # Examples
///
/// ```
/// use salary_manager::validation::sanitize_filename;
///
/// assert_eq!(sanitize_filename("March: north/south"), "March_ north_south");
/// assert_eq!(sanitize_filename(" .. "), "untitled");
/// ```
pub fn sanitize_filename(raw: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(raw, "_");
    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    let limited: String = trimmed.chars().take(MAX_FILENAME_CHARS).collect();

    if limited.is_empty() {
        "untitled".to_string()
    } else {
        limited
    }
}

/// Validates a report file name and ensures it ends in `.pdf`.
pub fn report_filename(raw: &str) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new("filename", "is required"));
    }

    let mut name = sanitize_filename(raw.trim());
    if !name.to_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    Ok(name)
}
