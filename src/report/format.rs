//! Text formatting for report cells.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with two decimals and comma thousands separators.
///
/// ```
/// use salary_manager::report::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(123456789, 2)), "1,234,567.89");
/// assert_eq!(format_amount(Decimal::from(5)), "5.00");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    grouped.push('.');
    grouped.push_str(cents);
    grouped
}

/// Formats an amount followed by a currency label, if any.
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let amount = format_amount(amount);
    let currency = currency.trim();
    if currency.is_empty() {
        amount
    } else {
        format!("{} {}", amount, currency)
    }
}

/// Left-aligns `text` in a cell of `width` characters, cutting it with `~`
/// when it does not fit.
pub(crate) fn pad_right(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    format!("{:<width$}", fitted, width = width)
}

/// Right-aligns `text` in a cell of `width` characters.
pub(crate) fn pad_left(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    format!("{:>width$}", fitted, width = width)
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_amount(dec("0")), "0.00");
        assert_eq!(format_amount(dec("999.9")), "999.90");
        assert_eq!(format_amount(dec("1000")), "1,000.00");
        assert_eq!(format_amount(dec("1000000")), "1,000,000.00");
        assert_eq!(format_amount(dec("123456.78")), "123,456.78");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_amount(dec("2.005")), "2.01");
        assert_eq!(format_amount(dec("-2.005")), "-2.01");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_amount(dec("-0.001")), "0.00");
    }

    #[test]
    fn test_money_with_and_without_currency() {
        assert_eq!(format_money(dec("550"), "EGP"), "550.00 EGP");
        assert_eq!(format_money(dec("550"), "  "), "550.00");
    }

    #[test]
    fn test_cells_fit_width() {
        assert_eq!(pad_right("Jane", 6), "Jane  ");
        assert_eq!(pad_left("1.00", 6), "  1.00");
        assert_eq!(pad_right("Bartholomew", 6), "Barth~");
        assert_eq!(pad_right("Bartholomew", 6).chars().count(), 6);
    }
}
