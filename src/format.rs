//! Brazilian Portuguese presentation helpers shared by templates, charts and
//! exports.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Formats an amount as BRL currency: `1234.5` becomes `R$ 1.234,50`.
///
/// Values are rounded half away from zero to the cent.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let cents = (rounded.abs() * Decimal::ONE_HUNDRED)
        .to_u128()
        .unwrap_or_default();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

/// Execution percentage with one decimal place, or `-` when undefined.
pub fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(value) => format!(
            "{:.1}%",
            value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => "-".to_string(),
    }
}

/// Short month label used on chart axes: `2025-01-01` becomes `jan/25`.
pub fn month_label(date: NaiveDate) -> String {
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    format!("{month}/{:02}", date.year().rem_euclid(100))
}

/// Day-first date: `28/02/2025`.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brl(value: &str) -> String {
        format_brl(value.parse().unwrap())
    }

    #[test]
    fn brl_uses_thousands_dot_and_decimal_comma() {
        assert_eq!(brl("1234.5"), "R$ 1.234,50");
        assert_eq!(brl("0"), "R$ 0,00");
        assert_eq!(brl("999.999"), "R$ 1.000,00");
        assert_eq!(brl("1234567.8"), "R$ 1.234.567,80");
        assert_eq!(brl("100"), "R$ 100,00");
    }

    #[test]
    fn brl_rounds_half_cents_away_from_zero() {
        assert_eq!(brl("0.125"), "R$ 0,13");
        assert_eq!(brl("-0.125"), "-R$ 0,13");
    }

    #[test]
    fn brl_prefixes_negative_sign() {
        assert_eq!(brl("-1234.5"), "-R$ 1.234,50");
        assert_eq!(brl("-0.001"), "R$ 0,00");
    }

    #[test]
    fn percent_has_one_decimal_or_placeholder() {
        assert_eq!(format_percent(Some("12.345".parse().unwrap())), "12.3%");
        assert_eq!(format_percent(Some(Decimal::from(100))), "100.0%");
        assert_eq!(format_percent(Some("12.25".parse().unwrap())), "12.3%");
        assert_eq!(format_percent(None), "-");
    }

    #[test]
    fn month_label_is_short_portuguese() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(month_label(date), "jan/25");
        let date = NaiveDate::from_ymd_opt(2030, 12, 1).unwrap();
        assert_eq!(month_label(date), "dez/30");
    }

    #[test]
    fn date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert_eq!(format_date_br(date), "28/02/2025");
    }
}
