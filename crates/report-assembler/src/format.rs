//! Display formatting for report strings (currency, percentages, dates, durations).

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SPANISH_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Locale used for date presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-MX")]
    EsMx,
}

impl ReportLocale {
    /// Lenient parse of a locale tag; anything unrecognised is en-US.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "es-mx" | "es" => ReportLocale::EsMx,
            _ => ReportLocale::EnUs,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ReportLocale::EnUs => "en-US",
            ReportLocale::EsMx => "es-MX",
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            ReportLocale::EnUs => date.format("%m/%d/%Y").to_string(),
            ReportLocale::EsMx => date.format("%d/%m/%Y").to_string(),
        }
    }

    /// Short month label for chart axes ("Mar 2026" / "mar 2026")
    pub fn month_label(&self, date: NaiveDate) -> String {
        match self {
            ReportLocale::EnUs => date.format("%b %Y").to_string(),
            ReportLocale::EsMx => format!(
                "{} {}",
                SPANISH_MONTHS[date.month0() as usize],
                date.year()
            ),
        }
    }
}

/// `$1,234.56`, leading minus for negatives
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

/// One decimal and a percent sign; non-finite values render as `0%`
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "0%".to_string()
    }
}

/// Cached or computed ROI as "N.N months", `N/A` when unbounded
pub fn format_roi_months(roi_months: f64) -> String {
    if roi_months.is_finite() {
        format!("{:.1} months", roi_months)
    } else {
        "N/A".to_string()
    }
}

/// Whole months as "N years M months".
///
/// Years and remainder come from the integer month count, so 12 months is always
/// "1 year 0 months", never "0 years 12 months".
pub fn format_duration_months(months: u32) -> String {
    let years = months / 12;
    let rem = months % 12;
    format!(
        "{} {} {} {}",
        years,
        if years == 1 { "year" } else { "years" },
        rem,
        if rem == 1 { "month" } else { "months" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.5)), "$999.50");
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-4000)), "-$4,000.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(40.0), "40.0%");
        assert_eq!(format_percent(98.76), "98.8%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn test_duration_boundaries() {
        assert_eq!(format_duration_months(0), "0 years 0 months");
        assert_eq!(format_duration_months(1), "0 years 1 month");
        assert_eq!(format_duration_months(12), "1 year 0 months");
        assert_eq!(format_duration_months(30), "2 years 6 months");
    }

    #[test]
    fn test_locale_dates() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(ReportLocale::EnUs.format_date(d), "03/07/2026");
        assert_eq!(ReportLocale::EsMx.format_date(d), "07/03/2026");
        assert_eq!(ReportLocale::EnUs.month_label(d), "Mar 2026");
        assert_eq!(ReportLocale::EsMx.month_label(d), "mar 2026");
        assert_eq!(ReportLocale::parse("es_MX"), ReportLocale::EsMx);
        assert_eq!(ReportLocale::parse("fr-FR"), ReportLocale::EnUs);
    }
}
