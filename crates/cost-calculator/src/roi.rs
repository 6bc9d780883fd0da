//! Capex, ROI and break-even
//!
//! All functions are pure and infallible. An unusable capex blob totals zero, a
//! non-positive monthly profit makes ROI unbounded and break-even not applicable.
//! Sums saturate at the decimal range and a quotient that does not fit in it is
//! treated as unbounded.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use screen_core::Asset;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// ROI at or below this many months is an excellent investment
pub const EXCELLENT_ROI_MONTHS: f64 = 24.0;
/// Break-even at or below this many months is optimal
pub const OPTIMAL_BREAK_EVEN_MONTHS: u32 = 24;
/// Horizon used for total cost of ownership
pub const TCO_HORIZON_MONTHS: u32 = 60;

// ---------------------------------------------------------------------------
// Capex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapexLine {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapexBreakdown {
    pub lines: Vec<CapexLine>,
    pub total: Decimal,
}

fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or_default(),
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .and_then(Decimal::from_f64)
                })
                .unwrap_or_default()
        }
        _ => Decimal::ZERO,
    }
}

/// Parse a capex blob (JSON object of category -> amount).
///
/// Missing, malformed or non-object blobs yield an empty breakdown. Entries that are
/// not numeric-coercible are kept with a zero amount.
pub fn parse_capex_breakdown(blob: Option<&str>) -> CapexBreakdown {
    let Some(raw) = blob.map(str::trim).filter(|s| !s.is_empty()) else {
        return CapexBreakdown::default();
    };

    let map = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::debug!("capex blob is not an object ({}), treating as zero", other);
            return CapexBreakdown::default();
        }
        Err(e) => {
            tracing::debug!("malformed capex blob, treating as zero: {}", e);
            return CapexBreakdown::default();
        }
    };

    let lines: Vec<CapexLine> = map
        .iter()
        .map(|(category, value)| CapexLine {
            category: category.clone(),
            amount: coerce_amount(value),
        })
        .collect();
    let total = lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.amount));

    CapexBreakdown { lines, total }
}

/// Total capital expenditure of an asset (zero when the blob is unusable)
pub fn compute_capex_total(asset: &Asset) -> Decimal {
    parse_capex_breakdown(asset.capex_breakdown.as_deref()).total
}

// ---------------------------------------------------------------------------
// ROI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiStatus {
    NotProfitable,
    ExcellentInvestment,
    EvaluateProfitabilityImprovement,
}

impl RoiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoiStatus::NotProfitable => "not profitable",
            RoiStatus::ExcellentInvestment => "excellent investment",
            RoiStatus::EvaluateProfitabilityImprovement => "evaluate profitability improvement",
        }
    }
}

impl std::fmt::Display for RoiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unbounded month counts travel as `null` and read back as infinity
mod unbounded_months {
    use super::*;

    pub fn serialize<S: Serializer>(months: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if months.is_finite() {
            serializer.serialize_some(months)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAnalysis {
    pub monthly_profit: Decimal,
    pub capex: Decimal,
    pub additional_cost: Decimal,
    /// Months to recoup capex plus the additional cost; infinite when not profitable
    #[serde(with = "unbounded_months")]
    pub roi_months: f64,
    /// Annualised return on capex, percent
    pub roi_percentage: f64,
    pub recommendation: RoiStatus,
}

impl RoiAnalysis {
    pub fn is_bounded(&self) -> bool {
        self.roi_months.is_finite()
    }
}

/// ROI of an asset, optionally charging an extra one-off cost (a pending maintenance).
pub fn compute_roi(asset: &Asset, additional_cost: Decimal) -> RoiAnalysis {
    let monthly_profit = asset.monthly_profit();
    let capex = compute_capex_total(asset);

    if monthly_profit <= Decimal::ZERO || capex <= Decimal::ZERO {
        return RoiAnalysis {
            monthly_profit,
            capex,
            additional_cost,
            roi_months: f64::INFINITY,
            roi_percentage: 0.0,
            recommendation: RoiStatus::NotProfitable,
        };
    }

    let roi_months = capex
        .checked_add(additional_cost)
        .and_then(|owed| owed.checked_div(monthly_profit))
        .and_then(|months| months.to_f64())
        .unwrap_or(f64::INFINITY);
    let roi_percentage = monthly_profit
        .checked_div(capex)
        .and_then(|ratio| ratio.to_f64())
        .map(|ratio| ratio * 1200.0)
        .unwrap_or(0.0);
    let recommendation = if roi_months <= EXCELLENT_ROI_MONTHS {
        RoiStatus::ExcellentInvestment
    } else {
        RoiStatus::EvaluateProfitabilityImprovement
    };

    RoiAnalysis {
        monthly_profit,
        capex,
        additional_cost,
        roi_months,
        roi_percentage,
        recommendation,
    }
}

/// Before/after comparison for charging a maintenance cost against an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiImpact {
    pub before: RoiAnalysis,
    pub after: RoiAnalysis,
    /// Extra months to recoup; None when either side is unbounded
    pub delta_months: Option<f64>,
}

pub fn compute_roi_impact(asset: &Asset, maintenance_cost: Decimal) -> RoiImpact {
    let before = compute_roi(asset, Decimal::ZERO);
    let after = compute_roi(asset, maintenance_cost);
    let delta_months = (before.is_bounded() && after.is_bounded())
        .then(|| after.roi_months - before.roi_months);

    RoiImpact {
        before,
        after,
        delta_months,
    }
}

/// New cached ROI after a maintenance event: (capex + cost) / profit.
///
/// None when the asset makes no profit, in which case the cached value stays as is.
pub fn projected_cached_roi(asset: &Asset, maintenance_total: Decimal) -> Option<f64> {
    let monthly_profit = asset.monthly_profit();
    if monthly_profit <= Decimal::ZERO {
        return None;
    }
    let capex = compute_capex_total(asset);
    capex
        .checked_add(maintenance_total)
        .and_then(|owed| owed.checked_div(monthly_profit))
        .and_then(|months| months.to_f64())
}

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEvenStatus {
    Optimal,
    Extended,
}

impl BreakEvenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakEvenStatus::Optimal => "optimal",
            BreakEvenStatus::Extended => "extended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakEven {
    NotApplicable {
        reason: String,
    },
    Projected {
        months: u32,
        date: NaiveDate,
        status: BreakEvenStatus,
    },
}

impl BreakEven {
    pub fn months(&self) -> Option<u32> {
        match self {
            BreakEven::Projected { months, .. } => Some(*months),
            BreakEven::NotApplicable { .. } => None,
        }
    }
}

/// Projected break-even date counted in whole months from `today`.
pub fn compute_break_even(asset: &Asset, today: NaiveDate) -> BreakEven {
    let monthly_profit = asset.monthly_profit();
    if monthly_profit <= Decimal::ZERO {
        return BreakEven::NotApplicable {
            reason: "not applicable - no profit".to_string(),
        };
    }

    let capex = compute_capex_total(asset).max(Decimal::ZERO);
    let months = capex
        .checked_div(monthly_profit)
        .and_then(|m| m.ceil().to_u32());

    let projected =
        months.and_then(|m| today.checked_add_months(Months::new(m)).map(|date| (m, date)));

    match projected {
        Some((months, date)) => BreakEven::Projected {
            months,
            date,
            status: if months <= OPTIMAL_BREAK_EVEN_MONTHS {
                BreakEvenStatus::Optimal
            } else {
                BreakEvenStatus::Extended
            },
        },
        None => BreakEven::NotApplicable {
            reason: "not applicable - beyond supported calendar".to_string(),
        },
    }
}

/// Capex plus five years of operating expense
pub fn tco_five_year(capex: Decimal, monthly_opex: Decimal) -> Decimal {
    capex.saturating_add(monthly_opex.saturating_mul(Decimal::from(TCO_HORIZON_MONTHS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;
    use screen_core::AssetStatus;

    fn asset(revenue: Decimal, expense: Decimal, capex: Option<&str>) -> Asset {
        Asset {
            id: "SCR-001".to_string(),
            name: "Plaza Norte".to_string(),
            location: "Monterrey".to_string(),
            install_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            monthly_revenue: revenue,
            monthly_expense: expense,
            uptime_percentage: Some(98.0),
            status: AssetStatus::Active,
            capex_breakdown: capex.map(str::to_string),
            cached_roi_months: None,
        }
    }

    #[test]
    fn test_capex_total_sums_numeric_entries() {
        let b = parse_capex_breakdown(Some(
            r#"{"screen": 2000, "installation": "500.50", "permits": "n/a", "misc": null}"#,
        ));
        assert_eq!(b.total, dec!(2500.50));
        assert_eq!(b.lines.len(), 4);
        assert!(b
            .lines
            .iter()
            .any(|l| l.category == "permits" && l.amount == Decimal::ZERO));
    }

    #[test]
    fn test_capex_total_is_zero_for_bad_blobs() {
        for blob in [None, Some(""), Some("   "), Some("{"), Some("[1, 2]"), Some("42"), Some("{}")] {
            assert_eq!(parse_capex_breakdown(blob).total, Decimal::ZERO, "{:?}", blob);
        }
        assert_eq!(
            compute_capex_total(&asset(dec!(1), dec!(0), Some("garbage"))),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_roi_reference_scenario() {
        let a = asset(
            dec!(10000),
            dec!(6000),
            Some(r#"{"screen": 2000, "installation": 500}"#),
        );
        let roi = compute_roi(&a, Decimal::ZERO);
        assert_eq!(roi.capex, dec!(2500));
        assert_eq!(roi.monthly_profit, dec!(4000));
        assert_relative_eq!(roi.roi_months, 0.625, epsilon = 1e-9);
        // 4000 / 2500 x 1200
        assert_relative_eq!(roi.roi_percentage, 1920.0, epsilon = 1e-9);
        assert_eq!(roi.recommendation, RoiStatus::ExcellentInvestment);

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            compute_break_even(&a, today),
            BreakEven::Projected {
                months: 1,
                date: NaiveDate::from_ymd_opt(2026, 11, 19).unwrap(),
                status: BreakEvenStatus::Optimal,
            }
        );
    }

    #[test]
    fn test_roi_not_profitable() {
        let capex = Some(r#"{"screen": 2000}"#);
        for a in [
            asset(dec!(5000), dec!(5000), capex),
            asset(dec!(1000), dec!(5000), capex),
            asset(dec!(9000), dec!(1000), None),
            asset(dec!(9000), dec!(1000), Some(r#"{"refund": -10}"#)),
        ] {
            let roi = compute_roi(&a, dec!(100));
            assert_eq!(roi.recommendation, RoiStatus::NotProfitable);
            assert!(!roi.is_bounded());
            assert_eq!(roi.roi_percentage, 0.0);
        }
    }

    #[test]
    fn test_roi_long_payback() {
        let a = asset(dec!(1500), dec!(1000), Some(r#"{"screen": 15000}"#));
        let roi = compute_roi(&a, Decimal::ZERO);
        assert_relative_eq!(roi.roi_months, 30.0);
        assert_eq!(roi.recommendation, RoiStatus::EvaluateProfitabilityImprovement);

        let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        match compute_break_even(&a, today) {
            BreakEven::Projected { months, date, status } => {
                assert_eq!(months, 30);
                assert_eq!(date, NaiveDate::from_ymd_opt(2028, 7, 31).unwrap());
                assert_eq!(status, BreakEvenStatus::Extended);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_break_even_without_profit() {
        let a = asset(dec!(100), dec!(200), Some(r#"{"screen": 1000}"#));
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(matches!(
            compute_break_even(&a, today),
            BreakEven::NotApplicable { .. }
        ));
    }

    #[test]
    fn test_roi_impact_and_cached_projection() {
        let a = asset(dec!(10000), dec!(6000), Some(r#"{"screen": 2500}"#));
        let impact = compute_roi_impact(&a, dec!(1500));
        assert_relative_eq!(impact.before.roi_months, 0.625);
        assert_relative_eq!(impact.after.roi_months, 1.0);
        assert_relative_eq!(impact.delta_months.unwrap(), 0.375);

        assert_relative_eq!(projected_cached_roi(&a, dec!(1500)).unwrap(), 1.0);

        let losing = asset(dec!(100), dec!(200), Some(r#"{"screen": 2500}"#));
        assert!(projected_cached_roi(&losing, dec!(1500)).is_none());
        assert!(compute_roi_impact(&losing, dec!(1500)).delta_months.is_none());
    }

    #[test]
    fn test_tco_five_year() {
        assert_eq!(tco_five_year(dec!(2500), dec!(6000)), dec!(362500));
        assert_eq!(tco_five_year(Decimal::MAX, dec!(6000)), Decimal::MAX);
        assert_eq!(tco_five_year(dec!(1), Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_razor_thin_profit_on_huge_capex_is_unbounded() {
        // 1e19 / 1e-10 does not fit in a decimal
        let a = asset(
            dec!(6000.0000000001),
            dec!(6000),
            Some(r#"{"screen": 1e19}"#),
        );
        let roi = compute_roi(&a, Decimal::ZERO);
        assert!(!roi.is_bounded());
        assert_eq!(roi.recommendation, RoiStatus::EvaluateProfitabilityImprovement);
        assert!(roi.roi_percentage.is_finite());
        assert!(projected_cached_roi(&a, dec!(100)).is_none());
        assert!(compute_roi_impact(&a, dec!(100)).delta_months.is_none());

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(matches!(
            compute_break_even(&a, today),
            BreakEven::NotApplicable { .. }
        ));
    }

    #[test]
    fn test_unbounded_roi_survives_json() {
        let a = asset(dec!(100), dec!(200), Some(r#"{"screen": 1000}"#));
        let roi = compute_roi(&a, Decimal::ZERO);
        let json = serde_json::to_value(&roi).unwrap();
        assert!(json["roi_months"].is_null());
        let back: RoiAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(back, roi);
    }

    #[test]
    fn test_capex_total_saturates() {
        let b = parse_capex_breakdown(Some(r#"{"a": 7e28, "b": 7e28}"#));
        assert_eq!(b.total, Decimal::MAX);
    }
}
