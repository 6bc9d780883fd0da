//! Chart-ready data series. No rendering happens here.

use std::collections::BTreeMap;

use cost_calculator::CapexBreakdown;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use screen_core::{Asset, ExpenseRecord, MaintenanceEvent, MaintenanceType};
use serde::{Deserialize, Serialize};

use crate::format::ReportLocale;

/// Revenue against recorded monthly expenses, oldest month first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub revenue: Vec<Decimal>,
    pub expenses: Vec<Decimal>,
    pub net: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCount {
    /// `YYYY-MM`
    pub period: String,
    pub preventive: usize,
    pub corrective: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencySeries {
    pub preventive: usize,
    pub corrective: usize,
    pub by_period: Vec<PeriodCount>,
}

/// Capex category shares in percent of the total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownSeries {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    pub shares: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub trend: TrendSeries,
    pub maintenance_frequency: FrequencySeries,
    pub cost_breakdown: CostBreakdownSeries,
}

pub fn build_trend(asset: &Asset, expenses: &[ExpenseRecord], locale: ReportLocale) -> TrendSeries {
    let mut ordered: Vec<&ExpenseRecord> = expenses.iter().collect();
    // Stable: records sharing a month keep their supplied order
    ordered.sort_by_key(|r| r.month);

    let revenue = asset.revenue();
    let mut series = TrendSeries::default();
    for record in ordered {
        series.labels.push(locale.month_label(record.month));
        series.revenue.push(revenue);
        series.expenses.push(record.total_amount);
        series.net.push(revenue.saturating_sub(record.total_amount));
    }
    series
}

pub fn build_frequency(events: &[MaintenanceEvent]) -> FrequencySeries {
    let mut periods: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    let mut series = FrequencySeries::default();

    for event in events {
        let slot = periods
            .entry(event.date.format("%Y-%m").to_string())
            .or_insert((0, 0));
        match event.maintenance_type {
            MaintenanceType::Preventive => {
                series.preventive += 1;
                slot.0 += 1;
            }
            MaintenanceType::Corrective => {
                series.corrective += 1;
                slot.1 += 1;
            }
        }
    }

    series.by_period = periods
        .into_iter()
        .map(|(period, (preventive, corrective))| PeriodCount {
            period,
            preventive,
            corrective,
        })
        .collect();
    series
}

pub fn build_cost_breakdown(capex: &CapexBreakdown) -> CostBreakdownSeries {
    let total = capex.total;
    let mut series = CostBreakdownSeries::default();
    for line in &capex.lines {
        let share = if total > Decimal::ZERO {
            line.amount
                .checked_div(total)
                .and_then(|ratio| ratio.to_f64())
                .map(|ratio| ratio * 100.0)
                .unwrap_or(0.0)
        } else {
            0.0
        };
        series.labels.push(line.category.clone());
        series.values.push(line.amount);
        series.shares.push(share);
    }
    series
}

pub fn build_chart_series(
    asset: &Asset,
    events: &[MaintenanceEvent],
    expenses: &[ExpenseRecord],
    capex: &CapexBreakdown,
    locale: ReportLocale,
) -> ChartSeries {
    ChartSeries {
        trend: build_trend(asset, expenses, locale),
        maintenance_frequency: build_frequency(events),
        cost_breakdown: build_cost_breakdown(capex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use cost_calculator::parse_capex_breakdown;
    use rust_decimal_macros::dec;
    use screen_core::{AssetStatus, MaintenanceCost, TechnicianCategory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(month: NaiveDate, amount: Decimal) -> ExpenseRecord {
        ExpenseRecord {
            asset_id: "SCR-1".to_string(),
            month,
            total_amount: amount,
        }
    }

    fn event(on: NaiveDate, kind: MaintenanceType) -> MaintenanceEvent {
        MaintenanceEvent {
            id: None,
            asset_id: "SCR-1".to_string(),
            date: on,
            maintenance_type: kind,
            labor_hours: 1.0,
            technician: TechnicianCategory::RegularTechnician,
            materials: vec![],
            services: vec![],
            travel_distance: 0.0,
            description: None,
            cost: MaintenanceCost::default(),
        }
    }

    #[test]
    fn test_trend_is_oldest_first() {
        let asset = Asset {
            id: "SCR-1".to_string(),
            name: "Centro".to_string(),
            location: String::new(),
            install_date: None,
            monthly_revenue: dec!(8000),
            monthly_expense: dec!(5000),
            uptime_percentage: None,
            status: AssetStatus::Active,
            capex_breakdown: None,
            cached_roi_months: None,
        };
        let expenses = vec![
            expense(date(2026, 3, 1), dec!(5200)),
            expense(date(2026, 1, 1), dec!(4800)),
            expense(date(2026, 2, 1), dec!(5000)),
        ];
        let trend = build_trend(&asset, &expenses, ReportLocale::EnUs);
        assert_eq!(trend.labels, vec!["Jan 2026", "Feb 2026", "Mar 2026"]);
        assert_eq!(trend.expenses, vec![dec!(4800), dec!(5000), dec!(5200)]);
        assert_eq!(trend.net, vec![dec!(3200), dec!(3000), dec!(2800)]);
        assert!(trend.revenue.iter().all(|r| *r == dec!(8000)));
    }

    #[test]
    fn test_frequency_buckets_by_type_and_month() {
        let events = vec![
            event(date(2026, 3, 20), MaintenanceType::Corrective),
            event(date(2026, 3, 2), MaintenanceType::Preventive),
            event(date(2026, 1, 9), MaintenanceType::Corrective),
        ];
        let freq = build_frequency(&events);
        assert_eq!(freq.preventive, 1);
        assert_eq!(freq.corrective, 2);
        assert_eq!(
            freq.by_period,
            vec![
                PeriodCount {
                    period: "2026-01".to_string(),
                    preventive: 0,
                    corrective: 1
                },
                PeriodCount {
                    period: "2026-03".to_string(),
                    preventive: 1,
                    corrective: 1
                },
            ]
        );
    }

    #[test]
    fn test_cost_breakdown_shares() {
        let capex = parse_capex_breakdown(Some(r#"{"screen": 2000, "installation": 500}"#));
        let series = build_cost_breakdown(&capex);
        let idx = series.labels.iter().position(|l| l == "screen").unwrap();
        assert_relative_eq!(series.shares[idx], 80.0);
        assert_relative_eq!(series.shares.iter().sum::<f64>(), 100.0);

        let empty = build_cost_breakdown(&CapexBreakdown::default());
        assert!(empty.labels.is_empty());
    }
}
