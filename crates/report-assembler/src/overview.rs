//! Fleet-wide descriptive table across every screen.

use cost_calculator::compute_capex_total;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use screen_core::{Asset, AssetStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub status: AssetStatus,
    pub revenue: Decimal,
    pub opex: Decimal,
    pub margin: Decimal,
    pub capex: Decimal,
    /// Capex / margin; None when the screen makes no profit
    pub roi_months: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetTotals {
    pub capex: Decimal,
    pub revenue: Decimal,
    pub opex: Decimal,
    pub margin: Decimal,
    pub average_roi_months: Option<f64>,
    pub asset_count: usize,
    pub active_count: usize,
    /// Screens losing money or not in active service
    pub alert_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetOverview {
    pub rows: Vec<FleetRow>,
    pub totals: FleetTotals,
}

fn payback_months(capex: Decimal, margin: Decimal) -> Option<f64> {
    if margin > Decimal::ZERO {
        capex.checked_div(margin).and_then(|months| months.to_f64())
    } else {
        None
    }
}

pub fn build_fleet_overview(assets: &[Asset]) -> FleetOverview {
    let mut totals = FleetTotals {
        asset_count: assets.len(),
        ..Default::default()
    };

    let rows: Vec<FleetRow> = assets
        .iter()
        .map(|asset| {
            let revenue = asset.revenue();
            let opex = asset.expense();
            let margin = asset.monthly_profit();
            let capex = compute_capex_total(asset);

            totals.capex = totals.capex.saturating_add(capex);
            totals.revenue = totals.revenue.saturating_add(revenue);
            totals.opex = totals.opex.saturating_add(opex);
            totals.margin = totals.margin.saturating_add(margin);
            if asset.status == AssetStatus::Active {
                totals.active_count += 1;
            }
            if margin < Decimal::ZERO || asset.status != AssetStatus::Active {
                totals.alert_count += 1;
            }

            FleetRow {
                id: asset.id.clone(),
                name: asset.name.clone(),
                location: asset.location.clone(),
                status: asset.status,
                revenue,
                opex,
                margin,
                capex,
                roi_months: payback_months(capex, margin),
            }
        })
        .collect();

    totals.average_roi_months = payback_months(totals.capex, totals.margin);

    FleetOverview { rows, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn asset(id: &str, revenue: Decimal, expense: Decimal, status: AssetStatus, capex: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: format!("Screen {}", id),
            location: "CDMX".to_string(),
            install_date: None,
            monthly_revenue: revenue,
            monthly_expense: expense,
            uptime_percentage: None,
            status,
            capex_breakdown: Some(capex.to_string()),
            cached_roi_months: None,
        }
    }

    #[test]
    fn test_fleet_totals_and_alerts() {
        let fleet = vec![
            asset("A", dec!(10000), dec!(6000), AssetStatus::Active, r#"{"screen": 2500}"#),
            asset("B", dec!(3000), dec!(4000), AssetStatus::Active, r#"{"screen": 5000}"#),
            asset("C", dec!(7000), dec!(2000), AssetStatus::Maintenance, r#"{"screen": 2500}"#),
        ];
        let overview = build_fleet_overview(&fleet);

        assert_eq!(overview.rows.len(), 3);
        assert_relative_eq!(overview.rows[0].roi_months.unwrap(), 0.625);
        assert!(overview.rows[1].roi_months.is_none());

        let t = &overview.totals;
        assert_eq!(t.capex, dec!(10000));
        assert_eq!(t.revenue, dec!(20000));
        assert_eq!(t.opex, dec!(12000));
        assert_eq!(t.margin, dec!(8000));
        assert_relative_eq!(t.average_roi_months.unwrap(), 1.25);
        assert_eq!(t.asset_count, 3);
        assert_eq!(t.active_count, 2);
        assert_eq!(t.alert_count, 2);
    }

    #[test]
    fn test_empty_fleet() {
        let overview = build_fleet_overview(&[]);
        assert!(overview.rows.is_empty());
        assert_eq!(overview.totals.asset_count, 0);
        assert!(overview.totals.average_roi_months.is_none());
    }
}
