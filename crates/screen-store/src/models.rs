//! Row shapes as stored in SQLite and their conversion into domain records.
//!
//! Conversions are lenient: a malformed column degrades to a default instead of
//! failing the whole query.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use screen_core::{
    Asset, AssetStatus, ExpenseRecord, MaintenanceCost, MaintenanceEvent, MaintenanceType,
    MaterialUsage, TechnicianCategory,
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssetRow {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub install_date: Option<String>,
    pub monthly_revenue: Option<String>,
    pub monthly_expense: Option<String>,
    pub uptime_percentage: Option<f64>,
    pub status: Option<String>,
    pub capex_breakdown: Option<String>,
    pub roi_months: Option<f64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MaintenanceRow {
    pub id: i64,
    pub asset_id: String,
    pub date: String,
    pub maintenance_type: String,
    pub labor_hours: f64,
    pub technician: String,
    pub materials: String,
    pub services: String,
    pub travel_distance: f64,
    pub description: Option<String>,
    pub labor_cost: String,
    pub materials_cost: String,
    pub additional_cost: String,
    pub travel_cost: String,
    pub total_cost: String,
    pub hourly_rate: String,
    pub travel_units: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExpenseRow {
    pub asset_id: String,
    pub month: String,
    pub total_amount: String,
}

/// Decimal from a TEXT column; garbage reads as zero
pub(crate) fn parse_money(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Decimal::ZERO;
    };
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
        .unwrap_or_default()
}

/// `YYYY-MM-DD`, also accepting a bare `YYYY-MM` and a trailing time component
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .ok()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl From<AssetRow> for Asset {
    fn from(row: AssetRow) -> Self {
        Asset {
            install_date: row.install_date.as_deref().and_then(parse_date),
            monthly_revenue: parse_money(row.monthly_revenue.as_deref()),
            monthly_expense: parse_money(row.monthly_expense.as_deref()),
            uptime_percentage: row.uptime_percentage.filter(|u| u.is_finite()),
            status: row
                .status
                .as_deref()
                .map(AssetStatus::parse_lenient)
                .unwrap_or_default(),
            capex_breakdown: row.capex_breakdown,
            cached_roi_months: row.roi_months.filter(|r| r.is_finite()),
            location: row.location.unwrap_or_default(),
            name: row.name,
            id: row.id,
        }
    }
}

impl MaintenanceRow {
    /// None when the date or type column cannot be understood
    pub fn into_event(self) -> Option<MaintenanceEvent> {
        let date = parse_date(&self.date)?;
        let maintenance_type = MaintenanceType::parse(&self.maintenance_type)?;
        let materials: Vec<MaterialUsage> =
            serde_json::from_str(&self.materials).unwrap_or_default();
        let services: Vec<String> = serde_json::from_str(&self.services).unwrap_or_default();

        Some(MaintenanceEvent {
            id: Some(self.id),
            asset_id: self.asset_id,
            date,
            maintenance_type,
            labor_hours: self.labor_hours,
            technician: TechnicianCategory::parse_or_default(Some(&self.technician)),
            materials,
            services,
            travel_distance: self.travel_distance,
            description: self.description,
            cost: MaintenanceCost {
                labor_cost: parse_money(Some(&self.labor_cost)),
                materials_cost: parse_money(Some(&self.materials_cost)),
                additional_cost: parse_money(Some(&self.additional_cost)),
                travel_cost: parse_money(Some(&self.travel_cost)),
                total_cost: parse_money(Some(&self.total_cost)),
                hourly_rate: parse_money(Some(&self.hourly_rate)),
                travel_units: u32::try_from(self.travel_units).unwrap_or(0),
            },
        })
    }
}

impl ExpenseRow {
    pub fn into_record(self) -> Option<ExpenseRecord> {
        Some(ExpenseRecord {
            month: parse_date(&self.month)?,
            total_amount: parse_money(Some(&self.total_amount)),
            asset_id: self.asset_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_money_is_lenient() {
        assert_eq!(parse_money(Some("1234.50")), dec!(1234.50));
        assert_eq!(parse_money(Some(" 10 ")), dec!(10));
        assert_eq!(parse_money(Some("abc")), Decimal::ZERO);
        assert_eq!(parse_money(None), Decimal::ZERO);
    }

    #[test]
    fn test_parse_date_variants() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(parse_date("2026-03-01"), Some(d));
        assert_eq!(parse_date("2026-03"), Some(d));
        assert_eq!(parse_date("2026-03-01 10:30:00"), Some(d));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_asset_row_defaults() {
        let asset: Asset = AssetRow {
            id: "SCR-1".to_string(),
            name: "Plaza".to_string(),
            location: None,
            install_date: Some("not a date".to_string()),
            monthly_revenue: Some("9000".to_string()),
            monthly_expense: None,
            uptime_percentage: Some(f64::NAN),
            status: Some("online".to_string()),
            capex_breakdown: None,
            roi_months: None,
        }
        .into();
        assert_eq!(asset.install_date, None);
        assert_eq!(asset.monthly_revenue, dec!(9000));
        assert_eq!(asset.monthly_expense, Decimal::ZERO);
        assert_eq!(asset.uptime_percentage, None);
        assert_eq!(asset.status, AssetStatus::Active);
    }
}
