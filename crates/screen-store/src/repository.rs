use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use screen_core::{
    Asset, AssetStore, ExpenseRecord, ExpenseStore, MaintenanceEvent, MaintenanceStore,
};

use crate::db::ScreenDb;
use crate::models::{format_date, AssetRow, ExpenseRow, MaintenanceRow};

const ASSET_COLUMNS: &str = "id, name, location, install_date, monthly_revenue, monthly_expense, \
     uptime_percentage, status, capex_breakdown, roi_months";

const MAINTENANCE_COLUMNS: &str = "id, asset_id, date, maintenance_type, labor_hours, technician, \
     materials, services, travel_distance, description, labor_cost, materials_cost, \
     additional_cost, travel_cost, total_cost, hourly_rate, travel_units";

impl ScreenDb {
    /// Insert or replace an asset, keeping nothing from a previous version
    pub async fn upsert_asset(&self, asset: &Asset) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assets (id, name, location, install_date, monthly_revenue, monthly_expense,
                                uptime_percentage, status, capex_breakdown, roi_months, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                location = excluded.location,
                install_date = excluded.install_date,
                monthly_revenue = excluded.monthly_revenue,
                monthly_expense = excluded.monthly_expense,
                uptime_percentage = excluded.uptime_percentage,
                status = excluded.status,
                capex_breakdown = excluded.capex_breakdown,
                roi_months = excluded.roi_months,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&asset.id)
        .bind(&asset.name)
        .bind(&asset.location)
        .bind(asset.install_date.map(format_date))
        .bind(asset.monthly_revenue.to_string())
        .bind(asset.monthly_expense.to_string())
        .bind(asset.uptime_percentage)
        .bind(asset.status.as_str())
        .bind(&asset.capex_breakdown)
        .bind(asset.cached_roi_months.filter(|r| r.is_finite()))
        .execute(self.pool())
        .await
        .with_context(|| format!("failed to save asset {}", asset.id))?;

        Ok(())
    }

    /// One total per asset and month; a second write for the same month replaces the first
    pub async fn insert_expense_record(&self, record: &ExpenseRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO monthly_expenses (asset_id, month, total_amount)
            VALUES (?, ?, ?)
            ON CONFLICT(asset_id, month) DO UPDATE SET total_amount = excluded.total_amount
            "#,
        )
        .bind(&record.asset_id)
        .bind(record.month.format("%Y-%m").to_string())
        .bind(record.total_amount.to_string())
        .execute(self.pool())
        .await
        .with_context(|| format!("failed to save expense record for {}", record.asset_id))?;

        Ok(())
    }
}

#[async_trait]
impl AssetStore for ScreenDb {
    async fn get_asset(&self, asset_id: &str) -> Result<Option<Asset>> {
        let row = sqlx::query_as::<_, AssetRow>(&format!(
            "SELECT {} FROM assets WHERE id = ?",
            ASSET_COLUMNS
        ))
        .bind(asset_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Asset::from))
    }

    async fn list_assets(&self) -> Result<Vec<Asset>> {
        let rows = sqlx::query_as::<_, AssetRow>(&format!(
            "SELECT {} FROM assets ORDER BY id",
            ASSET_COLUMNS
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Asset::from).collect())
    }

    async fn update_asset_roi(&self, asset_id: &str, roi_months: f64) -> Result<()> {
        if !roi_months.is_finite() {
            bail!("refusing to cache a non-finite ROI for {}", asset_id);
        }
        let result = sqlx::query(
            "UPDATE assets SET roi_months = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(roi_months)
        .bind(asset_id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            bail!("asset {} not found", asset_id);
        }
        Ok(())
    }
}

#[async_trait]
impl MaintenanceStore for ScreenDb {
    async fn list_maintenance_events(&self, asset_id: &str) -> Result<Vec<MaintenanceEvent>> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(&format!(
            "SELECT {} FROM maintenance_events WHERE asset_id = ? ORDER BY date DESC, id DESC",
            MAINTENANCE_COLUMNS
        ))
        .bind(asset_id)
        .fetch_all(self.pool())
        .await?;

        let total = rows.len();
        let events: Vec<MaintenanceEvent> =
            rows.into_iter().filter_map(MaintenanceRow::into_event).collect();
        if events.len() < total {
            tracing::warn!(
                "skipped {} unreadable maintenance rows for {}",
                total - events.len(),
                asset_id
            );
        }
        Ok(events)
    }

    async fn insert_maintenance_event(&self, event: &MaintenanceEvent) -> Result<MaintenanceEvent> {
        let materials = serde_json::to_string(&event.materials)?;
        let services = serde_json::to_string(&event.services)?;
        let cost = &event.cost;

        let result = sqlx::query(
            r#"
            INSERT INTO maintenance_events (asset_id, date, maintenance_type, labor_hours, technician,
                                            materials, services, travel_distance, description,
                                            labor_cost, materials_cost, additional_cost, travel_cost,
                                            total_cost, hourly_rate, travel_units)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.asset_id)
        .bind(format_date(event.date))
        .bind(event.maintenance_type.as_str())
        .bind(event.labor_hours)
        .bind(event.technician.as_str())
        .bind(materials)
        .bind(services)
        .bind(event.travel_distance)
        .bind(&event.description)
        .bind(cost.labor_cost.to_string())
        .bind(cost.materials_cost.to_string())
        .bind(cost.additional_cost.to_string())
        .bind(cost.travel_cost.to_string())
        .bind(cost.total_cost.to_string())
        .bind(cost.hourly_rate.to_string())
        .bind(i64::from(cost.travel_units))
        .execute(self.pool())
        .await
        .with_context(|| format!("failed to save maintenance event for {}", event.asset_id))?;

        let mut stored = event.clone();
        stored.id = Some(result.last_insert_rowid());
        Ok(stored)
    }
}

#[async_trait]
impl ExpenseStore for ScreenDb {
    async fn list_expense_records(&self, asset_id: &str) -> Result<Vec<ExpenseRecord>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            "SELECT asset_id, month, total_amount FROM monthly_expenses WHERE asset_id = ? ORDER BY month DESC",
        )
        .bind(asset_id)
        .fetch_all(self.pool())
        .await?;

        let total = rows.len();
        let records: Vec<ExpenseRecord> =
            rows.into_iter().filter_map(ExpenseRow::into_record).collect();
        if records.len() < total {
            tracing::warn!(
                "skipped {} unreadable expense rows for {}",
                total - records.len(),
                asset_id
            );
        }
        Ok(records)
    }
}
