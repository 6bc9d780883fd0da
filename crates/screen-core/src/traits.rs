use anyhow::Result;
use async_trait::async_trait;

use crate::{Asset, ExpenseRecord, MaintenanceEvent};

// ---------------------------------------------------------------------------
// Record stores (external collaborators, injected into the orchestrator)
// ---------------------------------------------------------------------------

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Look up one asset (None if it does not exist)
    async fn get_asset(&self, id: &str) -> Result<Option<Asset>>;

    /// All assets, ordered by id
    async fn list_assets(&self) -> Result<Vec<Asset>>;

    /// Overwrite the cached ROI-in-months value of an asset
    async fn update_asset_roi(&self, id: &str, roi_months: f64) -> Result<()>;
}

#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    /// Maintenance history of an asset, newest first
    async fn list_maintenance_events(&self, asset_id: &str) -> Result<Vec<MaintenanceEvent>>;

    /// Persist a new event and return it as stored (with its id)
    async fn insert_maintenance_event(&self, event: &MaintenanceEvent) -> Result<MaintenanceEvent>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Monthly expense records of an asset, newest month first
    async fn list_expense_records(&self, asset_id: &str) -> Result<Vec<ExpenseRecord>>;
}
