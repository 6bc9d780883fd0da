use chrono::{DateTime, NaiveDate, Utc};
use cost_calculator::CostCalculator;
use dashmap::DashMap;
use report_assembler::{
    build_fleet_overview, FleetOverview, ReportAssembler, ReportDocument, ReportOptions,
};
use screen_core::{
    sanitize_asset_id, Asset, AssetStore, ExpenseStore, MaintenanceStore, ReportError,
    ReportResult,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::renderer::ReportRenderer;

/// Where a rendered report ended up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHandle {
    pub asset_id: String,
    pub renderer: String,
    pub location: String,
    pub generated_at: DateTime<Utc>,
}

pub struct ReportService {
    pub(crate) assets: Arc<dyn AssetStore>,
    pub(crate) maintenance: Arc<dyn MaintenanceStore>,
    pub(crate) expenses: Arc<dyn ExpenseStore>,
    renderer: Arc<dyn ReportRenderer>,
    options: ReportOptions,
    /// Fixed reference date; None means "today" at each call
    pinned_date: Option<NaiveDate>,
    pub(crate) calculator: CostCalculator,
    /// One lock per asset so maintenance writes and ROI updates do not interleave
    asset_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ReportService {
    pub fn new(
        assets: Arc<dyn AssetStore>,
        maintenance: Arc<dyn MaintenanceStore>,
        expenses: Arc<dyn ExpenseStore>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            assets,
            maintenance,
            expenses,
            renderer,
            options: ReportOptions::default(),
            pinned_date: None,
            calculator: CostCalculator::default(),
            asset_locks: DashMap::new(),
        }
    }

    /// Wire a single store that serves all three record kinds
    pub fn from_store<S>(store: Arc<S>, renderer: Arc<dyn ReportRenderer>) -> Self
    where
        S: AssetStore + MaintenanceStore + ExpenseStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, renderer)
    }

    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_calculator(mut self, calculator: CostCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Pin the reference date used for break-even, recency and days online
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.pinned_date = Some(date);
        self
    }

    pub fn calculator(&self) -> &CostCalculator {
        &self.calculator
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.renderer_name()
    }

    fn assembler(&self) -> ReportAssembler {
        let as_of = self.pinned_date.unwrap_or_else(|| Utc::now().date_naive());
        ReportAssembler::new(self.options.clone().with_as_of(as_of))
    }

    pub(crate) fn lock_for(&self, asset_id: &str) -> Arc<Mutex<()>> {
        self.asset_locks
            .entry(asset_id.to_string())
            .or_default()
            .clone()
    }

    /// Drop the asset's lock entry once no writer holds or awaits it
    pub(crate) fn release_lock(&self, asset_id: &str) {
        self.asset_locks
            .remove_if(asset_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.asset_locks.len()
    }

    pub(crate) async fn require_asset(&self, asset_id: &str) -> ReportResult<Asset> {
        self.assets
            .get_asset(asset_id)
            .await
            .map_err(ReportError::Store)?
            .ok_or_else(|| ReportError::AssetNotFound(asset_id.to_string()))
    }

    /// Fetch an asset's records and assemble its report document
    pub async fn build_report(&self, raw_asset_id: &str) -> ReportResult<ReportDocument> {
        let asset_id = sanitize_asset_id(raw_asset_id);
        let asset = self.require_asset(&asset_id).await?;

        let (events, expenses) = tokio::try_join!(
            self.maintenance.list_maintenance_events(&asset_id),
            self.expenses.list_expense_records(&asset_id),
        )
        .map_err(ReportError::Store)?;

        Ok(self.assembler().assemble(&asset, &events, &expenses))
    }

    /// Build, render and return a handle to the rendered report
    pub async fn generate_report(&self, raw_asset_id: &str) -> ReportResult<ReportHandle> {
        let document = match self.build_report(raw_asset_id).await {
            Ok(doc) => doc,
            Err(e) => {
                if e.is_not_found() {
                    tracing::info!("Report unavailable: {}", e);
                } else {
                    tracing::error!("Report generation failed: {}", e);
                }
                return Err(e);
            }
        };

        let location = self
            .renderer
            .render(&document)
            .await
            .map_err(ReportError::Render)?;

        tracing::info!(
            "Rendered report for {} via {} -> {}",
            document.asset_id(),
            self.renderer.renderer_name(),
            location
        );

        Ok(ReportHandle {
            asset_id: document.asset_id().to_string(),
            renderer: self.renderer.renderer_name().to_string(),
            location,
            generated_at: document.footer.generated_at,
        })
    }

    pub async fn fleet_overview(&self) -> ReportResult<FleetOverview> {
        let assets = self.assets.list_assets().await.map_err(ReportError::Store)?;
        Ok(build_fleet_overview(&assets))
    }
}
