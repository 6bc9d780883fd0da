use cost_calculator::{compute_roi_impact, projected_cached_roi, RoiImpact};
use screen_core::{sanitize_asset_id, MaintenanceEvent, NewMaintenance, ReportError, ReportResult};
use serde::{Deserialize, Serialize};

use crate::service::ReportService;

/// Result of recording one maintenance intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceOutcome {
    /// The event as stored, cost snapshot included
    pub event: MaintenanceEvent,
    pub impact: RoiImpact,
    /// Cached ROI written back onto the asset; None when left untouched
    pub cached_roi_months: Option<f64>,
}

impl ReportService {
    /// Cost and persist a maintenance event, then refresh the asset's cached ROI.
    ///
    /// Writes for the same asset are serialised. A failure to refresh the cached ROI
    /// is logged and does not fail the call; the event is already stored by then.
    pub async fn record_maintenance(&self, request: NewMaintenance) -> ReportResult<MaintenanceOutcome> {
        let asset_id = sanitize_asset_id(&request.asset_id);
        // Unknown ids never reach the lock table
        self.require_asset(&asset_id).await?;

        let lock = self.lock_for(&asset_id);
        let outcome = {
            let _guard = lock.lock().await;
            self.record_locked(asset_id.clone(), request).await
        };
        drop(lock);
        self.release_lock(&asset_id);
        outcome
    }

    async fn record_locked(
        &self,
        asset_id: String,
        request: NewMaintenance,
    ) -> ReportResult<MaintenanceOutcome> {
        // Re-read under the lock so the impact sees the latest state
        let asset = self.require_asset(&asset_id).await?;
        let cost = self.calculator.compute_maintenance_cost(&request.cost_input);
        let impact = compute_roi_impact(&asset, cost.total_cost);

        let event = MaintenanceEvent::from_request(
            NewMaintenance {
                asset_id: asset_id.clone(),
                ..request
            },
            cost,
        );
        let stored = self
            .maintenance
            .insert_maintenance_event(&event)
            .await
            .map_err(ReportError::Store)?;

        tracing::info!(
            "Recorded {} maintenance for {} on {}: total {}",
            stored.maintenance_type,
            asset_id,
            stored.date,
            stored.cost.total_cost
        );

        let cached_roi_months = self.refresh_cached_roi(&asset_id, &stored).await;

        Ok(MaintenanceOutcome {
            event: stored,
            impact,
            cached_roi_months,
        })
    }

    /// Re-read the asset and write back (capex + event cost) / monthly profit.
    async fn refresh_cached_roi(&self, asset_id: &str, event: &MaintenanceEvent) -> Option<f64> {
        let asset = match self.assets.get_asset(asset_id).await {
            Ok(Some(asset)) => asset,
            Ok(None) => {
                tracing::warn!("Asset {} vanished before its cached ROI could be refreshed", asset_id);
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to re-read asset {} for ROI refresh: {}", asset_id, e);
                return None;
            }
        };

        let Some(roi_months) = projected_cached_roi(&asset, event.cost.total_cost) else {
            tracing::debug!("Asset {} is not profitable, cached ROI left as is", asset_id);
            return None;
        };

        match self.assets.update_asset_roi(asset_id, roi_months).await {
            Ok(()) => {
                tracing::debug!("Cached ROI for {} set to {:.2} months", asset_id, roi_months);
                Some(roi_months)
            }
            Err(e) => {
                tracing::warn!("Failed to update cached ROI for {}: {}", asset_id, e);
                None
            }
        }
    }
}
