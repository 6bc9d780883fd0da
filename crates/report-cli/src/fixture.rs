use anyhow::{Context, Result};
use screen_core::{Asset, ExpenseRecord, NewMaintenance};
use serde::Deserialize;
use std::path::Path;

/// Seed data accepted by `report-cli import`
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    /// Recorded through the service so costs and cached ROI are computed
    #[serde(default)]
    pub maintenance: Vec<NewMaintenance>,
}

impl Fixture {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid fixture JSON")
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let body = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&body)
    }
}

pub async fn load_request(path: &Path) -> Result<NewMaintenance> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("invalid maintenance request in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use screen_core::{AssetStatus, MaintenanceType};

    #[test]
    fn test_sample_fixture_parses() {
        let fixture = Fixture::from_json_str(include_str!("../fixtures/sample.json")).unwrap();
        assert_eq!(fixture.assets.len(), 3);
        assert_eq!(fixture.expenses.len(), 4);
        assert_eq!(fixture.maintenance.len(), 2);

        let bodega = &fixture.assets[2];
        assert_eq!(bodega.status, AssetStatus::Maintenance);
        assert!(bodega.install_date.is_none());
        assert!(bodega.capex_breakdown.is_none());

        let visit = &fixture.maintenance[1];
        assert_eq!(visit.maintenance_type, MaintenanceType::Corrective);
        assert_eq!(visit.cost_input.materials.len(), 2);
        assert_eq!(visit.description, None);
    }

    #[test]
    fn test_empty_fixture() {
        let fixture = Fixture::from_json_str("{}").unwrap();
        assert!(fixture.assets.is_empty());
        assert!(Fixture::from_json_str("[]").is_err());
    }
}
