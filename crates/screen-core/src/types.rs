use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a deployed screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Inactive,
    Maintenance,
    Retired,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Inactive => "inactive",
            AssetStatus::Maintenance => "maintenance",
            AssetStatus::Retired => "retired",
            AssetStatus::Unknown => "unknown",
        }
    }

    /// Lenient parse used for values coming back from storage.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" | "online" => AssetStatus::Active,
            "inactive" | "offline" => AssetStatus::Inactive,
            "maintenance" => AssetStatus::Maintenance,
            "retired" => AssetStatus::Retired,
            _ => AssetStatus::Unknown,
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deployed digital display (screen) and its static financial attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub install_date: Option<NaiveDate>,
    #[serde(default)]
    pub monthly_revenue: Decimal,
    #[serde(default)]
    pub monthly_expense: Decimal,
    #[serde(default)]
    pub uptime_percentage: Option<f64>,
    #[serde(default)]
    pub status: AssetStatus,
    /// Raw capex JSON blob (category -> amount). Parsed defensively by the calculator.
    #[serde(default)]
    pub capex_breakdown: Option<String>,
    /// Cached ROI in months, rewritten after every maintenance event.
    #[serde(default)]
    pub cached_roi_months: Option<f64>,
}

impl Asset {
    /// Revenue clamped to the non-negative domain.
    pub fn revenue(&self) -> Decimal {
        self.monthly_revenue.max(Decimal::ZERO)
    }

    /// Operating expense clamped to the non-negative domain.
    pub fn expense(&self) -> Decimal {
        self.monthly_expense.max(Decimal::ZERO)
    }

    /// Revenue minus expense; may be zero or negative.
    pub fn monthly_profit(&self) -> Decimal {
        self.revenue() - self.expense()
    }
}

/// Kind of maintenance intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    Preventive,
    Corrective,
}

impl MaintenanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceType::Preventive => "preventive",
            MaintenanceType::Corrective => "corrective",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preventive" | "preventivo" | "preventiva" => Some(MaintenanceType::Preventive),
            "corrective" | "correctivo" | "correctiva" => Some(MaintenanceType::Corrective),
            _ => None,
        }
    }
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who performed the work; drives the hourly labour rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TechnicianCategory {
    #[default]
    RegularTechnician,
    SpecializedTechnician,
    Engineer,
    Contractor,
}

impl TechnicianCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechnicianCategory::RegularTechnician => "regular_technician",
            TechnicianCategory::SpecializedTechnician => "specialized_technician",
            TechnicianCategory::Engineer => "engineer",
            TechnicianCategory::Contractor => "contractor",
        }
    }

    /// Parse a category name; anything unrecognised (or absent) is a regular technician.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match value.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "specialized_technician" | "specialized" | "tecnico_especializado" => {
                TechnicianCategory::SpecializedTechnician
            }
            "engineer" | "ingeniero" => TechnicianCategory::Engineer,
            "contractor" | "contratista" => TechnicianCategory::Contractor,
            _ => TechnicianCategory::RegularTechnician,
        }
    }
}

impl std::fmt::Display for TechnicianCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additional service fee flags understood by the default catalog.
pub mod services {
    pub const RELOCATION: &str = "relocation";
    pub const SPECIAL_TOOLING: &str = "special_tooling";
    pub const CONSUMABLES: &str = "consumables";
}

/// A material consumed during maintenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub kind: String,
    /// Defaults to one unit when omitted.
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl MaterialUsage {
    pub fn new(kind: impl Into<String>, quantity: f64) -> Self {
        Self {
            kind: kind.into(),
            quantity: Some(quantity),
        }
    }
}

/// Raw operator inputs for costing a maintenance intervention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCostInput {
    #[serde(default)]
    pub labor_hours: f64,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub materials: Vec<MaterialUsage>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub travel_distance: f64,
}

/// Itemised cost of one maintenance event, snapshotted at creation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCost {
    pub labor_cost: Decimal,
    pub materials_cost: Decimal,
    pub additional_cost: Decimal,
    pub travel_cost: Decimal,
    pub total_cost: Decimal,
    /// Hourly rate actually applied to the labour hours
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub travel_units: u32,
}

/// Operator request to record a maintenance intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaintenance {
    pub asset_id: String,
    pub date: NaiveDate,
    pub maintenance_type: MaintenanceType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub cost_input: MaintenanceCostInput,
}

/// A persisted maintenance event. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    #[serde(default)]
    pub id: Option<i64>,
    pub asset_id: String,
    pub date: NaiveDate,
    pub maintenance_type: MaintenanceType,
    pub labor_hours: f64,
    pub technician: TechnicianCategory,
    #[serde(default)]
    pub materials: Vec<MaterialUsage>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub travel_distance: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub cost: MaintenanceCost,
}

impl MaintenanceEvent {
    /// Build the record to persist from an operator request and its computed cost.
    pub fn from_request(request: NewMaintenance, cost: MaintenanceCost) -> Self {
        let technician =
            TechnicianCategory::parse_or_default(request.cost_input.technician.as_deref());
        Self {
            id: None,
            asset_id: request.asset_id,
            date: request.date,
            maintenance_type: request.maintenance_type,
            labor_hours: request.cost_input.labor_hours.max(0.0),
            technician,
            materials: request.cost_input.materials,
            services: request.cost_input.services,
            travel_distance: request.cost_input.travel_distance.max(0.0),
            description: request.description,
            cost,
        }
    }
}

/// Total operating spend for one asset in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub asset_id: String,
    /// Any day within the month; only year and month are meaningful.
    pub month: NaiveDate,
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_technician_fallback() {
        assert_eq!(
            TechnicianCategory::parse_or_default(Some("Engineer")),
            TechnicianCategory::Engineer
        );
        assert_eq!(
            TechnicianCategory::parse_or_default(Some("specialized technician")),
            TechnicianCategory::SpecializedTechnician
        );
        assert_eq!(
            TechnicianCategory::parse_or_default(Some("wizard")),
            TechnicianCategory::RegularTechnician
        );
        assert_eq!(
            TechnicianCategory::parse_or_default(None),
            TechnicianCategory::RegularTechnician
        );
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: AssetStatus = serde_json::from_str("\"decommissioning\"").unwrap();
        assert_eq!(status, AssetStatus::Unknown);
        assert_eq!(AssetStatus::parse_lenient("Online"), AssetStatus::Active);
    }

    #[test]
    fn test_monthly_profit_clamps_negative_inputs() {
        let asset: Asset = serde_json::from_value(serde_json::json!({
            "id": "SCR-1",
            "name": "Plaza",
            "monthly_revenue": 1000.0,
            "monthly_expense": -50.0
        }))
        .unwrap();
        assert_eq!(asset.monthly_profit(), dec!(1000));
        assert_eq!(asset.status, AssetStatus::Unknown);
        assert!(asset.capex_breakdown.is_none());
    }

    #[test]
    fn test_new_maintenance_flattens_cost_input() {
        let request: NewMaintenance = serde_json::from_value(serde_json::json!({
            "asset_id": "SCR-1",
            "date": "2026-03-01",
            "maintenance_type": "corrective",
            "labor_hours": 3.0,
            "technician": "engineer",
            "materials": [{"kind": "power_supply"}],
            "services": ["relocation"]
        }))
        .unwrap();
        assert_eq!(request.cost_input.labor_hours, 3.0);
        assert_eq!(request.cost_input.materials[0].quantity, None);

        let event = MaintenanceEvent::from_request(request, MaintenanceCost::default());
        assert_eq!(event.technician, TechnicianCategory::Engineer);
        assert_eq!(event.travel_distance, 0.0);
    }
}
