//! Rate tables
//!
//! Hourly labour rates, material unit costs and service fees. These are read-only
//! policy: build one with `Default` or load an override file and hand it to
//! [`crate::CostCalculator::new`].

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use screen_core::{services, TechnicianCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Regular technician rate, also the fallback for any unknown category
pub const REGULAR_TECHNICIAN_RATE: Decimal = dec!(423.07);
pub const SPECIALIZED_TECHNICIAN_RATE: Decimal = dec!(550.00);
pub const ENGINEER_RATE: Decimal = dec!(750.00);
pub const CONTRACTOR_RATE: Decimal = dec!(600.00);

/// Distance covered by one relocation fee when charging travel
pub const DEFAULT_TRAVEL_UNIT_DISTANCE: f64 = 50.0;

const DEFAULT_MATERIALS: &[(&str, Decimal)] = &[
    ("led_module", dec!(1850.00)),
    ("power_supply", dec!(950.00)),
    ("receiver_card", dec!(1200.00)),
    ("fat_cable", dec!(45.00)), // per metre
    ("module_cable", dec!(85.00)),
    ("power_cable", dec!(65.00)),
    ("novastar_controller", dec!(6500.00)),
    ("ups", dec!(4200.00)),
    ("nuc", dec!(8900.00)),
    ("titanium", dec!(540.00)),
];

const DEFAULT_SERVICES: &[(&str, Decimal)] = &[
    (services::RELOCATION, dec!(1500.00)),
    (services::SPECIAL_TOOLING, dec!(800.00)),
    (services::CONSUMABLES, dec!(350.00)),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub hourly_rates: BTreeMap<TechnicianCategory, Decimal>,
    /// Unit cost per material kind (normalised snake_case keys)
    pub material_costs: BTreeMap<String, Decimal>,
    /// Flat fee per additional service flag
    pub service_fees: BTreeMap<String, Decimal>,
    pub travel_unit_distance: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        let hourly_rates = BTreeMap::from([
            (TechnicianCategory::RegularTechnician, REGULAR_TECHNICIAN_RATE),
            (TechnicianCategory::SpecializedTechnician, SPECIALIZED_TECHNICIAN_RATE),
            (TechnicianCategory::Engineer, ENGINEER_RATE),
            (TechnicianCategory::Contractor, CONTRACTOR_RATE),
        ]);

        Self {
            hourly_rates,
            material_costs: DEFAULT_MATERIALS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            service_fees: DEFAULT_SERVICES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            travel_unit_distance: DEFAULT_TRAVEL_UNIT_DISTANCE,
        }
    }
}

/// Lowercase, trim, spaces and dashes to underscores
fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

impl RateTable {
    /// Parse an override table. Missing sections keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut table: RateTable =
            serde_json::from_str(json).context("invalid rate table JSON")?;
        table.material_costs = table
            .material_costs
            .into_iter()
            .map(|(k, v)| (normalize_key(&k), v))
            .collect();
        table.service_fees = table
            .service_fees
            .into_iter()
            .map(|(k, v)| (normalize_key(&k), v))
            .collect();
        Ok(table)
    }

    /// Load an override table from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rate table {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Hourly rate for a category; falls back to the regular technician rate.
    pub fn hourly_rate(&self, category: TechnicianCategory) -> Decimal {
        self.hourly_rates
            .get(&category)
            .or_else(|| self.hourly_rates.get(&TechnicianCategory::RegularTechnician))
            .copied()
            .unwrap_or(REGULAR_TECHNICIAN_RATE)
    }

    /// Unit cost of a material kind; unknown kinds cost nothing.
    pub fn material_unit_cost(&self, kind: &str) -> Decimal {
        self.material_costs
            .get(&normalize_key(kind))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Fee for an additional service flag; unknown flags cost nothing.
    pub fn service_fee(&self, flag: &str) -> Decimal {
        self.service_fees
            .get(&normalize_key(flag))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn relocation_fee(&self) -> Decimal {
        self.service_fee(services::RELOCATION)
    }

    pub fn travel_unit_distance(&self) -> f64 {
        if self.travel_unit_distance > 0.0 {
            self.travel_unit_distance
        } else {
            DEFAULT_TRAVEL_UNIT_DISTANCE
        }
    }
}
