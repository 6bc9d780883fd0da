use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use screen_core::{MaintenanceCost, MaintenanceCostInput, TechnicianCategory};

use crate::rates::RateTable;

/// Money is carried to the cent, half away from zero
fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn saturating_total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Non-finite and negative quantities count as zero
fn non_negative(value: f64) -> Decimal {
    if value.is_finite() && value > 0.0 {
        Decimal::from_f64(value).unwrap_or_default()
    } else {
        Decimal::ZERO
    }
}

/// Prices maintenance interventions against an injected [`RateTable`].
///
/// Every input problem degrades to a zero-cost default and amounts beyond the
/// decimal range saturate; costing never fails.
#[derive(Debug, Clone, Default)]
pub struct CostCalculator {
    rates: RateTable,
}

impl CostCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Number of relocation fees charged for a travel distance (ceiling of distance / unit).
    pub fn travel_units(&self, distance: f64) -> u32 {
        if !distance.is_finite() || distance <= 0.0 {
            return 0;
        }
        // Float-to-int casts saturate
        (distance / self.rates.travel_unit_distance()).ceil() as u32
    }

    /// Itemised cost of one intervention
    pub fn compute_maintenance_cost(&self, input: &MaintenanceCostInput) -> MaintenanceCost {
        let category = TechnicianCategory::parse_or_default(input.technician.as_deref());
        let hourly_rate = self.rates.hourly_rate(category);
        let labor_cost = to_cents(non_negative(input.labor_hours).saturating_mul(hourly_rate));

        let materials_cost = to_cents(saturating_total(input.materials.iter().map(|m| {
            let quantity = non_negative(m.quantity.unwrap_or(1.0));
            self.rates.material_unit_cost(&m.kind).saturating_mul(quantity)
        })));

        let additional_cost = to_cents(saturating_total(
            input.services.iter().map(|flag| self.rates.service_fee(flag)),
        ));

        let travel_units = self.travel_units(input.travel_distance);
        let travel_cost = to_cents(
            self.rates
                .relocation_fee()
                .saturating_mul(Decimal::from(travel_units)),
        );

        MaintenanceCost {
            labor_cost,
            materials_cost,
            additional_cost,
            travel_cost,
            total_cost: saturating_total(
                [labor_cost, materials_cost, additional_cost, travel_cost].into_iter(),
            ),
            hourly_rate,
            travel_units,
        }
    }
}
