use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use screen_core::{Asset, ExpenseRecord, MaintenanceEvent};
use serde::{Deserialize, Serialize};

/// Aggregates over one asset's maintenance and expense histories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub maintenance_count: usize,
    pub total_maintenance_cost: Decimal,
    pub average_maintenance_cost: Decimal,
    pub total_maintenance_hours: f64,
    pub expense_months: usize,
    pub total_expenses: Decimal,
    pub average_monthly_expense: Decimal,
    /// (revenue - expense) / revenue x 100; zero when revenue is zero
    pub profit_margin: f64,
    /// Calendar days since install minus maintenance downtime; None without an install date
    pub days_online: Option<i64>,
}

/// Sum that saturates at the decimal range
pub(crate) fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        (total / Decimal::from(count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

pub fn profit_margin(asset: &Asset) -> f64 {
    let revenue = asset.revenue();
    if revenue.is_zero() {
        return 0.0;
    }
    asset
        .monthly_profit()
        .checked_div(revenue)
        .and_then(|ratio| ratio.to_f64())
        .map(|ratio| ratio * 100.0)
        .unwrap_or(0.0)
}

/// Elapsed days since install, less cumulative maintenance hours expressed in days, floored.
pub fn days_online(
    install_date: Option<NaiveDate>,
    events: &[MaintenanceEvent],
    as_of: NaiveDate,
) -> Option<i64> {
    let install_date = install_date?;
    let elapsed = (as_of - install_date).num_days() as f64;
    let downtime_days: f64 = events
        .iter()
        .map(|e| e.labor_hours)
        .filter(|h| h.is_finite() && *h > 0.0)
        .sum::<f64>()
        / 24.0;

    Some(((elapsed - downtime_days).floor() as i64).max(0))
}

/// Whole calendar months between two dates: years x 12 + month difference (day ignored).
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

pub fn compute_summary(
    asset: &Asset,
    events: &[MaintenanceEvent],
    expenses: &[ExpenseRecord],
    as_of: NaiveDate,
) -> SummaryStatistics {
    let total_maintenance_cost = saturating_sum(events.iter().map(|e| e.cost.total_cost));
    let total_maintenance_hours: f64 = events
        .iter()
        .map(|e| e.labor_hours)
        .filter(|h| h.is_finite() && *h > 0.0)
        .sum();
    let total_expenses = saturating_sum(expenses.iter().map(|r| r.total_amount));

    SummaryStatistics {
        maintenance_count: events.len(),
        total_maintenance_cost,
        average_maintenance_cost: average(total_maintenance_cost, events.len()),
        total_maintenance_hours,
        expense_months: expenses.len(),
        total_expenses,
        average_monthly_expense: average(total_expenses, expenses.len()),
        profit_margin: profit_margin(asset),
        days_online: days_online(asset.install_date, events, as_of),
    }
}
