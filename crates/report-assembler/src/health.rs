//! Executive health assessment and maintenance quality indicators.

use chrono::{Duration, NaiveDate};
use cost_calculator::RoiAnalysis;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use screen_core::{MaintenanceEvent, MaintenanceType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const HIGH_MARGIN: Decimal = dec!(10000);
const TOP_MARGIN: Decimal = dec!(15000);
const MODERATE_MARGIN: Decimal = dec!(5000);
const FAST_ROI_MONTHS: f64 = 24.0;
const EXPANSION_ROI_MONTHS: f64 = 18.0;
const SUSTAINABLE_ROI_MONTHS: f64 = 36.0;
/// Technical scores below this raise an alert
pub const HEALTHY_TECHNICAL_SCORE: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialHealth {
    Excellent,
    Good,
    Critical,
}

impl FinancialHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialHealth::Excellent => "excellent",
            FinancialHealth::Good => "good",
            FinancialHealth::Critical => "critical",
        }
    }
}

/// Operational status derived from the technical score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Alert,
}

impl HealthStatus {
    pub fn from_technical_score(score: u8) -> Self {
        if score >= HEALTHY_TECHNICAL_SCORE {
            HealthStatus::Ok
        } else {
            HealthStatus::Alert
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Ok => "OK",
            HealthStatus::Alert => "ALERT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    pub financial_health: FinancialHealth,
    pub health_status: HealthStatus,
    /// 1 (worst) to 5 (best)
    pub overall_rating: u8,
    /// One-sentence headline; the first matching condition wins
    pub recommendation: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

fn headline(margin: Decimal, roi_months: f64, technical_score: u8) -> &'static str {
    if margin < Decimal::ZERO {
        "Review operating costs urgently. Consider renegotiating rent or reducing services."
    } else if roi_months > SUSTAINABLE_ROI_MONTHS {
        "ROI is too long. Look at raising revenue through better advertising placements."
    } else if technical_score < HEALTHY_TECHNICAL_SCORE {
        "Low technical score. Schedule preventive maintenance and inspect components."
    } else if margin > TOP_MARGIN && roi_months < EXPANSION_ROI_MONTHS {
        "Excellent profitability. Consider expanding or replicating this site elsewhere."
    } else {
        "Stable performance. Keep the current strategy with ongoing monitoring."
    }
}

pub fn assess_health(roi: &RoiAnalysis, technical_score: u8) -> HealthAssessment {
    let margin = roi.monthly_profit;
    let roi_months = roi.roi_months;

    let financial_health = if margin > HIGH_MARGIN {
        FinancialHealth::Excellent
    } else if margin > Decimal::ZERO {
        FinancialHealth::Good
    } else {
        FinancialHealth::Critical
    };

    let overall_rating = if margin > TOP_MARGIN && roi_months < FAST_ROI_MONTHS {
        5
    } else if margin > MODERATE_MARGIN {
        4
    } else if margin > Decimal::ZERO {
        3
    } else {
        2
    };

    let mut strengths = Vec::new();
    if margin > HIGH_MARGIN {
        strengths.push("High operating margin".to_string());
    }
    if roi_months < FAST_ROI_MONTHS {
        strengths.push("Fast ROI".to_string());
    }
    if margin > Decimal::ZERO && roi_months < SUSTAINABLE_ROI_MONTHS {
        strengths.push("Sustainable profitability".to_string());
    }
    if strengths.is_empty() {
        strengths.push("No strengths identified".to_string());
    }

    let mut improvement_areas = Vec::new();
    if margin < MODERATE_MARGIN {
        improvement_areas.push("Optimize operating costs".to_string());
    }
    if roi_months > SUSTAINABLE_ROI_MONTHS && roi_months.is_finite() {
        improvement_areas.push("Increase revenue".to_string());
    }
    if margin < Decimal::ZERO {
        improvement_areas.push("Review business model".to_string());
    }
    if improvement_areas.is_empty() {
        improvement_areas.push("No critical improvement areas".to_string());
    }

    HealthAssessment {
        financial_health,
        health_status: HealthStatus::from_technical_score(technical_score),
        overall_rating,
        recommendation: headline(margin, roi_months, technical_score).to_string(),
        strengths,
        improvement_areas,
    }
}

/// Share (percent) of the most frequent maintenance type
pub fn reincidence_rate(events: &[MaintenanceEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<MaintenanceType, usize> = HashMap::new();
    for e in events {
        *counts.entry(e.maintenance_type).or_insert(0) += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);
    max as f64 / events.len() as f64 * 100.0
}

/// 95 with no interventions in the last 30 days, 60 with more than three, else 85
pub fn technical_score(events: &[MaintenanceEvent], as_of: NaiveDate) -> u8 {
    let window_start = as_of - Duration::days(30);
    let recent = events
        .iter()
        .filter(|e| e.date > window_start && e.date <= as_of)
        .count();

    match recent {
        0 => 95,
        n if n > 3 => 60,
        _ => 85,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_calculator::RoiStatus;
    use screen_core::{MaintenanceCost, TechnicianCategory};

    fn roi(profit: Decimal, months: f64) -> RoiAnalysis {
        RoiAnalysis {
            monthly_profit: profit,
            capex: dec!(1000),
            additional_cost: Decimal::ZERO,
            roi_months: months,
            roi_percentage: 0.0,
            recommendation: RoiStatus::ExcellentInvestment,
        }
    }

    fn event(on: NaiveDate, kind: MaintenanceType) -> MaintenanceEvent {
        MaintenanceEvent {
            id: None,
            asset_id: "SCR-1".to_string(),
            date: on,
            maintenance_type: kind,
            labor_hours: 1.0,
            technician: TechnicianCategory::RegularTechnician,
            materials: vec![],
            services: vec![],
            travel_distance: 0.0,
            description: None,
            cost: MaintenanceCost::default(),
        }
    }

    #[test]
    fn test_top_performer() {
        let h = assess_health(&roi(dec!(20000), 6.0), 95);
        assert_eq!(h.financial_health, FinancialHealth::Excellent);
        assert_eq!(h.health_status, HealthStatus::Ok);
        assert_eq!(h.overall_rating, 5);
        assert!(h.recommendation.starts_with("Excellent profitability"));
        assert_eq!(h.strengths.len(), 3);
        assert_eq!(h.improvement_areas, vec!["No critical improvement areas".to_string()]);
    }

    #[test]
    fn test_losing_asset_has_no_fast_roi_strength() {
        let h = assess_health(&roi(dec!(-500), f64::INFINITY), 60);
        assert_eq!(h.financial_health, FinancialHealth::Critical);
        assert_eq!(h.health_status, HealthStatus::Alert);
        // Losses outrank every other headline
        assert!(h.recommendation.starts_with("Review operating costs"));
        assert_eq!(h.overall_rating, 2);
        assert_eq!(h.strengths, vec!["No strengths identified".to_string()]);
        assert!(h.improvement_areas.contains(&"Review business model".to_string()));
        assert!(!h.improvement_areas.contains(&"Increase revenue".to_string()));
    }

    #[test]
    fn test_headline_precedence() {
        let slow = assess_health(&roi(dec!(500), 40.0), 60);
        assert!(slow.recommendation.starts_with("ROI is too long"));

        let worn = assess_health(&roi(dec!(20000), 6.0), 60);
        assert!(worn.recommendation.starts_with("Low technical score"));
        assert_eq!(worn.health_status, HealthStatus::Alert);

        // Top margin but ROI of 20 months is not fast enough for expansion
        let steady = assess_health(&roi(dec!(20000), 20.0), 85);
        assert!(steady.recommendation.starts_with("Stable performance"));
        assert_eq!(steady.health_status, HealthStatus::Ok);

        assert_eq!(HealthStatus::from_technical_score(70), HealthStatus::Ok);
        assert_eq!(HealthStatus::from_technical_score(69), HealthStatus::Alert);
        assert_eq!(HealthStatus::Alert.as_str(), "ALERT");
    }

    #[test]
    fn test_reincidence_and_technical_score() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let old = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let events = vec![
            event(old, MaintenanceType::Corrective),
            event(old, MaintenanceType::Corrective),
            event(old, MaintenanceType::Corrective),
            event(old, MaintenanceType::Preventive),
        ];
        assert_eq!(reincidence_rate(&events), 75.0);
        assert_eq!(reincidence_rate(&[]), 0.0);
        assert_eq!(technical_score(&events, today), 95);

        let busy: Vec<_> = (0..4)
            .map(|d| event(today - Duration::days(d), MaintenanceType::Corrective))
            .collect();
        assert_eq!(technical_score(&busy, today), 60);
        assert_eq!(technical_score(&busy[..2], today), 85);
    }
}
