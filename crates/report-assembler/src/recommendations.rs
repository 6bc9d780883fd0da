//! Rule-based recommendations.
//!
//! Rules run in a fixed order and each appends at most one entry. The fallback
//! fires only when nothing else did.

use chrono::NaiveDate;
use screen_core::{Asset, MaintenanceEvent};
use serde::{Deserialize, Serialize};

use crate::summary::months_between;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub title: String,
    pub description: String,
}

impl Recommendation {
    fn new(priority: Priority, title: &str, description: impl Into<String>) -> Self {
        Self {
            priority,
            title: title.to_string(),
            description: description.into(),
        }
    }
}

/// Trigger points for the rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// Cached ROI above this many months asks for a profitability review
    pub max_roi_months: f64,
    /// Whole calendar months without maintenance before preventive work is due (strictly greater)
    pub maintenance_gap_months: i32,
    pub min_uptime_percentage: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            max_roi_months: 24.0,
            maintenance_gap_months: 3,
            min_uptime_percentage: 95.0,
        }
    }
}

pub fn generate_recommendations(
    asset: &Asset,
    events: &[MaintenanceEvent],
    as_of: NaiveDate,
    thresholds: &RecommendationThresholds,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    // A missing cached ROI is not evidence of poor profitability
    if let Some(roi) = asset.cached_roi_months.filter(|r| r.is_finite()) {
        if roi > thresholds.max_roi_months {
            recs.push(Recommendation::new(
                Priority::High,
                "Optimize profitability",
                format!(
                    "ROI of {:.1} months exceeds the {:.0}-month target. Review pricing and operating costs.",
                    roi, thresholds.max_roi_months
                ),
            ));
        }
    }

    // Store order is not trusted; the latest date wins
    if let Some(last) = events.iter().map(|e| e.date).max() {
        let gap = months_between(last, as_of);
        if gap > thresholds.maintenance_gap_months {
            recs.push(Recommendation::new(
                Priority::Medium,
                "Schedule preventive maintenance",
                format!(
                    "Last intervention was {} months ago. Plan a preventive visit to avoid failures.",
                    gap
                ),
            ));
        }
    }

    if let Some(uptime) = asset.uptime_percentage.filter(|u| u.is_finite()) {
        if uptime < thresholds.min_uptime_percentage {
            recs.push(Recommendation::new(
                Priority::High,
                "Improve availability",
                format!(
                    "Uptime of {:.1}% is below the {:.0}% target. Investigate recurring outages.",
                    uptime, thresholds.min_uptime_percentage
                ),
            ));
        }
    }

    if recs.is_empty() {
        recs.push(Recommendation::new(
            Priority::Low,
            "Maintain current strategy",
            "The screen is within every configured target.",
        ));
    }

    recs
}
