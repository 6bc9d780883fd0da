//! The canonical report document handed to renderers.
//!
//! A derived snapshot: built once from an asset and its histories, never mutated.

use chrono::{DateTime, NaiveDate, Utc};
use cost_calculator::{BreakEven, CapexBreakdown, RoiAnalysis};
use rust_decimal::Decimal;
use screen_core::{MaintenanceType, TechnicianCategory};
use serde::{Deserialize, Serialize};

use crate::charts::ChartSeries;
use crate::format::ReportLocale;
use crate::health::HealthAssessment;
use crate::recommendations::Recommendation;
use crate::summary::SummaryStatistics;

pub const REPORT_TITLE: &str = "Screen Performance Report";
pub const FOOTER_ATTRIBUTION: &str = "Generated by the screen analytics report engine";
pub const FOOTER_DISCLAIMER: &str =
    "Figures are derived from recorded revenue, expenses and maintenance events. \
     Projections assume current monthly results remain constant.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    pub name: String,
    /// Placeholder for the renderer; never fetched here
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub title: String,
    pub subtitle: String,
    pub asset_id: String,
    pub generated_on: String,
    pub locale: ReportLocale,
    pub brand: Branding,
}

/// Pre-formatted display strings plus the health assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub roi: String,
    pub roi_status: String,
    pub revenue: String,
    pub expenses: String,
    pub net_profit: String,
    pub margin: String,
    pub uptime: String,
    pub status: String,
    pub days_online: String,
    pub break_even: String,
    pub health: HealthAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpexSummary {
    pub monthly: Decimal,
    pub annual: Decimal,
    /// Sum of the recorded monthly expense history
    pub recorded_total: Decimal,
    pub recorded_average: Decimal,
    pub recorded_months: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub capex: CapexBreakdown,
    pub opex: OpexSummary,
    pub roi: RoiAnalysis,
    pub break_even: BreakEven,
    pub break_even_display: String,
    pub tco_five_year: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDetail {
    pub date: NaiveDate,
    pub date_display: String,
    pub maintenance_type: MaintenanceType,
    pub labor_hours: f64,
    pub technician: TechnicianCategory,
    pub cost: Decimal,
    pub cost_display: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceHistory {
    pub preventive_count: usize,
    pub corrective_count: usize,
    pub total_count: usize,
    pub total_cost: Decimal,
    pub average_cost: Decimal,
    pub total_hours: f64,
    pub reincidence_rate: f64,
    pub technical_score: u8,
    /// Same order as supplied by the store (newest first)
    pub events: Vec<MaintenanceDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFooter {
    pub attribution: String,
    pub disclaimer: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub header: ReportHeader,
    pub executive_summary: ExecutiveSummary,
    pub summary_statistics: SummaryStatistics,
    pub financial_analysis: FinancialAnalysis,
    pub maintenance_history: MaintenanceHistory,
    pub recommendations: Vec<Recommendation>,
    pub charts: ChartSeries,
    pub footer: ReportFooter,
}

impl ReportDocument {
    pub fn asset_id(&self) -> &str {
        &self.header.asset_id
    }
}
