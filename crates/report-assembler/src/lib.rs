//! Report Assembler
//!
//! Turns one screen's records into a canonical, render-ready report document:
//! summary statistics, financial analysis, maintenance history, prioritised
//! recommendations and chart series. Also builds the fleet overview table.

pub mod assembler;
pub mod charts;
pub mod document;
pub mod format;
pub mod health;
pub mod overview;
pub mod recommendations;
pub mod summary;

pub use assembler::{assemble_report, ReportAssembler, ReportOptions};
pub use charts::{ChartSeries, CostBreakdownSeries, FrequencySeries, PeriodCount, TrendSeries};
pub use document::*;
pub use format::ReportLocale;
pub use health::{FinancialHealth, HealthAssessment, HealthStatus};
pub use overview::{build_fleet_overview, FleetOverview, FleetRow, FleetTotals};
pub use recommendations::{
    generate_recommendations, Priority, Recommendation, RecommendationThresholds,
};
pub use summary::SummaryStatistics;
