use chrono::{NaiveDate, Utc};
use cost_calculator::{
    compute_break_even, compute_roi, parse_capex_breakdown, tco_five_year, BreakEven,
};
use rust_decimal::Decimal;
use screen_core::{Asset, ExpenseRecord, MaintenanceEvent, MaintenanceType};
use serde::{Deserialize, Serialize};

use crate::charts::build_chart_series;
use crate::document::*;
use crate::format::{
    format_currency, format_duration_months, format_percent, format_roi_months, ReportLocale,
};
use crate::health::{assess_health, reincidence_rate, technical_score};
use crate::recommendations::{generate_recommendations, RecommendationThresholds};
use crate::summary::{compute_summary, SummaryStatistics};

const DEFAULT_BRAND: &str = "Screen Analytics";
const NO_DESCRIPTION: &str = "No description";

/// Presentation options. None of them change a computed figure except `as_of`,
/// which anchors break-even dates, days online and maintenance recency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub locale: ReportLocale,
    pub as_of: NaiveDate,
    pub brand_name: String,
    pub logo_url: Option<String>,
    pub thresholds: RecommendationThresholds,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            locale: ReportLocale::default(),
            as_of: Utc::now().date_naive(),
            brand_name: DEFAULT_BRAND.to_string(),
            logo_url: None,
            thresholds: RecommendationThresholds::default(),
        }
    }
}

impl ReportOptions {
    pub fn with_locale(mut self, locale: ReportLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn with_brand(mut self, name: impl Into<String>, logo_url: Option<String>) -> Self {
        self.brand_name = name.into();
        self.logo_url = logo_url;
        self
    }

    pub fn with_thresholds(mut self, thresholds: RecommendationThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Builds [`ReportDocument`]s with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    options: ReportOptions,
}

impl ReportAssembler {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    pub fn assemble(
        &self,
        asset: &Asset,
        events: &[MaintenanceEvent],
        expenses: &[ExpenseRecord],
    ) -> ReportDocument {
        assemble_report(asset, events, expenses, &self.options)
    }
}

fn break_even_display(break_even: &BreakEven, locale: ReportLocale) -> String {
    match break_even {
        BreakEven::Projected { months, date, .. } => format!(
            "{} ({})",
            format_duration_months(*months),
            locale.format_date(*date)
        ),
        BreakEven::NotApplicable { reason } => reason.clone(),
    }
}

fn maintenance_history(
    events: &[MaintenanceEvent],
    summary: &SummaryStatistics,
    options: &ReportOptions,
) -> MaintenanceHistory {
    let preventive_count = events
        .iter()
        .filter(|e| e.maintenance_type == MaintenanceType::Preventive)
        .count();

    let details = events
        .iter()
        .map(|e| MaintenanceDetail {
            date: e.date,
            date_display: options.locale.format_date(e.date),
            maintenance_type: e.maintenance_type,
            labor_hours: e.labor_hours,
            technician: e.technician,
            cost: e.cost.total_cost,
            cost_display: format_currency(e.cost.total_cost),
            description: e
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
        })
        .collect();

    MaintenanceHistory {
        preventive_count,
        corrective_count: events.len() - preventive_count,
        total_count: events.len(),
        total_cost: summary.total_maintenance_cost,
        average_cost: summary.average_maintenance_cost,
        total_hours: summary.total_maintenance_hours,
        reincidence_rate: reincidence_rate(events),
        technical_score: technical_score(events, options.as_of),
        events: details,
    }
}

/// Assemble one screen's report.
///
/// Pure over its record inputs apart from `footer.generated_at`. Never fails: bad or
/// missing asset fields degrade to zero, `0%` or `unknown`.
pub fn assemble_report(
    asset: &Asset,
    events: &[MaintenanceEvent],
    expenses: &[ExpenseRecord],
    options: &ReportOptions,
) -> ReportDocument {
    tracing::debug!(
        "assembling report for {} ({} maintenance events, {} expense months)",
        asset.id,
        events.len(),
        expenses.len()
    );
    let locale = options.locale;
    let summary = compute_summary(asset, events, expenses, options.as_of);

    let capex = parse_capex_breakdown(asset.capex_breakdown.as_deref());
    let roi = compute_roi(asset, Decimal::ZERO);
    let break_even = compute_break_even(asset, options.as_of);
    let break_even_text = break_even_display(&break_even, locale);
    let monthly_opex = asset.expense();
    let maintenance_history = maintenance_history(events, &summary, options);

    let financial_analysis = FinancialAnalysis {
        opex: OpexSummary {
            monthly: monthly_opex,
            annual: monthly_opex.saturating_mul(Decimal::from(12)),
            recorded_total: summary.total_expenses,
            recorded_average: summary.average_monthly_expense,
            recorded_months: summary.expense_months,
        },
        tco_five_year: tco_five_year(capex.total, monthly_opex),
        break_even_display: break_even_text.clone(),
        break_even,
        roi: roi.clone(),
        capex: capex.clone(),
    };

    let executive_summary = ExecutiveSummary {
        roi: format_roi_months(roi.roi_months),
        roi_status: roi.recommendation.as_str().to_string(),
        revenue: format_currency(asset.revenue()),
        expenses: format_currency(monthly_opex),
        net_profit: format_currency(asset.monthly_profit()),
        margin: format_percent(summary.profit_margin),
        uptime: asset
            .uptime_percentage
            .map(format_percent)
            .unwrap_or_else(|| "0%".to_string()),
        status: asset.status.as_str().to_string(),
        days_online: summary
            .days_online
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        break_even: break_even_text,
        health: assess_health(&roi, maintenance_history.technical_score),
    };

    let header = ReportHeader {
        title: REPORT_TITLE.to_string(),
        subtitle: if asset.location.trim().is_empty() {
            format!("{} ({})", asset.name, asset.id)
        } else {
            format!("{} ({}) - {}", asset.name, asset.id, asset.location)
        },
        asset_id: asset.id.clone(),
        generated_on: locale.format_date(options.as_of),
        locale,
        brand: Branding {
            name: options.brand_name.clone(),
            logo_url: options.logo_url.clone(),
        },
    };

    ReportDocument {
        header,
        executive_summary,
        maintenance_history,
        recommendations: generate_recommendations(asset, events, options.as_of, &options.thresholds),
        charts: build_chart_series(asset, events, expenses, &capex, locale),
        financial_analysis,
        summary_statistics: summary,
        footer: ReportFooter {
            attribution: FOOTER_ATTRIBUTION.to_string(),
            disclaimer: FOOTER_DISCLAIMER.to_string(),
            generated_at: Utc::now(),
        },
    }
}
