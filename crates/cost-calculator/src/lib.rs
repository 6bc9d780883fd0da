//! Cost & ROI Calculator
//!
//! Itemised maintenance costing from fixed rate tables, capital-expenditure parsing,
//! ROI and break-even projections for a single screen.

pub mod maintenance;
pub mod rates;
pub mod roi;

pub use maintenance::CostCalculator;
pub use rates::RateTable;
pub use roi::{
    compute_break_even, compute_capex_total, compute_roi, compute_roi_impact,
    parse_capex_breakdown, projected_cached_roi, tco_five_year, BreakEven, BreakEvenStatus,
    CapexBreakdown, CapexLine, RoiAnalysis, RoiImpact, RoiStatus, EXCELLENT_ROI_MONTHS,
    OPTIMAL_BREAK_EVEN_MONTHS,
};
