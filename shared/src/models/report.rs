//! Report wire shapes
//!
//! Response types for the four reports. All monetary values are rounded to
//! two decimals by the assembler before they land here; every report echoes
//! the resolved filters plus a `generatedAt` timestamp so the frontend can
//! render "showing results for X".

use serde::{Deserialize, Serialize};

use super::range::DateRange;

/// Which source fidelity served the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataFidelity {
    /// Primary record store: full unit-label granularity
    Full,
    /// Historical event log fallback: unit labels absent, everything
    /// classified as `piece`
    UnitAgnostic,
}

/// Echo of the resolved / normalized filters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    pub ranges: Vec<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `HH:MM`, inclusive lower bound on local time of day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_from: Option<String>,
    /// `HH:MM`, inclusive upper bound on local time of day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    pub data_fidelity: DataFidelity,
}

/// One point of a zero-filled timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Bucket key: `YYYY-MM-DD` for daily series
    pub date: String,
    pub revenue: f64,
    pub transactions: u64,
    pub quantity: f64,
}

/// Totals for one dimension value (store, employee, product, unit category)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionTotal {
    pub key: String,
    pub transactions: u64,
    pub quantity: f64,
    pub revenue: f64,
    /// Revenue share vs. the report grand total, percent
    pub revenue_share: f64,
}

// ============================================================================
// Dashboard snapshot
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub revenue: f64,
    pub transactions: u64,
    pub quantity: f64,
    pub average_ticket: f64,
    pub check_ins: u64,
    pub check_outs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
    pub revenue: super::cell::DerivedMetric,
    pub transactions: super::cell::DerivedMetric,
    pub check_ins: super::cell::DerivedMetric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub filters: ReportFilters,
    /// Requested comparison period (`today` | `week` | `month` | `year`)
    pub period: String,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub trends: DashboardTrends,
    /// Rolling N-day daily series ending today, zero-filled
    pub timeline: Vec<TimelinePoint>,
    /// Qualitative warnings on significant drops vs. the prior period
    pub alerts: Vec<String>,
    pub generated_at: String,
}

// ============================================================================
// Sales report (paginated)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_quantity: f64,
    pub transaction_count: u64,
    pub average_ticket: f64,
}

/// One grouped row. For `detail` granularity there is one row per record
/// and the product/store/employee columns are populated; for coarser
/// granularities the key is the bucket label and those columns are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRow {
    /// Bucket key: timestamp for detail, `YYYY-MM-DD` / `YYYY-MM` /
    /// `YYYY-Qn` / `YYYY` for grouped rows
    pub key: String,
    pub transactions: u64,
    pub quantity: f64,
    pub revenue: f64,
    pub average_ticket: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_rows: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub filters: ReportFilters,
    pub summary: SalesSummary,
    pub rows: Vec<SalesRow>,
    pub pagination: Pagination,
    pub by_store: Vec<DimensionTotal>,
    pub by_employee: Vec<DimensionTotal>,
    pub by_unit_category: Vec<DimensionTotal>,
    pub timeline: Vec<TimelinePoint>,
    pub generated_at: String,
}

// ============================================================================
// 12-month sales comparison
// ============================================================================

/// Per-unit-category sales within one comparison row
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTypeSales {
    pub transactions: u64,
    pub quantity: f64,
    pub revenue: f64,
}

/// One month cell of the comparison matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCell {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: f64,
    /// Absolute difference vs. the previous month; 0 for the first month
    pub diff_amount: f64,
    /// Percent difference vs. the previous month; `null` for the first
    /// month (no comparison available — distinct from a real zero)
    pub diff_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub product_code: String,
    pub product_name: String,
    pub box_sales: UnitTypeSales,
    pub pack_sales: UnitTypeSales,
    pub piece_sales: UnitTypeSales,
    pub total_quantity: f64,
    pub total_revenue: f64,
    /// Product revenue / grand total revenue × 100
    pub contribution_percent: f64,
    /// 12 cells, oldest month first
    pub monthly_sales: Vec<MonthCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesComparison {
    pub filters: ReportFilters,
    /// The 12 month keys of the matrix, oldest first
    pub months: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub grand_total_revenue: f64,
    pub generated_at: String,
}

// ============================================================================
// ROI report
// ============================================================================

/// One externally attributed expense line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiTotals {
    pub total_sales: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub roi_percent: f64,
    pub revenue_per_expense: f64,
    pub expense_ratio: f64,
    pub transactions: u64,
    pub average_ticket: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub filters: ReportFilters,
    pub employee: String,
    pub totals: RoiTotals,
    pub expenses: Vec<ExpenseEntry>,
    pub daily_trend: Vec<TimelinePoint>,
    pub top_products: Vec<DimensionTotal>,
    pub generated_at: String,
}
