//! Report assembly
//!
//! The four report shapes, all composed from the same primitives:
//! normalized ranges -> filter -> single aggregation pass -> derived
//! metrics. Each assembler is a pure function over an already-fetched
//! snapshot; nothing here performs I/O.
//!
//! - [`dashboard`] - current vs. previous period snapshot with alerts
//! - [`sales`] - grouped, paginated sales report
//! - [`comparison`] - per-product 12-month comparison matrix
//! - [`roi`] - per-employee return-on-investment summary

pub mod comparison;
pub mod dashboard;
pub mod roi;
pub mod sales;

use chrono::Utc;
use shared::models::DateRange;
use shared::models::report::{DataFidelity, DimensionTotal, ReportFilters, TimelinePoint};

use super::aggregate::{DimensionBuckets, Timeline};
use super::filter::RecordFilter;
use super::metrics::round2;

/// RFC3339 stamp for `generatedAt`
fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Format a minutes-of-day bound back to `HH:MM` for the filter echo
fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Echo the resolved filters onto a report
fn echo_filters(
    ranges: &[DateRange],
    filter: &RecordFilter,
    group_by: Option<&str>,
    fidelity: DataFidelity,
) -> ReportFilters {
    ReportFilters {
        ranges: ranges.to_vec(),
        employee: filter.employee.clone(),
        store: filter.store.clone(),
        status: filter.status.clone(),
        time_from: filter.time_from.map(format_minutes),
        time_to: filter.time_to.map(format_minutes),
        group_by: group_by.map(str::to_string),
        data_fidelity: fidelity,
    }
}

/// Timeline buckets -> wire points, currency rounded
fn timeline_points(timeline: &Timeline) -> Vec<TimelinePoint> {
    timeline
        .buckets()
        .iter()
        .map(|bucket| TimelinePoint {
            date: bucket.day.clone(),
            revenue: round2(bucket.cell.revenue_sum),
            transactions: bucket.cell.count,
            quantity: bucket.cell.quantity_sum,
        })
        .collect()
}

/// Dimension cells -> wire totals with revenue share vs. the grand total
fn dimension_totals(buckets: &DimensionBuckets, grand_total: f64) -> Vec<DimensionTotal> {
    buckets
        .iter()
        .map(|(key, cell)| DimensionTotal {
            key: key.to_string(),
            transactions: cell.count,
            quantity: cell.quantity_sum,
            revenue: round2(cell.revenue_sum),
            revenue_share: if grand_total > 0.0 {
                round2(cell.revenue_sum / grand_total * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}
