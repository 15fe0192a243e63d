//! 12-month sales comparison matrix
//!
//! One row per product with per-unit-category cells over the selected
//! ranges, plus a 12-month revenue series (oldest first) ending at the
//! anchor month, with month-over-month deltas.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::report::{ComparisonRow, DataFidelity, SalesComparison, UnitTypeSales};
use shared::models::{AggregationCell, DateRange, SalesRecord, UnitCategory};

use crate::engine::aggregate::{self, DimensionSpec, Timeline, UnitCells};
use crate::engine::calendar::Calendar;
use crate::engine::filter::RecordFilter;
use crate::engine::metrics::{month_over_month, round2, top_n};

#[derive(Debug, Clone)]
pub struct ComparisonParams {
    pub ranges: Vec<DateRange>,
    pub filter: RecordFilter,
    /// Any day inside the last month of the matrix
    pub anchor: NaiveDate,
}

/// The 12-month window the matrix covers, for fetching and bucketing
pub fn month_window(cal: &Calendar, anchor: NaiveDate) -> DateRange {
    let first = Calendar::months_back(anchor, 11);
    let last = Calendar::end_of_month(anchor).pred_opt().unwrap_or(anchor);
    DateRange {
        start_ms: cal.day_start_ms(first),
        end_ms: cal.day_end_ms(last),
        start_day: Calendar::day_key(first),
        end_day: Calendar::day_key(last),
        label: format!(
            "{} – {}",
            Calendar::month_key(first),
            Calendar::month_key(anchor)
        ),
    }
}

/// Assemble the matrix from an already-fetched record set
///
/// `sales` must cover both the selected ranges and the 12-month window;
/// the service fetches the union.
pub fn assemble(
    params: &ComparisonParams,
    sales: &[SalesRecord],
    fidelity: DataFidelity,
    cal: &Calendar,
) -> SalesComparison {
    // Range-selected pass: product rows, unit cells, grand total
    let matched = params.filter.filter_sales(sales, cal);
    let timeline = Timeline::for_ranges(&params.ranges);
    let dims = DimensionSpec {
        product: true,
        product_units: true,
        ..Default::default()
    };
    let agg = aggregate::aggregate(matched, timeline, dims);
    let grand_total = agg.total.revenue_sum;

    // Month matrix pass: same dimensional constraints, 12-month window
    let months: Vec<String> = (0..12)
        .rev()
        .map(|i| Calendar::month_key(Calendar::months_back(params.anchor, i)))
        .collect();
    let month_index: HashMap<&str, usize> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (m.as_str(), i))
        .collect();

    let mut month_filter = params.filter.clone();
    month_filter.ranges = vec![month_window(cal, params.anchor)];
    let mut monthly: HashMap<String, Vec<AggregationCell>> = HashMap::new();
    for record in month_filter.filter_sales(sales, cal) {
        let key = Calendar::month_key(cal.local_date(record.timestamp_ms));
        let Some(&idx) = month_index.get(key.as_str()) else {
            continue;
        };
        monthly
            .entry(record.product_key())
            .or_insert_with(|| vec![AggregationCell::default(); 12])[idx]
            .add_sale(record.quantity, record.total);
    }
    let empty_series = vec![AggregationCell::default(); 12];

    // Rows ranked by selected-range revenue, ties stable by scan order
    let ranked = top_n(agg.by_product.iter(), agg.by_product.len());
    let rows: Vec<ComparisonRow> = ranked
        .into_iter()
        .map(|(product_key, cell)| {
            let units = agg
                .product_units
                .get(product_key)
                .copied()
                .unwrap_or_default();
            let series = monthly.get(product_key).unwrap_or(&empty_series);
            let (code, name) = split_product_key(product_key);
            ComparisonRow {
                product_code: code.to_string(),
                product_name: name.to_string(),
                box_sales: unit_sales(&units, UnitCategory::Box),
                pack_sales: unit_sales(&units, UnitCategory::Pack),
                piece_sales: unit_sales(&units, UnitCategory::Piece),
                total_quantity: cell.quantity_sum,
                total_revenue: round2(cell.revenue_sum),
                contribution_percent: if grand_total > 0.0 {
                    round2(cell.revenue_sum / grand_total * 100.0)
                } else {
                    0.0
                },
                monthly_sales: month_over_month(&months, series),
            }
        })
        .collect();

    SalesComparison {
        filters: super::echo_filters(&params.ranges, &params.filter, None, fidelity),
        months,
        rows,
        grand_total_revenue: round2(grand_total),
        generated_at: super::generated_at(),
    }
}

/// Inverse of [`SalesRecord::product_key`]; the sentinel key has no `::`
fn split_product_key(key: &str) -> (&str, &str) {
    key.split_once("::").unwrap_or(("", key))
}

fn unit_sales(units: &UnitCells, category: UnitCategory) -> UnitTypeSales {
    let cell = units.get(category);
    UnitTypeSales {
        transactions: cell.count,
        quantity: cell.quantity_sum,
        revenue: round2(cell.revenue_sum),
    }
}
