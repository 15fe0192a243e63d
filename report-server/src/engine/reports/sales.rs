//! Paginated sales report
//!
//! One aggregation pass feeds the summary, the per-dimension breakdowns,
//! the daily timeline and the grouped row list; pagination slices only the
//! rows.

use chrono::NaiveDate;
use shared::models::report::{DataFidelity, Pagination, SalesReport, SalesRow, SalesSummary};
use shared::models::{DateRange, SalesRecord};

use crate::engine::aggregate::{self, DimensionSpec, Granularity, Timeline};
use crate::engine::calendar::Calendar;
use crate::engine::filter::RecordFilter;
use crate::engine::metrics::{average_ticket, round2};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone)]
pub struct SalesParams {
    pub ranges: Vec<DateRange>,
    pub filter: RecordFilter,
    pub group_by: Granularity,
    pub page: u32,
    pub page_size: u32,
}

/// Assemble the report from an already-fetched record set
pub fn assemble(
    params: &SalesParams,
    sales: &[SalesRecord],
    fidelity: DataFidelity,
    cal: &Calendar,
) -> SalesReport {
    let matched = params.filter.filter_sales(sales, cal);
    let timeline = Timeline::for_ranges(&params.ranges);
    let dims = DimensionSpec {
        store: true,
        employee: true,
        unit_category: true,
        ..Default::default()
    };
    let agg = aggregate::aggregate(matched.iter().copied(), timeline, dims);

    let all_rows = build_rows(params.group_by, &matched, &agg.timeline, cal);
    let (rows, pagination) = paginate(all_rows, params.page, params.page_size);

    let grand_total = agg.total.revenue_sum;
    SalesReport {
        filters: super::echo_filters(
            &params.ranges,
            &params.filter,
            Some(params.group_by.as_str()),
            fidelity,
        ),
        summary: SalesSummary {
            total_revenue: round2(grand_total),
            total_quantity: agg.total.quantity_sum,
            transaction_count: agg.total.count,
            average_ticket: round2(average_ticket(grand_total, agg.total.count)),
        },
        rows,
        pagination,
        by_store: super::dimension_totals(&agg.by_store, grand_total),
        by_employee: super::dimension_totals(&agg.by_employee, grand_total),
        by_unit_category: super::dimension_totals(&agg.by_unit_category, grand_total),
        timeline: super::timeline_points(&agg.timeline),
        generated_at: super::generated_at(),
    }
}

/// Grouped row list before pagination
fn build_rows(
    group_by: Granularity,
    matched: &[&SalesRecord],
    timeline: &Timeline,
    cal: &Calendar,
) -> Vec<SalesRow> {
    match group_by {
        Granularity::Detail => matched
            .iter()
            .map(|record| {
                let parts = cal.zoned_parts(record.timestamp_ms);
                SalesRow {
                    key: format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}",
                        parts.year, parts.month, parts.day, parts.hour, parts.minute
                    ),
                    transactions: 1,
                    quantity: record.quantity,
                    revenue: round2(record.total),
                    average_ticket: round2(record.total),
                    product: Some(record.product_name.clone()),
                    store: Some(record.store_name.clone()),
                    employee: Some(record.employee_name.clone()),
                }
            })
            .collect(),
        _ => {
            // Fold the zero-filled day buckets into the coarser key so
            // grouped rows stay contiguous over the ranges.
            let mut rows: Vec<SalesRow> = Vec::new();
            for bucket in timeline.buckets() {
                let Ok(date) = NaiveDate::parse_from_str(&bucket.day, "%Y-%m-%d") else {
                    continue;
                };
                let key = group_by.bucket_key(date);
                match rows.last_mut() {
                    Some(last) if last.key == key => {
                        last.transactions += bucket.cell.count;
                        last.quantity += bucket.cell.quantity_sum;
                        last.revenue = round2(last.revenue + bucket.cell.revenue_sum);
                    }
                    _ => rows.push(SalesRow {
                        key,
                        transactions: bucket.cell.count,
                        quantity: bucket.cell.quantity_sum,
                        revenue: round2(bucket.cell.revenue_sum),
                        average_ticket: 0.0,
                        product: None,
                        store: None,
                        employee: None,
                    }),
                }
            }
            for row in &mut rows {
                row.average_ticket = round2(average_ticket(row.revenue, row.transactions));
            }
            rows
        }
    }
}

/// Offset/limit pagination over the grouped row list
fn paginate(all_rows: Vec<SalesRow>, page: u32, page_size: u32) -> (Vec<SalesRow>, Pagination) {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_rows = all_rows.len() as u64;
    let total_pages = total_rows.div_ceil(page_size as u64) as u32;
    let offset = (page - 1) as usize * page_size as usize;

    let rows: Vec<SalesRow> = all_rows
        .into_iter()
        .skip(offset)
        .take(page_size as usize)
        .collect();

    (
        rows,
        Pagination {
            page,
            page_size,
            total_rows,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    )
}
