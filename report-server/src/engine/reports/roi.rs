//! Per-employee ROI report
//!
//! Combines the employee's sales totals with an externally attributed
//! expense breakdown. The employee filter is mandatory — without it the
//! ratios would mix expenses of one PC with everyone's revenue.

use shared::models::report::{DataFidelity, ExpenseEntry, RoiReport, RoiTotals};
use shared::models::{DateRange, SalesRecord};
use shared::{AppError, AppResult};

use crate::engine::aggregate::{self, DimensionSpec, Timeline};
use crate::engine::calendar::Calendar;
use crate::engine::filter::RecordFilter;
use crate::engine::metrics::{average_ticket, roi, round2, top_n};

pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone)]
pub struct RoiParams {
    pub employee: String,
    pub ranges: Vec<DateRange>,
    pub filter: RecordFilter,
    pub expenses: Vec<ExpenseEntry>,
}

/// Assemble the report; fails fast when the employee is missing
pub fn assemble(
    params: &RoiParams,
    sales: &[SalesRecord],
    fidelity: DataFidelity,
    cal: &Calendar,
) -> AppResult<RoiReport> {
    if params.employee.trim().is_empty() {
        return Err(AppError::validation("ROI report requires an employee"));
    }

    let mut filter = params.filter.clone();
    filter.employee = Some(params.employee.clone());

    let matched = filter.filter_sales(sales, cal);
    let timeline = Timeline::for_ranges(&params.ranges);
    let dims = DimensionSpec {
        product: true,
        ..Default::default()
    };
    let agg = aggregate::aggregate(matched, timeline, dims);

    let total_sales = agg.total.revenue_sum;
    let total_expenses: f64 = params.expenses.iter().map(|e| e.amount).sum();
    let ratios = roi(total_sales, total_expenses);

    let top_products = {
        let ranked = top_n(agg.by_product.iter(), TOP_PRODUCTS);
        ranked
            .into_iter()
            .map(|(key, cell)| shared::models::report::DimensionTotal {
                key: key.to_string(),
                transactions: cell.count,
                quantity: cell.quantity_sum,
                revenue: round2(cell.revenue_sum),
                revenue_share: if total_sales > 0.0 {
                    round2(cell.revenue_sum / total_sales * 100.0)
                } else {
                    0.0
                },
            })
            .collect()
    };

    Ok(RoiReport {
        filters: super::echo_filters(&params.ranges, &filter, None, fidelity),
        employee: params.employee.clone(),
        totals: RoiTotals {
            total_sales: round2(total_sales),
            total_expenses: round2(total_expenses),
            net_profit: round2(ratios.net_profit),
            roi_percent: round2(ratios.roi_percent),
            revenue_per_expense: round2(ratios.revenue_per_expense),
            expense_ratio: round2(ratios.expense_ratio),
            transactions: agg.total.count,
            average_ticket: round2(average_ticket(total_sales, agg.total.count)),
        },
        expenses: params.expenses.clone(),
        daily_trend: super::timeline_points(&agg.timeline),
        top_products,
        generated_at: super::generated_at(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Tz;

    fn cal() -> Calendar {
        Calendar::new(Tz::Asia__Bangkok)
    }

    fn range(c: &Calendar, start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        let s = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        let e = NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap();
        DateRange {
            start_ms: c.day_start_ms(s),
            end_ms: c.day_end_ms(e),
            start_day: Calendar::day_key(s),
            end_day: Calendar::day_key(e),
            label: String::new(),
        }
    }

    fn sale(c: &Calendar, day: (i32, u32, u32), total: f64, employee: &str, code: &str) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(day.0, day.1, day.2).unwrap();
        SalesRecord {
            timestamp_ms: c.zoned_instant(date, 12, 0, 0),
            day_key: Calendar::day_key(date),
            store_name: "Store X".into(),
            employee_name: employee.into(),
            product_name: format!("Product {code}"),
            product_code: code.into(),
            unit_label: "ซอง".into(),
            quantity: 1.0,
            unit_price: total,
            total,
            status: "completed".into(),
        }
    }

    fn params(c: &Calendar, employee: &str, expenses: Vec<ExpenseEntry>) -> RoiParams {
        let ranges = vec![range(c, (2025, 6, 1), (2025, 6, 30))];
        RoiParams {
            employee: employee.into(),
            filter: RecordFilter::new(ranges.clone()),
            ranges,
            expenses,
        }
    }

    fn expense(label: &str, amount: f64) -> ExpenseEntry {
        ExpenseEntry {
            label: label.into(),
            amount,
        }
    }

    #[test]
    fn missing_employee_fails_fast() {
        let c = cal();
        let result = assemble(&params(&c, "  ", vec![]), &[], DataFidelity::Full, &c);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn roi_totals_from_example_scenario() {
        let c = cal();
        let sales = vec![
            sale(&c, (2025, 6, 5), 6_000.0, "A", "P-001"),
            sale(&c, (2025, 6, 10), 4_000.0, "A", "P-002"),
            sale(&c, (2025, 6, 10), 9_999.0, "B", "P-001"), // other PC, excluded
        ];
        let expenses = vec![expense("Travel", 1_500.0), expense("Samples", 500.0)];
        let report = assemble(
            &params(&c, "A", expenses),
            &sales,
            DataFidelity::Full,
            &c,
        )
        .unwrap();

        assert_eq!(report.totals.total_sales, 10_000.0);
        assert_eq!(report.totals.total_expenses, 2_000.0);
        assert_eq!(report.totals.net_profit, 8_000.0);
        assert_eq!(report.totals.roi_percent, 400.0);
        assert_eq!(report.totals.revenue_per_expense, 5.0);
        assert_eq!(report.totals.expense_ratio, 20.0);
        assert_eq!(report.totals.transactions, 2);
        assert_eq!(report.totals.average_ticket, 5_000.0);
    }

    #[test]
    fn daily_trend_and_top_products() {
        let c = cal();
        let sales = vec![
            sale(&c, (2025, 6, 5), 100.0, "A", "P-001"),
            sale(&c, (2025, 6, 5), 300.0, "A", "P-002"),
        ];
        let report = assemble(
            &params(&c, "A", vec![]),
            &sales,
            DataFidelity::Full,
            &c,
        )
        .unwrap();

        assert_eq!(report.daily_trend.len(), 30);
        let june5 = report.daily_trend.iter().find(|p| p.date == "2025-06-05").unwrap();
        assert_eq!(june5.revenue, 400.0);

        assert_eq!(report.top_products.len(), 2);
        assert_eq!(report.top_products[0].key, "P-002::Product P-002");
        assert_eq!(report.top_products[0].revenue_share, 75.0);
    }

    #[test]
    fn zero_expenses_keep_defined_ratios() {
        let c = cal();
        let sales = vec![sale(&c, (2025, 6, 5), 100.0, "A", "P-001")];
        let report = assemble(&params(&c, "A", vec![]), &sales, DataFidelity::Full, &c).unwrap();
        assert_eq!(report.totals.roi_percent, 0.0);
        assert_eq!(report.totals.revenue_per_expense, 0.0);
        assert_eq!(report.totals.net_profit, 100.0);
    }
}
