//! Derived metrics
//!
//! Pure math over accumulated sums. Zero-division cases are defined
//! numeric policies, never errors — the dashboard trend indicators rely on
//! the exact percent-change zero handling here.

use shared::models::AggregationCell;
use shared::models::report::MonthCell;

/// Percent change between two values
///
/// Policy: `previous == 0` yields 0 when `current == 0`, else 100.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 { 0.0 } else { 100.0 }
    } else {
        (current - previous) / previous.abs() * 100.0
    }
}

/// Month-over-month deltas for a 12-month revenue series
///
/// The first month carries `diff_amount = 0` and `diff_percent = None`
/// ("no comparison available") — callers render that distinctly from a
/// real zero.
pub fn month_over_month(months: &[String], series: &[AggregationCell]) -> Vec<MonthCell> {
    months
        .iter()
        .zip(series)
        .enumerate()
        .map(|(i, (month, cell))| {
            let revenue = round2(cell.revenue_sum);
            if i == 0 {
                MonthCell {
                    month: month.clone(),
                    revenue,
                    diff_amount: 0.0,
                    diff_percent: None,
                }
            } else {
                let prev = series[i - 1].revenue_sum;
                MonthCell {
                    month: month.clone(),
                    revenue,
                    diff_amount: round2(cell.revenue_sum - prev),
                    diff_percent: Some(round2(percent_change(cell.revenue_sum, prev))),
                }
            }
        })
        .collect()
}

/// Top N entries by aggregate revenue, descending
///
/// Stable sort, so ties keep their original (scan) order — there is no
/// secondary business key.
pub fn top_n<'a, I>(entries: I, n: usize) -> Vec<(&'a str, &'a AggregationCell)>
where
    I: IntoIterator<Item = (&'a str, &'a AggregationCell)>,
{
    let mut ranked: Vec<(&str, &AggregationCell)> = entries.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.revenue_sum
            .partial_cmp(&a.1.revenue_sum)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// ROI ratios for one employee's period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiRatios {
    pub net_profit: f64,
    pub roi_percent: f64,
    pub revenue_per_expense: f64,
    pub expense_ratio: f64,
}

pub fn roi(total_sales: f64, total_expenses: f64) -> RoiRatios {
    let net_profit = total_sales - total_expenses;
    RoiRatios {
        net_profit,
        roi_percent: if total_expenses > 0.0 {
            net_profit / total_expenses * 100.0
        } else {
            0.0
        },
        revenue_per_expense: if total_expenses > 0.0 {
            total_sales / total_expenses
        } else {
            0.0
        },
        expense_ratio: if total_sales > 0.0 {
            total_expenses / total_sales * 100.0
        } else {
            0.0
        },
    }
}

/// Average transaction value; 0 when there are no transactions
pub fn average_ticket(total_revenue: f64, transaction_count: u64) -> f64 {
    if transaction_count > 0 {
        total_revenue / transaction_count as f64
    } else {
        0.0
    }
}

/// Two-decimal currency rounding
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_zero_policy() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(50.0, 0.0), 100.0);
        assert_eq!(percent_change(80.0, 100.0), -20.0);
        assert_eq!(percent_change(150.0, 100.0), 50.0);
    }

    #[test]
    fn percent_change_uses_absolute_previous() {
        // A swing from -100 to 100 is +200% of the magnitude of the base
        assert_eq!(percent_change(100.0, -100.0), 200.0);
    }

    #[test]
    fn month_over_month_first_index_has_no_comparison() {
        let months: Vec<String> = (1..=3).map(|m| format!("2025-{m:02}")).collect();
        let cell = |revenue| AggregationCell {
            count: 1,
            quantity_sum: 1.0,
            revenue_sum: revenue,
        };
        let cells = month_over_month(&months, &[cell(100.0), cell(150.0), cell(150.0)]);

        assert_eq!(cells[0].diff_amount, 0.0);
        assert_eq!(cells[0].diff_percent, None);

        assert_eq!(cells[1].diff_amount, 50.0);
        assert_eq!(cells[1].diff_percent, Some(50.0));

        // A flat month is a real zero, not a missing comparison
        assert_eq!(cells[2].diff_amount, 0.0);
        assert_eq!(cells[2].diff_percent, Some(0.0));
    }

    #[test]
    fn top_n_is_stable_on_ties() {
        let cell = |revenue| AggregationCell {
            count: 1,
            quantity_sum: 1.0,
            revenue_sum: revenue,
        };
        let a = cell(100.0);
        let b = cell(300.0);
        let c = cell(100.0);
        let entries = vec![("first", &a), ("big", &b), ("second", &c)];
        let ranked = top_n(entries, 3);
        let keys: Vec<&str> = ranked.iter().map(|(k, _)| *k).collect();
        // Ties keep scan order: "first" before "second"
        assert_eq!(keys, vec!["big", "first", "second"]);
    }

    #[test]
    fn top_n_truncates() {
        let cell = |revenue| AggregationCell {
            count: 1,
            quantity_sum: 1.0,
            revenue_sum: revenue,
        };
        let a = cell(1.0);
        let b = cell(2.0);
        let c = cell(3.0);
        let ranked = top_n(vec![("a", &a), ("b", &b), ("c", &c)], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, "c");
    }

    #[test]
    fn roi_example_scenario() {
        let ratios = roi(10_000.0, 2_000.0);
        assert_eq!(ratios.net_profit, 8_000.0);
        assert_eq!(ratios.roi_percent, 400.0);
        assert_eq!(ratios.revenue_per_expense, 5.0);
        assert_eq!(ratios.expense_ratio, 20.0);
    }

    #[test]
    fn roi_zero_denominators_are_policy_not_error() {
        let no_expenses = roi(500.0, 0.0);
        assert_eq!(no_expenses.roi_percent, 0.0);
        assert_eq!(no_expenses.revenue_per_expense, 0.0);
        assert_eq!(no_expenses.expense_ratio, 0.0);
        assert_eq!(no_expenses.net_profit, 500.0);

        let no_sales = roi(0.0, 300.0);
        assert_eq!(no_sales.expense_ratio, 0.0);
        assert_eq!(no_sales.net_profit, -300.0);
    }

    #[test]
    fn average_ticket_zero_transactions() {
        assert_eq!(average_ticket(100.0, 0), 0.0);
        assert_eq!(average_ticket(100.0, 4), 25.0);
    }

    #[test]
    fn round2_currency() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(-2.345), -2.35);
    }
}
