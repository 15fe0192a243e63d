//! Dashboard snapshot
//!
//! Compares the current period against the immediately preceding window of
//! equal length and raises qualitative alerts on significant drops.

use chrono::{Duration, NaiveDate};
use shared::models::report::{
    DashboardSnapshot, DashboardTrends, DataFidelity, PeriodTotals, TimelinePoint,
};
use shared::models::{AttendanceRecord, DateRange, DerivedMetric, SalesRecord};

use crate::engine::aggregate::{self, DimensionSpec, Timeline};
use crate::engine::calendar::Calendar;
use crate::engine::filter::RecordFilter;
use crate::engine::metrics::{average_ticket, percent_change, round2};

/// Alert when sales fall more than 20% vs. the prior period
const SALES_DROP_ALERT_PERCENT: f64 = -20.0;
/// Alert when check-ins fall more than 15% vs. the prior period
const CHECKIN_DROP_ALERT_PERCENT: f64 = -15.0;

/// Comparison window selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPeriod {
    Today,
    Week,
    Month,
    Year,
}

impl DashboardPeriod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// First day of the period containing `today`
    fn period_start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Week => Calendar::start_of_week(today),
            Self::Month => Calendar::start_of_month(today),
            Self::Year => Calendar::start_of_year(today),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardParams {
    pub period: DashboardPeriod,
    pub store: Option<String>,
    pub employee: Option<String>,
    /// Width of the rolling daily timeline
    pub trend_days: u32,
}

/// Earliest day the assembler needs records for: the start of the
/// previous comparison window or of the rolling timeline, whichever is
/// older
pub fn fetch_start(params: &DashboardParams, today: NaiveDate) -> NaiveDate {
    let current_start = params.period.period_start(today);
    let window_days = (today - current_start).num_days() + 1;
    let previous_start = current_start - Duration::days(window_days);
    let trend_start = today - Duration::days(params.trend_days.max(1) as i64 - 1);
    previous_start.min(trend_start)
}

/// Assemble the snapshot from an already-fetched record set
pub fn assemble(
    params: &DashboardParams,
    sales: &[SalesRecord],
    attendance: &[AttendanceRecord],
    fidelity: DataFidelity,
    cal: &Calendar,
    today: NaiveDate,
) -> DashboardSnapshot {
    // Current window: period start through today (inclusive). Previous
    // window: the same number of days immediately before it.
    let current_start = params.period.period_start(today);
    let window_days = (today - current_start).num_days() + 1;
    let previous_end = current_start - Duration::days(1);
    let previous_start = current_start - Duration::days(window_days);

    let current_range = day_range(cal, current_start, today);
    let previous_range = day_range(cal, previous_start, previous_end);

    let current = period_totals(params, &current_range, sales, attendance, cal);
    let previous = period_totals(params, &previous_range, sales, attendance, cal);

    let trends = DashboardTrends {
        revenue: metric(current.revenue, previous.revenue),
        transactions: metric(current.transactions as f64, previous.transactions as f64),
        check_ins: metric(current.check_ins as f64, previous.check_ins as f64),
    };

    let mut alerts = Vec::new();
    if trends.revenue.delta_percent < SALES_DROP_ALERT_PERCENT {
        alerts.push(format!(
            "Sales dropped {:.1}% vs. previous {}",
            trends.revenue.delta_percent.abs(),
            params.period.as_str(),
        ));
    }
    if trends.check_ins.delta_percent < CHECKIN_DROP_ALERT_PERCENT {
        alerts.push(format!(
            "Attendance check-ins dropped {:.1}% vs. previous {}",
            trends.check_ins.delta_percent.abs(),
            params.period.as_str(),
        ));
    }

    let timeline = rolling_timeline(params, sales, cal, today);

    let filter = base_filter(params, vec![current_range.clone()]);
    DashboardSnapshot {
        filters: super::echo_filters(&[current_range], &filter, None, fidelity),
        period: params.period.as_str().to_string(),
        current,
        previous,
        trends,
        timeline,
        alerts,
        generated_at: super::generated_at(),
    }
}

fn day_range(cal: &Calendar, start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        start_ms: cal.day_start_ms(start),
        end_ms: cal.day_end_ms(end),
        start_day: Calendar::day_key(start),
        end_day: Calendar::day_key(end),
        label: format!("{} – {}", Calendar::day_key(start), Calendar::day_key(end)),
    }
}

fn base_filter(params: &DashboardParams, ranges: Vec<DateRange>) -> RecordFilter {
    let mut filter = RecordFilter::new(ranges);
    filter.store = params.store.clone();
    filter.employee = params.employee.clone();
    filter
}

fn period_totals(
    params: &DashboardParams,
    range: &DateRange,
    sales: &[SalesRecord],
    attendance: &[AttendanceRecord],
    cal: &Calendar,
) -> PeriodTotals {
    let filter = base_filter(params, vec![range.clone()]);
    let matched_sales = filter.filter_sales(sales, cal);
    let timeline = Timeline::for_ranges(std::slice::from_ref(range));
    let agg = aggregate::aggregate(matched_sales, timeline, DimensionSpec::default());

    let matched_attendance = filter.filter_attendance(attendance, cal);
    let att = aggregate::count_attendance(matched_attendance);

    PeriodTotals {
        revenue: round2(agg.total.revenue_sum),
        transactions: agg.total.count,
        quantity: agg.total.quantity_sum,
        average_ticket: round2(average_ticket(agg.total.revenue_sum, agg.total.count)),
        check_ins: att.check_ins,
        check_outs: att.check_outs,
    }
}

fn rolling_timeline(
    params: &DashboardParams,
    sales: &[SalesRecord],
    cal: &Calendar,
    today: NaiveDate,
) -> Vec<TimelinePoint> {
    let days = params.trend_days.max(1) as i64;
    let range = day_range(cal, today - Duration::days(days - 1), today);
    let filter = base_filter(params, vec![range.clone()]);
    let matched = filter.filter_sales(sales, cal);
    let timeline = Timeline::for_ranges(&[range]);
    let agg = aggregate::aggregate(matched, timeline, DimensionSpec::default());
    super::timeline_points(&agg.timeline)
}

fn metric(value: f64, previous_value: f64) -> DerivedMetric {
    DerivedMetric {
        value,
        previous_value,
        delta_percent: round2(percent_change(value, previous_value)),
    }
}
