//! End-to-end report pipeline tests
//!
//! Exercise the full stack below the HTTP layer: source chain → fetch →
//! filter → aggregate → assemble, including fallback fidelity and
//! cancellation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;

use report_server::ReportService;
use report_server::engine::reports::comparison::ComparisonParams;
use report_server::engine::reports::dashboard::{DashboardParams, DashboardPeriod};
use report_server::engine::reports::roi::RoiParams;
use report_server::engine::reports::sales::SalesParams;
use report_server::engine::{Calendar, Granularity, RecordFilter};
use report_server::source::{
    FallbackChain, FetchQuery, MemorySource, RecordSource,
};
use shared::models::report::{DataFidelity, ExpenseEntry};
use shared::models::{AttendanceRecord, AttendanceStatus, DateRange, SalesRecord};
use shared::{AppError, AppResult};

fn cal() -> Calendar {
    Calendar::new(Tz::Asia__Bangkok)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(c: &Calendar, start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange {
        start_ms: c.day_start_ms(start),
        end_ms: c.day_end_ms(end),
        start_day: Calendar::day_key(start),
        end_day: Calendar::day_key(end),
        label: String::new(),
    }
}

fn sale(
    c: &Calendar,
    date: NaiveDate,
    employee: &str,
    product: (&str, &str),
    unit: &str,
    quantity: f64,
    total: f64,
) -> SalesRecord {
    SalesRecord {
        timestamp_ms: c.day_start_ms(date) + 10 * 3_600_000,
        day_key: Calendar::day_key(date),
        store_name: "Big C Rama 2".into(),
        employee_name: employee.into(),
        product_name: product.1.into(),
        product_code: product.0.into(),
        unit_label: unit.into(),
        quantity,
        unit_price: total / quantity,
        total,
        status: "completed".into(),
    }
}

fn check_in(c: &Calendar, date: NaiveDate, employee: &str) -> AttendanceRecord {
    AttendanceRecord {
        timestamp_ms: c.day_start_ms(date) + 9 * 3_600_000,
        day_key: Calendar::day_key(date),
        store_name: "Big C Rama 2".into(),
        employee_name: employee.into(),
        status: AttendanceStatus::CheckIn,
    }
}

fn january_fixture(c: &Calendar) -> (Vec<SalesRecord>, Vec<AttendanceRecord>) {
    let sales = vec![
        sale(c, day(2025, 1, 5), "Malee", ("P-001", "Milk"), "กล่อง", 10.0, 1200.0),
        sale(c, day(2025, 1, 5), "Malee", ("P-002", "Yogurt"), "แพ็ค", 4.0, 300.0),
        sale(c, day(2025, 1, 20), "Somsak", ("P-001", "Milk"), "ซอง", 6.0, 500.0),
    ];
    let attendance = vec![
        check_in(c, day(2025, 1, 5), "Malee"),
        check_in(c, day(2025, 1, 20), "Somsak"),
    ];
    (sales, attendance)
}

fn service(primary: Arc<dyn RecordSource>, secondary: Arc<dyn RecordSource>) -> ReportService {
    ReportService::new(Arc::new(FallbackChain::new(primary, secondary)), cal())
}

fn full_service() -> ReportService {
    let c = cal();
    let (sales, attendance) = january_fixture(&c);
    let source = Arc::new(MemorySource::new(sales, attendance));
    service(source.clone(), source)
}

/// A primary that is always down, like a record store behind a dead link
struct DownSource;

#[async_trait]
impl RecordSource for DownSource {
    fn name(&self) -> &'static str {
        "down"
    }

    fn fidelity(&self) -> DataFidelity {
        DataFidelity::Full
    }

    async fn fetch_sales(&self, _query: &FetchQuery) -> AppResult<Vec<SalesRecord>> {
        Err(AppError::upstream("connection refused"))
    }

    async fn fetch_attendance(&self, _query: &FetchQuery) -> AppResult<Vec<AttendanceRecord>> {
        Err(AppError::upstream("connection refused"))
    }
}

// ============================================================================
// Sales report
// ============================================================================

#[tokio::test]
async fn sales_report_aggregates_january() {
    let svc = full_service();
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = SalesParams {
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        group_by: Granularity::Daily,
        page: 1,
        page_size: 50,
    };

    let report = svc
        .sales_report(params, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.summary.transaction_count, 3);
    assert_eq!(report.summary.total_revenue, 2000.0);
    assert_eq!(report.summary.total_quantity, 20.0);
    // Daily grouping over January yields one zero-filled row per day
    assert_eq!(report.rows.len(), 31);
    assert_eq!(report.timeline.len(), 31);
    let jan5 = report.timeline.iter().find(|p| p.date == "2025-01-05").unwrap();
    assert_eq!(jan5.revenue, 1500.0);
    assert_eq!(jan5.transactions, 2);
    assert_eq!(report.by_employee.len(), 2);
    assert_eq!(report.filters.data_fidelity, DataFidelity::Full);
    assert_eq!(report.pagination.total_rows, 31);
    assert!(!report.pagination.has_next_page);
}

#[tokio::test]
async fn sales_report_employee_filter_narrows_totals() {
    let svc = full_service();
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let mut filter = RecordFilter::new(ranges.clone());
    filter.employee = Some("malee".into()); // case-insensitive
    let params = SalesParams {
        ranges,
        filter,
        group_by: Granularity::Monthly,
        page: 1,
        page_size: 20,
    };

    let report = svc
        .sales_report(params, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.summary.transaction_count, 2);
    assert_eq!(report.summary.total_revenue, 1500.0);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].key, "2025-01");
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn dashboard_assembles_with_no_matching_records() {
    // January fixture is far in the past, so the current window is empty;
    // the snapshot must still render with zeroed totals and no alerts.
    let svc = full_service();
    let params = DashboardParams {
        period: DashboardPeriod::Week,
        store: None,
        employee: None,
        trend_days: 14,
    };

    let snapshot = svc
        .dashboard(params, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(snapshot.period, "week");
    assert_eq!(snapshot.current.revenue, 0.0);
    assert_eq!(snapshot.current.transactions, 0);
    assert_eq!(snapshot.trends.revenue.delta_percent, 0.0);
    assert_eq!(snapshot.timeline.len(), 14);
    assert!(snapshot.alerts.is_empty());
}

// ============================================================================
// Comparison matrix
// ============================================================================

#[tokio::test]
async fn comparison_builds_month_series_and_unit_cells() {
    let svc = full_service();
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = ComparisonParams {
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        anchor: day(2025, 1, 15),
    };

    let report = svc
        .comparison(params, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.months.len(), 12);
    assert_eq!(report.months[0], "2024-02");
    assert_eq!(report.months[11], "2025-01");
    assert_eq!(report.grand_total_revenue, 2000.0);
    assert_eq!(report.rows.len(), 2);

    // Milk leads on revenue: 1200 boxed + 500 loose
    let milk = &report.rows[0];
    assert_eq!(milk.product_code, "P-001");
    assert_eq!(milk.total_revenue, 1700.0);
    assert_eq!(milk.box_sales.revenue, 1200.0);
    assert_eq!(milk.piece_sales.revenue, 500.0);
    assert_eq!(milk.contribution_percent, 85.0);
    assert_eq!(milk.monthly_sales.len(), 12);
    assert_eq!(milk.monthly_sales[11].month, "2025-01");
    assert_eq!(milk.monthly_sales[11].revenue, 1700.0);
    assert_eq!(milk.monthly_sales[10].revenue, 0.0);
}

// ============================================================================
// ROI
// ============================================================================

#[tokio::test]
async fn roi_requires_employee() {
    let svc = full_service();
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = RoiParams {
        employee: "  ".into(),
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        expenses: Vec::new(),
    };

    let err = svc
        .roi(params, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn roi_computes_ratios_for_one_employee() {
    let svc = full_service();
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = RoiParams {
        employee: "Malee".into(),
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        expenses: vec![
            ExpenseEntry {
                label: "Salary".into(),
                amount: 400.0,
            },
            ExpenseEntry {
                label: "Travel".into(),
                amount: 100.0,
            },
        ],
    };

    let report = svc.roi(params, CancellationToken::new()).await.unwrap();

    assert_eq!(report.totals.total_sales, 1500.0);
    assert_eq!(report.totals.total_expenses, 500.0);
    assert_eq!(report.totals.net_profit, 1000.0);
    assert_eq!(report.totals.roi_percent, 200.0);
    assert_eq!(report.totals.revenue_per_expense, 3.0);
    assert_eq!(report.totals.transactions, 2);
    assert_eq!(report.top_products.len(), 2);
    assert_eq!(report.filters.employee.as_deref(), Some("Malee"));
}

// ============================================================================
// Fallback and failure
// ============================================================================

#[tokio::test]
async fn fallback_fidelity_is_echoed_in_the_report() {
    let c = cal();
    let (sales, attendance) = january_fixture(&c);
    let secondary =
        Arc::new(MemorySource::new(sales, attendance).with_fidelity(DataFidelity::UnitAgnostic));
    let svc = service(Arc::new(DownSource), secondary);

    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = SalesParams {
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        group_by: Granularity::Daily,
        page: 1,
        page_size: 20,
    };

    let report = svc
        .sales_report(params, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.filters.data_fidelity, DataFidelity::UnitAgnostic);
    assert_eq!(report.summary.total_revenue, 2000.0);
}

#[tokio::test]
async fn both_sources_down_is_a_retryable_error() {
    let svc = service(Arc::new(DownSource), Arc::new(DownSource));
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = SalesParams {
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        group_by: Granularity::Daily,
        page: 1,
        page_size: 20,
    };

    let err = svc
        .sales_report(params, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn cancelled_request_never_reaches_aggregation() {
    let svc = full_service();
    let c = cal();
    let ranges = vec![range(&c, day(2025, 1, 1), day(2025, 1, 31))];
    let params = SalesParams {
        ranges: ranges.clone(),
        filter: RecordFilter::new(ranges),
        group_by: Granularity::Daily,
        page: 1,
        page_size: 20,
    };

    let token = CancellationToken::new();
    token.cancel();
    let err = svc.sales_report(params, token).await.unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
}
