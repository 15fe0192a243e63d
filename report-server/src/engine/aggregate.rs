//! Single-pass aggregation
//!
//! One linear scan over the filtered records accumulates every requested
//! breakdown at once: the zero-filled daily timeline, per-dimension sums
//! (store, employee, product, unit category) and nested
//! (product × unit-category) cells. Re-filtering per dimension is never
//! done; cost stays O(records × dimensions).

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use indexmap::IndexMap;
use shared::models::{AggregationCell, AttendanceRecord, AttendanceStatus, DateRange, SalesRecord, UnitCategory};

use super::calendar::Calendar;

/// Sentinel dimension key for records whose source field is empty
pub const UNSPECIFIED: &str = "unspecified";

/// Bucket width for grouped sales-report rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Detail,
    Daily,
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "detail" => Some(Self::Detail),
            "daily" => Some(Self::Daily),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Bucket key for a record's local date
    pub fn bucket_key(&self, date: NaiveDate) -> String {
        match self {
            // Detail rows are keyed by the caller (per record timestamp)
            Self::Detail | Self::Daily => Calendar::day_key(date),
            Self::Monthly => Calendar::month_key(date),
            Self::Quarterly => Calendar::quarter_key(date),
            Self::Yearly => Calendar::year_key(date),
        }
    }
}

/// Which dimension breakdowns an aggregation pass maintains
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionSpec {
    pub store: bool,
    pub employee: bool,
    pub product: bool,
    pub unit_category: bool,
    /// Nested (product, unit category) cells for the comparison matrix
    pub product_units: bool,
}

impl DimensionSpec {
    pub fn all() -> Self {
        Self {
            store: true,
            employee: true,
            product: true,
            unit_category: true,
            product_units: true,
        }
    }
}

/// One calendar bucket of the timeline
#[derive(Debug, Clone)]
pub struct TimeBucket {
    /// `YYYY-MM-DD`
    pub day: String,
    pub cell: AggregationCell,
}

/// Zero-filled daily timeline spanning the union of the input ranges
///
/// Invariant: the set of day keys equals exactly the calendar days covered
/// by the ranges, sorted, no gaps, no duplicates (overlaps deduplicate).
#[derive(Debug, Clone)]
pub struct Timeline {
    buckets: Vec<TimeBucket>,
    index: HashMap<String, usize>,
}

impl Timeline {
    /// Build zero-filled buckets for every day covered by the ranges
    pub fn for_ranges(ranges: &[DateRange]) -> Self {
        let mut days: BTreeSet<NaiveDate> = BTreeSet::new();
        for range in ranges {
            let (Ok(start), Ok(end)) = (
                NaiveDate::parse_from_str(&range.start_day, "%Y-%m-%d"),
                NaiveDate::parse_from_str(&range.end_day, "%Y-%m-%d"),
            ) else {
                continue;
            };
            let mut day = start;
            while day <= end {
                days.insert(day);
                let Some(next) = day.succ_opt() else { break };
                day = next;
            }
        }

        let buckets: Vec<TimeBucket> = days
            .into_iter()
            .map(|day| TimeBucket {
                day: Calendar::day_key(day),
                cell: AggregationCell::default(),
            })
            .collect();
        let index = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (b.day.clone(), i))
            .collect();
        Self { buckets, index }
    }

    /// Fold a sale into the bucket for `day_key`; false if outside the
    /// declared buckets (misconfigured upstream filtering)
    fn add(&mut self, day_key: &str, quantity: f64, total: f64) -> bool {
        match self.index.get(day_key) {
            Some(&i) => {
                self.buckets[i].cell.add_sale(quantity, total);
                true
            }
            None => false,
        }
    }

    pub fn buckets(&self) -> &[TimeBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Insertion-ordered `dimensionKey -> AggregationCell` mapping
///
/// Insertion order is scan order, which later makes top-N tie-breaks
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct DimensionBuckets {
    cells: IndexMap<String, AggregationCell>,
}

impl DimensionBuckets {
    /// Get-or-insert-default accumulation; empty keys land under the
    /// `unspecified` sentinel
    pub fn add(&mut self, key: &str, quantity: f64, total: f64) {
        let key = if key.trim().is_empty() { UNSPECIFIED } else { key };
        self.cells
            .entry(key.to_string())
            .or_default()
            .add_sale(quantity, total);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregationCell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&AggregationCell> {
        self.cells.get(key)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total revenue across all keys
    pub fn revenue_sum(&self) -> f64 {
        self.cells.values().map(|c| c.revenue_sum).sum()
    }
}

/// Per-unit-category cells, indexed by [`UnitCategory`]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCells([AggregationCell; 3]);

impl UnitCells {
    fn slot(category: UnitCategory) -> usize {
        match category {
            UnitCategory::Box => 0,
            UnitCategory::Pack => 1,
            UnitCategory::Piece => 2,
        }
    }

    pub fn add(&mut self, category: UnitCategory, quantity: f64, total: f64) {
        self.0[Self::slot(category)].add_sale(quantity, total);
    }

    pub fn get(&self, category: UnitCategory) -> &AggregationCell {
        &self.0[Self::slot(category)]
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub timeline: Timeline,
    pub by_store: DimensionBuckets,
    pub by_employee: DimensionBuckets,
    pub by_product: DimensionBuckets,
    pub by_unit_category: DimensionBuckets,
    /// Nested (product key, unit category) cells
    pub product_units: IndexMap<String, UnitCells>,
    pub total: AggregationCell,
}

/// Walk the filtered records once, accumulating every requested breakdown
pub fn aggregate<'a, I>(records: I, timeline: Timeline, dims: DimensionSpec) -> Aggregation
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut agg = Aggregation {
        timeline,
        by_store: DimensionBuckets::default(),
        by_employee: DimensionBuckets::default(),
        by_product: DimensionBuckets::default(),
        by_unit_category: DimensionBuckets::default(),
        product_units: IndexMap::new(),
        total: AggregationCell::default(),
    };
    let mut skipped: u64 = 0;

    for record in records {
        let category = UnitCategory::classify(&record.unit_label);

        if !agg.timeline.add(&record.day_key, record.quantity, record.total) {
            // Buckets are pre-built to span the normalized ranges exactly,
            // so a miss means upstream filtering was misconfigured.
            skipped += 1;
            continue;
        }
        agg.total.add_sale(record.quantity, record.total);

        if dims.store {
            agg.by_store.add(&record.store_name, record.quantity, record.total);
        }
        if dims.employee {
            agg.by_employee
                .add(&record.employee_name, record.quantity, record.total);
        }
        if dims.product {
            agg.by_product
                .add(&record.product_key(), record.quantity, record.total);
        }
        if dims.unit_category {
            agg.by_unit_category
                .add(category.as_str(), record.quantity, record.total);
        }
        if dims.product_units {
            agg.product_units
                .entry(record.product_key())
                .or_default()
                .add(category, record.quantity, record.total);
        }
    }

    if skipped > 0 {
        tracing::warn!(
            skipped,
            "Records fell outside declared time buckets and were skipped"
        );
    }
    agg
}

/// Attendance totals for a filtered record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceTotals {
    pub check_ins: u64,
    pub check_outs: u64,
}

pub fn count_attendance<'a, I>(records: I) -> AttendanceTotals
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut totals = AttendanceTotals::default();
    for record in records {
        match record.status {
            AttendanceStatus::CheckIn => totals.check_ins += 1,
            AttendanceStatus::CheckOut => totals.check_outs += 1,
        }
    }
    totals
}
