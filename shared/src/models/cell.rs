//! Aggregation accumulators

use serde::{Deserialize, Serialize};

/// Atomic accumulator: transaction count + quantity + revenue sums
///
/// Addition is commutative and associative, so aggregation results never
/// depend on record order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationCell {
    pub count: u64,
    pub quantity_sum: f64,
    pub revenue_sum: f64,
}

impl AggregationCell {
    /// Fold one sales record into the cell
    pub fn add_sale(&mut self, quantity: f64, total: f64) {
        self.count += 1;
        self.quantity_sum += quantity;
        self.revenue_sum += total;
    }

    /// Fold another cell into this one
    pub fn merge(&mut self, other: &AggregationCell) {
        self.count += other.count;
        self.quantity_sum += other.quantity_sum;
        self.revenue_sum += other.revenue_sum;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Read-only comparison of two adjacent periods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetric {
    pub value: f64,
    pub previous_value: f64,
    pub delta_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_equals_sequential_adds() {
        let mut left = AggregationCell::default();
        left.add_sale(2.0, 100.0);

        let mut right = AggregationCell::default();
        right.add_sale(1.0, 200.0);

        let mut merged = left;
        merged.merge(&right);

        let mut sequential = AggregationCell::default();
        sequential.add_sale(2.0, 100.0);
        sequential.add_sale(1.0, 200.0);

        assert_eq!(merged, sequential);
        assert_eq!(merged.count, 2);
        assert_eq!(merged.revenue_sum, 300.0);
    }
}
