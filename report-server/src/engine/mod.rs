//! Analytics aggregation engine
//!
//! Stateless five-stage pipeline: range normalization -> record filtering
//! -> single-pass aggregation -> derived metrics -> report assembly. Every
//! stage is a pure function over an in-memory snapshot; I/O lives in
//! `source` and orchestration in `services`.

pub mod aggregate;
pub mod calendar;
pub mod filter;
pub mod metrics;
pub mod range;
pub mod reports;

pub use aggregate::{Aggregation, DimensionSpec, Granularity, Timeline};
pub use calendar::Calendar;
pub use filter::RecordFilter;
pub use range::RangeInput;
