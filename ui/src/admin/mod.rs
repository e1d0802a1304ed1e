//! Operator dashboard: password-gated usage statistics.

pub mod charts;

mod dashboard;
pub use dashboard::{daily_series, distribution_series, AdminDashboard, BucketLabels};
