//! Performance scorecard for a finished design.
//!
//! [`performance::simulate`] recomputes the physics estimates and blends flight
//! distance, accuracy, [`comfort`] and safety into a single user-class-weighted
//! score.

pub mod comfort;
pub mod performance;

pub use comfort::ComfortBreakdown;
pub use performance::{PerformanceResult, simulate};
