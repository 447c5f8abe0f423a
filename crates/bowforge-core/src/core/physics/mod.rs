//! Closed-form physics estimators and derived-parameter calculators.
//!
//! - [`beam`] - Cantilever-beam draw force and work-energy launch speed
//! - [`derived`] - Arrow weight, tip diameter and top clamp space as functions of
//!   the bow variables and the user class

pub mod beam;
pub mod derived;

pub use beam::{estimate_draw_force, estimate_launch_speed};
pub use derived::{estimate_top_clamp_space, optimal_arrow_weight, optimal_tip_diameter};
