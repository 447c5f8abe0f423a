//! # Workflows Module
//!
//! Top-level optimization runs over an [`OptimizerState`](crate::engine::state::OptimizerState).
//!
//! - **Optimization** ([`optimize`]) - Profile-fit and performance-target searches
//!   over the four bow variables. Both apply the result to the state, re-derive the
//!   arrow and report their phases through a
//!   [`ProgressReporter`](crate::engine::progress::ProgressReporter).
//!
//! Geometry is not touched here; [`DesignSession`](crate::engine::session::DesignSession)
//! rebuilds the mesh after a workflow returns.

pub mod optimize;
