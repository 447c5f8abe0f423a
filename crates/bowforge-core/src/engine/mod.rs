//! # Engine Module
//!
//! The stateful half of BowForge: a [`session::DesignSession`] owns a loaded model
//! and its live design variables, and drives the optimizers over them.
//!
//! ## Architecture
//!
//! - **Session** ([`session`]) - The explicit context object front ends talk to
//! - **State** ([`state`]) - Live parameters, current user class, palm and speed
//!   preference, and the profile adjustments over them
//! - **Objectives** ([`objective`]) - Profile-fit and performance-target cost
//!   functions with their search boxes
//! - **Solver** ([`solver`]) - The bounded minimizer seam and its default projected
//!   gradient implementation
//! - **Configuration** ([`config`]) - Iteration limits, tolerance and jitter
//! - **Progress Monitoring** ([`progress`]) - Phase events and the geometry hook
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod objective;
pub mod progress;
pub mod session;
pub mod solver;
pub mod state;
