//! # Core Module
//!
//! The stateless foundation of BowForge: everything here is either plain data or
//! a pure function of its inputs.
//!
//! ## Architecture
//!
//! - **Named Constants** ([`constants`]) - Default, minimum and maximum bounds for
//!   every design variable, plus the beam and material constants
//! - **Numeric Faults** ([`error`]) - The shared zero-denominator error
//! - **Data Models** ([`models`]) - Design parameters, user profiles and the
//!   two-component mesh
//! - **Geometry** ([`geometry`]) - Reset-then-deform vertex transforms
//! - **Physics** ([`physics`]) - Cantilever-beam draw force, work-energy launch
//!   speed and the derived arrow calculators
//! - **Scoring** ([`scoring`]) - Flight distance, accuracy, comfort, safety and the
//!   overall performance blend
//! - **File I/O** ([`io`]) - STL reading/writing and component splitting, used by
//!   front ends to feed a session

pub mod constants;
pub mod error;
pub mod geometry;
pub mod io;
pub mod models;
pub mod physics;
pub mod scoring;
