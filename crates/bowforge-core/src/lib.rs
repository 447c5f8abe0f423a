//! # BowForge Core Library
//!
//! Parametric redesign of a two-part 3D-printable toy: a bow body and an arrow.
//! A handful of physical design variables drive both a deformation of an existing
//! triangulated mesh and a set of physics-derived performance estimates, and an
//! optimizer searches those variables to fit a user profile or explicit
//! performance targets.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`DesignParameters`,
//!   `UserProfile`, `BowArrowMesh`), the named constants table, pure geometry
//!   deformation, the physics estimators, the performance scoring functions, and
//!   the mesh file collaborators.
//!
//! - **[`engine`]: The Logic Core.** The stateful layer: the session context
//!   (`OptimizerState`, `DesignSession`), the bounded minimizer, the two objective
//!   functions, configuration, progress reporting and errors.
//!
//! - **[`workflows`]: The Public API.** End-to-end optimization procedures that tie
//!   the engine and core together: profile fitting and performance-target fitting.

pub mod core;
pub mod engine;
pub mod workflows;
