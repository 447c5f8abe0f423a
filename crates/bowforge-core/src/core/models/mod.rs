//! # Core Models Module
//!
//! Plain data structures describing a bow-and-arrow design.
//!
//! ## Key Components
//!
//! - [`params`] - The live design variables (`DesignParameters`) and the optimized
//!   four-variable view onto them (`BowShape`)
//! - [`profile`] - The closed set of user classes and their fixed target profiles
//! - [`mesh`] - Mesh components and the validated two-component bow/arrow mesh
//! - [`print`] - Per-class slicer recommendations
//!
//! ## Usage
//!
//! ```ignore
//! use bowforge::core::models::profile::UserClass;
//!
//! let class: UserClass = "child".parse()?;
//! let profile = class.profile();
//! assert_eq!(profile.tip_diameter, 10.0);
//! ```

pub mod mesh;
pub mod params;
pub mod print;
pub mod profile;
