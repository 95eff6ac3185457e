//! # Config Crate
//!
//! Centralized configuration constants for the CSG command pipeline.
//! Tolerances, file layout sizes, output defaults, and safety limits are
//! defined here so the mesh service and the command layer agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_OUTPUT_PATH, OUTPUT_FORMAT, PLANE_EPSILON};
//!
//! let output = std::path::Path::new(DEFAULT_OUTPUT_PATH);
//! assert_eq!(output.extension().and_then(|e| e.to_str()), Some("stl"));
//! assert_eq!(OUTPUT_FORMAT, "STL");
//!
//! let distance: f64 = 1e-7;
//! assert!(distance.abs() < PLANE_EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain `const` items and `#[inline]` helpers
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
