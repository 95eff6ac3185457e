//! # Mesh Operations
//!
//! Boolean operations (CSG) over spatial trees.

pub mod boolean;

pub use boolean::{difference, intersection, union, BooleanOp};
