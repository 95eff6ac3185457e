//! # CSG Mesh
//!
//! Mesh loading, spatial-tree construction, boolean combination, and mesh
//! writing for the `csg` command pipeline.
//!
//! ## Architecture
//!
//! ```text
//! STL file → Mesh → SpatialTree ─┐
//!                                ├→ combine → SpatialTree → Mesh → STL file
//! STL file → Mesh → SpatialTree ─┘
//! ```
//!
//! ## Algorithms
//!
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Triangulation**: Fan triangulation of convex BSP polygons
//! - **STL**: Binary and ASCII, format auto-detected on load
//!
//! ## Usage
//!
//! ```rust,no_run
//! use csg_mesh::{stl, BooleanOp, SpatialTree};
//!
//! let a = SpatialTree::from_mesh(&stl::load_stl("a.stl")?)?;
//! let b = SpatialTree::from_mesh(&stl::load_stl("b.stl")?)?;
//! let result = BooleanOp::Union.apply(&a, &b)?;
//! stl::save_stl(&result.into_mesh(), "out.stl", stl::StlEncoding::Binary)?;
//! # Ok::<(), csg_mesh::MeshError>(())
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod stl;
pub mod tree;

pub use error::MeshError;
pub use mesh::Mesh;
pub use ops::boolean::{difference, intersection, union, BooleanOp};
pub use tree::SpatialTree;
