//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations over BSP spatial trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B)
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); A.build(B); A.invert()
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); A.build(B); A.invert()
//!
//! Inputs are borrowed and left untouched; each operation works on copies
//! and returns a newly owned tree. Empty operands are handled up front.
//!
//! ## Example
//!
//! ```rust
//! use csg_mesh::{BooleanOp, Mesh, SpatialTree};
//! use glam::DVec3;
//!
//! let a = SpatialTree::from_mesh(&Mesh::cuboid(DVec3::ZERO, DVec3::splat(2.0))).unwrap();
//! let b = SpatialTree::from_mesh(&Mesh::cuboid(DVec3::ONE, DVec3::splat(3.0))).unwrap();
//! let result = BooleanOp::Difference.apply(&a, &b).unwrap();
//! assert!(result.polygon_count() > 0);
//! ```

pub(crate) mod bsp;
pub(crate) mod plane;
pub(crate) mod polygon;

use std::fmt;

use config::constants::MAX_TRIANGLES;
use tracing::debug;

use crate::error::MeshError;
use crate::tree::SpatialTree;

// =============================================================================
// OPERATION SELECTOR
// =============================================================================

/// A boolean set operation over two solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// Everything inside either solid.
    Union,
    /// Everything inside both solids.
    Intersection,
    /// Everything inside the first solid and outside the second.
    Difference,
}

impl BooleanOp {
    /// Returns the lowercase operation name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        }
    }

    /// Applies the operation to two trees.
    pub fn apply(self, a: &SpatialTree, b: &SpatialTree) -> Result<SpatialTree, MeshError> {
        match self {
            Self::Union => union(a, b),
            Self::Intersection => intersection(a, b),
            Self::Difference => difference(a, b),
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two trees.
///
/// Returns a tree containing all geometry from both inputs.
pub fn union(a: &SpatialTree, b: &SpatialTree) -> Result<SpatialTree, MeshError> {
    if a.is_empty() {
        return finish(BooleanOp::Union, b.clone());
    }
    if b.is_empty() {
        return finish(BooleanOp::Union, a.clone());
    }

    let mut bsp_a = a.root.clone();
    let mut bsp_b = b.root.clone();

    // a.clipTo(b) - remove parts of A inside B
    // b.clipTo(a) - remove parts of B inside A
    // b.invert(); b.clipTo(a); b.invert() - remove coplanar faces from B
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.into_polygons());

    finish(BooleanOp::Union, SpatialTree { root: bsp_a })
}

/// Compute difference of two trees (A - B).
///
/// Returns a tree containing geometry from A that is not in B.
pub fn difference(a: &SpatialTree, b: &SpatialTree) -> Result<SpatialTree, MeshError> {
    if a.is_empty() {
        return Ok(SpatialTree::default());
    }
    if b.is_empty() {
        return finish(BooleanOp::Difference, a.clone());
    }

    let mut bsp_a = a.root.clone();
    let mut bsp_b = b.root.clone();

    // A - B = ~(~A | B)
    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.build(bsp_b.into_polygons());
    bsp_a.invert();

    finish(BooleanOp::Difference, SpatialTree { root: bsp_a })
}

/// Compute intersection of two trees.
///
/// Returns a tree containing only geometry that is in both inputs.
pub fn intersection(a: &SpatialTree, b: &SpatialTree) -> Result<SpatialTree, MeshError> {
    // An empty tree clips nothing, so the general path would return A
    if a.is_empty() || b.is_empty() {
        return Ok(SpatialTree::default());
    }

    let mut bsp_a = a.root.clone();
    let mut bsp_b = b.root.clone();

    // A & B = ~(~A | ~B)
    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_a.build(bsp_b.into_polygons());
    bsp_a.invert();

    finish(BooleanOp::Intersection, SpatialTree { root: bsp_a })
}

/// Enforces the polygon limit on a combined tree.
fn finish(op: BooleanOp, result: SpatialTree) -> Result<SpatialTree, MeshError> {
    let count = result.polygon_count();
    debug!(operation = %op, polygons = count, "combined spatial trees");

    if count > MAX_TRIANGLES {
        return Err(MeshError::boolean_failed(
            op.name(),
            format!("result has {count} polygons (max: {MAX_TRIANGLES})"),
        ));
    }

    Ok(result)
}
