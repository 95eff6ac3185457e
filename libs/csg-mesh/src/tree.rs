//! # Spatial Tree
//!
//! Owned BSP representation of a solid, built from a [`Mesh`] and
//! convertible back into one.
//!
//! A tree owns copies of every polygon it was built from, so it stays valid
//! after the source mesh is dropped.

use config::constants::MAX_TRIANGLES;
use tracing::debug;

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::ops::boolean::bsp::BspNode;
use crate::ops::boolean::polygon::Polygon;

/// A binary space partition of a closed surface.
///
/// # Example
///
/// ```rust
/// use csg_mesh::{Mesh, SpatialTree};
/// use glam::DVec3;
///
/// let cube = Mesh::cuboid(DVec3::ZERO, DVec3::ONE);
/// let tree = SpatialTree::from_mesh(&cube).unwrap();
/// drop(cube);
///
/// assert_eq!(tree.polygon_count(), 12);
/// assert_eq!(tree.into_mesh().triangle_count(), 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpatialTree {
    pub(crate) root: BspNode,
}

impl SpatialTree {
    /// Builds a tree from every non-degenerate facet of `mesh`.
    ///
    /// # Errors
    ///
    /// - [`MeshError::TooManyPolygons`] if the mesh exceeds the triangle limit
    /// - [`MeshError::DegenerateGeometry`] if no facet has a usable plane
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, MeshError> {
        let count = mesh.polygon_count();
        if count > MAX_TRIANGLES {
            return Err(MeshError::TooManyPolygons {
                count,
                max: MAX_TRIANGLES,
            });
        }

        let polygons: Vec<Polygon> = mesh
            .facets()
            .filter_map(|facet| Polygon::from_vertices(facet.to_vec()))
            .collect();

        if polygons.is_empty() {
            return Err(MeshError::degenerate(format!(
                "none of {count} facets has a usable plane"
            )));
        }

        let skipped = count - polygons.len();
        let root = BspNode::new(polygons);
        debug!(
            polygons = root.polygon_count(),
            depth = root.depth(),
            skipped,
            "built spatial tree"
        );

        Ok(Self { root })
    }

    /// Returns the number of polygons stored in the tree.
    pub fn polygon_count(&self) -> usize {
        self.root.polygon_count()
    }

    /// Returns the depth of the tree (0 for an empty tree).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns true if the tree holds no polygons.
    pub fn is_empty(&self) -> bool {
        self.polygon_count() == 0
    }

    /// Converts the tree into a triangle mesh, consuming it.
    ///
    /// Each convex polygon is fan-triangulated.
    pub fn into_mesh(self) -> Mesh {
        let polygons = self.root.into_polygons();
        let triangle_count = polygons.iter().map(|p| p.vertices().len() - 2).sum();
        let vertex_count = polygons.iter().map(|p| p.vertices().len()).sum();
        let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);

        for poly in &polygons {
            let vertices = poly.vertices();
            let base = mesh.vertex_count() as u32;
            for v in vertices {
                mesh.add_vertex(*v);
            }
            for i in 1..(vertices.len() as u32 - 1) {
                mesh.add_triangle(base, base + i, base + i + 1);
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_tree_from_cube() {
        let cube = Mesh::cuboid(DVec3::ZERO, DVec3::ONE);
        let tree = SpatialTree::from_mesh(&cube).unwrap();
        assert_eq!(tree.polygon_count(), 12);
        assert!(tree.depth() >= 1);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_tree_from_empty_mesh() {
        let err = SpatialTree::from_mesh(&Mesh::new()).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_tree_from_degenerate_mesh() {
        let mut mesh = Mesh::new();
        mesh.add_facet([DVec3::ZERO, DVec3::X, DVec3::X * 3.0]);
        let err = SpatialTree::from_mesh(&mesh).unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_tree_skips_degenerate_facets() {
        let mut mesh = Mesh::cuboid(DVec3::ZERO, DVec3::ONE);
        mesh.add_facet([DVec3::ZERO, DVec3::ZERO, DVec3::X]);
        let tree = SpatialTree::from_mesh(&mesh).unwrap();
        assert_eq!(tree.polygon_count(), 12);
    }

    #[test]
    fn test_tree_into_mesh_preserves_bounds() {
        let cube = Mesh::cuboid(DVec3::splat(-2.0), DVec3::splat(2.0));
        let mesh = SpatialTree::from_mesh(&cube).unwrap().into_mesh();
        assert!(mesh.validate());
        assert_eq!(mesh.bounding_box(), cube.bounding_box());
    }

    #[test]
    fn test_empty_tree_into_mesh() {
        let mesh = SpatialTree::default().into_mesh();
        assert!(mesh.is_empty());
    }
}
