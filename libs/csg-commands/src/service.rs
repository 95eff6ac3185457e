//! # Mesh/Tree Service
//!
//! The operations the command core consumes, and their STL-backed
//! implementation.
//!
//! Meshes and trees are plain owned values. Releasing one is dropping it;
//! there is no separate release call for implementations to forget.

use std::path::Path;

use csg_mesh::{stl, BooleanOp, Mesh, MeshError, SpatialTree};

/// Mesh loading, tree conversion, combination, and writing.
///
/// A tree returned by [`to_spatial_tree`](Self::to_spatial_tree) must not
/// borrow from the mesh it was built from.
pub trait MeshService {
    /// Polygonal surface loaded from a file.
    type Mesh;
    /// Spatial partition used for boolean combination.
    type Tree;
    /// Failure reported by any service call.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads a mesh from `path`.
    fn load(&self, path: &Path) -> Result<Self::Mesh, Self::Error>;

    /// Returns the facet count of a mesh.
    fn polygon_count(&self, mesh: &Self::Mesh) -> usize;

    /// Builds a spatial tree from a mesh.
    fn to_spatial_tree(&self, mesh: &Self::Mesh) -> Result<Self::Tree, Self::Error>;

    /// Combines two trees into a new one, leaving the inputs intact.
    fn combine(
        &self,
        op: BooleanOp,
        a: &Self::Tree,
        b: &Self::Tree,
    ) -> Result<Self::Tree, Self::Error>;

    /// Converts a tree into a mesh, consuming the tree.
    fn tree_to_mesh(&self, tree: Self::Tree) -> Self::Mesh;

    /// Writes a mesh to `path` in the named serialization format.
    fn write(&self, mesh: &Self::Mesh, path: &Path, format: &str) -> Result<(), Self::Error>;
}

/// [`MeshService`] over STL files and BSP trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlMeshService;

impl MeshService for StlMeshService {
    type Mesh = Mesh;
    type Tree = SpatialTree;
    type Error = MeshError;

    fn load(&self, path: &Path) -> Result<Mesh, MeshError> {
        stl::load_stl(path)
    }

    fn polygon_count(&self, mesh: &Mesh) -> usize {
        mesh.polygon_count()
    }

    fn to_spatial_tree(&self, mesh: &Mesh) -> Result<SpatialTree, MeshError> {
        SpatialTree::from_mesh(mesh)
    }

    fn combine(
        &self,
        op: BooleanOp,
        a: &SpatialTree,
        b: &SpatialTree,
    ) -> Result<SpatialTree, MeshError> {
        op.apply(a, b)
    }

    fn tree_to_mesh(&self, tree: SpatialTree) -> Mesh {
        tree.into_mesh()
    }

    fn write(&self, mesh: &Mesh, path: &Path, format: &str) -> Result<(), MeshError> {
        stl::save_stl_format(mesh, path, format)
    }
}
