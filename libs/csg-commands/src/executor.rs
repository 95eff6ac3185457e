//! # Binary Operation Executor
//!
//! Loads two meshes, converts each to a spatial tree, and combines the
//! trees.
//!
//! Each acquisition is a local binding, so an early return through `?`
//! drops exactly the meshes and trees acquired so far, newest first. On
//! success the four inputs are dropped the same way and only the combined
//! tree leaves the function.

use std::path::Path;

use csg_mesh::BooleanOp;
use tracing::{debug, info};

use crate::error::ExecError;
use crate::service::MeshService;

/// Runs `operation` over the meshes at `path1` and `path2`.
///
/// The returned tree is owned by the caller.
///
/// # Errors
///
/// - [`ExecError::Load`] naming the path that failed to load
/// - [`ExecError::Conversion`] naming the path whose mesh failed to convert
/// - [`ExecError::Combine`] naming the operation
pub fn execute<S: MeshService>(
    service: &S,
    path1: &Path,
    path2: &Path,
    operation: BooleanOp,
) -> Result<S::Tree, ExecError> {
    let mesh1 = load(service, path1)?;
    let tree1 = convert(service, &mesh1, path1)?;
    let mesh2 = load(service, path2)?;
    let tree2 = convert(service, &mesh2, path2)?;

    let combined = service
        .combine(operation, &tree1, &tree2)
        .map_err(|source| ExecError::Combine {
            operation,
            source: source.into(),
        })?;
    debug!(%operation, "combined spatial trees");

    Ok(combined)
}

fn load<S: MeshService>(service: &S, path: &Path) -> Result<S::Mesh, ExecError> {
    let mesh = service
        .load(path)
        .map_err(|source| ExecError::load(path, source))?;
    info!(
        path = %path.display(),
        facets = service.polygon_count(&mesh),
        "loaded file"
    );
    Ok(mesh)
}

fn convert<S: MeshService>(
    service: &S,
    mesh: &S::Mesh,
    path: &Path,
) -> Result<S::Tree, ExecError> {
    service
        .to_spatial_tree(mesh)
        .map_err(|source| ExecError::conversion(path, source))
}
