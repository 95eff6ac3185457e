//! # Mesh Data Structure
//!
//! Indexed triangle mesh loaded from or written to a file.

use glam::DVec3;

/// A triangle mesh with vertices and indices.
///
/// All geometry is stored as f64. Narrowing to f32 only happens when a mesh
/// is serialized to binary STL.
///
/// # Example
///
/// ```rust
/// use csg_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert_eq!(mesh.polygon_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Creates an axis-aligned box between two corners.
    ///
    /// Faces wind counter-clockwise when viewed from outside.
    ///
    /// ```rust
    /// use csg_mesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let cube = Mesh::cuboid(DVec3::ZERO, DVec3::ONE);
    /// assert_eq!(cube.vertex_count(), 8);
    /// assert_eq!(cube.triangle_count(), 12);
    /// ```
    pub fn cuboid(min: DVec3, max: DVec3) -> Self {
        let mut mesh = Self::with_capacity(8, 12);

        let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
        let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
        let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
        let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));
        let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
        let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
        let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
        let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

        // Bottom / top
        mesh.add_triangle(v0, v2, v1);
        mesh.add_triangle(v0, v3, v2);
        mesh.add_triangle(v4, v5, v6);
        mesh.add_triangle(v4, v6, v7);
        // Front / back
        mesh.add_triangle(v0, v1, v5);
        mesh.add_triangle(v0, v5, v4);
        mesh.add_triangle(v2, v3, v7);
        mesh.add_triangle(v2, v7, v6);
        // Left / right
        mesh.add_triangle(v3, v0, v4);
        mesh.add_triangle(v3, v4, v7);
        mesh.add_triangle(v1, v2, v6);
        mesh.add_triangle(v1, v6, v5);

        mesh
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of facets, as reported when a file is loaded.
    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.triangle_count()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Adds a triangle with its own three vertices.
    pub fn add_facet(&mut self, facet: [DVec3; 3]) {
        let base = self.add_vertex(facet[0]);
        self.add_vertex(facet[1]);
        self.add_vertex(facet[2]);
        self.add_triangle(base, base + 1, base + 2);
    }

    /// Returns a reference to the vertices.
    #[cfg(test)]
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[cfg(test)]
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Iterates over the corner positions of every triangle.
    pub fn facets(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.triangles.iter().map(move |tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    #[cfg(test)]
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        self.vertices[1..]
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No repeated indices within a triangle
    /// - No zero-area triangles
    ///
    /// Returns true if valid.
    #[cfg(test)]
    pub fn validate(&self) -> bool {
        use config::constants::DEGENERATE_AREA_EPSILON;

        let vertex_count = self.vertices.len() as u32;

        self.triangles.iter().all(|tri| {
            if tri.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            (v1 - v0).cross(v2 - v0).length() >= DEGENERATE_AREA_EPSILON
        })
    }
}
