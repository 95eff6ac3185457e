//! # Configuration Constants
//!
//! Centralized constants for the CSG command pipeline. Geometry tolerances,
//! STL layout, command output defaults, and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Output**: Default output path and serialization format names
//! - **STL Layout**: Binary STL record sizes
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Thickness of a BSP splitting plane.
///
/// Points closer than this to a plane are classified as coplanar.
///
/// # Example
///
/// ```rust
/// use config::constants::PLANE_EPSILON;
///
/// let distance: f64 = -3e-6;
/// assert!(distance.abs() < PLANE_EPSILON);
/// ```
pub const PLANE_EPSILON: f64 = 1e-5;

/// Minimum doubled triangle area for a facet to count as non-degenerate.
///
/// Facets below this are dropped when a mesh is converted to a spatial tree.
///
/// # Example
///
/// ```rust
/// use config::constants::DEGENERATE_AREA_EPSILON;
///
/// let sliver_area = 1e-12;
/// assert!(sliver_area < DEGENERATE_AREA_EPSILON);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-8;

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Output path used by boolean commands when no third argument is given.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_OUTPUT_PATH;
///
/// let args: Vec<String> = vec!["a.stl".into(), "b.stl".into()];
/// let output = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT_PATH);
/// assert_eq!(output, "./out.stl");
/// ```
pub const DEFAULT_OUTPUT_PATH: &str = "./out.stl";

/// Serialization format name every command writes its result in.
///
/// Resolves to binary STL.
pub const OUTPUT_FORMAT: &str = "STL";

/// Format name selecting ASCII STL output.
pub const ASCII_STL_FORMAT: &str = "STL-ASCII";

/// Suffix appended to the input path by the diagnostic `bsp` command.
///
/// # Example
///
/// ```rust
/// use config::constants::DIAGNOSTIC_OUTPUT_SUFFIX;
///
/// let output = format!("{}{}", "part.stl", DIAGNOSTIC_OUTPUT_SUFFIX);
/// assert_eq!(output, "part.stl.bsp.stl");
/// ```
pub const DIAGNOSTIC_OUTPUT_SUFFIX: &str = ".bsp.stl";

// =============================================================================
// STL LAYOUT CONSTANTS
// =============================================================================

/// Size of the binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL facet record (normal, three vertices, attribute).
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Text written at the start of every binary STL header.
pub const STL_HEADER_TEXT: &[u8] = b"Binary STL generated by csg";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of triangles in a single mesh or tree.
///
/// Safety limit to prevent memory exhaustion from extremely complex models
/// or runaway polygon splitting.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_TRIANGLES;
///
/// let triangle_count = 1000;
/// assert!(triangle_count < MAX_TRIANGLES);
/// ```
pub const MAX_TRIANGLES: usize = 10_000_000;

/// Maximum file size for imported files (in bytes).
///
/// Prevents loading extremely large files that could cause memory issues.
/// 100 MB default.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the binary STL file size for a given facet count.
///
/// # Example
///
/// ```rust
/// use config::constants::binary_stl_size;
///
/// assert_eq!(binary_stl_size(0), 84);
/// assert_eq!(binary_stl_size(12), 84 + 12 * 50);
/// ```
#[inline]
pub fn binary_stl_size(facets: usize) -> u64 {
    (STL_HEADER_SIZE + 4 + facets * STL_TRIANGLE_SIZE) as u64
}
