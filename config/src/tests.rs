//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_tolerances_are_positive() {
    assert!(PLANE_EPSILON > 0.0, "PLANE_EPSILON must be positive");
    assert!(DEGENERATE_AREA_EPSILON > 0.0, "DEGENERATE_AREA_EPSILON must be positive");
}

#[test]
fn test_plane_epsilon_coarser_than_area_threshold() {
    assert!(
        PLANE_EPSILON > DEGENERATE_AREA_EPSILON,
        "PLANE_EPSILON should be coarser than DEGENERATE_AREA_EPSILON"
    );
}

// =============================================================================
// OUTPUT TESTS
// =============================================================================

#[test]
fn test_default_output_path() {
    assert_eq!(DEFAULT_OUTPUT_PATH, "./out.stl");
}

#[test]
fn test_output_format_is_stl() {
    assert_eq!(OUTPUT_FORMAT, "STL");
    assert_ne!(OUTPUT_FORMAT, ASCII_STL_FORMAT);
}

#[test]
fn test_diagnostic_suffix_is_stl() {
    assert!(DIAGNOSTIC_OUTPUT_SUFFIX.ends_with(".stl"));
}

// =============================================================================
// STL LAYOUT TESTS
// =============================================================================

#[test]
fn test_header_text_fits_header() {
    assert!(STL_HEADER_TEXT.len() <= STL_HEADER_SIZE);
}

#[test]
fn test_triangle_record_size() {
    // normal + 3 vertices (4 * 3 * f32) + u16 attribute
    assert_eq!(STL_TRIANGLE_SIZE, 4 * 3 * 4 + 2);
}

#[test]
fn test_binary_stl_size() {
    assert_eq!(binary_stl_size(1), 134);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_max_triangles_reasonable() {
    assert!(MAX_TRIANGLES >= 1_000_000);
}

#[test]
fn test_max_file_size_holds_max_triangles() {
    // A file at the size limit should not be able to exceed the triangle limit.
    assert!(binary_stl_size(MAX_TRIANGLES) >= MAX_FILE_SIZE);
}
