//! # Mesh Errors
//!
//! Error types for mesh loading, spatial-tree construction, boolean
//! combination, and mesh writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the mesh service.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input file is above the import size limit
    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// File content is not a valid mesh
    #[error("Invalid file content: {message}")]
    InvalidContent { message: String },

    /// Binary STL ended before the declared number of facets
    #[error("Invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount { expected: u32, got: u32 },

    /// Serialization format name is not recognized
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Too many polygons
    #[error("Too many polygons: {count} (max: {max})")]
    TooManyPolygons { count: usize, max: usize },

    /// Boolean operation failed
    #[error("Boolean operation '{operation}' failed: {message}")]
    BooleanFailed {
        operation: &'static str,
        message: String,
    },

    /// I/O error from the standard library
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error in ASCII STL
    #[error("Float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl MeshError {
    /// Creates an invalid content error.
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            operation,
            message: message.into(),
        }
    }
}
