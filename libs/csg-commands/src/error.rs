//! # Command Errors
//!
//! Failure taxonomy for the executor, the generated commands, and registry
//! construction.
//!
//! ## Allocation Failure
//!
//! Allocation failure has no variant here. The global allocator aborts the
//! process through `handle_alloc_error`, and that abort is the only
//! allocation-failure path: state may be partially constructed at that
//! point, so it is never turned into a recoverable error.

use std::path::PathBuf;

use csg_mesh::BooleanOp;
use thiserror::Error;

/// Service error erased at the executor boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of the load → convert → combine pipeline.
///
/// When one of these is returned, every mesh and tree the executor
/// acquired has already been released.
#[derive(Debug, Error)]
pub enum ExecError {
    /// An input mesh could not be loaded
    #[error("Failed to load {}: {source}", path.display())]
    Load { path: PathBuf, source: BoxError },

    /// A loaded mesh could not be converted to a spatial tree
    #[error("Failed to convert {} to a spatial tree: {source}", path.display())]
    Conversion { path: PathBuf, source: BoxError },

    /// The boolean combination itself failed
    #[error("Operation '{operation}' failed: {source}")]
    Combine {
        operation: BooleanOp,
        source: BoxError,
    },
}

impl ExecError {
    /// Creates a load failure for `path`.
    pub fn load(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates a conversion failure for `path`.
    pub fn conversion(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::Conversion {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Failure of a command entry point.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Too few arguments; no service call was made
    #[error("Usage: {reason}")]
    Usage { reason: String },

    /// The executor failed
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// The result mesh could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: BoxError },
}

impl CommandError {
    /// Creates a usage error.
    pub fn usage(reason: impl Into<String>) -> Self {
        Self::Usage {
            reason: reason.into(),
        }
    }
}

/// Failure while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two entries share a name
    #[error("Duplicate command name: {name}")]
    DuplicateName { name: &'static str },
}
