//! # CSG Commands
//!
//! Command core for boolean mesh operations: an executor that loads two
//! meshes, converts them to spatial trees and combines them, plus a
//! factory that turns each named operation into a uniform command and a
//! registry that dispatches commands by name.
//!
//! ## Architecture
//!
//! ```text
//! Registry ──find(name)──→ CommandEntry ──→ execute(path1, path2, op)
//!                               │                    │
//!                               │                    └→ MeshService (load, convert, combine)
//!                               └→ tree_to_mesh → write(output, "STL")
//! ```
//!
//! ## Resource Release
//!
//! Meshes and trees are owned values released on drop. Every failure path
//! releases exactly what was acquired before it, in reverse order, without
//! any bookkeeping in the executor.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use csg_commands::{Registry, StlMeshService};
//!
//! let registry = Registry::<StlMeshService>::standard()?;
//! let args = vec!["a.stl".to_string(), "b.stl".to_string()];
//! if let Some(command) = registry.find("union") {
//!     let status = command.invoke(&StlMeshService, &args);
//!     std::process::exit(i32::from(status.code()));
//! }
//! # Ok::<(), csg_commands::RegistryError>(())
//! ```

pub mod command;
pub mod error;
pub mod executor;
pub mod operation;
pub mod registry;
pub mod service;

pub use command::{boolean_command, diagnostic_command, CommandEntry, ExitStatus};
pub use error::{BoxError, CommandError, ExecError, RegistryError};
pub use executor::execute;
pub use operation::{OperationDescriptor, OPERATIONS};
pub use registry::Registry;
pub use service::{MeshService, StlMeshService};
