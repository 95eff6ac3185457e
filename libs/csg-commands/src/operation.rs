//! # Operation Table
//!
//! Binds each boolean command name to the combine algorithm it runs.
//! Adding a command is one entry here.

use csg_mesh::BooleanOp;

/// A named boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Command name used for dispatch.
    pub name: &'static str,
    /// One-line description for help output.
    pub description: &'static str,
    /// Combine algorithm the command runs.
    pub operation: BooleanOp,
}

/// Every boolean command, in registration order.
pub static OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        name: "intersect",
        description: "Intersect two meshes",
        operation: BooleanOp::Intersection,
    },
    OperationDescriptor {
        name: "subtract",
        description: "Subtract the second mesh from the first",
        operation: BooleanOp::Difference,
    },
    OperationDescriptor {
        name: "union",
        description: "Union two meshes",
        operation: BooleanOp::Union,
    },
];
