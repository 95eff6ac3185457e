//! # Command Factory
//!
//! Builds dispatchable command entries. Every boolean command comes from
//! [`boolean_command`] and differs only in its [`OperationDescriptor`].
//!
//! ## Boolean Command Arguments
//!
//! ```text
//! <input1> <input2> [output]
//! ```
//!
//! The output defaults to `./out.stl` and is always written as `"STL"`.
//! Arguments past the third are ignored.

use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use config::constants::{DEFAULT_OUTPUT_PATH, DIAGNOSTIC_OUTPUT_SUFFIX, OUTPUT_FORMAT};
use tracing::{error, info};

use crate::error::{CommandError, ExecError};
use crate::executor::execute;
use crate::operation::OperationDescriptor;
use crate::service::MeshService;

// =============================================================================
// EXIT STATUS
// =============================================================================

/// Process-level outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every step succeeded and the output was written.
    Success,
    /// The command failed; the error has been logged.
    Failure,
}

impl ExitStatus {
    /// Returns the process exit code (0 or 1).
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    /// Returns true for [`ExitStatus::Success`].
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

// =============================================================================
// COMMAND ENTRY
// =============================================================================

type EntryPoint<S> = Box<dyn Fn(&S, &[String]) -> Result<(), CommandError> + Send + Sync>;

/// A named, dispatchable command.
pub struct CommandEntry<S> {
    name: &'static str,
    description: &'static str,
    entry: EntryPoint<S>,
}

impl<S> CommandEntry<S> {
    /// Creates an entry from a name, a description, and an entry point.
    pub fn new<F>(name: &'static str, description: &'static str, entry: F) -> Self
    where
        F: Fn(&S, &[String]) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        Self {
            name,
            description,
            entry: Box::new(entry),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Runs the command and returns its error, if any.
    pub fn run(&self, service: &S, args: &[String]) -> Result<(), CommandError> {
        (self.entry)(service, args)
    }

    /// Runs the command, logging any failure, and maps the outcome to an
    /// exit status.
    pub fn invoke(&self, service: &S, args: &[String]) -> ExitStatus {
        match self.run(service, args) {
            Ok(()) => ExitStatus::Success,
            Err(err) => {
                error!(command = self.name, "{err}");
                ExitStatus::Failure
            }
        }
    }
}

impl<S> fmt::Debug for CommandEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// FACTORY
// =============================================================================

/// Builds the command for one boolean operation.
pub fn boolean_command<S: MeshService + 'static>(
    descriptor: &'static OperationDescriptor,
) -> CommandEntry<S> {
    CommandEntry::new(descriptor.name, descriptor.description, move |service, args| {
        run_boolean(service, descriptor, args)
    })
}

fn run_boolean<S: MeshService>(
    service: &S,
    descriptor: &OperationDescriptor,
    args: &[String],
) -> Result<(), CommandError> {
    let [input1, input2, rest @ ..] = args else {
        return Err(CommandError::usage(format!(
            "{} <input1> <input2> [output] (got {} argument(s))",
            descriptor.name,
            args.len()
        )));
    };
    let output = rest.first().map_or(DEFAULT_OUTPUT_PATH, String::as_str);

    let tree = execute(
        service,
        Path::new(input1),
        Path::new(input2),
        descriptor.operation,
    )?;
    let mesh = service.tree_to_mesh(tree);
    write_output(service, &mesh, Path::new(output))
}

/// Builds the `bsp` command: mesh → tree → mesh round trip written next to
/// the input as `<input>.bsp.stl`.
pub fn diagnostic_command<S: MeshService + 'static>() -> CommandEntry<S> {
    CommandEntry::new(
        "bsp",
        "Round-trip a mesh through its spatial tree",
        run_diagnostic,
    )
}

fn run_diagnostic<S: MeshService>(service: &S, args: &[String]) -> Result<(), CommandError> {
    let [input, ..] = args else {
        return Err(CommandError::usage("bsp <input>"));
    };
    let path = Path::new(input);

    let mesh = service
        .load(path)
        .map_err(|source| ExecError::load(path, source))?;
    let tree = service
        .to_spatial_tree(&mesh)
        .map_err(|source| ExecError::conversion(path, source))?;
    let round_trip = service.tree_to_mesh(tree);
    info!(
        input = service.polygon_count(&mesh),
        output = service.polygon_count(&round_trip),
        "rebuilt mesh from spatial tree"
    );

    let output = format!("{input}{DIAGNOSTIC_OUTPUT_SUFFIX}");
    write_output(service, &round_trip, Path::new(&output))
}

fn write_output<S: MeshService>(
    service: &S,
    mesh: &S::Mesh,
    path: &Path,
) -> Result<(), CommandError> {
    info!(path = %path.display(), format = OUTPUT_FORMAT, "writing output");
    service
        .write(mesh, path, OUTPUT_FORMAT)
        .map_err(|source| CommandError::Write {
            path: path.to_path_buf(),
            source: source.into(),
        })
}
