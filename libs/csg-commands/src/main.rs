//! `csg` command-line entry point.
//!
//! ```text
//! csg union a.stl b.stl [out.stl]
//! csg --list
//! ```
//!
//! Debug builds also register the `bsp` diagnostic command.

use std::process::ExitCode;

use clap::Parser;
use csg_commands::{Registry, StlMeshService};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Boolean operations on STL meshes
#[derive(Parser)]
#[command(name = "csg")]
#[command(about = "Boolean operations on STL meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// List available commands and exit
    #[arg(short, long)]
    list: bool,

    /// Command to run (see --list)
    command: Option<String>,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "csg=info,csg_commands=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let registry = if cfg!(debug_assertions) {
        Registry::<StlMeshService>::with_diagnostics()
    } else {
        Registry::<StlMeshService>::standard()
    };
    let registry = match registry {
        Ok(registry) => registry,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.list {
        print_commands(&registry);
        return ExitCode::SUCCESS;
    }

    let Some(name) = cli.command else {
        eprintln!("No command given.");
        print_commands(&registry);
        return ExitCode::FAILURE;
    };

    match registry.find(&name) {
        Some(command) => command.invoke(&StlMeshService, &cli.args).into(),
        None => {
            eprintln!("Unknown command: {name}");
            print_commands(&registry);
            ExitCode::FAILURE
        }
    }
}

fn print_commands(registry: &Registry<StlMeshService>) {
    println!("Commands:");
    for (name, description) in registry.entries() {
        println!("  {name:<12} {description}");
    }
}
