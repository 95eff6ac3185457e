//! # Command Registry
//!
//! Ordered, immutable set of command entries with lookup by exact name.
//! Built once at start-up and passed to whatever dispatches commands.

use std::collections::HashSet;

use crate::command::{boolean_command, diagnostic_command, CommandEntry};
use crate::error::RegistryError;
use crate::operation::OPERATIONS;
use crate::service::MeshService;

/// Commands available for dispatch.
#[derive(Debug)]
pub struct Registry<S> {
    entries: Vec<CommandEntry<S>>,
}

impl<S> Registry<S> {
    /// Builds a registry, keeping the given order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateName`] for the first name that appears twice.
    pub fn from_entries(entries: Vec<CommandEntry<S>>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name()) {
                return Err(RegistryError::DuplicateName { name: entry.name() });
            }
        }
        Ok(Self { entries })
    }

    /// Returns the first entry named exactly `name`.
    pub fn find(&self, name: &str) -> Option<&CommandEntry<S>> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Lists `(name, description)` pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.name(), entry.description()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: MeshService + 'static> Registry<S> {
    /// One command per entry in [`OPERATIONS`].
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_entries(OPERATIONS.iter().map(boolean_command).collect())
    }

    /// The standard commands followed by the `bsp` diagnostic command.
    pub fn with_diagnostics() -> Result<Self, RegistryError> {
        let mut entries: Vec<_> = OPERATIONS.iter().map(boolean_command).collect();
        entries.push(diagnostic_command());
        Self::from_entries(entries)
    }
}
