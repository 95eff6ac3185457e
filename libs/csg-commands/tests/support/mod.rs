//! Recording [`MeshService`] fake shared by the integration tests.
//!
//! Every mesh and tree it hands out logs its own drop, so tests can compare
//! what was acquired with what was released.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use csg_commands::MeshService;
use csg_mesh::BooleanOp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Call(&'static str),
    Acquire(String),
    Release(String),
    Combine(BooleanOp),
    Write { path: String, format: String },
}

/// Service steps where a failure can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Load1,
    Convert1,
    Load2,
    Convert2,
    Combine,
    Write,
}

impl Step {
    /// Steps 1 through 5 of the executor.
    pub const EXECUTOR: [Step; 5] = [
        Step::Load1,
        Step::Convert1,
        Step::Load2,
        Step::Convert2,
        Step::Combine,
    ];
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FakeError(pub String);

type Ledger = Rc<RefCell<Vec<Event>>>;

#[derive(Debug)]
pub struct FakeMesh {
    label: String,
    facets: usize,
    ledger: Ledger,
}

impl Drop for FakeMesh {
    fn drop(&mut self) {
        self.ledger
            .borrow_mut()
            .push(Event::Release(self.label.clone()));
    }
}

#[derive(Debug)]
pub struct FakeTree {
    label: String,
    polygons: usize,
    ledger: Ledger,
}

impl FakeTree {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn polygons(&self) -> usize {
        self.polygons
    }
}

impl Drop for FakeTree {
    fn drop(&mut self) {
        self.ledger
            .borrow_mut()
            .push(Event::Release(self.label.clone()));
    }
}

/// In-memory mesh service that records every call, acquisition, and release.
#[derive(Debug, Default)]
pub struct RecordingService {
    ledger: Ledger,
    files: HashMap<String, usize>,
    fail_at: Option<Step>,
    loads: Cell<usize>,
    converts: Cell<usize>,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a readable mesh file with `facets` facets.
    pub fn with_file(mut self, path: &str, facets: usize) -> Self {
        self.files.insert(path.to_string(), facets);
        self
    }

    /// Makes the given step fail.
    pub fn failing_at(mut self, step: Step) -> Self {
        self.fail_at = Some(step);
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.ledger.borrow().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Call(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn acquired(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Acquire(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    pub fn released(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Release(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    /// Labels acquired but not yet released.
    pub fn outstanding(&self) -> Vec<String> {
        let mut outstanding = self.acquired();
        for label in self.released() {
            let index = outstanding
                .iter()
                .position(|held| *held == label)
                .unwrap_or_else(|| panic!("{label} released without being held"));
            outstanding.remove(index);
        }
        outstanding
    }

    pub fn written(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Write { path, format } => Some((path, format)),
                _ => None,
            })
            .collect()
    }

    pub fn combined_with(&self) -> Vec<BooleanOp> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Combine(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.ledger.borrow_mut().push(event);
    }

    fn fails(&self, step: Step) -> bool {
        self.fail_at == Some(step)
    }

    fn mesh(&self, label: String, facets: usize) -> FakeMesh {
        self.record(Event::Acquire(label.clone()));
        FakeMesh {
            label,
            facets,
            ledger: Rc::clone(&self.ledger),
        }
    }

    fn tree(&self, label: String, polygons: usize) -> FakeTree {
        self.record(Event::Acquire(label.clone()));
        FakeTree {
            label,
            polygons,
            ledger: Rc::clone(&self.ledger),
        }
    }
}

impl MeshService for RecordingService {
    type Mesh = FakeMesh;
    type Tree = FakeTree;
    type Error = FakeError;

    fn load(&self, path: &Path) -> Result<FakeMesh, FakeError> {
        self.record(Event::Call("load"));
        let n = self.loads.get() + 1;
        self.loads.set(n);

        let label = path.display().to_string();
        let step = if n == 1 { Step::Load1 } else { Step::Load2 };
        if self.fails(step) {
            return Err(FakeError(format!("injected load failure for {label}")));
        }
        let facets = *self
            .files
            .get(&label)
            .ok_or_else(|| FakeError(format!("no such file: {label}")))?;
        Ok(self.mesh(label, facets))
    }

    fn polygon_count(&self, mesh: &FakeMesh) -> usize {
        mesh.facets
    }

    fn to_spatial_tree(&self, mesh: &FakeMesh) -> Result<FakeTree, FakeError> {
        self.record(Event::Call("to_spatial_tree"));
        let n = self.converts.get() + 1;
        self.converts.set(n);

        let step = if n == 1 { Step::Convert1 } else { Step::Convert2 };
        if self.fails(step) {
            return Err(FakeError(format!("injected conversion failure for {}", mesh.label)));
        }
        Ok(self.tree(format!("tree({})", mesh.label), mesh.facets))
    }

    fn combine(&self, op: BooleanOp, a: &FakeTree, b: &FakeTree) -> Result<FakeTree, FakeError> {
        self.record(Event::Call("combine"));
        self.record(Event::Combine(op));
        if self.fails(Step::Combine) {
            return Err(FakeError(format!("injected {op} failure")));
        }
        Ok(self.tree("combined".to_string(), a.polygons + b.polygons))
    }

    fn tree_to_mesh(&self, tree: FakeTree) -> FakeMesh {
        self.record(Event::Call("tree_to_mesh"));
        self.mesh(format!("mesh({})", tree.label), tree.polygons)
    }

    fn write(&self, _mesh: &FakeMesh, path: &Path, format: &str) -> Result<(), FakeError> {
        self.record(Event::Call("write"));
        if self.fails(Step::Write) {
            return Err(FakeError("injected write failure".to_string()));
        }
        self.record(Event::Write {
            path: path.display().to_string(),
            format: format.to_string(),
        });
        Ok(())
    }
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
