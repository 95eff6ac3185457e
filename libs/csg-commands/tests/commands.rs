mod support;

use std::path::Path;

use csg_commands::{
    boolean_command, diagnostic_command, CommandError, ExecError, ExitStatus, Registry,
    OPERATIONS,
};
use csg_mesh::BooleanOp;
use support::{args, RecordingService, Step};

fn service() -> RecordingService {
    RecordingService::new()
        .with_file("a.stl", 100)
        .with_file("b.stl", 80)
}

fn registry() -> Registry<RecordingService> {
    Registry::with_diagnostics().unwrap()
}

#[test]
fn fewer_than_two_inputs_is_usage_error_without_service_calls() {
    let registry = registry();
    for name in ["intersect", "subtract", "union"] {
        for given in [args(&[]), args(&["a.stl"])] {
            let service = service();
            let err = registry.find(name).unwrap().run(&service, &given).unwrap_err();
            assert!(matches!(err, CommandError::Usage { .. }), "{name}: {err}");
            assert!(service.events().is_empty());
        }
    }
}

#[test]
fn output_defaults_to_out_stl() {
    let service = service();
    let status = registry()
        .find("intersect")
        .unwrap()
        .invoke(&service, &args(&["a.stl", "b.stl"]));

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(
        service.written(),
        [("./out.stl".to_string(), "STL".to_string())]
    );
}

#[test]
fn third_argument_overrides_output_exactly() {
    let service = service();
    let status = registry()
        .find("subtract")
        .unwrap()
        .invoke(&service, &args(&["a.stl", "b.stl", "parts/result v2.stl", "ignored"]));

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(
        service.written(),
        [("parts/result v2.stl".to_string(), "STL".to_string())]
    );
}

#[test]
fn union_of_valid_meshes_writes_and_releases_everything() {
    let service = service();
    let status = registry()
        .find("union")
        .unwrap()
        .invoke(&service, &args(&["a.stl", "b.stl"]));

    assert_eq!(status, ExitStatus::Success);
    assert_eq!(status.code(), 0);
    assert_eq!(service.written()[0].0, "./out.stl");
    assert_eq!(service.combined_with(), [BooleanOp::Union]);
    assert!(service.released().contains(&"a.stl".to_string()));
    assert!(service.released().contains(&"b.stl".to_string()));
    assert!(service.outstanding().is_empty(), "leaked {:?}", service.outstanding());
}

#[test]
fn subtract_with_missing_second_input_fails_cleanly() {
    let service = RecordingService::new().with_file("a.stl", 100);
    let registry = registry();
    let command = registry.find("subtract").unwrap();

    let err = command
        .run(&service, &args(&["a.stl", "missing.stl"]))
        .unwrap_err();
    match err {
        CommandError::Exec(ExecError::Load { path, .. }) => {
            assert_eq!(path, Path::new("missing.stl"));
        }
        other => panic!("unexpected {other:?}"),
    }

    assert_eq!(service.released(), ["tree(a.stl)", "a.stl"]);
    assert!(service.outstanding().is_empty());
    assert!(service.written().is_empty());
    assert!(!service.calls().contains(&"write"));

    let service = RecordingService::new().with_file("a.stl", 100);
    let status = command.invoke(&service, &args(&["a.stl", "missing.stl"]));
    assert_eq!(status, ExitStatus::Failure);
    assert_ne!(status.code(), 0);
}

#[test]
fn write_failure_releases_result_mesh() {
    let service = service().failing_at(Step::Write);
    let err = registry()
        .find("union")
        .unwrap()
        .run(&service, &args(&["a.stl", "b.stl", "out.stl"]))
        .unwrap_err();

    match err {
        CommandError::Write { path, .. } => assert_eq!(path, Path::new("out.stl")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(service.calls().last(), Some(&"write"));
    assert!(service.written().is_empty());
    assert!(service.released().contains(&"mesh(combined)".to_string()));
    assert!(service.outstanding().is_empty());
}

#[test]
fn executor_failures_map_to_failure_status() {
    for step in Step::EXECUTOR {
        let service = service().failing_at(step);
        let status = registry()
            .find("intersect")
            .unwrap()
            .invoke(&service, &args(&["a.stl", "b.stl"]));

        assert_eq!(status, ExitStatus::Failure, "{step:?}");
        assert!(service.written().is_empty(), "{step:?}");
        assert!(service.outstanding().is_empty(), "{step:?}");
    }
}

#[test]
fn every_descriptor_binds_its_operation() {
    for descriptor in OPERATIONS {
        let service = service();
        let command = boolean_command::<RecordingService>(descriptor);
        assert_eq!(command.name(), descriptor.name);
        assert_eq!(command.description(), descriptor.description);

        command.run(&service, &args(&["a.stl", "b.stl"])).unwrap();
        assert_eq!(service.combined_with(), [descriptor.operation]);
    }
}

#[test]
fn diagnostic_command_writes_next_to_input() {
    let service = service();
    let command = diagnostic_command::<RecordingService>();
    assert_eq!(command.name(), "bsp");

    command.run(&service, &args(&["a.stl"])).unwrap();
    assert_eq!(
        service.written(),
        [("a.stl.bsp.stl".to_string(), "STL".to_string())]
    );
    assert!(service.outstanding().is_empty());
}

#[test]
fn diagnostic_command_requires_input() {
    let service = service();
    let err = diagnostic_command::<RecordingService>()
        .run(&service, &[])
        .unwrap_err();
    assert!(matches!(err, CommandError::Usage { .. }));
    assert!(service.events().is_empty());
}

#[test]
fn find_is_idempotent() {
    let registry = registry();
    let first = registry.find("union").unwrap();
    let second = registry.find("union").unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.name(), second.name());
}
