use std::fs;

use ktutorial_export::ExporterType;
use ktutorial_io::{PersistenceError, export_tutorial, load_tutorial, save_tutorial};
use ktutorial_model::{Reaction, ResponseType, Step, TriggerType, Tutorial, WaitForSignal};
use ktutorial_xml::DeserializationError;
use tempfile::tempdir;

fn sample_tutorial() -> Tutorial {
    let mut tutorial = Tutorial::new();
    tutorial.set_name("Using the editor");
    tutorial.set_description("A short tour");

    let mut start = Step::with_id("start");
    start.set_text("Click the button");
    let mut reaction = Reaction::new();
    reaction.set_trigger_type(TriggerType::ConditionMet);
    reaction.set_wait_for(Some(WaitForSignal::new("button", "clicked()").into()));
    reaction.set_response_type(ResponseType::NextStep);
    reaction.set_next_step_id("end");
    start.add_reaction(reaction);
    tutorial.add_step(start);

    let mut end = Step::with_id("end");
    end.set_text("Done");
    tutorial.add_step(end);
    tutorial
}

#[test]
fn test_save_then_load_gives_equal_tutorial() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tutorial.xml");
    let tutorial = sample_tutorial();

    save_tutorial(&tutorial, &path).unwrap();
    let loaded = load_tutorial(&path).unwrap();

    assert_eq!(loaded, tutorial);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.xml");

    let error = load_tutorial(&path).unwrap_err();
    match error {
        PersistenceError::Io {
            operation,
            path: error_path,
            ..
        } => {
            assert_eq!(operation, "read");
            assert_eq!(error_path, path);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_load_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let error = load_tutorial(dir.path()).unwrap_err();
    assert!(matches!(error, PersistenceError::Io { operation: "read", .. }));
}

#[test]
fn test_load_reports_reader_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.xml");
    fs::write(&path, "<?xml version=\"1.0\"?>\n<html/>\n").unwrap();

    let error = load_tutorial(&path).unwrap_err();
    match error {
        PersistenceError::Deserialization { source, .. } => {
            assert_eq!(
                source,
                DeserializationError::UnexpectedRoot {
                    found: "html".to_string()
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_load_rejects_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.xml");
    fs::write(&path, b"<tutorial name=\"\xe9t\xe9\"/>").unwrap();

    let error = load_tutorial(&path).unwrap_err();
    assert!(matches!(error, PersistenceError::Encoding { .. }));
    assert!(error.suggestion().unwrap().contains("UTF-8"));
}

#[test]
fn test_export_writes_script() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("tutorial.js");

    let written = export_tutorial(&sample_tutorial(), ExporterType::Javascript, &path).unwrap();

    let script = fs::read_to_string(&path).unwrap();
    assert_eq!(script, written);
    assert!(script.starts_with("t = Kross.module(\"kdetranslation\");\n"));
    assert!(script.contains("startStep = ktutorial.newStep(\"start\");"));
    assert!(script.contains("step.addWaitFor(waitForClickedByButton, \"end\");"));
    assert!(!script.contains("//Error: "));
}
