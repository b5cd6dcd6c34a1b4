//! Script loading.

use pretty_assertions::assert_eq;
use rpnc::{RunConfig, RunError};
use tempfile::tempdir;

use crate::common::{quiet, run, script, session, session_with};

#[test]
fn test_argument_loads_script() {
    let dir = tempdir().unwrap();
    let path = script(dir.path(), "six.rpn", "2 3\n*\n");
    let (_, top) = run(quiet(), &[path.as_str()]);
    assert_eq!(top, 6.0);
}

#[test]
fn test_token_loads_script_in_place() {
    let dir = tempdir().unwrap();
    let path = script(dir.path(), "two.rpn", "2");
    let (session, top) = run(quiet(), &[format!("1 {path} +").as_str()]);
    assert_eq!(top, 3.0);
    assert_eq!(session.calculator().stack().height(), 1);
}

#[test]
fn test_extension_match_ignores_case() {
    let dir = tempdir().unwrap();
    let path = script(dir.path(), "UPPER.RPN", "9");
    let (_, top) = run(quiet(), &[path.as_str()]);
    assert_eq!(top, 9.0);
}

#[test]
fn test_file_lines_are_reported_per_token() {
    let dir = tempdir().unwrap();
    let path = script(dir.path(), "bind.rpn", "4 @k\n");
    let (session, _) = run(RunConfig::default(), &[path.as_str()]);
    assert_eq!(
        session.sink().captured(),
        "Top of stack: 4\n\
         Setting k to 4\n\
         Top of stack: 4\n\
         Top of stack at end: 4\n"
    );
}

#[test]
fn test_state_persists_across_sources() {
    let dir = tempdir().unwrap();
    let path = script(dir.path(), "defs.rpn", "10 @ten^\n");
    let (session, top) = run(quiet(), &[path.as_str(), "ten ten +"]);
    assert_eq!(top, 20.0);
    assert_eq!(session.calculator().variables().get("ten").map(|v| v.value), Some(10.0));
}

#[test]
fn test_nested_scripts() {
    let dir = tempdir().unwrap();
    let inner = script(dir.path(), "inner.rpn", "3 *");
    let outer = script(dir.path(), "outer.rpn", &format!("5\n{inner}\n1 +\n"));
    let (_, top) = run(quiet(), &[outer.as_str()]);
    assert_eq!(top, 16.0);
}

#[test]
fn test_same_script_may_load_twice_in_sequence() {
    let dir = tempdir().unwrap();
    let inc = script(dir.path(), "inc.rpn", "1 +");
    let (_, top) = run(quiet(), &[format!("0 {inc} {inc} {inc}").as_str()]);
    assert_eq!(top, 3.0);
}

#[test]
fn test_recursive_load_is_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("loop.rpn");
    let token = path.to_string_lossy().into_owned();
    std::fs::write(&path, format!("1 {token} 2")).unwrap();

    let (session, top) = run(quiet(), &[token.as_str()]);
    assert_eq!(top, 2.0);
    assert_eq!(session.calculator().stack().as_slice(), &[1.0, 2.0]);
    assert_eq!(
        session.sink().captured(),
        format!("Skipping {token}: file is already being loaded\nTop of stack at end: 2\n")
    );
}

#[test]
fn test_depth_limit_skips_deeper_scripts() {
    let dir = tempdir().unwrap();
    let inner = script(dir.path(), "inner.rpn", "100");
    let outer = script(dir.path(), "outer.rpn", &format!("1 {inner}"));
    let config = RunConfig {
        max_depth: 1,
        ..quiet()
    };

    let (session, top) = run(config, &[outer.as_str()]);
    assert_eq!(top, 1.0);
    assert!(session
        .sink()
        .captured()
        .starts_with(&format!("Skipping {inner}: nesting deeper than 1 files\n")));
}

#[test]
fn test_custom_extension() {
    let dir = tempdir().unwrap();
    let calc = script(dir.path(), "seven.calc", "7");
    let rpn = script(dir.path(), "ignored.rpn", "8");
    let config = RunConfig {
        extension: ".calc".to_string(),
        ..quiet()
    };

    let mut session = session_with(config);
    session.eval_token(&calc).unwrap();
    assert_eq!(session.calculator().top(), 7.0);

    // With a different extension a `.rpn` path is just an unknown token.
    session.eval_token(&rpn).unwrap();
    assert_eq!(session.calculator().top(), 7.0);
    assert!(session.sink().captured().starts_with("Failed to interpret "));
}

#[test]
fn test_missing_script_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.rpn");
    let mut session = session();

    let err = session
        .run_inputs(&["1".to_string(), missing.to_string_lossy().into_owned(), "2".to_string()])
        .unwrap_err();
    assert!(matches!(err, RunError::Open { ref path, .. } if path == &missing));
    assert_eq!(err.exit_code(), 1);
    // Evaluation stops at the failing input.
    assert_eq!(session.calculator().top(), 1.0);
}

#[test]
fn test_missing_nested_script_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("gone.rpn");
    let outer = script(
        dir.path(),
        "outer.rpn",
        &format!("1\n{}\n2\n", missing.to_string_lossy()),
    );
    let mut session = session();

    let err = session.run_inputs(&[outer]).unwrap_err();
    assert!(matches!(err, RunError::Open { .. }));
    assert_eq!(session.calculator().stack().as_slice(), &[1.0]);
}

#[test]
fn test_invalid_utf8_in_script_is_not_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bytes.rpn");
    std::fs::write(&path, b"2\n\xfe\xff\n3 *\n").unwrap();

    let token = path.to_string_lossy().into_owned();
    let (session, top) = run(quiet(), &[token.as_str()]);
    assert_eq!(top, 6.0);
    assert!(session
        .sink()
        .captured()
        .starts_with("Failed to interpret \u{FFFD}\u{FFFD}  VarCount: 0\n"));
}

