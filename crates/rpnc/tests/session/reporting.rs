//! Report lines produced while evaluating arguments.

use pretty_assertions::assert_eq;
use rpnc::RunConfig;

use crate::common::{quiet, run, session};

#[test]
fn test_reports_top_after_every_token() {
    let (session, top) = run(RunConfig::default(), &["3 4 +"]);
    assert_eq!(top, 7.0);
    assert_eq!(
        session.sink().captured(),
        "Top of stack: 3\n\
         Top of stack: 4\n\
         Top of stack: 7\n\
         Top of stack at end: 7\n"
    );
}

#[test]
fn test_each_argument_is_split_on_whitespace() {
    let (session, top) = run(quiet(), &["1 2", "  +  ", "10"]);
    assert_eq!(top, 10.0);
    assert_eq!(session.calculator().stack().as_slice(), &[3.0, 10.0]);
}

#[test]
fn test_operands_are_read_in_pop_order() {
    let (_, top) = run(quiet(), &["10 3 -"]);
    assert_eq!(top, -7.0);

    let (_, top) = run(quiet(), &["pi tau /"]);
    assert_eq!(top, 0.5);
}

#[test]
fn test_bind_reports_and_recall() {
    let (session, top) = run(RunConfig::default(), &["5 @x x x +"]);
    assert_eq!(top, 10.0);
    assert_eq!(
        session.sink().captured(),
        "Top of stack: 5\n\
         Setting x to 5\n\
         Top of stack: 5\n\
         Top of stack: 5\n\
         Top of stack: 5\n\
         Top of stack: 10\n\
         Top of stack at end: 10\n"
    );
}

#[test]
fn test_pop_bind_consumes_value() {
    let (session, top) = run(quiet(), &["5 @x^"]);
    assert_eq!(top, 0.0);
    assert!(session.calculator().stack().is_empty());
    assert_eq!(
        session.sink().captured(),
        "Setting x to 5\nTop of stack at end: 0\n"
    );
}

#[test]
fn test_names_are_case_insensitive() {
    let (session, top) = run(quiet(), &["2 @Rate^ RATE rate *"]);
    assert_eq!(top, 4.0);
    assert_eq!(session.calculator().variables().count(), 1);
    assert!(session.sink().captured().starts_with("Setting rate to 2\n"));
}

#[test]
fn test_unknown_token_reports_variable_count() {
    let (session, top) = run(RunConfig::default(), &["1 @a foo"]);
    assert_eq!(top, 1.0);
    assert_eq!(
        session.sink().captured(),
        "Top of stack: 1\n\
         Setting a to 1\n\
         Top of stack: 1\n\
         Failed to interpret foo  VarCount: 1\n\
         Top of stack: 1\n\
         Top of stack at end: 1\n"
    );
}

#[test]
fn test_unknown_token_is_reported_lowercased() {
    let (session, _) = run(quiet(), &["FOO"]);
    assert_eq!(
        session.sink().captured(),
        "Failed to interpret foo  VarCount: 0\nTop of stack at end: 0\n"
    );
}

#[test]
fn test_quiet_keeps_diagnostics() {
    let (session, _) = run(quiet(), &["7 @n bogus"]);
    assert_eq!(
        session.sink().captured(),
        "Setting n to 7\n\
         Failed to interpret bogus  VarCount: 1\n\
         Top of stack at end: 7\n"
    );
}

#[test]
fn test_lenient_underflow_reads_zero() {
    let (_, top) = run(quiet(), &["5 +"]);
    assert_eq!(top, 5.0);
}

#[test]
fn test_strict_underflow_is_reported_and_skipped() {
    let config = RunConfig {
        policy: rpn_eval::UnderflowPolicy::Strict,
        ..quiet()
    };
    let (session, top) = run(config, &["5 + 2 +"]);
    assert_eq!(top, 7.0);
    assert_eq!(
        session.sink().captured(),
        "Error: stack underflow in `+`: needs 2 operand(s), stack holds 1\n\
         Top of stack at end: 7\n"
    );
}

#[test]
fn test_empty_binding_name_is_an_error() {
    let (session, top) = run(quiet(), &["3 @ @^"]);
    assert_eq!(top, 3.0);
    let captured = session.sink().captured();
    assert_eq!(captured.matches("Error: ").count(), 2);
    assert_eq!(session.calculator().variables().count(), 0);
}

#[test]
fn test_seed_makes_random_reproducible() {
    let config = RunConfig {
        seed: Some(42),
        ..quiet()
    };
    let (_, first) = run(config.clone(), &["rand 100 irand"]);
    let (_, second) = run(config, &["rand 100 irand"]);
    assert_eq!(first, second);
    assert!((0.0..100.0).contains(&first));
}

#[test]
fn test_blank_input_reports_nothing() {
    let mut session = session();
    session.eval_line("   ").unwrap();
    assert_eq!(session.sink().captured(), "");
}

#[test]
fn test_finish_on_empty_stack() {
    let mut session = session();
    assert_eq!(session.finish(), 0.0);
    assert_eq!(session.sink().captured(), "Top of stack at end: 0\n");
}
