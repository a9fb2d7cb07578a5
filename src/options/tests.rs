//! Tests for option parsing and resolution.

use crate::error::{DoitError, ErrorKind};
use crate::options::catalog;
use crate::options::{OptionKind, OptionParser, OptionSpec, ParamSet, Value};
use crate::test_support::yaml_value;
use std::collections::BTreeMap;

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

fn run_parser() -> OptionParser {
    OptionParser::new(
        "run",
        vec![
            catalog::dodo_file(),
            catalog::cwd_path(),
            catalog::seek_file(),
            catalog::dep_file(),
            catalog::always(),
            catalog::continue_on_failure(),
            catalog::verbosity(),
            catalog::reporter(),
            catalog::outfile(),
            catalog::num_process(),
        ],
    )
    .unwrap()
}

fn manifest_defaults(pairs: &[(&str, Value)]) -> BTreeMap<String, serde_yaml::Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), yaml_value(v)))
        .collect()
}

#[test]
fn built_parser_passes_clap_debug_assert() {
    run_parser().clap_command().clone().debug_assert();
}

#[test]
fn defaults_apply_when_nothing_is_given() {
    let parsed = run_parser().parse(&[]).unwrap();

    assert_eq!(parsed.params.string("dodoFile").unwrap().as_deref(), Some("dodo.yaml"));
    assert_eq!(parsed.params.string("dep_file").unwrap().as_deref(), Some(".doit.db"));
    assert_eq!(parsed.params.string("cwdPath").unwrap(), None);
    assert_eq!(parsed.params.int("num_process").unwrap(), Some(0));
    assert_eq!(parsed.params.int("verbosity").unwrap(), None);
    assert!(!parsed.params.flag("continue").unwrap());
    assert!(!parsed.params.is_explicit("num_process"));
    assert!(parsed.positional.is_empty());
}

#[test]
fn long_short_and_equals_forms_are_converted_by_type() {
    let parsed = run_parser()
        .parse(&args(&["--file=other.yaml", "-n", "4", "--verbosity", "2", "-a"]))
        .unwrap();

    assert_eq!(parsed.params.string("dodoFile").unwrap().as_deref(), Some("other.yaml"));
    assert_eq!(parsed.params.int("num_process").unwrap(), Some(4));
    assert_eq!(parsed.params.int("verbosity").unwrap(), Some(2));
    assert!(parsed.params.flag("always").unwrap());
    assert!(parsed.params.is_explicit("dodoFile"));
    assert!(parsed.params.is_explicit("always"));
    assert!(!parsed.params.is_explicit("reporter"));
}

#[test]
fn positional_arguments_are_collected_in_order() {
    let parsed = run_parser()
        .parse(&args(&["-a", "build", "test"]))
        .unwrap();

    assert_eq!(parsed.positional, vec!["build", "test"]);
}

#[test]
fn inverse_flag_after_flag_forces_false() {
    let parsed = run_parser()
        .parse(&args(&["--continue", "--no-continue"]))
        .unwrap();

    assert!(!parsed.params.flag("continue").unwrap());
    assert!(parsed.params.is_explicit("continue"));
}

#[test]
fn flag_after_inverse_wins() {
    let parsed = run_parser()
        .parse(&args(&["--no-continue", "-c"]))
        .unwrap();

    assert!(parsed.params.flag("continue").unwrap());
}

#[test]
fn inverse_alone_is_an_explicit_false() {
    let parsed = run_parser().parse(&args(&["--no-continue"])).unwrap();

    assert!(!parsed.params.flag("continue").unwrap());
    assert!(parsed.params.is_explicit("continue"));
}

#[test]
fn repeated_value_option_keeps_last_value() {
    let parsed = run_parser()
        .parse(&args(&["-n", "2", "-n", "8"]))
        .unwrap();

    assert_eq!(parsed.params.int("num_process").unwrap(), Some(8));
}

#[test]
fn unknown_flag_is_a_parse_error() {
    let err = run_parser().parse(&args(&["--frobnicate"])).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OptionParse);
    let message = err.to_string();
    assert!(message.contains("--frobnicate"), "message was: {}", message);
    assert!(!message.contains('\n'));
}

#[test]
fn non_numeric_int_is_a_parse_error() {
    let err = run_parser().parse(&args(&["-n", "many"])).unwrap_err();
    assert!(matches!(err, DoitError::OptionParse(_)));
}

#[test]
fn missing_value_is_a_parse_error() {
    let err = run_parser().parse(&args(&["--file"])).unwrap_err();
    assert!(matches!(err, DoitError::OptionParse(_)));
}

#[test]
fn list_option_collects_every_occurrence() {
    let parser = OptionParser::new(
        "demo",
        vec![OptionSpec::list("tag", Some('t'), "tag", "tags to apply")],
    )
    .unwrap();

    let parsed = parser.parse(&args(&["-t", "a", "--tag", "b"])).unwrap();
    assert_eq!(parsed.params.list("tag").unwrap(), vec!["a", "b"]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let err = OptionParser::new("demo", vec![catalog::always(), catalog::always()]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn duplicate_short_flags_are_rejected() {
    // both use -a
    let err = OptionParser::new("demo", vec![catalog::always(), catalog::clean_all()]).unwrap_err();
    assert!(err.to_string().contains("-a"));
}

#[test]
fn manifest_default_overrides_hardcoded_default() {
    let mut params = run_parser().parse(&[]).unwrap().params;

    params
        .update_defaults(&manifest_defaults(&[("verbosity", Value::Int(2))]))
        .unwrap();

    assert_eq!(params.int("verbosity").unwrap(), Some(2));
}

#[test]
fn command_line_value_overrides_manifest_default() {
    let mut params = run_parser().parse(&args(&["-v", "0"])).unwrap().params;

    params
        .update_defaults(&manifest_defaults(&[("verbosity", Value::Int(2))]))
        .unwrap();

    assert_eq!(params.int("verbosity").unwrap(), Some(0));
}

#[test]
fn explicit_value_equal_to_default_still_beats_manifest() {
    let mut params = run_parser()
        .parse(&args(&["--process", "0", "--no-continue"]))
        .unwrap()
        .params;

    params
        .update_defaults(&manifest_defaults(&[
            ("num_process", Value::Int(3)),
            ("continue", Value::Bool(true)),
        ]))
        .unwrap();

    assert_eq!(params.int("num_process").unwrap(), Some(0));
    assert!(!params.flag("continue").unwrap());
}

#[test]
fn unknown_manifest_keys_are_ignored() {
    let mut params = run_parser().parse(&[]).unwrap().params;

    params
        .update_defaults(&manifest_defaults(&[("not_an_option", Value::Int(1))]))
        .unwrap();

    assert!(params.get("not_an_option").is_none());
}

#[test]
fn unknown_manifest_keys_may_hold_any_yaml() {
    let mut params = run_parser().parse(&[]).unwrap().params;
    let defaults: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str("plugins: {x: 1}\nextra_ratio: 1.5\nverbosity: 2\n").unwrap();

    params.update_defaults(&defaults).unwrap();

    assert_eq!(params.int("verbosity").unwrap(), Some(2));
}

#[test]
fn known_key_with_unconvertible_yaml_is_an_invalid_manifest() {
    let mut params = run_parser().parse(&[]).unwrap().params;
    let defaults: BTreeMap<String, serde_yaml::Value> =
        serde_yaml::from_str("verbosity: {level: 2}\n").unwrap();

    let err = params.update_defaults(&defaults).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidManifest);
    assert!(err.to_string().contains("verbosity"));
}

#[test]
fn mistyped_manifest_default_is_an_invalid_manifest() {
    let mut params = run_parser().parse(&[]).unwrap().params;

    let err = params
        .update_defaults(&manifest_defaults(&[("always", Value::Str("yes".into()))]))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidManifest);
}

#[test]
fn numeric_strings_coerce_to_int() {
    assert_eq!(Value::Str("7".into()).coerce(OptionKind::Int), Some(Value::Int(7)));
    assert_eq!(Value::Str("x".into()).coerce(OptionKind::Int), None);
    assert_eq!(
        Value::Str("a".into()).coerce(OptionKind::List),
        Some(Value::List(vec!["a".into()]))
    );
    assert_eq!(Value::Null.coerce(OptionKind::Bool), Some(Value::Null));
}

#[test]
fn reading_undeclared_option_is_internal_error() {
    let params = ParamSet::from_defaults(&[catalog::always()]);
    let err = params.flag("quiet").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[test]
fn reading_with_wrong_type_is_internal_error() {
    let params = ParamSet::from_defaults(&[catalog::dep_file()]);
    assert!(params.flag("dep_file").is_err());
}

#[test]
fn help_substitutes_default_value() {
    assert_eq!(
        catalog::dodo_file().help(),
        "load task from dodo FILE [default: dodo.yaml]"
    );
    assert_eq!(
        catalog::seek_file().help(),
        "seek dodo file on parent folders [default: False]"
    );
}

#[test]
fn only_toggles_carry_an_inverse() {
    let toggle = catalog::continue_on_failure();
    assert_eq!(toggle.kind(), OptionKind::Bool);
    assert_eq!(toggle.inverse(), Some("no-continue"));
    assert_eq!(catalog::always().inverse(), None);
}
