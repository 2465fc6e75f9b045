use argsh::args_engine::{parse_fields, ArgsEngine};
use argsh::render::RenderContext;
use argsh::{Bindings, CoercerRegistry, EngineError, InternalError, UserError};
use pretty_assertions::assert_eq;

#[test]
fn odd_length_args_array_is_an_internal_error() {
    let bindings = Bindings::new("prog");
    let err = parse_fields(&["name", "Name", "orphan"], &bindings, "args").unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(matches!(err, EngineError::Internal(InternalError::OddLengthArray { array: "args" })));
    assert!(err.to_string().starts_with("argsh: spec error:"));
}

#[test]
fn unknown_modifier_in_a_spec_is_an_internal_error() {
    let bindings = Bindings::new("prog");
    let err = parse_fields(&["weird:@", "Weird"], &bindings, "args").unwrap_err();
    assert!(matches!(err, EngineError::Internal(InternalError::SpecError { .. })));
}

#[test]
fn type_coercion_failure_exits_one_not_two() {
    let bindings = Bindings::new("prog");
    let fields = parse_fields(&["age|a:~int", "Age"], &bindings, "args").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = ArgsEngine { title: "t", fields: &fields, coercers: &coercers };
    let mut bindings = Bindings::new("prog");
    let tail = vec!["--age".to_string(), "twelve".to_string()];
    let ctx = RenderContext::test_default();
    let err = engine.run(&tail, &mut bindings, &ctx).unwrap_err();
    assert_eq!(err.exit_code(), 1);
    match err {
        EngineError::User(UserError::CoercionFailed { field, value, .. }) => {
            assert_eq!(field, "age");
            assert_eq!(value, "twelve");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn missing_value_for_a_value_taking_flag() {
    let bindings = Bindings::new("prog");
    let fields = parse_fields(&["age|a:~int", "Age"], &bindings, "args").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = ArgsEngine { title: "t", fields: &fields, coercers: &coercers };
    let mut bindings = Bindings::new("prog");
    let tail = vec!["--age".to_string()];
    let ctx = RenderContext::test_default();
    let err = engine.run(&tail, &mut bindings, &ctx).unwrap_err();
    assert!(matches!(err, EngineError::User(UserError::MissingValue { .. })));
}

#[test]
fn unknown_long_flag_has_no_suggestion_when_nothing_close() {
    let bindings = Bindings::new("prog");
    let fields = parse_fields(&["port|p:~int", "Port"], &bindings, "args").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = ArgsEngine { title: "t", fields: &fields, coercers: &coercers };
    let mut bindings = Bindings::new("prog");
    let tail = vec!["--xyzzy".to_string()];
    let ctx = RenderContext::test_default();
    let err = engine.run(&tail, &mut bindings, &ctx).unwrap_err();
    match err {
        EngineError::User(UserError::UnknownFlag { token, suggestion }) => {
            assert_eq!(token, "--xyzzy");
            assert_eq!(suggestion, None);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
