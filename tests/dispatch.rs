use argsh::render::RenderContext;
use argsh::usage_engine::{parse_usage_entries, UsageEngine};
use argsh::{Bindings, CoercerRegistry, EngineError, Outcome, UserError};
use pretty_assertions::assert_eq;

#[test]
fn subcommand_dispatch_with_alias_and_namespace_fallback() {
    let entries = parse_usage_entries(&["serve|s", "Start", "build|b", "Build"], "usage").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = UsageEngine { title: "t", entries: &entries, global_fields: &[], coercers: &coercers, caller_prefix: Some("main") };
    let mut bindings = Bindings::new("prog");
    bindings.register_function("main::serve");
    let tail = vec!["s".to_string(), "--port".to_string(), "8080".to_string()];
    let ctx = RenderContext::test_default();
    let outcome = engine.run(&tail, &mut bindings, &ctx).unwrap();
    match outcome {
        Outcome::Dispatch { handler, tail } => {
            assert_eq!(handler, "main::serve");
            assert_eq!(tail, vec!["--port".to_string(), "8080".to_string()]);
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn falls_back_through_the_full_namespace_chain() {
    let entries = parse_usage_entries(&["serve|s", "Start"], "usage").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = UsageEngine { title: "t", entries: &entries, global_fields: &[], coercers: &coercers, caller_prefix: Some("app::deploy") };
    let mut bindings = Bindings::new("prog");
    bindings.register_function("argsh::serve");
    let tail = vec!["serve".to_string()];
    let ctx = RenderContext::test_default();
    let outcome = engine.run(&tail, &mut bindings, &ctx).unwrap();
    match outcome {
        Outcome::Dispatch { handler, .. } => assert_eq!(handler, "argsh::serve"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn typo_in_command_suggests_the_closest_visible_name() {
    let entries = parse_usage_entries(&["serve|s", "Start", "build|b", "Build"], "usage").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = UsageEngine { title: "t", entries: &entries, global_fields: &[], coercers: &coercers, caller_prefix: None };
    let mut bindings = Bindings::new("prog");
    let tail = vec!["servv".to_string()];
    let ctx = RenderContext::test_default();
    let err = engine.run(&tail, &mut bindings, &ctx).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    match err {
        EngineError::User(UserError::UnknownCommand { token, suggestion }) => {
            assert_eq!(token, "servv");
            assert_eq!(suggestion.as_deref(), Some("serve"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn hidden_command_is_dispatchable_but_never_suggested() {
    let entries = parse_usage_entries(&["#drain", "Drain internal queue", "serve|s", "Start"], "usage").unwrap();
    let coercers = CoercerRegistry::default();
    let engine = UsageEngine { title: "t", entries: &entries, global_fields: &[], coercers: &coercers, caller_prefix: None };
    let mut bindings = Bindings::new("prog");
    bindings.register_function("drain");
    let tail = vec!["drain".to_string()];
    let ctx = RenderContext::test_default();
    let outcome = engine.run(&tail, &mut bindings, &ctx).unwrap();
    assert!(matches!(outcome, Outcome::Dispatch { .. }));

    let mut bindings = Bindings::new("prog");
    let tail = vec!["drainn".to_string()];
    let err = engine.run(&tail, &mut bindings, &ctx).unwrap_err();
    match err {
        EngineError::User(UserError::UnknownCommand { suggestion, .. }) => assert_eq!(suggestion, None),
        other => panic!("unexpected error: {:?}", other),
    }
}
