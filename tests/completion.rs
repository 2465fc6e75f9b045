use argsh::render::completion::{bash, fish, zsh};
use argsh::usage_engine::parse_usage_entries;
use argsh::{args_engine::parse_fields, Bindings};
use pretty_assertions::assert_eq;

fn sample() -> (Vec<argsh::UsageEntry>, Vec<argsh::Field>) {
    let entries = parse_usage_entries(&["serve|s", "Start", "#internal", "Internal"], "usage").unwrap();
    let bindings = Bindings::new("prog");
    let fields = parse_fields(&["port|p:~int", "Port", "#token", "Internal token"], &bindings, "args").unwrap();
    (entries, fields)
}

#[test]
fn bash_completion_registers_a_complete_call_for_the_program() {
    let (entries, fields) = sample();
    let script = bash("deployctl", &entries, &fields);
    assert!(script.contains("complete -o default -F _deployctl deployctl"));
    assert!(script.contains("serve"));
    assert!(!script.contains("internal"));
}

#[test]
fn zsh_completion_describes_each_visible_command() {
    let (entries, fields) = sample();
    let script = zsh("deployctl", &entries, &fields);
    assert!(script.starts_with("#compdef deployctl"));
    assert!(script.contains("'serve:Start'"));
    assert!(!script.contains("internal"));
}

#[test]
fn fish_completion_emits_one_line_per_visible_item() {
    let (entries, fields) = sample();
    let script = fish("deployctl", &entries, &fields);
    let command_lines: Vec<&str> = script.lines().filter(|l| l.contains("__fish_use_subcommand")).collect();
    assert_eq!(command_lines.len(), 1);
    assert!(script.contains("-l port"));
    assert!(!script.contains("token"));
}
