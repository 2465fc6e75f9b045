//! Shell-completion script generation (spec §4.6): bash, zsh, and fish
//! scripts built from the same visible command/flag lists, gated behind
//! the `autocomplete` feature.

use crate::field::{Field, FieldKind};
use crate::usage_engine::UsageEntry;

fn visible_long_flags(fields: &[Field]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden)
        .map(|f| format!("--{}", f.display_name))
        .collect()
}

fn visible_short_flags(fields: &[Field]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden)
        .filter_map(|f| f.short.map(|c| format!("-{}", c)))
        .collect()
}

fn visible_commands(entries: &[UsageEntry]) -> Vec<String> {
    entries.iter().filter(|e| !e.hidden).flat_map(|e| e.all_names().map(str::to_string)).collect()
}

/// `complete -o default -F _<name>` function enumerating visible commands
/// and flags, grounded on bpaf's own `complete_gen`/`complete_shell` split
/// between dynamic completion and a static per-shell function body.
pub fn bash(program: &str, entries: &[UsageEntry], fields: &[Field]) -> String {
    let commands = visible_commands(entries).join(" ");
    let longs = visible_long_flags(fields).join(" ");
    let shorts = visible_short_flags(fields).join(" ");
    let fname = format!("_{}", program.replace(['-', ' '], "_"));
    format!(
        "{fname}() {{\n    local cur words=\"{commands} {longs} {shorts}\"\n    cur=\"${{COMP_WORDS[COMP_CWORD]}}\"\n    COMPREPLY=($(compgen -W \"$words\" -- \"$cur\"))\n}}\ncomplete -o default -F {fname} {program}\n"
    )
}

/// `#compdef <name>` function using `_arguments`/`_describe`.
pub fn zsh(program: &str, entries: &[UsageEntry], fields: &[Field]) -> String {
    let mut out = format!("#compdef {program}\n\n_{program}() {{\n  local -a commands\n  commands=(\n");
    for e in entries.iter().filter(|e| !e.hidden) {
        out.push_str(&format!("    '{}:{}'\n", e.name, e.description));
    }
    out.push_str("  )\n  _arguments \\\n");
    for f in fields.iter().filter(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden) {
        if let Some(short) = f.short {
            out.push_str(&format!("    '(-{short} --{long})'{{-{short},--{long}}}'[{desc}]' \\\n", short = short, long = f.display_name, desc = f.description));
        } else {
            out.push_str(&format!("    '--{long}[{desc}]' \\\n", long = f.display_name, desc = f.description));
        }
    }
    out.push_str("    '*:: :_describe -t commands command commands'\n}\n\n_{program} \"$@\"\n".replace("{program}", program).as_str());
    out
}

/// One `complete -c <name>` line per visible command and flag (spec §4.6
/// fish contract, literally as written there).
pub fn fish(program: &str, entries: &[UsageEntry], fields: &[Field]) -> String {
    let mut out = String::new();
    for e in entries.iter().filter(|e| !e.hidden) {
        for name in e.all_names() {
            out.push_str(&format!(
                "complete -c {program} -n '__fish_use_subcommand' -a '{name}' -d '{desc}'\n",
                program = program,
                name = name,
                desc = e.description
            ));
        }
    }
    for f in fields.iter().filter(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden) {
        let mut line = format!("complete -c {} -l {}", program, f.display_name);
        if let Some(short) = f.short {
            line.push_str(&format!(" -s {}", short));
        }
        line.push_str(&format!(" -d '{}'\n", f.description));
        out.push_str(&line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<UsageEntry>, Vec<Field>) {
        let entries = vec![UsageEntry::parse("serve|s", "Start"), UsageEntry::parse("#secret", "Secret")];
        let fields = vec![
            Field::parse("port|p:~int", "Port", false, false).unwrap(),
            Field::parse("#internal", "Internal", false, false).unwrap(),
        ];
        (entries, fields)
    }

    #[test]
    fn bash_completion_omits_hidden_entries() {
        let (entries, fields) = sample();
        let script = bash("app", &entries, &fields);
        assert!(script.contains("serve"));
        assert!(script.contains("--port"));
        assert!(script.contains("-p"));
        assert!(!script.contains("secret"));
        assert!(!script.contains("internal"));
    }

    #[test]
    fn zsh_completion_has_compdef_header() {
        let (entries, fields) = sample();
        let script = zsh("app", &entries, &fields);
        assert!(script.starts_with("#compdef app\n"));
        assert!(script.contains("serve:Start"));
    }

    #[test]
    fn fish_completion_emits_one_line_per_command_and_flag() {
        let (entries, fields) = sample();
        let script = fish("app", &entries, &fields);
        assert_eq!(script.lines().filter(|l| l.contains("-a 'serve'")).count(), 1);
        assert!(script.contains("-l port"));
    }
}
