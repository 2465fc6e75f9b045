//! Renders help text, shell completions, and structured documentation off
//! the same field/usage model (spec §4.6). All three sub-renderers below
//! are driven from the same `(command, positionals, flags, description)`
//! tuples — they differ only in their output shape.

#[cfg(feature = "autocomplete")]
pub mod completion;
#[cfg(feature = "docgen")]
pub mod docgen;
pub mod help;

use crate::config::RenderConfig;

/// Process-wide command-name stack (spec §3), re-architected per spec §9
/// into an explicit, append-only value threaded through render calls
/// instead of living in global state: program basename followed by each
/// resolved subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    pub fn root(program: impl Into<String>) -> Self {
        CommandPath(vec![program.into()])
    }

    /// A new path with `command` appended; the original is untouched,
    /// matching the spec's "append-only during one top-level invocation"
    /// ownership note without needing shared mutable state.
    pub fn push(&self, command: impl Into<String>) -> CommandPath {
        let mut stack = self.0.clone();
        stack.push(command.into());
        CommandPath(stack)
    }

    pub fn display(&self) -> String {
        self.0.join(" ")
    }

    /// `--argsh` only prints the version banner "at the top of the command
    /// stack" (spec §4.5 step 2) — i.e. before any subcommand resolved.
    pub fn is_top_level(&self) -> bool {
        self.0.len() <= 1
    }
}

/// Everything a render call needs besides the field/usage data itself.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub command_path: CommandPath,
    pub config: RenderConfig,
    pub use_color: bool,
}

impl RenderContext {
    pub fn new(command_path: CommandPath, config: RenderConfig, use_color: bool) -> Self {
        RenderContext { command_path, config, use_color }
    }

    /// A context with no env-derived state and color disabled, for tests.
    pub fn test_default() -> Self {
        RenderContext {
            command_path: CommandPath::root("prog"),
            config: RenderConfig {
                field_width: 24,
                source: "prog".to_string(),
                version: None,
                commit_sha: None,
            },
            use_color: false,
        }
    }
}

/// Wrap `text` to `width` columns, breaking only on whitespace. Used for
/// option descriptions "wrapped to terminal width when stdout is a tty"
/// (spec §4.6); callers pick the width (terminal width when a tty, no wrap
/// otherwise — see [`crate::buffer::stdout_is_tty`]).
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
