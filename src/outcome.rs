//! What an engine invocation produced, re-architected per spec §9 away
//! from "print and maybe call `exit`" into a plain value the caller acts
//! on (spec §5 "every error path returns a status code; no path may call
//! a process-terminating primitive").

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Parse/dispatch succeeded, bindings were written.
    Ok,
    /// `-h`/`--help` short-circuited; this is the rendered text for stdout.
    /// No caller-scope variable was written (spec §8 "no mutation on
    /// help").
    Help(String),
    /// The usage engine resolved a command: `usage` should be rewritten to
    /// `[handler, *tail]` (spec §4.5 step 7).
    Dispatch { handler: String, tail: Vec<String> },
    /// `--argsh` was given at the top of the command stack (spec §4.5
    /// step 2): the version banner to print.
    VersionBanner(String),
}
