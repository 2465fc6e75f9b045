//! Environment-derived render configuration (spec §6). Read once by the
//! caller and threaded through explicitly, rather than read ambiently
//! mid-render. Grounded on `examples/pacak-bpaf/src/item.rs`/`src/
//! meta_help.rs`, where a `.env(NAME)`-declared argument calls
//! `std::env::var(NAME)` to show its current value in `--help`; this
//! module generalizes that same `std::env::var`-based, read-once style to
//! the render-wide settings spec.md names.

use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// `ARGSH_FIELD_WIDTH`, default 24.
    pub field_width: usize,
    /// `ARGSH_SOURCE`, falls back to argv\[0\]'s basename.
    pub source: String,
    /// `ARGSH_VERSION`, printed by the `--argsh` banner.
    pub version: Option<String>,
    /// `ARGSH_COMMIT_SHA`, printed by the `--argsh` banner.
    pub commit_sha: Option<String>,
}

impl RenderConfig {
    /// `argv0_basename` is the fallback for `source` when `ARGSH_SOURCE`
    /// is unset, matching spec §6's env-var table.
    pub fn from_env(argv0_basename: &str) -> Self {
        RenderConfig {
            field_width: env::var("ARGSH_FIELD_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            source: env::var("ARGSH_SOURCE").unwrap_or_else(|_| argv0_basename.to_string()),
            version: env::var("ARGSH_VERSION").ok(),
            commit_sha: env::var("ARGSH_COMMIT_SHA").ok(),
        }
    }
}
