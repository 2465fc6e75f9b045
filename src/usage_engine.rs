//! The usage engine (`:usage`, spec §4.5): parses a mix of global flags and
//! a single command token, resolves the token against an alias table, and
//! locates a handler function via namespace fallback.

use std::collections::HashSet;

use crate::bindings::HostBridge;
use crate::coerce::CoercerRegistry;
use crate::error::{EngineError, InternalError, UserError};
use crate::field::Field;
use crate::flagset::FlagMatcher;
use crate::outcome::Outcome;
use crate::render;
use crate::render::RenderContext;

/// One declared subcommand (spec §3 "Usage entry").
///
/// ```text
/// usage-spec := [ "#" ] name ( "|" alias )* [ ":-" handler-function ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub name: String,
    pub aliases: Vec<String>,
    /// Explicit `:-handler` mapping; exclusive override of namespace
    /// fallback when present (spec §9 open question: "current code treats
    /// `:-` as exclusive override").
    pub handler: Option<String>,
    pub hidden: bool,
    pub description: String,
}

impl UsageEntry {
    pub fn parse(spec: &str, description: &str) -> UsageEntry {
        let hidden = spec.starts_with('#');
        let rest = spec.strip_prefix('#').unwrap_or(spec);

        let (names_part, handler) = match rest.find(":-") {
            Some(ix) => (&rest[..ix], Some(rest[ix + 2..].to_string())),
            None => (rest, None),
        };

        let mut names = names_part.split('|');
        let name = names.next().unwrap_or("").to_string();
        let aliases = names.map(|s| s.to_string()).collect();

        UsageEntry { name, aliases, handler, hidden, description: description.to_string() }
    }

    fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }

    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|s| s.as_str()))
    }
}

/// Decode a flat `(usage-spec, description, ...)` array (spec §3).
pub fn parse_usage_entries(flat: &[&str], array_name: &'static str) -> Result<Vec<UsageEntry>, EngineError> {
    if flat.len() % 2 != 0 {
        return Err(EngineError::Internal(InternalError::OddLengthArray { array: array_name }));
    }
    Ok(flat.chunks(2).map(|pair| UsageEntry::parse(pair[0], pair[1])).collect())
}

/// Ordered rule for mapping a resolved command token to a handler function
/// (spec §4.5 step 5, §9 "explicit `caller_prefix: Option<string>`").
fn namespace_candidates(caller_prefix: Option<&str>, token: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(prefix) = caller_prefix {
        candidates.push(format!("{}::{}", prefix, token));
        if let Some((_, last_segment)) = prefix.rsplit_once("::") {
            candidates.push(format!("{}::{}", last_segment, token));
        } else {
            candidates.push(format!("{}::{}", prefix, token));
        }
    }
    candidates.push(token.to_string());
    candidates.push(format!("argsh::{}", token));
    candidates
}

pub struct UsageEngine<'a> {
    pub title: &'a str,
    pub entries: &'a [UsageEntry],
    /// Global flags (the caller-scoped `args` array, spec §4.5 "optionally
    /// a caller-scoped `args` array for global flags"). Empty when the
    /// caller declares no globals.
    pub global_fields: &'a [Field],
    pub coercers: &'a CoercerRegistry,
    /// The resolving function's own name, e.g. `"app::deploy"`; `None` at
    /// the top level.
    pub caller_prefix: Option<&'a str>,
}

fn is_help_token(tok: &str) -> bool {
    tok == "-h" || tok == "--help"
}

impl<'a> UsageEngine<'a> {
    pub fn run(&self, tail: &[String], bindings: &mut dyn HostBridge, ctx: &RenderContext) -> Result<Outcome, EngineError> {
        if let Some(first) = tail.first() {
            if is_help_token(first) {
                return Ok(Outcome::Help(render::help::render_usage_help(
                    self.title,
                    self.global_fields,
                    self.entries,
                    &*bindings,
                    ctx,
                )));
            }
            if first == "--argsh" && ctx.command_path.is_top_level() {
                return Ok(Outcome::VersionBanner(render::help::render_version_banner(&ctx.config)));
            }
        }

        let matcher = FlagMatcher::new(self.global_fields, self.coercers);
        let mut matched: HashSet<usize> = HashSet::new();
        let mut i = 0usize;
        let mut command_token: Option<String> = None;

        while i < tail.len() {
            let token = tail[i].as_str();

            if command_token.is_some() {
                break;
            }

            if let Some(long) = token.strip_prefix("--") {
                let (name, inline) = match long.split_once('=') {
                    Some((n, v)) => (n, Some(v.to_string())),
                    None => (long, None),
                };
                match matcher.find_long(name) {
                    Some(idx) => {
                        i += 1;
                        matcher.apply_long(idx, inline, &mut i, tail, bindings, &mut matched)?;
                    }
                    // Spec §4.5 step 3: an unknown flag before a command is
                    // resolved is not an error — fall through to help.
                    None => {
                        return Ok(Outcome::Help(render::help::render_usage_help(
                            self.title,
                            self.global_fields,
                            self.entries,
                            &*bindings,
                            ctx,
                        )));
                    }
                }
                continue;
            }

            if token.starts_with('-') && token.len() > 1 {
                i += 1;
                let cluster = &token[1..];
                if matcher.find_short(cluster.chars().next().unwrap_or(' ')).is_none() {
                    return Ok(Outcome::Help(render::help::render_usage_help(
                        self.title,
                        self.global_fields,
                        self.entries,
                        &*bindings,
                        ctx,
                    )));
                }
                matcher.apply_short_cluster(cluster, &mut i, tail, bindings, &mut matched)?;
                continue;
            }

            command_token = Some(token.to_string());
            i += 1;
        }

        matcher.check_required_and_defaults(&matched, bindings)?;

        let command_token = match command_token {
            Some(t) => t,
            None => {
                return Ok(Outcome::Help(render::help::render_usage_help(
                    self.title,
                    self.global_fields,
                    self.entries,
                    &*bindings,
                    ctx,
                )));
            }
        };

        let entry = match self.entries.iter().find(|e| e.matches(&command_token)) {
            Some(e) => e,
            None => {
                let visible: Vec<&str> = self.entries.iter().filter(|e| !e.hidden).flat_map(|e| e.all_names()).collect();
                let suggestion = crate::suggest::suggest(&command_token, visible).map(|s| s.to_string());
                return Err(EngineError::User(UserError::UnknownCommand { token: command_token, suggestion }));
            }
        };

        let handler = match &entry.handler {
            Some(h) => {
                if !bindings.lookup_function(h) {
                    return Err(EngineError::Internal(InternalError::DanglingHandler {
                        command: command_token,
                        handler: h.clone(),
                    }));
                }
                h.clone()
            }
            None => {
                let candidates = namespace_candidates(self.caller_prefix, &entry.name);
                match candidates.iter().find(|c| bindings.lookup_function(c)) {
                    Some(h) => h.clone(),
                    None => {
                        return Err(EngineError::Internal(InternalError::DanglingHandler {
                            command: command_token,
                            handler: candidates.last().cloned().unwrap_or_default(),
                        }));
                    }
                }
            }
        };

        let remaining = tail[i..].to_vec();
        Ok(Outcome::Dispatch { handler, tail: remaining })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use pretty_assertions::assert_eq;

    fn engine<'a>(
        entries: &'a [UsageEntry],
        globals: &'a [Field],
        coercers: &'a CoercerRegistry,
        caller_prefix: Option<&'a str>,
    ) -> UsageEngine<'a> {
        UsageEngine { title: "t", entries, global_fields: globals, coercers, caller_prefix }
    }

    #[test]
    fn usage_entry_parses_aliases_and_handler() {
        let e = UsageEntry::parse("serve|s:-app::run_serve", "Start");
        assert_eq!(e.name, "serve");
        assert_eq!(e.aliases, vec!["s".to_string()]);
        assert_eq!(e.handler.as_deref(), Some("app::run_serve"));
    }

    #[test]
    fn hidden_entry_is_dispatchable_but_not_visible() {
        let e = UsageEntry::parse("#secret", "Secret");
        assert!(e.hidden);
        assert!(e.matches("secret"));
    }

    #[test]
    fn dispatch_with_alias_and_namespace_fallback() {
        let entries = vec![UsageEntry::parse("serve|s", "Start"), UsageEntry::parse("build|b", "Build")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, Some("app::deploy"));
        let mut bindings = Bindings::new("prog");
        bindings.register_function("deploy::serve");
        let tail: Vec<String> = vec!["s".into(), "--port".into(), "8080".into()];
        let ctx = RenderContext::test_default();
        let outcome = eng.run(&tail, &mut bindings, &ctx).unwrap();
        match outcome {
            Outcome::Dispatch { handler, tail } => {
                assert_eq!(handler, "deploy::serve");
                assert_eq!(tail, vec!["--port".to_string(), "8080".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn explicit_handler_takes_priority_over_fallback() {
        let entries = vec![UsageEntry::parse("serve:-custom::handler", "Start")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, Some("app::deploy"));
        let mut bindings = Bindings::new("prog");
        bindings.register_function("deploy::serve");
        bindings.register_function("custom::handler");
        let tail: Vec<String> = vec!["serve".into()];
        let ctx = RenderContext::test_default();
        let outcome = eng.run(&tail, &mut bindings, &ctx).unwrap();
        match outcome {
            Outcome::Dispatch { handler, .. } => assert_eq!(handler, "custom::handler"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn dangling_explicit_handler_is_internal_error() {
        let entries = vec![UsageEntry::parse("serve:-nope::handler", "Start")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, None);
        let mut bindings = Bindings::new("prog");
        let tail: Vec<String> = vec!["serve".into()];
        let ctx = RenderContext::test_default();
        let err = eng.run(&tail, &mut bindings, &ctx).unwrap_err();
        assert!(matches!(err, EngineError::Internal(InternalError::DanglingHandler { .. })));
    }

    #[test]
    fn unknown_command_suggests_closest_visible_name() {
        let entries = vec![UsageEntry::parse("serve|s", "Start"), UsageEntry::parse("build|b", "Build")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, None);
        let mut bindings = Bindings::new("prog");
        let tail: Vec<String> = vec!["servv".into()];
        let ctx = RenderContext::test_default();
        let err = eng.run(&tail, &mut bindings, &ctx).unwrap_err();
        match err {
            EngineError::User(UserError::UnknownCommand { token, suggestion }) => {
                assert_eq!(token, "servv");
                assert_eq!(suggestion.as_deref(), Some("serve"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn unknown_global_flag_before_command_falls_through_to_help() {
        let entries = vec![UsageEntry::parse("serve", "Start")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, None);
        let mut bindings = Bindings::new("prog");
        let tail: Vec<String> = vec!["--nope".into()];
        let ctx = RenderContext::test_default();
        let outcome = eng.run(&tail, &mut bindings, &ctx).unwrap();
        assert!(matches!(outcome, Outcome::Help(_)));
    }

    #[test]
    fn empty_tail_renders_help() {
        let entries = vec![UsageEntry::parse("serve", "Start")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, None);
        let mut bindings = Bindings::new("prog");
        let tail: Vec<String> = vec![];
        let ctx = RenderContext::test_default();
        let outcome = eng.run(&tail, &mut bindings, &ctx).unwrap();
        assert!(matches!(outcome, Outcome::Help(_)));
    }

    #[test]
    fn argsh_banner_only_at_top_level() {
        let entries = vec![UsageEntry::parse("serve", "Start")];
        let coercers = CoercerRegistry::default();
        let eng = engine(&entries, &[], &coercers, None);
        let mut bindings = Bindings::new("prog");
        let tail: Vec<String> = vec!["--argsh".into()];
        let ctx = RenderContext::test_default();
        let outcome = eng.run(&tail, &mut bindings, &ctx).unwrap();
        assert!(matches!(outcome, Outcome::VersionBanner(_)));
    }
}
