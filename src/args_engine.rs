//! The argument engine (`:args`, spec §4.4): binds positionals and flags
//! from a command-line tail against a declared field set.

use std::collections::HashSet;

use crate::bindings::HostBridge;
use crate::coerce::CoercerRegistry;
use crate::error::{EngineError, InternalError, UserError};
use crate::field::{Field, FieldKind};
use crate::flagset::FlagMatcher;
use crate::outcome::Outcome;
use crate::render;
use crate::render::RenderContext;

/// Decode a flat `(spec, description, spec, description, ...)` array into
/// [`Field`]s, consulting the bridge for `has_default`/`multiple` per spec
/// §4.2 ("the parser never reads the host bridge except to detect whether
/// the bound variable currently exists and whether it is an array").
pub fn parse_fields(
    flat: &[&str],
    bindings: &dyn HostBridge,
    array_name: &'static str,
) -> Result<Vec<Field>, EngineError> {
    if flat.len() % 2 != 0 {
        return Err(EngineError::Internal(InternalError::OddLengthArray { array: array_name }));
    }
    let mut fields = Vec::with_capacity(flat.len() / 2);
    for pair in flat.chunks(2) {
        let (spec, desc) = (pair[0], pair[1]);
        let name_guess = spec.trim_start_matches('#').split(['|', ':']).next().unwrap_or("");
        let name_guess = name_guess.replace('-', "_");
        let has_default = !bindings.is_uninitialized(&name_guess);
        let bound_is_array = bindings.is_array(&name_guess);
        let field = Field::parse(spec, desc, has_default, bound_is_array).map_err(|e| {
            EngineError::Internal(InternalError::SpecError {
                spec: spec.to_string(),
                reason: e.to_string(),
            })
        })?;
        fields.push(field);
    }
    Ok(fields)
}

fn is_help_token(tok: &str) -> bool {
    tok == "-h" || tok == "--help"
}

pub struct ArgsEngine<'a> {
    pub title: &'a str,
    pub fields: &'a [Field],
    pub coercers: &'a CoercerRegistry,
}

impl<'a> ArgsEngine<'a> {
    pub fn run(&self, tail: &[String], bindings: &mut dyn HostBridge, ctx: &RenderContext) -> Result<Outcome, EngineError> {
        if let Some(first) = tail.first() {
            if is_help_token(first) {
                return Ok(Outcome::Help(render::help::render_args_help(self.title, self.fields, &*bindings, ctx)));
            }
        }

        let matcher = FlagMatcher::new(self.fields, self.coercers);

        let positional_fields: Vec<usize> = self
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_separator() && f.kind == FieldKind::Positional)
            .map(|(i, _)| i)
            .collect();

        let mut matched: HashSet<usize> = HashSet::new();
        let mut filled: HashSet<usize> = HashSet::new();
        let mut pos_cursor = 0usize;
        let mut i = 0usize;

        while i < tail.len() {
            let token = tail[i].as_str();
            i += 1;

            if let Some(long) = token.strip_prefix("--") {
                let (name, inline) = match long.split_once('=') {
                    Some((n, v)) => (n, Some(v.to_string())),
                    None => (long, None),
                };
                let idx = match matcher.find_long(name) {
                    Some(idx) => idx,
                    None => return Err(matcher.unknown_flag(format!("--{}", name))),
                };
                matcher.apply_long(idx, inline, &mut i, tail, bindings, &mut matched)?;
                continue;
            }

            if let Some(cluster) = token.strip_prefix('-') {
                if cluster.is_empty() {
                    // bare "-" is not a flag; spec declares no implicit
                    // end-of-options sentinel, so treat it as a positional.
                } else {
                    matcher.apply_short_cluster(cluster, &mut i, tail, bindings, &mut matched)?;
                    continue;
                }
            }

            // positional
            while pos_cursor < positional_fields.len() {
                let fidx = positional_fields[pos_cursor];
                if self.fields[fidx].multiple || !filled.contains(&fidx) {
                    break;
                }
                pos_cursor += 1;
            }
            if pos_cursor >= positional_fields.len() {
                return Err(EngineError::User(UserError::TooManyPositionals));
            }
            let fidx = positional_fields[pos_cursor];
            let field = &self.fields[fidx];
            if field.multiple {
                bindings.array_append(&field.name, token.to_string());
            } else {
                bindings.set_scalar(&field.name, token.to_string());
                filled.insert(fidx);
                pos_cursor += 1;
            }
            matched.insert(fidx);
        }

        matcher.check_required_and_defaults(&matched, bindings)?;
        Ok(Outcome::Ok)
    }
}
