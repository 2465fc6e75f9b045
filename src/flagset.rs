//! Shared flag-matching machinery (spec §4.4 step 3 / §4.5 step 3): both the
//! argument engine and the usage engine walk long/short flags against a
//! declared field set the same way, so the lookup/apply/suggest/
//! required-check logic lives here once instead of being copied twice.

use std::collections::HashSet;

use crate::bindings::HostBridge;
use crate::coerce::CoercerRegistry;
use crate::error::{EngineError, InternalError, UserError};
use crate::field::{Field, FieldKind};

pub struct FlagMatcher<'a> {
    pub fields: &'a [Field],
    pub coercers: &'a CoercerRegistry,
}

impl<'a> FlagMatcher<'a> {
    pub fn new(fields: &'a [Field], coercers: &'a CoercerRegistry) -> Self {
        FlagMatcher { fields, coercers }
    }

    pub fn find_long(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| !f.is_separator() && f.kind == FieldKind::Flag && f.long() == name)
    }

    pub fn find_short(&self, c: char) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| !f.is_separator() && f.kind == FieldKind::Flag && f.short == Some(c))
    }

    pub fn visible_long_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.is_separator() && f.kind == FieldKind::Flag && !f.hidden)
            .map(|f| f.long())
            .collect()
    }

    pub fn unknown_flag(&self, token: String) -> EngineError {
        let bare = token.trim_start_matches('-');
        let suggestion = crate::suggest::suggest(bare, self.visible_long_names()).map(|s| s.to_string());
        EngineError::User(UserError::UnknownFlag { token, suggestion })
    }

    fn coerce(&self, field: &Field, raw: &str) -> Result<String, EngineError> {
        let coercer = self
            .coercers
            .get(&field.ty)
            .ok_or_else(|| EngineError::Internal(InternalError::UnknownType { name: field.ty.clone() }))?;
        coercer(raw).map_err(|e| {
            EngineError::User(UserError::CoercionFailed {
                field: field.display_name.clone(),
                value: raw.to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Apply a `--long[=value]` flag already resolved to `idx`. `i` is the
    /// cursor into `tail`, advanced past a consumed next-token value.
    pub fn apply_long(
        &self,
        idx: usize,
        inline: Option<String>,
        i: &mut usize,
        tail: &[String],
        bindings: &mut dyn HostBridge,
        matched: &mut HashSet<usize>,
    ) -> Result<(), EngineError> {
        let field = &self.fields[idx];
        if field.boolean {
            let value = match inline {
                Some(v) => self.coerce(field, &v)?,
                None => "1".to_string(),
            };
            self.write(field, value, bindings);
        } else {
            let raw = match inline {
                Some(v) => v,
                None => {
                    if *i >= tail.len() {
                        return Err(EngineError::User(UserError::MissingValue {
                            flag: format!("--{}", field.display_name),
                        }));
                    }
                    let v = tail[*i].clone();
                    *i += 1;
                    v
                }
            };
            let value = self.coerce(field, &raw)?;
            self.write(field, value, bindings);
        }
        matched.insert(idx);
        Ok(())
    }

    /// Apply a `-xyz` short-flag cluster: leading booleans followed by at
    /// most one value-taking flag whose value is either the rest of the
    /// cluster (optionally after an `=`) or the next token.
    pub fn apply_short_cluster(
        &self,
        cluster: &str,
        i: &mut usize,
        tail: &[String],
        bindings: &mut dyn HostBridge,
        matched: &mut HashSet<usize>,
    ) -> Result<(), EngineError> {
        let chars: Vec<char> = cluster.chars().collect();
        let mut pos = 0usize;
        while pos < chars.len() {
            let c = chars[pos];
            let idx = match self.find_short(c) {
                Some(idx) => idx,
                None => return Err(self.unknown_flag(format!("-{}", c))),
            };
            let field = &self.fields[idx];
            if field.boolean {
                self.write(field, "1".to_string(), bindings);
                matched.insert(idx);
                pos += 1;
            } else {
                let rest_start = cluster.char_indices().nth(pos + 1).map(|(b, _)| b).unwrap_or(cluster.len());
                let rest = cluster[rest_start..].strip_prefix('=').unwrap_or(&cluster[rest_start..]);
                let raw = if rest.is_empty() {
                    if *i >= tail.len() {
                        return Err(EngineError::User(UserError::MissingValue { flag: format!("-{}", c) }));
                    }
                    let v = tail[*i].clone();
                    *i += 1;
                    v
                } else {
                    rest.to_string()
                };
                let value = self.coerce(field, &raw)?;
                self.write(field, value, bindings);
                matched.insert(idx);
                break;
            }
        }
        Ok(())
    }

    fn write(&self, field: &Field, value: String, bindings: &mut dyn HostBridge) {
        if field.multiple {
            bindings.array_append(&field.name, value);
        } else {
            bindings.set_scalar(&field.name, value);
        }
    }

    /// Spec §4.4 step 4 / §4.5 step 4: every unmatched required field is an
    /// error; every unmatched scalar boolean defaults to `"0"`.
    pub fn check_required_and_defaults(
        &self,
        matched: &HashSet<usize>,
        bindings: &mut dyn HostBridge,
    ) -> Result<(), EngineError> {
        for (idx, field) in self.fields.iter().enumerate() {
            if field.is_separator() || matched.contains(&idx) {
                continue;
            }
            if field.required {
                return Err(EngineError::User(if field.kind == FieldKind::Positional {
                    UserError::MissingRequiredPositional { name: field.display_name.clone() }
                } else {
                    UserError::MissingRequiredFlag { name: field.display_name.clone() }
                }));
            }
            if field.boolean && !field.multiple {
                bindings.set_scalar(&field.name, "0".to_string());
            }
        }
        Ok(())
    }
}
