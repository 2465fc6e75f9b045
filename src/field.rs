//! Field-spec grammar: decode one spec string into a [`Field`].
//!
//! ```text
//! spec      := [ "#" ] name [ "|" short? ] ( ":" modifier )*
//! modifier  := "+"           // boolean (no value)
//!            | "~" type-name // explicit type
//!            | "!"           // required
//! special   := "-"           // group separator in help rendering
//! ```

use std::fmt;

/// One declared parameter, decoded from a spec string plus its paired
/// description (see `spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Variable name, `-` rewritten to `_` (bash identifier rules).
    pub name: String,
    /// Display name as written in the spec, `-` preserved.
    pub display_name: String,
    /// Single-character alias, absent for long-only fields (`name|:TYPE`).
    pub short: Option<char>,
    pub kind: FieldKind,
    /// Ignored for boolean flags and separators.
    pub ty: String,
    pub required: bool,
    pub boolean: bool,
    pub multiple: bool,
    pub hidden: bool,
    pub description: String,
    pub has_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Positional,
    Flag,
    Separator,
}

impl Field {
    pub fn is_separator(&self) -> bool {
        self.kind == FieldKind::Separator
    }

    /// Long flag name as it appears on the command line (`--name`).
    pub fn long(&self) -> &str {
        &self.name
    }
}

/// Error raised while decoding a spec string — always an author mistake,
/// surfaced as an [`crate::error::EngineError::Internal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// A `:`-prefixed fragment isn't a recognized modifier.
    UnknownModifier(char),
    /// The same modifier letter appeared more than once.
    DuplicateModifier(char),
    /// `:+` (boolean) and `:~type` (explicit type) both present.
    BooleanWithType,
    /// `name` isn't a legal bash-style identifier once `-` is rewritten.
    InvalidName(String),
    /// `~` modifier with no type name following it.
    MissingTypeName,
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::UnknownModifier(c) => write!(f, "unknown modifier ':{}'", c),
            SpecError::DuplicateModifier(c) => write!(f, "modifier ':{}' given more than once", c),
            SpecError::BooleanWithType => {
                write!(f, "a field cannot be both boolean (:+) and typed (:~T)")
            }
            SpecError::InvalidName(n) => write!(f, "invalid field name '{}'", n),
            SpecError::MissingTypeName => write!(f, "':~' modifier needs a type name"),
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Field {
    /// Parse one spec string. `has_default` and `multiple` are resolved by
    /// the caller's bridge (whether the bound variable already exists and
    /// whether it is array-backed) — the field-spec parser never consults
    /// the host itself, per spec §4.2.
    pub fn parse(spec: &str, description: &str, has_default: bool, bound_is_array: bool) -> Result<Field, SpecError> {
        let rest = spec;
        let hidden = rest.starts_with('#');
        let rest = rest.strip_prefix('#').unwrap_or(rest);

        if rest == "-" {
            return Ok(Field {
                name: String::new(),
                display_name: String::new(),
                short: None,
                kind: FieldKind::Separator,
                ty: String::new(),
                required: false,
                boolean: false,
                multiple: false,
                hidden,
                description: description.to_string(),
                has_default: false,
            });
        }

        let (name_and_short, modifiers) = split_modifiers(rest);

        let (raw_name, short) = match name_and_short.split_once('|') {
            Some((n, s)) => {
                // `name|:TYPE` — the short slot is empty because the `:` that
                // follows starts the modifier section; such a field is long-only.
                if s.is_empty() {
                    (n, None)
                } else {
                    let mut it = s.chars();
                    let c = it.next();
                    if c.is_none() || it.next().is_some() {
                        return Err(SpecError::InvalidName(name_and_short.to_string()));
                    }
                    (n, c)
                }
            }
            None => (name_and_short, None),
        };

        let display_name = raw_name.to_string();
        let name = raw_name.replace('-', "_");
        if !is_valid_name(&name) {
            return Err(SpecError::InvalidName(display_name));
        }

        let mut boolean = false;
        let mut required = false;
        let mut ty: Option<String> = None;
        let mut seen = std::collections::HashSet::new();

        for m in modifiers {
            let tag = m.chars().next().unwrap_or(' ');
            if !seen.insert(tag) {
                return Err(SpecError::DuplicateModifier(tag));
            }
            match tag {
                '+' => boolean = true,
                '!' => required = true,
                '~' => {
                    let t = &m[1..];
                    if t.is_empty() {
                        return Err(SpecError::MissingTypeName);
                    }
                    ty = Some(t.to_string());
                }
                other => return Err(SpecError::UnknownModifier(other)),
            }
        }

        if boolean && ty.is_some() {
            return Err(SpecError::BooleanWithType);
        }

        // A field is a flag iff its spec contains a `|` separator (spec §GLOSSARY);
        // everything else is positional.
        let kind = if name_and_short.contains('|') {
            FieldKind::Flag
        } else {
            FieldKind::Positional
        };

        Ok(Field {
            name,
            display_name,
            short,
            kind,
            ty: ty.unwrap_or_else(|| "string".to_string()),
            required,
            boolean,
            multiple: bound_is_array,
            hidden,
            description: description.to_string(),
            has_default,
        })
    }
}

/// Split at the first `|`/`:` boundary: everything before the first `:` is
/// the name[|short] portion, everything after is a sequence of `:`-prefixed
/// modifier fragments.
fn split_modifiers(rest: &str) -> (&str, Vec<&str>) {
    match rest.find(':') {
        None => (rest, Vec::new()),
        Some(ix) => {
            let (head, tail) = rest.split_at(ix);
            let mods = tail[1..].split(':').filter(|s| !s.is_empty()).collect();
            (head, mods)
        }
    }
}
