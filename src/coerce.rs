//! Type coercion: convert a raw command-line string to a typed string
//! representation under a named coercer (spec §4.3).

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

/// A coercer either returns the canonical value to bind, or rejects the
/// input. Rejection is always a user error (spec §7) — the author-level
/// mistake of referencing an unknown type name is caught one layer up, in
/// [`CoercerRegistry::get`].
pub type Coercer = Rc<dyn Fn(&str) -> Result<String, CoercionError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError(pub String);

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a type name to a callable, pre-populated with the built-ins from
/// spec §4.3. A shell embedding would additionally register `to::<name>`
/// functions it finds in caller scope; here callers just call
/// [`CoercerRegistry::register`] directly (spec §9 "coercer registry").
pub struct CoercerRegistry {
    coercers: HashMap<String, Coercer>,
}

impl Default for CoercerRegistry {
    fn default() -> Self {
        let mut reg = CoercerRegistry {
            coercers: HashMap::new(),
        };
        reg.register("string", Rc::new(|s: &str| Ok(s.to_string())));
        reg.register("int", Rc::new(coerce_int));
        reg.register("float", Rc::new(coerce_float));
        reg.register("boolean", Rc::new(coerce_boolean));
        reg.register("file", Rc::new(coerce_file));
        reg.register("stdin", Rc::new(coerce_stdin));
        reg
    }
}

impl CoercerRegistry {
    pub fn register(&mut self, name: &str, coercer: Coercer) {
        self.coercers.insert(name.to_string(), coercer);
    }

    /// `None` means the author referenced an unknown type name — an
    /// internal error (spec §7), distinct from the coercer itself
    /// rejecting a value.
    pub fn get(&self, name: &str) -> Option<&Coercer> {
        self.coercers.get(name)
    }
}

fn coerce_int(s: &str) -> Result<String, CoercionError> {
    let trimmed = s.strip_prefix(['+', '-']).unwrap_or(s);
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(s.to_string())
    } else {
        Err(CoercionError(format!("'{}' is not an integer", s)))
    }
}

fn coerce_float(s: &str) -> Result<String, CoercionError> {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let dots = body.matches('.').count();
    let digits_ok = body.chars().all(|c| c.is_ascii_digit() || c == '.');
    let has_digit = body.chars().any(|c| c.is_ascii_digit());
    if dots <= 1 && digits_ok && has_digit {
        Ok(s.to_string())
    } else {
        Err(CoercionError(format!("'{}' is not a float", s)))
    }
}

fn coerce_boolean(s: &str) -> Result<String, CoercionError> {
    match s {
        "" | "0" | "false" => Ok("0".to_string()),
        _ => Ok("1".to_string()),
    }
}

fn coerce_file(s: &str) -> Result<String, CoercionError> {
    if Path::new(s).is_file() {
        Ok(s.to_string())
    } else {
        Err(CoercionError(format!("'{}' is not a regular file", s)))
    }
}

fn coerce_stdin(s: &str) -> Result<String, CoercionError> {
    if s == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CoercionError(format!("failed reading stdin: {}", e)))?;
        Ok(buf)
    } else {
        Ok(s.to_string())
    }
}
