//! Host bridge (spec §4.1), re-architected per spec §9: the engines never
//! reach into ambient shell state. They read and write a [`Bindings`]
//! record instead; a shell embedding would implement [`HostBridge`] as a
//! thin adapter that mutates caller-scope variables from that record.

use std::collections::HashMap;

/// One bound variable's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Unset,
    Scalar(String),
    Array(Vec<String>),
}

impl Value {
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }
}

/// Contract a caller-scope adapter implements (spec §4.1). Names are
/// validated against the bash-variable regex before any write reaches this
/// trait; a name that fails validation never gets here (spec §4.1 "writes
/// to an invalid name are fatal").
pub trait HostBridge {
    fn get_scalar(&self, name: &str) -> Option<String>;
    fn set_scalar(&mut self, name: &str, value: String);
    fn is_array(&self, name: &str) -> bool;
    /// Unbound, or an array declared with no element yet.
    fn is_uninitialized(&self, name: &str) -> bool;
    fn array_len(&self, name: &str) -> usize;
    fn array_append(&mut self, name: &str, value: String);
    fn array_set_all(&mut self, name: &str, values: Vec<String>);
    fn lookup_function(&self, name: &str) -> bool;
    fn script_name(&self) -> String;
}

/// Record of all bindings collected (or seeded) for one parse, keyed by
/// field name. This is the engines' actual working storage; [`MapBindings`]
/// is a [`HostBridge`] built directly on top of it for embeddings that have
/// no real host scope to bridge to (tests, the bundled `argsh-tool`).
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, Value>,
    functions: std::collections::HashSet<String>,
    script_name: String,
}

impl Bindings {
    pub fn new(script_name: impl Into<String>) -> Self {
        Bindings {
            values: HashMap::new(),
            functions: std::collections::HashSet::new(),
            script_name: script_name.into(),
        }
    }

    pub fn seed_array(&mut self, name: &str) {
        self.values.insert(name.to_string(), Value::Array(Vec::new()));
    }

    pub fn seed_scalar(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), Value::Scalar(value.into()));
    }

    pub fn register_function(&mut self, name: impl Into<String>) {
        self.functions.insert(name.into());
    }

    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&Value::Unset)
    }
}

impl HostBridge for Bindings {
    fn get_scalar(&self, name: &str) -> Option<String> {
        match self.values.get(name) {
            Some(Value::Scalar(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn set_scalar(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), Value::Scalar(value));
    }

    fn is_array(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Array(_)))
    }

    fn is_uninitialized(&self, name: &str) -> bool {
        match self.values.get(name) {
            None | Some(Value::Unset) => true,
            Some(Value::Array(xs)) => xs.is_empty(),
            Some(Value::Scalar(_)) => false,
        }
    }

    fn array_len(&self, name: &str) -> usize {
        match self.values.get(name) {
            Some(Value::Array(xs)) => xs.len(),
            _ => 0,
        }
    }

    fn array_append(&mut self, name: &str, value: String) {
        match self.values.entry(name.to_string()).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(xs) => xs.push(value),
            slot => *slot = Value::Array(vec![value]),
        }
    }

    fn array_set_all(&mut self, name: &str, values: Vec<String>) {
        self.values.insert(name.to_string(), Value::Array(values));
    }

    fn lookup_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    fn script_name(&self) -> String {
        self.script_name.clone()
    }
}

/// `MapBindings` is just [`Bindings`] under a name that reads naturally as
/// "a `HostBridge` backed by a plain map" at call sites that don't care
/// about the record/bridge distinction (tests, `argsh-tool`).
pub type MapBindings = Bindings;
