#![doc = include_str!("../README.md")]

pub mod args_engine;
pub mod bindings;
pub mod buffer;
pub mod coerce;
pub mod config;
pub mod error;
pub mod field;
pub mod flagset;
pub mod outcome;
pub mod render;
pub mod suggest;
pub mod usage_engine;

pub use args_engine::ArgsEngine;
pub use bindings::{Bindings, HostBridge, MapBindings, Value};
pub use coerce::{Coercer, CoercerRegistry, CoercionError};
pub use config::RenderConfig;
pub use error::{EngineError, InternalError, UserError};
pub use field::{Field, FieldKind, SpecError};
pub use outcome::Outcome;
pub use render::{CommandPath, RenderContext};
pub use usage_engine::{UsageEngine, UsageEntry};

/// `field_name(spec, asref?)` (spec §6): the variable-name portion of a
/// spec string. `as_ref = true` rewrites `-` to `_` (the bound variable's
/// actual name); `as_ref = false` preserves the spec's display spelling.
pub fn field_name(spec: &str, as_ref: bool) -> Result<String, SpecError> {
    let field = Field::parse(spec, "", false, false)?;
    Ok(if as_ref { field.name } else { field.display_name })
}

/// `is_array(name)` (spec §6): introspection primitive over the bridge.
pub fn is_array(bindings: &dyn HostBridge, name: &str) -> bool {
    bindings.is_array(name)
}

/// `is_set(name)` (spec §6): the complement of [`is_uninitialized`].
pub fn is_set(bindings: &dyn HostBridge, name: &str) -> bool {
    !bindings.is_uninitialized(name)
}

/// `is_uninitialized(name)` (spec §6): unbound, or an array with no
/// elements yet.
pub fn is_uninitialized(bindings: &dyn HostBridge, name: &str) -> bool {
    bindings.is_uninitialized(name)
}

/// `is_tty()` (spec §6): whether stdout is an interactive terminal.
pub fn is_tty() -> bool {
    buffer::stdout_is_tty()
}

/// Whether stdout is both a terminal and advertises color support — the
/// check a caller should use to decide `RenderContext::new`'s `use_color`
/// argument, distinct from the bare tty check `is_tty()` performs.
pub fn supports_color() -> bool {
    buffer::stdout_supports_color()
}
