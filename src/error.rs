//! Two error taxonomies, kept separate (spec §7): user errors are the
//! invoking user's mistake, internal errors are the spec author's. Both
//! exit 2; the prefix tells them apart. Grounded on
//! `examples/pacak-bpaf/src/error.rs`'s split between catchable
//! (user-facing) and non-catchable messages, simplified down to the cases
//! spec.md actually names — bpaf's `Doc`/`Style` terminal styling lives in
//! [`crate::buffer`] instead of being folded into the error type itself.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    User(UserError),
    Internal(InternalError),
}

/// The invoking user mis-typed the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    UnknownFlag { token: String, suggestion: Option<String> },
    UnknownCommand { token: String, suggestion: Option<String> },
    MissingRequiredFlag { name: String },
    MissingRequiredPositional { name: String },
    TooManyPositionals,
    CoercionFailed { field: String, value: String, reason: String },
    MissingValue { flag: String },
}

/// The spec author mis-wrote the declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    OddLengthArray { array: &'static str },
    SpecError { spec: String, reason: String },
    UnknownType { name: String },
    DanglingHandler { command: String, handler: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::User(e) => write!(f, "{}", e),
            EngineError::Internal(e) => write!(f, "argsh: spec error: {}", e),
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::UnknownFlag { token, suggestion } => {
                write!(f, "unknown flag: {}", token)?;
                append_suggestion(f, suggestion)
            }
            UserError::UnknownCommand { token, suggestion } => {
                write!(f, "Invalid command: {}", token)?;
                append_suggestion(f, suggestion)
            }
            UserError::MissingRequiredFlag { name } => {
                write!(f, "missing required flag --{}", name)
            }
            UserError::MissingRequiredPositional { name } => {
                write!(f, "missing required argument <{}>", name)
            }
            UserError::TooManyPositionals => write!(f, "too many arguments"),
            UserError::CoercionFailed { field, value, reason } => {
                write!(f, "invalid value for {}: '{}' ({})", field, value, reason)
            }
            UserError::MissingValue { flag } => {
                write!(f, "{} requires a value", flag)
            }
        }
    }
}

fn append_suggestion(f: &mut fmt::Formatter<'_>, suggestion: &Option<String>) -> fmt::Result {
    if let Some(s) = suggestion {
        write!(f, ". Did you mean '{}'?", s)
    } else {
        Ok(())
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::OddLengthArray { array } => {
                write!(f, "'{}' array must have an even number of entries", array)
            }
            InternalError::SpecError { spec, reason } => {
                write!(f, "in spec '{}': {}", spec, reason)
            }
            InternalError::UnknownType { name } => write!(f, "unknown type '{}'", name),
            InternalError::DanglingHandler { command, handler } => write!(
                f,
                "command '{}' maps to handler '{}', which does not exist",
                command, handler
            ),
        }
    }
}

impl EngineError {
    /// Exit code mapping from spec §6/§7. The library itself never calls
    /// `exit`; a caller (the bundled `argsh-tool`, or a shell adapter)
    /// applies this and returns to its own control flow.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::User(UserError::CoercionFailed { .. }) => 1,
            EngineError::User(_) | EngineError::Internal(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_failure_exits_one() {
        let e = EngineError::User(UserError::CoercionFailed {
            field: "age".into(),
            value: "foo".into(),
            reason: "not an integer".into(),
        });
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn unknown_command_exits_two_and_names_value() {
        let e = EngineError::User(UserError::UnknownCommand {
            token: "servv".into(),
            suggestion: Some("serve".into()),
        });
        assert_eq!(e.exit_code(), 2);
        assert_eq!(e.to_string(), "Invalid command: servv. Did you mean 'serve'?");
    }

    #[test]
    fn internal_error_prefix() {
        let e = EngineError::Internal(InternalError::OddLengthArray { array: "args" });
        assert!(e.to_string().starts_with("argsh: spec error:"));
    }
}
