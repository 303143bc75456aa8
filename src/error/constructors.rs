//! Error constructor functions
//!
//! Factory functions that format error context (offending text, position,
//! role names) into the message once, at construction.

use super::types::PathError;

/// Invalid path text rejected by the tokenizer
pub fn invalid_path_error(
    text: impl Into<String>,
    reason: impl Into<String>,
    position: Option<usize>,
) -> PathError {
    let text = text.into();
    let reason = reason.into();
    let message = match position {
        Some(pos) => format!("invalid path {text:?} at position {pos}: {reason}"),
        None => format!("invalid path {text:?}: {reason}"),
    };
    PathError::invalid_path(message)
}

/// Syntax table mutation rejected because the character is already bound
///
/// Names both the role being assigned and the role currently holding the
/// character, so callers can see which binding blocked the change.
pub fn role_conflict_error(role: &str, ch: char, holder: &str) -> PathError {
    PathError::config(format!(
        "cannot assign {ch:?} to the {role} role: already bound to the {holder} role"
    ))
}

/// Syntax table mutation rejected for a character that can never hold a role
pub fn unassignable_error(role: &str, ch: char, reason: &str) -> PathError {
    PathError::config(format!("cannot assign {ch:?} to the {role} role: {reason}"))
}

/// Re-entry into an ancestor during a safe search
pub fn cycle_error(path: &str) -> PathError {
    PathError::cycle(format!("value graph cycles back into an ancestor at {path:?}"))
}

/// Unknown character rejected by the free-form text lexer
pub fn lexical_error(ch: char, position: usize) -> PathError {
    PathError::lexical(format!("unexpected character {ch:?} at position {position}"))
}
