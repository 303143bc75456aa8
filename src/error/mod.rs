//! Error types and constructors for the path engine

mod constructors;
mod types;

pub use constructors::{
    cycle_error, invalid_path_error, lexical_error, role_conflict_error, unassignable_error,
};
pub use types::{ErrorKind, PathError, PathResult};
