//! Equality search emitting textual paths

mod finder;

pub use finder::{find, find_safe, FindMode};
