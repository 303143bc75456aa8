//! Write application through concrete locations
//!
//! The evaluator records a key/index trail per stack frame; writes
//! re-descend from the root through that trail with `&mut` access.
//! Frames born from invocation results or raw argument substitution
//! carry no trail and cannot be written through.

use crate::value::Value;

/// One concrete descent edge from the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Locator {
    Key(String),
    Index(usize),
}

/// Concrete key/index trail from the root to a value
pub(crate) type Location = Vec<Locator>;

/// Assign through a recorded trail
///
/// Missing intermediate map entries materialise only under `force`;
/// sequence indices must be in bounds at every level. The final map key
/// is created by the assignment itself.
pub(crate) fn apply_write(
    root: &mut Value,
    target: &[Locator],
    new_value: &Value,
    force: bool,
) -> bool {
    let (last, parents) = match target.split_last() {
        Some(split) => split,
        None => return false,
    };

    let mut current = root;
    for edge in parents {
        current = match (current, edge) {
            (Value::Map(entries), Locator::Key(key)) => {
                if !entries.contains_key(key) {
                    if !force {
                        return false;
                    }
                    entries.insert(key.clone(), Value::map());
                }
                match entries.get_mut(key) {
                    Some(next) => next,
                    None => return false,
                }
            }
            (Value::Seq(items), Locator::Index(index)) => match items.get_mut(*index) {
                Some(next) => next,
                None => return false,
            },
            _ => return false,
        };
    }

    match (current, last) {
        (Value::Map(entries), Locator::Key(key)) => {
            entries.insert(key.clone(), new_value.clone());
            true
        }
        (Value::Seq(items), Locator::Index(index)) => match items.get_mut(*index) {
            Some(slot) => {
                *slot = new_value.clone();
                true
            }
            None => false,
        },
        _ => false,
    }
}
