//! Fast-path resolver for flat name chains
//!
//! Simple programs (and dotted text proven complex-free) skip the
//! general evaluator entirely: no frames, no clones along the way.

use crate::value::Value;

/// Names whose assignment is refused on the write path
///
/// The map type here shares no namespace with language metadata, so
/// this is policy parity rather than a live hazard.
pub(crate) const FORBIDDEN_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

pub(crate) fn is_forbidden(name: &str) -> bool {
    FORBIDDEN_KEYS.contains(&name)
}

/// Read a flat name chain; an empty name aborts with absent
#[must_use]
pub fn quick_get(root: &Value, names: &[&str]) -> Option<Value> {
    let mut current = root;
    for name in names {
        if name.is_empty() {
            return None;
        }
        current = current.index_word(name)?;
    }
    Some(current.clone())
}

/// Write through a flat name chain
///
/// Missing intermediate map entries are materialised only under
/// `force`; sequence indices must be in bounds; prototype-sensitive
/// names abort without mutating. Returns whether the assignment landed.
pub fn quick_set(root: &mut Value, names: &[&str], new_value: &Value, force: bool) -> bool {
    let (last, parents) = match names.split_last() {
        Some(split) => split,
        None => return false,
    };
    if names.iter().any(|n| n.is_empty() || is_forbidden(n)) {
        return false;
    }

    let mut current = root;
    for name in parents {
        current = match current {
            Value::Map(entries) => {
                if !entries.contains_key(*name) {
                    if !force {
                        return false;
                    }
                    entries.insert((*name).to_string(), Value::map());
                }
                match entries.get_mut(*name) {
                    Some(next) => next,
                    None => return false,
                }
            }
            Value::Seq(items) => match name.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                Some(next) => next,
                None => return false,
            },
            _ => return false,
        };
    }

    match current {
        Value::Map(entries) => {
            entries.insert((*last).to_string(), new_value.clone());
            true
        }
        Value::Seq(items) => match last.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            Some(slot) => {
                *slot = new_value.clone();
                true
            }
            None => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Value {
        Value::from_json(&serde_json::json!({"a": {"b": {"c": 1}}, "list": [10, 20]}))
    }

    #[test]
    fn get_descends_maps_and_sequences() {
        let root = fixture();
        assert_eq!(quick_get(&root, &["a", "b", "c"]), Some(Value::Int(1)));
        assert_eq!(quick_get(&root, &["list", "1"]), Some(Value::Int(20)));
        assert_eq!(quick_get(&root, &["a", "missing"]), None);
        assert_eq!(quick_get(&root, &["a", ""]), None);
    }

    #[test]
    fn set_without_force_requires_intermediates() {
        let mut root = fixture();
        assert!(!quick_set(&mut root, &["x", "y"], &Value::Int(9), false));
        assert_eq!(root, fixture(), "failed set must not mutate");
        assert!(quick_set(&mut root, &["x", "y"], &Value::Int(9), true));
        assert_eq!(quick_get(&root, &["x", "y"]), Some(Value::Int(9)));
    }

    #[test]
    fn set_rejects_prototype_sensitive_names() {
        let mut root = fixture();
        for name in FORBIDDEN_KEYS {
            assert!(!quick_set(&mut root, &[name], &Value::Int(1), true));
        }
        assert_eq!(root, fixture());
    }

    #[test]
    fn sequence_writes_stay_in_bounds() {
        let mut root = fixture();
        assert!(quick_set(&mut root, &["list", "0"], &Value::Int(11), false));
        assert!(!quick_set(&mut root, &["list", "5"], &Value::Int(1), true));
        assert_eq!(quick_get(&root, &["list", "0"]), Some(Value::Int(11)));
    }
}
