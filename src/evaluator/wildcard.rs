//! Wildcard word matching over map keys
//!
//! A word containing `*` matches keys by the prefix before it and the
//! suffix after it; a lone `*` matches every key. One `*` per word.

use std::collections::BTreeMap;

use crate::value::Value;

/// Substring-anchored match of a wildcard template against a key
#[must_use]
pub fn wildcard_match(template: &str, key: &str) -> bool {
    match template.split_once('*') {
        Some((prefix, suffix)) => {
            key.len() >= prefix.len() + suffix.len()
                && key.starts_with(prefix)
                && key.ends_with(suffix)
        }
        None => template == key,
    }
}

/// Values under every matching key, in the map's sorted key order
pub(crate) fn collect_values(map: &BTreeMap<String, Value>, template: &str) -> Vec<Value> {
    map.iter()
        .filter(|(key, _)| wildcard_match(template, key))
        .map(|(_, value)| value.clone())
        .collect()
}

/// Matching keys, in the map's sorted key order
pub(crate) fn matching_keys(map: &BTreeMap<String, Value>, template: &str) -> Vec<String> {
    map.keys()
        .filter(|key| wildcard_match(template, key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::wildcard_match;

    #[test]
    fn anchored_prefix_and_suffix() {
        assert!(wildcard_match("foo*", "foobar"));
        assert!(wildcard_match("*bar", "foobar"));
        assert!(wildcard_match("f*r", "foobar"));
        assert!(!wildcard_match("f*r", "foobaz"));
    }

    #[test]
    fn lone_star_matches_everything() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*", "anything"));
    }

    #[test]
    fn overlap_is_not_double_counted() {
        // prefix and suffix must fit side by side
        assert!(!wildcard_match("ab*ba", "aba"));
        assert!(wildcard_match("ab*ba", "abba"));
    }

    #[test]
    fn no_star_means_exact() {
        assert!(wildcard_match("plain", "plain"));
        assert!(!wildcard_match("plain", "plains"));
    }
}
