//! Depth-first equality search over a value graph
//!
//! Emits textual paths built with the active syntax table's quoting
//! rules, so every emitted path tokenizes back to the value it names.

use crate::error::{cycle_error, PathResult};
use crate::syntax::{ContainerRole, Derived, ESCAPE};
use crate::value::Value;

/// How many hits a search collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindMode {
    /// Halt on the first match in DFS pre-order
    First,
    /// Collect every match
    All,
}

/// Collect the paths of values equal to the target
///
/// Sequences iterate by index; maps iterate keys in sorted order. A
/// root equal to the target reports the empty path.
#[must_use]
pub fn find(root: &Value, target: &Value, mode: FindMode, derived: &Derived) -> Vec<String> {
    let mut finder = Finder {
        derived,
        target,
        mode,
        guard: false,
        ancestors: Vec::new(),
        labels: Vec::new(),
        hits: Vec::new(),
    };
    // the guard is off, so the walk cannot fail
    let _ = finder.walk(root);
    finder.hits
}

/// Like [`find`], but re-entry into an ancestor raises a cycle error
pub fn find_safe(
    root: &Value,
    target: &Value,
    mode: FindMode,
    derived: &Derived,
) -> PathResult<Vec<String>> {
    let mut finder = Finder {
        derived,
        target,
        mode,
        guard: true,
        ancestors: Vec::new(),
        labels: Vec::new(),
        hits: Vec::new(),
    };
    finder.walk(root)?;
    Ok(finder.hits)
}

struct Finder<'a> {
    derived: &'a Derived,
    target: &'a Value,
    mode: FindMode,
    guard: bool,
    ancestors: Vec<*const Value>,
    labels: Vec<String>,
    hits: Vec<String>,
}

impl Finder<'_> {
    fn done(&self) -> bool {
        self.mode == FindMode::First && !self.hits.is_empty()
    }

    fn walk(&mut self, value: &Value) -> PathResult<()> {
        if value == self.target {
            self.hits.push(self.path());
            if self.done() {
                return Ok(());
            }
        }
        match value {
            Value::Seq(items) => {
                self.enter(value)?;
                for (index, item) in items.iter().enumerate() {
                    self.labels.push(index.to_string());
                    self.walk(item)?;
                    self.labels.pop();
                    if self.done() {
                        break;
                    }
                }
                self.ancestors.pop();
            }
            Value::Map(entries) => {
                self.enter(value)?;
                for (key, item) in entries {
                    let label = self.quote_label(key);
                    self.labels.push(label);
                    self.walk(item)?;
                    self.labels.pop();
                    if self.done() {
                        break;
                    }
                }
                self.ancestors.pop();
            }
            _ => {}
        }
        Ok(())
    }

    fn enter(&mut self, value: &Value) -> PathResult<()> {
        let id = value as *const Value;
        if self.guard && self.ancestors.contains(&id) {
            return Err(cycle_error(&self.path()));
        }
        self.ancestors.push(id);
        Ok(())
    }

    fn path(&self) -> String {
        self.labels.join(&self.derived.property_sep().to_string())
    }

    /// Wrap a label in the singlequote container when it contains any
    /// currently-special character, escaping inner quotes
    fn quote_label(&self, label: &str) -> String {
        if !label.is_empty() && !self.derived.has_special(label) {
            return label.to_string();
        }
        // simple mode has no quote containers; backslash-escaping keeps
        // the emitted path tokenizable
        let (open, close) = match self.derived.container_pair(ContainerRole::SingleQuote) {
            Some(pair) => pair,
            None => return self.derived.escape(label),
        };
        let mut quoted = String::with_capacity(label.len() + 2);
        quoted.push(open);
        for c in label.chars() {
            if c == close || c == ESCAPE {
                quoted.push(ESCAPE);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }
}
