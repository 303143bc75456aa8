//! Derived recognition state for a syntax table
//!
//! An immutable bundle rebuilt on every table mutation and shared
//! behind `Arc`, so tokenization snapshots one consistent view while
//! the table stays freely mutable between evaluations.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;

use super::roles::{CharRole, ContainerRole, ESCAPE, WILDCARD};

/// Immutable recognisers derived from the role bindings
#[derive(Debug)]
pub struct Derived {
    classify: HashMap<char, CharRole>,
    containers: HashMap<ContainerRole, (char, char)>,
    /// Everything escapable: every bound character, container closers,
    /// the escape character, and (outside simple mode) the wildcard
    special: BTreeSet<char>,
    /// Every special character other than the property separator; a path
    /// free of these is evaluable by the fast path
    complex: BTreeSet<char>,
    complex_re: Option<Regex>,
    special_re: Option<Regex>,
    property_sep: char,
    simple: bool,
}

/// Compile a character-class regex over the given set; the class is
/// never empty because the escape character is always special
fn char_class(chars: &BTreeSet<char>) -> Option<Regex> {
    let mut class = String::from("[");
    for c in chars {
        class.push_str(&regex::escape(&c.to_string()));
    }
    class.push(']');
    Regex::new(&class).ok()
}

impl Derived {
    pub(super) fn build(
        classify: HashMap<char, CharRole>,
        containers: HashMap<ContainerRole, (char, char)>,
        property_sep: char,
        simple: bool,
    ) -> Self {
        let mut special: BTreeSet<char> = classify.keys().copied().collect();
        special.insert(ESCAPE);
        if !simple {
            special.insert(WILDCARD);
        }

        let mut complex = special.clone();
        complex.remove(&property_sep);

        let complex_re = char_class(&complex);
        let special_re = char_class(&special);

        Self {
            classify,
            containers,
            special,
            complex,
            complex_re,
            special_re,
            property_sep,
            simple,
        }
    }

    #[inline]
    #[must_use]
    pub fn property_sep(&self) -> char {
        self.property_sep
    }

    #[inline]
    #[must_use]
    pub fn is_simple_mode(&self) -> bool {
        self.simple
    }

    /// Grammatical role of a character, if it has one
    #[inline]
    #[must_use]
    pub fn classify(&self, c: char) -> Option<CharRole> {
        self.classify.get(&c).copied()
    }

    /// Opener and closer for a container role
    #[must_use]
    pub fn container_pair(&self, role: ContainerRole) -> Option<(char, char)> {
        self.containers.get(&role).copied()
    }

    #[inline]
    #[must_use]
    pub fn is_special(&self, c: char) -> bool {
        self.special.contains(&c)
    }

    #[inline]
    #[must_use]
    pub fn is_complex(&self, c: char) -> bool {
        self.complex.contains(&c)
    }

    /// True if the text contains any special character beyond the
    /// property separator, i.e. needs the full tokenizer
    #[inline]
    #[must_use]
    pub fn has_complex(&self, text: &str) -> bool {
        match &self.complex_re {
            Some(re) => re.is_match(text),
            None => text.chars().any(|c| self.complex.contains(&c)),
        }
    }

    /// True if the text contains any special character at all
    #[inline]
    #[must_use]
    pub fn has_special(&self, text: &str) -> bool {
        match &self.special_re {
            Some(re) => re.is_match(text),
            None => text.chars().any(|c| self.special.contains(&c)),
        }
    }

    /// Backslash-escape every currently-special character in a segment
    ///
    /// The output tokenizes back to a single-name program whose name is
    /// exactly the input segment.
    #[must_use]
    pub fn escape(&self, segment: &str) -> String {
        let mut out = String::with_capacity(segment.len());
        for c in segment.chars() {
            if self.is_special(c) {
                out.push(ESCAPE);
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::SyntaxTable;

    #[test]
    fn default_table_classes() {
        let derived = SyntaxTable::default().derived();
        assert!(derived.is_complex('['));
        assert!(derived.is_complex('*'));
        assert!(derived.is_complex('\\'));
        assert!(!derived.is_complex('.'));
        assert!(derived.is_special('.'));
        assert!(derived.is_special(']'));
        assert!(!derived.is_special('x'));
    }

    #[test]
    fn complex_predicate_over_text() {
        let derived = SyntaxTable::default().derived();
        assert!(!derived.has_complex("a.b.c"));
        assert!(derived.has_complex("a.b[c]"));
        assert!(derived.has_complex("a,b"));
        assert!(derived.has_complex("a\\.b"));
    }

    #[test]
    fn escape_marks_every_special() {
        let derived = SyntaxTable::default().derived();
        assert_eq!(derived.escape("a.b"), "a\\.b");
        assert_eq!(derived.escape("plain"), "plain");
        assert_eq!(derived.escape("x[0]"), "x\\[0\\]");
        assert_eq!(derived.escape("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn simple_mode_narrows_classes() {
        let mut table = SyntaxTable::default();
        table.set_simple(true);
        let derived = table.derived();
        assert!(!derived.is_special('['));
        assert!(!derived.is_special('*'));
        assert!(derived.is_special('.'));
        assert!(derived.is_complex('\\'));
        assert!(!derived.has_complex("a[b]*"));
    }
}
