//! Role table: which character plays which grammatical role
//!
//! The table owns the mutable role bindings and rebuilds the immutable
//! [`Derived`] bundle on every mutation. Engine-level callers pair each
//! mutation with a token cache wipe.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{role_conflict_error, unassignable_error, PathResult};

use super::derived::Derived;
use super::roles::{CharRole, ContainerRole, PrefixRole, SeparatorRole, ESCAPE, WILDCARD};

fn default_prefix(role: PrefixRole) -> char {
    match role {
        PrefixRole::Parent => '^',
        PrefixRole::Root => '~',
        PrefixRole::Placeholder => '%',
        PrefixRole::Context => '@',
    }
}

fn default_separator(role: SeparatorRole) -> char {
    match role {
        SeparatorRole::Property => '.',
        SeparatorRole::Collection => ',',
        SeparatorRole::Each => '<',
    }
}

fn default_container(role: ContainerRole) -> (char, char) {
    match role {
        ContainerRole::Property => ('[', ']'),
        ContainerRole::SingleQuote => ('\'', '\''),
        ContainerRole::DoubleQuote => ('"', '"'),
        ContainerRole::Call => ('(', ')'),
        ContainerRole::EvalProperty => ('{', '}'),
    }
}

/// Identifies a role binding during conflict checks, so reassigning a
/// role never conflicts with its own current character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleSlot {
    Prefix(PrefixRole),
    Separator(SeparatorRole),
    Container(ContainerRole),
}

/// Mutable role→character table with derived recognisers
#[derive(Debug, Clone)]
pub struct SyntaxTable {
    prefixes: HashMap<PrefixRole, char>,
    separators: HashMap<SeparatorRole, char>,
    containers: HashMap<ContainerRole, (char, char)>,
    simple: bool,
    derived: Arc<Derived>,
}

impl Default for SyntaxTable {
    fn default() -> Self {
        let prefixes = PrefixRole::ALL
            .iter()
            .map(|&r| (r, default_prefix(r)))
            .collect();
        let separators = SeparatorRole::ALL
            .iter()
            .map(|&r| (r, default_separator(r)))
            .collect();
        let containers = ContainerRole::ALL
            .iter()
            .map(|&r| (r, default_container(r)))
            .collect();
        let mut table = Self {
            prefixes,
            separators,
            containers,
            simple: false,
            derived: Arc::new(Derived::build(
                HashMap::new(),
                HashMap::new(),
                default_separator(SeparatorRole::Property),
                false,
            )),
        };
        table.rebuild();
        table
    }
}

impl SyntaxTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Character currently bound to a prefix role
    #[must_use]
    pub fn prefix(&self, role: PrefixRole) -> char {
        self.prefixes
            .get(&role)
            .copied()
            .unwrap_or_else(|| default_prefix(role))
    }

    /// Character currently bound to a separator role
    #[must_use]
    pub fn separator(&self, role: SeparatorRole) -> char {
        self.separators
            .get(&role)
            .copied()
            .unwrap_or_else(|| default_separator(role))
    }

    /// Opener/closer pair currently bound to a container role
    #[must_use]
    pub fn container(&self, role: ContainerRole) -> (char, char) {
        self.containers
            .get(&role)
            .copied()
            .unwrap_or_else(|| default_container(role))
    }

    #[inline]
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.simple
    }

    /// Snapshot of the derived recognisers for the current bindings
    #[inline]
    #[must_use]
    pub fn derived(&self) -> Arc<Derived> {
        Arc::clone(&self.derived)
    }

    /// # Errors
    ///
    /// Returns a `Config` error if the character is unprintable, the
    /// wildcard, the escape character, or bound to another role.
    pub fn set_prefix(&mut self, role: PrefixRole, ch: char) -> PathResult<()> {
        self.check_assignable(role.name(), ch, RoleSlot::Prefix(role))?;
        self.prefixes.insert(role, ch);
        self.rebuild();
        Ok(())
    }

    /// # Errors
    ///
    /// Same conditions as [`SyntaxTable::set_prefix`].
    pub fn set_separator(&mut self, role: SeparatorRole, ch: char) -> PathResult<()> {
        self.check_assignable(role.name(), ch, RoleSlot::Separator(role))?;
        self.separators.insert(role, ch);
        self.rebuild();
        Ok(())
    }

    /// # Errors
    ///
    /// Same conditions as [`SyntaxTable::set_prefix`], checked for both
    /// the opener and the closer. The opener may equal the closer
    /// (quote-style containers).
    pub fn set_container(&mut self, role: ContainerRole, open: char, close: char) -> PathResult<()> {
        self.check_assignable(role.name(), open, RoleSlot::Container(role))?;
        self.check_assignable(role.name(), close, RoleSlot::Container(role))?;
        self.containers.insert(role, (open, close));
        self.rebuild();
        Ok(())
    }

    /// Replace the whole prefix group in one validated step
    ///
    /// # Errors
    ///
    /// Rejects the entire replacement if any binding conflicts; the
    /// table is left unchanged on error.
    pub fn set_prefixes(&mut self, bindings: [(PrefixRole, char); 4]) -> PathResult<()> {
        let mut candidate = self.clone();
        for (role, ch) in bindings {
            candidate.check_assignable(role.name(), ch, RoleSlot::Prefix(role))?;
            candidate.prefixes.insert(role, ch);
        }
        candidate.rebuild();
        *self = candidate;
        Ok(())
    }

    /// Replace the whole separator group in one validated step
    ///
    /// # Errors
    ///
    /// Rejects the entire replacement if any binding conflicts; the
    /// table is left unchanged on error.
    pub fn set_separators(&mut self, bindings: [(SeparatorRole, char); 3]) -> PathResult<()> {
        let mut candidate = self.clone();
        for (role, ch) in bindings {
            candidate.check_assignable(role.name(), ch, RoleSlot::Separator(role))?;
            candidate.separators.insert(role, ch);
        }
        candidate.rebuild();
        *self = candidate;
        Ok(())
    }

    /// Enable or disable simple mode
    ///
    /// In simple mode prefixes and containers are cleared from the
    /// derived recognisers and the property separator is the only
    /// special character; the bindings themselves are retained and
    /// restored when simple mode is disabled.
    pub fn set_simple(&mut self, on: bool) {
        if self.simple != on {
            self.simple = on;
            self.rebuild();
        }
    }

    /// Restore every binding to its default and leave simple mode
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn check_assignable(&self, role_name: &str, ch: char, slot: RoleSlot) -> PathResult<()> {
        if ch == WILDCARD {
            return Err(unassignable_error(
                role_name,
                ch,
                "reserved as the wildcard character",
            ));
        }
        if ch == ESCAPE {
            return Err(unassignable_error(
                role_name,
                ch,
                "reserved as the escape character",
            ));
        }
        if ch.is_control() || ch.is_whitespace() {
            return Err(unassignable_error(role_name, ch, "not a printable character"));
        }
        if let Some(holder) = self.holder_of(ch, slot) {
            return Err(role_conflict_error(role_name, ch, holder));
        }
        Ok(())
    }

    /// Role currently holding a character, ignoring the slot being
    /// reassigned
    fn holder_of(&self, ch: char, except: RoleSlot) -> Option<&'static str> {
        for (&role, &bound) in &self.prefixes {
            if bound == ch && except != RoleSlot::Prefix(role) {
                return Some(role.name());
            }
        }
        for (&role, &bound) in &self.separators {
            if bound == ch && except != RoleSlot::Separator(role) {
                return Some(role.name());
            }
        }
        for (&role, &(open, close)) in &self.containers {
            if (open == ch || close == ch) && except != RoleSlot::Container(role) {
                return Some(role.name());
            }
        }
        None
    }

    fn rebuild(&mut self) {
        let mut classify: HashMap<char, CharRole> = HashMap::new();
        let property_sep = self.separator(SeparatorRole::Property);

        classify.insert(property_sep, CharRole::Separator(SeparatorRole::Property));
        if !self.simple {
            for (&role, &ch) in &self.prefixes {
                classify.insert(ch, CharRole::Prefix(role));
            }
            for (&role, &ch) in &self.separators {
                classify.insert(ch, CharRole::Separator(role));
            }
            for (&role, &(open, close)) in &self.containers {
                classify.insert(open, CharRole::Open(role));
                if close != open {
                    classify.insert(close, CharRole::Close(role));
                }
            }
            classify.insert(WILDCARD, CharRole::Wildcard);
        }

        let containers = if self.simple {
            HashMap::new()
        } else {
            self.containers.clone()
        };

        self.derived = Arc::new(Derived::build(classify, containers, property_sep, self.simple));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_names_the_holding_role() {
        let mut table = SyntaxTable::default();
        let err = table
            .set_separator(SeparatorRole::Collection, '^')
            .expect_err("parent prefix character must be rejected");
        assert!(err.message.contains("parent prefix"), "{}", err.message);
    }

    #[test]
    fn wildcard_and_escape_are_unassignable() {
        let mut table = SyntaxTable::default();
        assert!(table.set_prefix(PrefixRole::Root, '*').is_err());
        assert!(table.set_prefix(PrefixRole::Root, '\\').is_err());
    }

    #[test]
    fn reassigning_a_role_to_its_own_character_is_allowed() {
        let mut table = SyntaxTable::default();
        table
            .set_separator(SeparatorRole::Property, '.')
            .expect("no-op reassignment must pass");
        table
            .set_container(ContainerRole::Property, '[', ']')
            .expect("no-op container reassignment must pass");
    }

    #[test]
    fn group_replacement_is_atomic() {
        let mut table = SyntaxTable::default();
        let err = table.set_prefixes([
            (PrefixRole::Parent, '!'),
            (PrefixRole::Root, '#'),
            (PrefixRole::Placeholder, '.'),
            (PrefixRole::Context, '@'),
        ]);
        assert!(err.is_err(), "property separator reuse must be rejected");
        assert_eq!(table.prefix(PrefixRole::Parent), '^', "table must be unchanged");
    }
}
