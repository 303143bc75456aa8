//! Engine facade
//!
//! One engine instance owns a syntax table, a token cache, and the
//! evaluation options. Compilation is performed once per path text and
//! memoised; every syntax mutation wipes the cache so stale programs
//! are never served. Engines are single-threaded by contract: use one
//! per thread or serialise access externally.

use std::sync::Arc;

use crate::cache::TokenCache;
use crate::error::PathResult;
use crate::evaluator::{resolve_read, resolve_write};
use crate::fastpath::{quick_get, quick_set};
use crate::search::{find, find_safe, FindMode};
use crate::syntax::{ContainerRole, PrefixRole, SeparatorRole, SyntaxTable};
use crate::tokenizer::{tokenize, Program};
use crate::value::Value;

/// Path-expression engine: compile, read, write, search
#[derive(Debug)]
pub struct Engine {
    syntax: SyntaxTable,
    cache: TokenCache,
    use_cache: bool,
    force: bool,
    default: Option<Value>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with default syntax, caching on, force off
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax: SyntaxTable::default(),
            cache: TokenCache::new(),
            use_cache: true,
            force: false,
            default: None,
        }
    }

    /// The active syntax table (read-only; mutate through the engine so
    /// the token cache stays consistent)
    #[inline]
    #[must_use]
    pub fn syntax(&self) -> &SyntaxTable {
        &self.syntax
    }

    // --- syntax mutators -------------------------------------------------

    /// # Errors
    ///
    /// Returns a `Config` error naming the conflicting role.
    pub fn set_prefix(&mut self, role: PrefixRole, ch: char) -> PathResult<()> {
        self.syntax.set_prefix(role, ch)?;
        self.cache.clear();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a `Config` error naming the conflicting role.
    pub fn set_separator(&mut self, role: SeparatorRole, ch: char) -> PathResult<()> {
        self.syntax.set_separator(role, ch)?;
        self.cache.clear();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a `Config` error naming the conflicting role.
    pub fn set_container(&mut self, role: ContainerRole, open: char, close: char) -> PathResult<()> {
        self.syntax.set_container(role, open, close)?;
        self.cache.clear();
        Ok(())
    }

    /// Replace the whole prefix group atomically
    ///
    /// # Errors
    ///
    /// Returns a `Config` error and leaves the table unchanged.
    pub fn set_prefixes(&mut self, bindings: [(PrefixRole, char); 4]) -> PathResult<()> {
        self.syntax.set_prefixes(bindings)?;
        self.cache.clear();
        Ok(())
    }

    /// Replace the whole separator group atomically
    ///
    /// # Errors
    ///
    /// Returns a `Config` error and leaves the table unchanged.
    pub fn set_separators(&mut self, bindings: [(SeparatorRole, char); 3]) -> PathResult<()> {
        self.syntax.set_separators(bindings)?;
        self.cache.clear();
        Ok(())
    }

    /// Toggle simple mode: only the property separator stays special
    pub fn simple_mode(&mut self, on: bool) {
        self.syntax.set_simple(on);
        self.cache.clear();
    }

    /// Restore default syntax and leave simple mode
    pub fn reset_syntax(&mut self) {
        self.syntax.reset();
        self.cache.clear();
    }

    // --- option toggles --------------------------------------------------

    /// Toggle the token cache; re-enabling starts from an empty cache
    pub fn set_cache(&mut self, on: bool) {
        if on && !self.use_cache {
            self.cache.clear();
        }
        self.use_cache = on;
    }

    /// Toggle materialisation of missing intermediates on writes
    pub fn set_force(&mut self, on: bool) {
        self.force = on;
    }

    /// Value returned by [`Engine::get`] when a lookup misses
    pub fn set_default(&mut self, value: Option<Value>) {
        self.default = value;
    }

    // --- compilation -----------------------------------------------------

    /// Compile a path, consulting the token cache
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPath` error when the tokenizer rejects the
    /// text; see [`tokenize`].
    pub fn tokens(&mut self, path: &str) -> PathResult<Arc<Program>> {
        if self.use_cache {
            if let Some(program) = self.cache.get(path) {
                return Ok(program);
            }
        }
        let program = Arc::new(tokenize(path, &self.syntax.derived())?);
        if self.use_cache {
            self.cache.insert(path, Arc::clone(&program));
        }
        Ok(program)
    }

    /// Whether a path tokenizes
    pub fn valid(&mut self, path: &str) -> bool {
        self.tokens(path).is_ok()
    }

    /// Backslash-escape every currently-special character in a segment
    #[must_use]
    pub fn escape(&self, segment: &str) -> String {
        self.syntax.derived().escape(segment)
    }

    // --- evaluation ------------------------------------------------------

    /// Read a path; `None` means absent unless a default is configured
    pub fn get(&mut self, root: &Value, path: &str, args: &[Value]) -> Option<Value> {
        match self.tokens(path) {
            Ok(program) => self.get_program(root, &program, args),
            Err(err) => {
                log::debug!("get on invalid path: {err}");
                self.default.clone()
            }
        }
    }

    /// Read a pre-compiled program
    pub fn get_program(&mut self, root: &Value, program: &Program, args: &[Value]) -> Option<Value> {
        let hit = if program.is_empty() {
            Some(root.clone())
        } else if let Some(names) = program.simple_names() {
            quick_get(root, &names)
        } else {
            resolve_read(root, program, args)
        };
        hit.or_else(|| self.default.clone())
    }

    /// Read a path with an explicit fallback for misses
    pub fn get_or(&mut self, root: &Value, path: &str, default: Value, args: &[Value]) -> Value {
        match self.tokens(path) {
            Ok(program) => {
                if program.is_empty() {
                    return root.clone();
                }
                let hit = if let Some(names) = program.simple_names() {
                    quick_get(root, &names)
                } else {
                    resolve_read(root, &program, args)
                };
                hit.unwrap_or(default)
            }
            Err(_) => default,
        }
    }

    /// Write a path; true iff every target was assigned
    pub fn set(&mut self, root: &mut Value, path: &str, value: &Value, args: &[Value]) -> bool {
        match self.tokens(path) {
            Ok(program) => self.set_program(root, &program, value, args),
            Err(err) => {
                log::debug!("set on invalid path: {err}");
                false
            }
        }
    }

    /// Write through a pre-compiled program
    pub fn set_program(
        &mut self,
        root: &mut Value,
        program: &Program,
        value: &Value,
        args: &[Value],
    ) -> bool {
        if program.is_empty() {
            return false;
        }
        if let Some(names) = program.simple_names() {
            return quick_set(root, &names, value, self.force);
        }
        resolve_write(root, program, value, args, self.force)
    }

    // --- search ----------------------------------------------------------

    /// Path of the first value equal to the target, in DFS pre-order
    #[must_use]
    pub fn find_first(&self, root: &Value, target: &Value) -> Option<String> {
        find(root, target, FindMode::First, &self.syntax.derived())
            .into_iter()
            .next()
    }

    /// Paths of every value equal to the target
    #[must_use]
    pub fn find_all(&self, root: &Value, target: &Value) -> Vec<String> {
        find(root, target, FindMode::All, &self.syntax.derived())
    }

    /// Cycle-guarded variant of [`Engine::find_first`]
    ///
    /// # Errors
    ///
    /// Returns a `Cycle` error when the walk re-enters an ancestor.
    pub fn find_first_safe(&self, root: &Value, target: &Value) -> PathResult<Option<String>> {
        find_safe(root, target, FindMode::First, &self.syntax.derived())
            .map(|hits| hits.into_iter().next())
    }

    /// Cycle-guarded variant of [`Engine::find_all`]
    ///
    /// # Errors
    ///
    /// Returns a `Cycle` error when the walk re-enters an ancestor.
    pub fn find_all_safe(&self, root: &Value, target: &Value) -> PathResult<Vec<String>> {
        find_safe(root, target, FindMode::All, &self.syntax.derived())
    }
}
