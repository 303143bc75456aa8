//! Path text scanner
//!
//! Compiles path text into a [`Program`] against a snapshot of the
//! syntax table's derived recognisers. Pure and deterministic: the
//! output depends only on the text and the snapshot.

use std::mem;

use crate::error::{invalid_path_error, PathResult};
use crate::syntax::{CharRole, ContainerRole, Derived, PrefixRole, SeparatorRole, ESCAPE};

use super::program::{Modifiers, Program, Step, SubOp};

/// Compile path text into a token program
///
/// # Errors
///
/// Returns an `InvalidPath` error for unbalanced containers, a trailing
/// escape, a prefix with no following word, an each separator with no
/// following step, or a collection separator with nothing before it.
pub fn tokenize(text: &str, derived: &Derived) -> PathResult<Program> {
    if text.is_empty() {
        return Ok(Program::new(Vec::new()));
    }
    if !derived.has_complex(text) {
        // Flat name chain: split on the property separator and skip the
        // scanner entirely. Escapes cannot occur here, the escape
        // character always counts as complex.
        let steps = text
            .split(derived.property_sep())
            .map(|name| Step::Name(name.to_string()))
            .collect();
        return Ok(Program::new(steps));
    }
    Scanner::new(text, derived).run()
}

struct Scanner<'a> {
    text: &'a str,
    chars: Vec<char>,
    derived: &'a Derived,
    pos: usize,
    steps: Vec<Step>,
    collection: Option<Vec<Step>>,
    collection_each: bool,
    word: String,
    word_wildcard: bool,
    mods: Modifiers,
    pending_each: bool,
    segment_emitted: bool,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, derived: &'a Derived) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            derived,
            pos: 0,
            steps: Vec::new(),
            collection: None,
            collection_each: false,
            word: String::new(),
            word_wildcard: false,
            mods: Modifiers::default(),
            pending_each: false,
            segment_emitted: false,
        }
    }

    fn run(mut self) -> PathResult<Program> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c == ESCAPE {
                // An escape keeps a special character literal; for any
                // other character the backslash is simply dropped.
                let next = self.escaped_char()?;
                self.word.push(next);
                self.pos += 2;
                continue;
            }
            match self.derived.classify(c) {
                Some(CharRole::Wildcard) => {
                    self.word_wildcard = true;
                    self.word.push(c);
                }
                Some(CharRole::Prefix(role)) if self.word.is_empty() => match role {
                    PrefixRole::Parent => self.mods.parents += 1,
                    PrefixRole::Root => self.mods.root = true,
                    PrefixRole::Placeholder => self.mods.placeholder = true,
                    PrefixRole::Context => self.mods.context = true,
                },
                // A prefix character mid-word reads as an ordinary character
                Some(CharRole::Prefix(_)) => self.word.push(c),
                Some(CharRole::Separator(SeparatorRole::Property)) => self.end_segment()?,
                Some(CharRole::Separator(SeparatorRole::Collection)) => self.branch()?,
                Some(CharRole::Separator(SeparatorRole::Each)) => {
                    self.end_segment()?;
                    self.pending_each = true;
                }
                Some(CharRole::Open(role)) => self.open_container(role)?,
                Some(CharRole::Close(_)) => {
                    return Err(invalid_path_error(
                        self.text,
                        "container closer without a matching opener",
                        Some(self.pos),
                    ));
                }
                None => self.word.push(c),
            }
            self.pos += 1;
        }
        self.finish()
    }

    fn finish(mut self) -> PathResult<Program> {
        self.flush_word()?;
        if self.pending_each {
            return Err(invalid_path_error(
                self.text,
                "each separator with no following step",
                None,
            ));
        }
        if !self.segment_emitted {
            // trailing separator: keep parity with the fast-path split
            self.emit(Step::Name(String::new()));
        }
        if let Some(branches) = self.collection.take() {
            let do_each = mem::replace(&mut self.collection_each, false);
            self.steps.push(Step::Collection { branches, do_each });
        }
        Ok(Program::new(self.steps))
    }

    fn escaped_char(&self) -> PathResult<char> {
        match self.chars.get(self.pos + 1) {
            Some(&next) => Ok(next),
            None => Err(invalid_path_error(
                self.text,
                "trailing escape character",
                Some(self.pos),
            )),
        }
    }

    /// Append a completed step to the program or the open collection
    fn emit(&mut self, step: Step) {
        self.segment_emitted = true;
        match self.collection.as_mut() {
            Some(branches) => branches.push(step),
            None => self.steps.push(step),
        }
    }

    /// Build a step from the accumulated word and its flags, if any
    fn build_word_step(&mut self) -> Option<Step> {
        if self.word.is_empty() && !self.mods.any() && !self.word_wildcard {
            return None;
        }
        let word = mem::take(&mut self.word);
        let mods = mem::take(&mut self.mods);
        let wildcard = mem::replace(&mut self.word_wildcard, false);
        let do_each = mem::replace(&mut self.pending_each, false);
        if mods.any() || wildcard || do_each {
            Some(Step::Modified {
                word,
                mods,
                wildcard,
                do_each,
            })
        } else {
            Some(Step::Name(word))
        }
    }

    fn flush_word(&mut self) -> PathResult<()> {
        if self.mods.any() && self.word.is_empty() {
            return Err(invalid_path_error(
                self.text,
                "prefix without a following word",
                Some(self.pos),
            ));
        }
        if let Some(step) = self.build_word_step() {
            self.emit(step);
        }
        Ok(())
    }

    /// Property separator: flush the word and close any open collection
    fn end_segment(&mut self) -> PathResult<()> {
        self.flush_word()?;
        if !self.segment_emitted {
            self.emit(Step::Name(String::new()));
        }
        if let Some(branches) = self.collection.take() {
            let do_each = mem::replace(&mut self.collection_each, false);
            self.steps.push(Step::Collection { branches, do_each });
        }
        self.segment_emitted = false;
        Ok(())
    }

    /// Collection separator: route the preceding step into the gather list
    fn branch(&mut self) -> PathResult<()> {
        if self.mods.any() && self.word.is_empty() {
            return Err(invalid_path_error(
                self.text,
                "prefix without a following word",
                Some(self.pos),
            ));
        }
        let step = self.build_word_step();
        if self.collection.is_none() {
            let mut seed = match step {
                Some(s) => s,
                // `foo[bar],…` — pull the just-closed container step in
                None => self.steps.pop().ok_or_else(|| {
                    invalid_path_error(
                        self.text,
                        "collection separator with no preceding step",
                        Some(self.pos),
                    )
                })?,
            };
            // An each tag on the first branch belongs to the collection
            self.collection_each = seed.take_do_each();
            self.collection = Some(vec![seed]);
            self.segment_emitted = true;
        } else if let Some(s) = step {
            self.emit(s);
        }
        // an empty branch (`a,,b`) contributes nothing
        Ok(())
    }

    fn open_container(&mut self, role: ContainerRole) -> PathResult<()> {
        if self.mods.any() {
            return Err(invalid_path_error(
                self.text,
                "prefix without a following word",
                Some(self.pos),
            ));
        }
        self.flush_word()?;
        let (open, close) = match self.derived.container_pair(role) {
            Some(pair) => pair,
            None => {
                return Err(invalid_path_error(
                    self.text,
                    "container role without a registered pair",
                    Some(self.pos),
                ));
            }
        };
        self.pos += 1;
        if role.is_quote() {
            let literal = self.capture_quote(close)?;
            let do_each = mem::replace(&mut self.pending_each, false);
            let op = if role == ContainerRole::SingleQuote {
                SubOp::SingleQuote
            } else {
                SubOp::DoubleQuote
            };
            self.emit(Step::Sub {
                program: Program::quoted(literal),
                op,
                do_each,
            });
        } else {
            let subtext = self.capture_span(open, close)?;
            let op = match role {
                ContainerRole::Property => SubOp::Property,
                ContainerRole::Call => SubOp::Call,
                ContainerRole::EvalProperty => SubOp::EvalProperty,
                ContainerRole::SingleQuote | ContainerRole::DoubleQuote => SubOp::Property,
            };
            let program = tokenize(&subtext, self.derived)?;
            let do_each = mem::replace(&mut self.pending_each, false);
            let pass_through = op == SubOp::Property && program.is_empty();
            self.emit(Step::Sub {
                program,
                op,
                do_each,
            });
            if pass_through {
                // `[]` is an each alias: the following step maps over
                // the sequence this pass-through leaves in place
                self.pending_each = true;
            }
        }
        Ok(())
    }

    /// Capture a verbatim quote span; only the closer and the escape
    /// character themselves can be escaped inside it
    fn capture_quote(&mut self, close: char) -> PathResult<String> {
        let mut content = String::new();
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c == ESCAPE {
                let next = self.escaped_char()?;
                if next == close || next == ESCAPE {
                    content.push(next);
                } else {
                    content.push(c);
                    content.push(next);
                }
                self.pos += 2;
                continue;
            }
            if c == close {
                return Ok(content);
            }
            content.push(c);
            self.pos += 1;
        }
        Err(invalid_path_error(
            self.text,
            "unterminated quote container",
            None,
        ))
    }

    /// Capture a nested container span, tracking depth for repeated
    /// openers and skipping quote spans wholesale
    fn capture_span(&mut self, open: char, close: char) -> PathResult<String> {
        let mut depth = 1usize;
        let mut content = String::new();
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c == ESCAPE {
                let next = self.escaped_char()?;
                content.push(c);
                content.push(next);
                self.pos += 2;
                continue;
            }
            if let Some(CharRole::Open(inner)) = self.derived.classify(c) {
                if inner.is_quote() {
                    self.copy_quote_span(c, &mut content)?;
                    continue;
                }
            }
            if c == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(content);
                }
            } else if c == open {
                depth += 1;
            }
            content.push(c);
            self.pos += 1;
        }
        Err(invalid_path_error(
            self.text,
            "unterminated container",
            None,
        ))
    }

    /// Copy a quoted span verbatim, escapes included, so the recursive
    /// tokenize of the captured text sees it unchanged
    fn copy_quote_span(&mut self, quote: char, content: &mut String) -> PathResult<()> {
        content.push(quote);
        self.pos += 1;
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            if c == ESCAPE {
                let next = self.escaped_char()?;
                content.push(c);
                content.push(next);
                self.pos += 2;
                continue;
            }
            content.push(c);
            self.pos += 1;
            if c == quote {
                return Ok(());
            }
        }
        Err(invalid_path_error(
            self.text,
            "unterminated quote container",
            None,
        ))
    }
}
