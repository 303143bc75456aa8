//! Compiled token program definitions
//!
//! A path compiles into an ordered sequence of steps plus a `simple`
//! flag. Simple programs are flat name chains and take the fast path.

/// Operation attached to a nested sub-program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubOp {
    /// Bracketed subpath evaluated against the current context
    Property,
    /// Invocation of the current (callable) context
    Call,
    /// Computed key: the nested result keys into the current context
    EvalProperty,
    /// Verbatim single-quoted name
    SingleQuote,
    /// Verbatim double-quoted name
    DoubleQuote,
}

impl SubOp {
    /// Quote ops carry verbatim spans rather than nested paths
    #[inline]
    #[must_use]
    pub fn is_quote(self) -> bool {
        matches!(self, SubOp::SingleQuote | SubOp::DoubleQuote)
    }
}

/// Prefix modifiers accumulated in front of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Stack rewind count, one per parent prefix
    pub parents: u32,
    /// Reset the context to the evaluation root
    pub root: bool,
    /// Substitute the word with a positional argument, as a name
    pub placeholder: bool,
    /// Substitute the step result with a positional argument, raw
    pub context: bool,
}

impl Modifiers {
    #[inline]
    #[must_use]
    pub fn any(self) -> bool {
        self.parents > 0 || self.root || self.placeholder || self.context
    }
}

/// One unit of navigation within a program
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Literal property name
    Name(String),
    /// Name carrying prefix modifiers, a wildcard, or an each tag
    Modified {
        word: String,
        mods: Modifiers,
        wildcard: bool,
        do_each: bool,
    },
    /// Ordered fan-out branches evaluated against the same context
    Collection { branches: Vec<Step>, do_each: bool },
    /// Nested program feeding the enclosing operation
    Sub {
        program: Program,
        op: SubOp,
        do_each: bool,
    },
}

impl Step {
    #[inline]
    #[must_use]
    pub fn is_name(&self) -> bool {
        matches!(self, Step::Name(_))
    }

    /// The verbatim span of a quote sub-program, if this is one
    #[must_use]
    pub fn quote_literal(&self) -> Option<&str> {
        match self {
            Step::Sub { program, op, .. } if op.is_quote() => match program.steps() {
                [Step::Name(text)] => Some(text),
                _ => Some(""),
            },
            _ => None,
        }
    }

    pub(crate) fn take_do_each(&mut self) -> bool {
        match self {
            Step::Name(_) => false,
            Step::Modified { do_each, .. }
            | Step::Collection { do_each, .. }
            | Step::Sub { do_each, .. } => std::mem::replace(do_each, false),
        }
    }
}

/// Compiled representation of a path
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    steps: Vec<Step>,
    simple: bool,
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Program {
    /// Build a program, deriving the `simple` flag
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        let simple = steps.iter().all(Step::is_name);
        Self { steps, simple }
    }

    /// Wrap a verbatim quote span as a one-name program
    #[must_use]
    pub(crate) fn quoted(text: String) -> Self {
        Self {
            steps: vec![Step::Name(text)],
            simple: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// True iff every step is a plain name
    #[inline]
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.simple
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// The name chain of a simple program
    #[must_use]
    pub fn simple_names(&self) -> Option<Vec<&str>> {
        if !self.simple {
            return None;
        }
        Some(
            self.steps
                .iter()
                .filter_map(|s| match s {
                    Step::Name(name) => Some(name.as_str()),
                    _ => None,
                })
                .collect(),
        )
    }
}
