//! Grammatical roles assignable to single characters
//!
//! Three disjoint groups: prefixes applied to the following word,
//! separators between steps, and paired container delimiters. The
//! wildcard character is fixed and never assignable.

/// The wildcard character, matched inside words and never role-bound
pub const WILDCARD: char = '*';

/// The escape character, always special and never role-bound
pub const ESCAPE: char = '\\';

/// Prefix roles applied to the token word that follows them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixRole {
    /// Rewind the context one stack frame per occurrence (stackable)
    Parent,
    /// Reset the context to the evaluation root
    Root,
    /// Substitute the word with a positional argument, as a name
    Placeholder,
    /// Substitute the step result with a positional argument, raw
    Context,
}

impl PrefixRole {
    pub const ALL: [PrefixRole; 4] = [
        PrefixRole::Parent,
        PrefixRole::Root,
        PrefixRole::Placeholder,
        PrefixRole::Context,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PrefixRole::Parent => "parent prefix",
            PrefixRole::Root => "root prefix",
            PrefixRole::Placeholder => "placeholder prefix",
            PrefixRole::Context => "context prefix",
        }
    }
}

/// Separator roles between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatorRole {
    /// Ends one step and starts the next
    Property,
    /// Gathers adjacent steps into a fan-out collection
    Collection,
    /// Tags the following step as map-over-sequence
    Each,
}

impl SeparatorRole {
    pub const ALL: [SeparatorRole; 3] = [
        SeparatorRole::Property,
        SeparatorRole::Collection,
        SeparatorRole::Each,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SeparatorRole::Property => "property separator",
            SeparatorRole::Collection => "collection separator",
            SeparatorRole::Each => "each separator",
        }
    }
}

/// Container roles, each with a paired opener and closer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerRole {
    /// Bracketed subpath evaluated against the current context
    Property,
    /// Verbatim span, single-quoted
    SingleQuote,
    /// Verbatim span, double-quoted
    DoubleQuote,
    /// Invocation argument span
    Call,
    /// Computed key evaluated against the current context
    EvalProperty,
}

impl ContainerRole {
    pub const ALL: [ContainerRole; 5] = [
        ContainerRole::Property,
        ContainerRole::SingleQuote,
        ContainerRole::DoubleQuote,
        ContainerRole::Call,
        ContainerRole::EvalProperty,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ContainerRole::Property => "property container",
            ContainerRole::SingleQuote => "singlequote container",
            ContainerRole::DoubleQuote => "doublequote container",
            ContainerRole::Call => "call container",
            ContainerRole::EvalProperty => "evalProperty container",
        }
    }

    /// Quote containers capture verbatim spans and do not nest
    #[inline]
    #[must_use]
    pub fn is_quote(self) -> bool {
        matches!(self, ContainerRole::SingleQuote | ContainerRole::DoubleQuote)
    }
}

/// Resolved grammatical role of a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRole {
    Prefix(PrefixRole),
    Separator(SeparatorRole),
    Open(ContainerRole),
    Close(ContainerRole),
    Wildcard,
}
