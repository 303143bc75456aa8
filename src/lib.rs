//! # pathex
//!
//! Embeddable path-expression engine for navigating and mutating
//! in-memory heterogeneous value graphs (maps, sequences, scalars,
//! callables) with compact textual paths. A path compiles once into a
//! reusable token program, then reads, writes, or invokes against any
//! root value.
//!
//! ## Features
//!
//! - **Configurable syntax** — every prefix, separator, and container
//!   character is reassignable per engine; derived recognisers rebuild
//!   and the token cache wipes on each change
//! - **Compiled programs** — tokenize once, evaluate many times; flat
//!   name chains take a zero-machinery fast path
//! - **Writes** — assignment through any addressable path, with
//!   optional materialisation of missing intermediates
//! - **Fan-out** — collections, wildcards, and map-over-sequence steps
//! - **Invocation** — callable values invoked with receiver binding
//!   and argument lists built from the path text
//! - **Search** — depth-first equality scan emitting paths that
//!   tokenize back to the values they name
//!
//! ## Usage
//!
//! ```rust
//! use pathex::{Engine, Value};
//!
//! let mut engine = Engine::new();
//! let root = Value::from_json(&serde_json::json!({
//!     "users": [{"name": "ada"}, {"name": "lin"}]
//! }));
//!
//! let first = engine.get(&root, "users.0.name", &[]);
//! assert_eq!(first, Some(Value::Str("ada".into())));
//!
//! let names = engine.get(&root, "users<name", &[]);
//! assert_eq!(
//!     names,
//!     Some(Value::Seq(vec!["ada".into(), "lin".into()]))
//! );
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod cache;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod fastpath;
pub mod lexer;
pub mod search;
pub mod syntax;
pub mod tokenizer;
pub mod value;

pub use engine::Engine;
pub use error::{ErrorKind, PathError, PathResult};
pub use evaluator::wildcard_match;
pub use fastpath::{quick_get, quick_set};
pub use lexer::{scan, TextToken, TextTokenKind};
pub use search::FindMode;
pub use syntax::{ContainerRole, PrefixRole, SeparatorRole, SyntaxTable};
pub use tokenizer::{Modifiers, Program, Step, SubOp};
pub use value::{Callable, Value};
