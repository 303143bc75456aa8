//! Syntax configuration: role bindings and derived recognisers

mod derived;
mod roles;
mod table;

pub use derived::Derived;
pub use roles::{CharRole, ContainerRole, PrefixRole, SeparatorRole, ESCAPE, WILDCARD};
pub use table::SyntaxTable;
