//! Builders for the [AST](crate::ast).
//!
//! Builders are consumed by value and every setter returns the builder, so a query reads top to
//! bottom in the order it is rendered.

mod group;
mod query;
mod update;

pub use group::GroupBuilder;
pub use query::{AskBuilder, ConstructBuilder, DescribeBuilder, SelectBuilder};
pub use update::UpdateBuilder;
