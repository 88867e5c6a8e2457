//! An immutable abstract syntax tree for SPARQL 1.1 queries and updates (with SPARQL-star
//! quoted triples).
//!
//! Every SPARQL construct has exactly one node type. Nodes are plain values: they are built once
//! (usually through the [builders](crate::builder)) and never mutated afterward. Rendering is done
//! by the [render](crate::render) module.

mod expr;
mod path;
mod pattern;
mod query;
mod update;

pub use expr::*;
pub use path::*;
pub use pattern::*;
pub use query::*;
pub use update::*;
