//! Building and rendering SPARQL queries and updates.
//!
//! Queries are assembled as an immutable [AST](ast) (usually through the [builders](builder)) and
//! turned into text by the [renderer](render). The resulting [value objects](query) are what
//! repositories execute.
//!
//! ```
//! use rdf_compose_model::{NamedNode, Variable};
//! use rdf_compose_sparql::builder::SelectBuilder;
//!
//! let foaf = NamedNode::new_unchecked("http://xmlns.com/foaf/0.1/");
//! let name = NamedNode::new_unchecked("http://xmlns.com/foaf/0.1/name");
//! let query = SelectBuilder::new()
//!     .prefix("foaf", foaf)
//!     .variable(Variable::new_unchecked("name"))
//!     .where_(|g| g.triple(Variable::new_unchecked("s"), name, Variable::new_unchecked("name")))
//!     .build_query()
//!     .render();
//!
//! assert_eq!(
//!     query.text(),
//!     "PREFIX foaf: <http://xmlns.com/foaf/0.1/>\nSELECT ?name\nWHERE {\n  ?s foaf:name ?name .\n}"
//! );
//! ```

pub mod ast;
pub mod builder;
pub mod query;
pub mod render;

pub use query::{
    AskQuery, ConstructQuery, DescribeQuery, Query, QueryKind, QueryKindMismatch, SelectQuery,
    UpdateQuery,
};
pub use render::{render_query, render_update};
