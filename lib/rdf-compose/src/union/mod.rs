//! Read-only views of several graphs as one.
//!
//! [OptimizedUnionGraph] answers through SPARQL queries to the single repository holding all
//! graphs. [MaterializedUnionGraph] works for any graphs and deduplicates triples itself.

mod materialized;
mod optimized;

pub use materialized::MaterializedUnionGraph;
pub use optimized::OptimizedUnionGraph;
