//! The interfaces between datasets and the triple stores holding their graphs.
//!
//! A [Repository] evaluates SPARQL and exposes its graphs as [Graph]s. Datasets only talk to
//! backends through these traits, so any store (in-memory, on-disk, remote endpoint) can be
//! plugged in.

mod error;
mod graph;
mod repository;
mod results;

pub use error::RepositoryError;
pub use graph::{Graph, MutableGraph, TripleStream};
pub use repository::{Repository, RepositoryFactory, RepositoryId};
pub use results::{QueryResults, QuerySolution, QuerySolutions};
