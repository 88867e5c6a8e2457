//! An in-memory [Repository](rdf_compose_common::Repository) backed by Oxigraph's store.
//!
//! Datasets use it to hold the graphs they materialize, and it is handy for tests.
//!
//! ```
//! use rdf_compose_common::Repository;
//! use rdf_compose_memory::MemoryRepository;
//! use rdf_compose_model::{NamedNode, Triple};
//! use rdf_compose_sparql::AskQuery;
//!
//! # tokio_test::block_on(async {
//! let repository = MemoryRepository::new()?;
//! let ex = NamedNode::new("http://example.com")?;
//! let triple = Triple::new(ex.clone(), ex.clone(), ex.clone());
//! repository.edit_default_graph().await?.insert(&triple).await?;
//!
//! let found = repository.ask(&AskQuery::new("ASK { ?s ?p ?o }")).await?;
//! assert!(found);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! # }).unwrap();
//! ```

mod error;
mod graph;
mod repository;

pub use graph::MemoryGraph;
pub use repository::{MemoryRepository, MemoryRepositoryFactory};
