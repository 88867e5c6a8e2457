use crate::error::storage_error;
use crate::repository::MemoryState;
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use rdf_compose_common::{Graph, MutableGraph, RepositoryError, TripleStream};
use rdf_compose_model::{GraphName, Triple};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::trace;

/// One graph (default or named) of a [MemoryRepository](crate::MemoryRepository).
///
/// The graph is a live view: it sees every change made to the repository.
pub struct MemoryGraph {
    state: Arc<MemoryState>,
    graph_name: GraphName,
}

impl MemoryGraph {
    pub(crate) fn new(state: Arc<MemoryState>, graph_name: GraphName) -> Self {
        Self { state, graph_name }
    }

    pub fn graph_name(&self) -> &GraphName {
        &self.graph_name
    }

    fn collect_triples(&self) -> Result<Vec<Triple>, RepositoryError> {
        self.state
            .store()?
            .quads_for_pattern(None, None, None, Some(self.graph_name.as_ref()))
            .map(|quad| quad.map(Triple::from).map_err(storage_error))
            .collect()
    }
}

impl Debug for MemoryGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGraph")
            .field("repository", &self.state.id())
            .field("graph_name", &self.graph_name)
            .finish()
    }
}

#[async_trait]
impl Graph for MemoryGraph {
    async fn contains(&self, triple: &Triple) -> Result<bool, RepositoryError> {
        self.state
            .store()?
            .contains(triple.as_ref().in_graph(self.graph_name.as_ref()))
            .map_err(storage_error)
    }

    async fn triples(&self) -> Result<Vec<Triple>, RepositoryError> {
        self.collect_triples()
    }

    fn stream(&self) -> TripleStream<'_> {
        // The store is only read once the stream is polled. Triples are then decoded one by one.
        stream::once(async move {
            self.state.store().map(|store| {
                store.quads_for_pattern(None, None, None, Some(self.graph_name.as_ref()))
            })
        })
        .map_ok(|quads| {
            stream::iter(quads.map(|quad| quad.map(Triple::from).map_err(storage_error)))
        })
        .try_flatten()
        .boxed()
    }

    async fn len(&self) -> Result<usize, RepositoryError> {
        let mut len = 0;
        for quad in self.state.store()?.quads_for_pattern(
            None,
            None,
            None,
            Some(self.graph_name.as_ref()),
        ) {
            quad.map_err(storage_error)?;
            len += 1;
        }
        Ok(len)
    }
}

#[async_trait]
impl MutableGraph for MemoryGraph {
    async fn insert(&self, triple: &Triple) -> Result<bool, RepositoryError> {
        trace!(
            repository = %self.state.id(),
            graph = %self.graph_name,
            %triple,
            "Inserting triple"
        );
        self.state
            .store()?
            .insert(triple.as_ref().in_graph(self.graph_name.as_ref()))
            .map_err(storage_error)
    }
}
