use async_trait::async_trait;
use futures::{future, stream, StreamExt, TryStreamExt};
use rdf_compose_common::{Graph, RepositoryError, TripleStream};
use rdf_compose_model::Triple;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// The union of arbitrary graphs.
///
/// Triples are deduplicated by value and returned in the order they are first seen. Graphs are
/// read one after the other, and a graph is only read once the previous one is exhausted.
#[derive(Clone, Debug)]
pub struct MaterializedUnionGraph {
    graphs: Vec<Arc<dyn Graph>>,
}

impl MaterializedUnionGraph {
    pub fn new(graphs: impl IntoIterator<Item = Arc<dyn Graph>>) -> Self {
        Self {
            graphs: graphs.into_iter().collect(),
        }
    }

    pub fn graphs(&self) -> &[Arc<dyn Graph>] {
        &self.graphs
    }
}

#[async_trait]
impl Graph for MaterializedUnionGraph {
    async fn contains(&self, triple: &Triple) -> Result<bool, RepositoryError> {
        for graph in &self.graphs {
            if graph.contains(triple).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn stream(&self) -> TripleStream<'_> {
        let mut seen = FxHashSet::default();
        stream::iter(&self.graphs)
            .flat_map(|graph| graph.stream())
            .try_filter(move |triple| future::ready(seen.insert(triple.clone())))
            .boxed()
    }

    async fn len(&self) -> Result<usize, RepositoryError> {
        self.stream()
            .try_fold(0, |len, _| future::ready(Ok(len + 1)))
            .await
    }
}
