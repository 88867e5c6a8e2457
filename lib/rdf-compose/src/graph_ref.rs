use crate::error::DatasetError;
use rdf_compose_common::{Graph, Repository, RepositoryId};
use rdf_compose_model::NamedNode;
use std::sync::Arc;

/// Where a graph comes from: a repository and the name of the graph in it.
///
/// A `graph_name` of [None] is the repository's own default graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Provenance {
    pub repository: RepositoryId,
    pub graph_name: Option<NamedNode>,
}

/// A graph used in a [`Dataset`](crate::dataset::Dataset), optionally tracking its provenance.
///
/// Only graphs with provenance can be answered by rewriting a query for their repository. Any
/// graph without provenance forces the dataset to copy all graphs into a temporary repository.
#[derive(Clone, Debug)]
pub struct GraphRef {
    graph: Arc<dyn Graph>,
    source: Option<GraphSource>,
}

#[derive(Clone, Debug)]
struct GraphSource {
    repository: Arc<dyn Repository>,
    graph_name: Option<NamedNode>,
}

impl GraphRef {
    /// Wraps a graph of unknown origin.
    pub fn untracked(graph: Arc<dyn Graph>) -> Self {
        Self {
            graph,
            source: None,
        }
    }

    /// Wraps `graph`, which is the graph `graph_name` of `repository`.
    ///
    /// The caller is responsible for `graph` actually being that graph.
    pub fn tracked(
        repository: Arc<dyn Repository>,
        graph_name: Option<NamedNode>,
        graph: Arc<dyn Graph>,
    ) -> Self {
        Self {
            graph,
            source: Some(GraphSource {
                repository,
                graph_name,
            }),
        }
    }

    /// References the default graph of `repository`.
    pub async fn repository_default(repository: Arc<dyn Repository>) -> Result<Self, DatasetError> {
        let graph = repository.default_graph().await?;
        Ok(Self::tracked(repository, None, graph))
    }

    /// References the named graph `name` of `repository`.
    pub async fn repository_graph(
        repository: Arc<dyn Repository>,
        name: NamedNode,
    ) -> Result<Self, DatasetError> {
        let Some(graph) = repository.graph(&name).await? else {
            return Err(DatasetError::UnknownGraph {
                repository: repository.id(),
                name,
            });
        };
        Ok(Self::tracked(repository, Some(name), graph))
    }

    pub fn graph(&self) -> &Arc<dyn Graph> {
        &self.graph
    }

    pub fn has_provenance(&self) -> bool {
        self.source.is_some()
    }

    pub fn provenance(&self) -> Option<Provenance> {
        self.source.as_ref().map(|source| Provenance {
            repository: source.repository.id(),
            graph_name: source.graph_name.clone(),
        })
    }

    /// The repository holding the graph, if tracked.
    pub fn repository(&self) -> Option<&Arc<dyn Repository>> {
        self.source.as_ref().map(|source| &source.repository)
    }

    pub(crate) fn repository_id(&self) -> Option<RepositoryId> {
        self.source.as_ref().map(|source| source.repository.id())
    }

    /// The name of the graph in its repository. [None] for untracked graphs and default graphs.
    pub fn graph_name(&self) -> Option<&NamedNode> {
        self.source
            .as_ref()
            .and_then(|source| source.graph_name.as_ref())
    }
}
