use crate::error::{evaluation_error, storage_error};
use crate::graph::MemoryGraph;
use async_trait::async_trait;
use oxigraph::sparql::QueryResults as OxQueryResults;
use oxigraph::store::Store;
use rdf_compose_common::{
    Graph, MutableGraph, QuerySolutions, Repository, RepositoryError, RepositoryFactory,
    RepositoryId,
};
use rdf_compose_model::{GraphName, NamedNode, NamedOrBlankNode, Term, Triple};
use rdf_compose_sparql::{
    AskQuery, ConstructQuery, DescribeQuery, QueryKind, SelectQuery, UpdateQuery,
};
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// State shared by a repository and the graphs handed out by it.
pub(crate) struct MemoryState {
    id: RepositoryId,
    store: Store,
    closed: AtomicBool,
}

impl MemoryState {
    pub(crate) fn id(&self) -> RepositoryId {
        self.id
    }

    /// Returns the store, or [RepositoryError::Closed] once the repository has been closed.
    pub(crate) fn store(&self) -> Result<&Store, RepositoryError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RepositoryError::Closed(self.id));
        }
        Ok(&self.store)
    }
}

/// A [Repository] that keeps all data in memory.
///
/// Cloning the repository is cheap and yields a handle to the same data.
#[derive(Clone)]
pub struct MemoryRepository {
    state: Arc<MemoryState>,
}

impl MemoryRepository {
    /// Creates an empty repository with a random id.
    pub fn new() -> Result<Self, RepositoryError> {
        let store = Store::new().map_err(storage_error)?;
        Ok(Self {
            state: Arc::new(MemoryState {
                id: RepositoryId::new_random(),
                store,
                closed: AtomicBool::new(false),
            }),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    fn evaluate(&self, kind: QueryKind, text: &str) -> Result<OxQueryResults, RepositoryError> {
        debug!(repository = %self.state.id, %kind, "Evaluating query");
        self.state.store()?.query(text).map_err(evaluation_error)
    }

    fn graph_handle(&self, graph_name: GraphName) -> Result<MemoryGraph, RepositoryError> {
        self.state.store()?;
        Ok(MemoryGraph::new(Arc::clone(&self.state), graph_name))
    }

    fn collect_graph(
        expected: QueryKind,
        results: OxQueryResults,
    ) -> Result<Vec<Triple>, RepositoryError> {
        match results {
            OxQueryResults::Graph(triples) => triples
                .collect::<Result<Vec<_>, _>>()
                .map_err(evaluation_error),
            other => Err(unexpected_results(expected, &other)),
        }
    }
}

impl Debug for MemoryRepository {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("id", &self.state.id)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    fn id(&self) -> RepositoryId {
        self.state.id
    }

    async fn select(&self, query: &SelectQuery) -> Result<QuerySolutions, RepositoryError> {
        match self.evaluate(QueryKind::Select, query.text())? {
            OxQueryResults::Solutions(solutions) => {
                let variables = solutions.variables().to_vec();
                let rows = solutions
                    .map(|solution| {
                        solution.map(|solution| {
                            variables
                                .iter()
                                .map(|variable| solution.get(variable.as_str()).cloned())
                                .collect::<Vec<Option<Term>>>()
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(evaluation_error)?;
                QuerySolutions::try_new(variables, rows)
            }
            other => Err(unexpected_results(QueryKind::Select, &other)),
        }
    }

    async fn ask(&self, query: &AskQuery) -> Result<bool, RepositoryError> {
        match self.evaluate(QueryKind::Ask, query.text())? {
            OxQueryResults::Boolean(result) => Ok(result),
            other => Err(unexpected_results(QueryKind::Ask, &other)),
        }
    }

    async fn construct(&self, query: &ConstructQuery) -> Result<Vec<Triple>, RepositoryError> {
        let results = self.evaluate(QueryKind::Construct, query.text())?;
        Self::collect_graph(QueryKind::Construct, results)
    }

    async fn describe(&self, query: &DescribeQuery) -> Result<Vec<Triple>, RepositoryError> {
        let results = self.evaluate(QueryKind::Describe, query.text())?;
        Self::collect_graph(QueryKind::Describe, results)
    }

    async fn update(&self, update: &UpdateQuery) -> Result<(), RepositoryError> {
        debug!(repository = %self.state.id, "Evaluating update");
        self.state
            .store()?
            .update(update.text())
            .map_err(evaluation_error)
    }

    async fn default_graph(&self) -> Result<Arc<dyn Graph>, RepositoryError> {
        Ok(Arc::new(self.graph_handle(GraphName::DefaultGraph)?))
    }

    async fn graph(&self, name: &NamedNode) -> Result<Option<Arc<dyn Graph>>, RepositoryError> {
        let exists = self
            .state
            .store()?
            .contains_named_graph(name.as_ref())
            .map_err(storage_error)?;
        if !exists {
            return Ok(None);
        }
        let graph = self.graph_handle(GraphName::NamedNode(name.clone()))?;
        Ok(Some(Arc::new(graph)))
    }

    async fn graph_names(&self) -> Result<Vec<NamedNode>, RepositoryError> {
        let mut names = Vec::new();
        for graph_name in self.state.store()?.named_graphs() {
            if let NamedOrBlankNode::NamedNode(name) = graph_name.map_err(storage_error)? {
                names.push(name);
            }
        }
        Ok(names)
    }

    async fn create_graph(
        &self,
        name: &NamedNode,
    ) -> Result<Arc<dyn MutableGraph>, RepositoryError> {
        self.state
            .store()?
            .insert_named_graph(name.as_ref())
            .map_err(storage_error)?;
        let graph = self.graph_handle(GraphName::NamedNode(name.clone()))?;
        Ok(Arc::new(graph))
    }

    async fn edit_default_graph(&self) -> Result<Arc<dyn MutableGraph>, RepositoryError> {
        Ok(Arc::new(self.graph_handle(GraphName::DefaultGraph)?))
    }

    /// Drops all data. Closing an already closed repository does nothing.
    async fn close(&self) -> Result<(), RepositoryError> {
        if self.state.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        debug!(repository = %self.state.id, "Closing repository");
        self.state.store.clear().map_err(storage_error)
    }
}

fn unexpected_results(expected: QueryKind, actual: &OxQueryResults) -> RepositoryError {
    let actual = match actual {
        OxQueryResults::Solutions(_) => "solutions",
        OxQueryResults::Boolean(_) => "boolean",
        OxQueryResults::Graph(_) => "graph",
    };
    RepositoryError::UnexpectedResults { expected, actual }
}

/// Creates empty [MemoryRepository]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    async fn create(&self) -> Result<Arc<dyn Repository>, RepositoryError> {
        let repository = MemoryRepository::new()?;
        debug!(repository = %repository.id(), "Created temporary repository");
        Ok(Arc::new(repository))
    }
}
