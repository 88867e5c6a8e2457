use crate::error::RepositoryError;
use crate::graph::{Graph, MutableGraph};
use crate::results::{QueryResults, QuerySolutions};
use async_trait::async_trait;
use rdf_compose_model::{NamedNode, Triple};
use rdf_compose_sparql::{
    AskQuery, ConstructQuery, DescribeQuery, Query, SelectQuery, UpdateQuery,
};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// The identity of a repository.
///
/// Graphs can only be answered by the same query if their repositories have the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryId(Uuid);

impl RepositoryId {
    /// Creates a new, random id.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for RepositoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RepositoryId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A triple store that can evaluate SPARQL.
///
/// Implementations must be safe to share between tasks. Every method is a single unit of work:
/// the caller does not cancel it and does not retry it.
#[async_trait]
pub trait Repository: Debug + Send + Sync {
    /// Returns the identity of this repository.
    fn id(&self) -> RepositoryId;

    async fn select(&self, query: &SelectQuery) -> Result<QuerySolutions, RepositoryError>;

    async fn ask(&self, query: &AskQuery) -> Result<bool, RepositoryError>;

    async fn construct(&self, query: &ConstructQuery) -> Result<Vec<Triple>, RepositoryError>;

    async fn describe(&self, query: &DescribeQuery) -> Result<Vec<Triple>, RepositoryError>;

    /// Evaluates a query of any kind by dispatching to the matching method.
    async fn query(&self, query: &Query) -> Result<QueryResults, RepositoryError> {
        Ok(match query {
            Query::Select(query) => QueryResults::Solutions(self.select(query).await?),
            Query::Ask(query) => QueryResults::Boolean(self.ask(query).await?),
            Query::Construct(query) => QueryResults::Graph(self.construct(query).await?),
            Query::Describe(query) => QueryResults::Graph(self.describe(query).await?),
        })
    }

    async fn update(&self, update: &UpdateQuery) -> Result<(), RepositoryError>;

    /// Returns a read-only view of the default graph.
    async fn default_graph(&self) -> Result<Arc<dyn Graph>, RepositoryError>;

    /// Returns the named graph `name`, or [None] if the repository does not contain it.
    async fn graph(&self, name: &NamedNode) -> Result<Option<Arc<dyn Graph>>, RepositoryError>;

    /// Returns the names of all named graphs.
    async fn graph_names(&self) -> Result<Vec<NamedNode>, RepositoryError>;

    /// Creates the named graph `name` if it does not exist yet and returns it for editing.
    async fn create_graph(
        &self,
        name: &NamedNode,
    ) -> Result<Arc<dyn MutableGraph>, RepositoryError>;

    /// Returns the default graph for editing.
    async fn edit_default_graph(&self) -> Result<Arc<dyn MutableGraph>, RepositoryError>;

    /// Releases the resources of the repository. Any later call may fail.
    async fn close(&self) -> Result<(), RepositoryError>;
}

/// Creates fresh, empty repositories.
///
/// Datasets use a factory to obtain the temporary repository that holds materialized graphs.
#[async_trait]
pub trait RepositoryFactory: Debug + Send + Sync {
    async fn create(&self) -> Result<Arc<dyn Repository>, RepositoryError>;
}
