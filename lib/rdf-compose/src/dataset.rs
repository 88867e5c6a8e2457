//! A SPARQL dataset composed of graphs from any number of repositories.
//!
//! The entry point of the module is the [`Dataset`] struct, created with a [`DatasetBuilder`].

use crate::error::DatasetError;
use crate::federation::materialize::evaluate_materialized;
use crate::federation::{
    group_by_repository, DatasetClauses, FederationPlan, MaterializeReason, RepositoryGroup,
};
use crate::graph_ref::GraphRef;
use crate::union::{MaterializedUnionGraph, OptimizedUnionGraph};
use rdf_compose_common::{Graph, QueryResults, QuerySolutions, RepositoryError, RepositoryFactory};
use rdf_compose_memory::MemoryRepositoryFactory;
use rdf_compose_model::{NamedNode, Triple};
use rdf_compose_sparql::{AskQuery, ConstructQuery, DescribeQuery, Query, QueryKind, SelectQuery};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// How a [`Dataset`] evaluates queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FederationMode {
    /// Rewrite queries with `FROM`/`FROM NAMED` clauses whenever all graphs live in one
    /// repository. Fall back to materialization otherwise.
    #[default]
    Rewrite,
    /// Always copy the graphs into a temporary repository.
    ///
    /// Useful for repositories that ignore dataset clauses.
    Materialize,
}

/// Options of a [`Dataset`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetOptions {
    pub federation: FederationMode,
}

impl DatasetOptions {
    #[must_use]
    pub fn with_federation(mut self, federation: FederationMode) -> Self {
        self.federation = federation;
        self
    }
}

/// Builds a [`Dataset`].
///
/// ```
/// use rdf_compose::dataset::Dataset;
/// use rdf_compose::error::DatasetError;
/// use rdf_compose::memory::MemoryRepository;
/// use rdf_compose::GraphRef;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let repository = Arc::new(MemoryRepository::new()?);
/// let graph = GraphRef::repository_default(repository).await?;
/// let dataset = Dataset::builder().default_graph(graph).build()?;
/// assert!(dataset.named_graph_names().is_empty());
///
/// let empty = Dataset::builder().build();
/// assert!(matches!(empty, Err(DatasetError::NoDefaultGraph)));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// # }).unwrap();
/// ```
#[derive(Default)]
pub struct DatasetBuilder {
    default_graphs: Vec<GraphRef>,
    named_graphs: Vec<(NamedNode, GraphRef)>,
    options: DatasetOptions,
    temporary_repositories: Option<Arc<dyn RepositoryFactory>>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a graph to the default graph of the dataset.
    ///
    /// The default graph is the union of all graphs added here, in the order they were added.
    #[must_use]
    pub fn default_graph(mut self, graph: GraphRef) -> Self {
        self.default_graphs.push(graph);
        self
    }

    /// Adds a named graph. Names must be unique within the dataset.
    #[must_use]
    pub fn named_graph(mut self, name: NamedNode, graph: GraphRef) -> Self {
        self.named_graphs.push((name, graph));
        self
    }

    #[must_use]
    pub fn options(mut self, options: DatasetOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the factory of the temporary repositories used for materialization.
    ///
    /// Defaults to a [`MemoryRepositoryFactory`].
    #[must_use]
    pub fn temporary_repositories(mut self, factory: Arc<dyn RepositoryFactory>) -> Self {
        self.temporary_repositories = Some(factory);
        self
    }

    pub fn build(self) -> Result<Dataset, DatasetError> {
        if self.default_graphs.is_empty() {
            return Err(DatasetError::NoDefaultGraph);
        }
        for (i, (name, _)) in self.named_graphs.iter().enumerate() {
            if self.named_graphs[..i].iter().any(|(other, _)| other == name) {
                return Err(DatasetError::DuplicateNamedGraph(name.clone()));
            }
        }
        Ok(Dataset {
            default_graphs: self.default_graphs,
            named_graphs: self.named_graphs,
            options: self.options,
            temporary_repositories: self
                .temporary_repositories
                .unwrap_or_else(|| Arc::new(MemoryRepositoryFactory)),
            default_graph: OnceLock::new(),
        })
    }
}

/// An immutable [RDF dataset](https://www.w3.org/TR/rdf11-concepts/#dfn-rdf-dataset) whose
/// graphs may come from different repositories.
///
/// Queries are answered in one of two ways (see [`Dataset::federation_plan`]):
/// * If every graph is tracked and all of them live in the same repository, the query is
///   rewritten with `FROM`/`FROM NAMED` clauses and sent to that repository. The repository's
///   own default graph only takes part if no clause is needed, since any clause replaces it.
/// * Otherwise every graph is copied into a temporary repository, which answers the query and is
///   closed afterward.
///
/// A query that already declares a dataset is sent to the repository unchanged.
///
/// Usage example:
/// ```
/// use rdf_compose::common::Repository;
/// use rdf_compose::dataset::Dataset;
/// use rdf_compose::memory::MemoryRepository;
/// use rdf_compose::model::{NamedNode, Triple};
/// use rdf_compose::sparql::builder::SelectBuilder;
/// use rdf_compose::GraphRef;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let ex = NamedNode::new("http://example.com/a")?;
/// let triple = Triple::new(ex.clone(), ex.clone(), ex.clone());
///
/// let first = Arc::new(MemoryRepository::new()?);
/// first.edit_default_graph().await?.insert(&triple).await?;
/// let second = Arc::new(MemoryRepository::new()?);
/// second.edit_default_graph().await?.insert(&triple).await?;
///
/// let dataset = Dataset::builder()
///     .default_graph(GraphRef::repository_default(first).await?)
///     .default_graph(GraphRef::repository_default(second).await?)
///     .build()?;
///
/// let query = SelectBuilder::new().distinct().where_(|g| {
///     g.triple(ex.clone(), ex.clone(), ex.clone())
/// });
/// let solutions = dataset.select(&query.build_query().render().try_into()?).await?;
/// assert_eq!(solutions.len(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// # }).unwrap();
/// ```
pub struct Dataset {
    default_graphs: Vec<GraphRef>,
    named_graphs: Vec<(NamedNode, GraphRef)>,
    options: DatasetOptions,
    temporary_repositories: Arc<dyn RepositoryFactory>,
    default_graph: OnceLock<Arc<dyn Graph>>,
}

impl Dataset {
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    pub fn options(&self) -> &DatasetOptions {
        &self.options
    }

    /// Evaluates a `SELECT` query against the dataset.
    pub async fn select(&self, query: &SelectQuery) -> Result<QuerySolutions, RepositoryError> {
        match self.query(&Query::Select(query.clone())).await? {
            QueryResults::Solutions(solutions) => Ok(solutions),
            other => Err(unexpected_results(QueryKind::Select, &other)),
        }
    }

    /// Evaluates an `ASK` query against the dataset.
    pub async fn ask(&self, query: &AskQuery) -> Result<bool, RepositoryError> {
        match self.query(&Query::Ask(query.clone())).await? {
            QueryResults::Boolean(result) => Ok(result),
            other => Err(unexpected_results(QueryKind::Ask, &other)),
        }
    }

    /// Evaluates a `CONSTRUCT` query against the dataset.
    pub async fn construct(&self, query: &ConstructQuery) -> Result<Vec<Triple>, RepositoryError> {
        match self.query(&Query::Construct(query.clone())).await? {
            QueryResults::Graph(triples) => Ok(triples),
            other => Err(unexpected_results(QueryKind::Construct, &other)),
        }
    }

    /// Evaluates a `DESCRIBE` query against the dataset.
    pub async fn describe(&self, query: &DescribeQuery) -> Result<Vec<Triple>, RepositoryError> {
        match self.query(&Query::Describe(query.clone())).await? {
            QueryResults::Graph(triples) => Ok(triples),
            other => Err(unexpected_results(QueryKind::Describe, &other)),
        }
    }

    /// Evaluates a query of any kind against the dataset.
    ///
    /// Errors of the repositories are returned unchanged.
    pub async fn query(&self, query: &Query) -> Result<QueryResults, RepositoryError> {
        match self.federation_plan() {
            FederationPlan::Rewrite(group) => {
                let rewritten = self.clauses_for(&group).apply(query);
                debug!(
                    repository = %group.repository_id(),
                    kind = %query.kind(),
                    "Rewriting query"
                );
                trace!(query = %rewritten, "Rewritten query");
                group.repository().query(&rewritten).await
            }
            FederationPlan::Materialize(reason) => {
                debug!(%reason, kind = %query.kind(), "Materializing dataset");
                evaluate_materialized(self, query).await
            }
        }
    }

    /// The default graph of the dataset: the union of all its default graphs.
    ///
    /// The view is created on first access and reused afterward:
    /// * a dataset with a single default graph returns that graph;
    /// * if all default graphs are tracked and live in one repository, the view queries that
    ///   repository ([`OptimizedUnionGraph`]), unless the repository's own default graph is
    ///   combined with named graphs of it;
    /// * otherwise the view reads each graph in turn ([`MaterializedUnionGraph`]).
    pub fn default_graph(&self) -> Arc<dyn Graph> {
        Arc::clone(self.default_graph.get_or_init(|| self.create_default_graph()))
    }

    fn create_default_graph(&self) -> Arc<dyn Graph> {
        if let [graph_ref] = self.default_graphs.as_slice() {
            return Arc::clone(graph_ref.graph());
        }
        if self.options.federation == FederationMode::Rewrite
            && self.default_graphs.iter().all(GraphRef::has_provenance)
        {
            let mut groups = group_by_repository(&self.default_graphs, []);
            if let (Some(group), true) = (groups.pop(), groups.is_empty()) {
                let clauses = DatasetClauses::for_group(&group, []);
                if !group.uses_repository_default() || clauses.is_empty() {
                    return Arc::new(OptimizedUnionGraph::new(
                        Arc::clone(group.repository()),
                        clauses,
                    ));
                }
            }
        }
        Arc::new(MaterializedUnionGraph::new(
            self.default_graphs
                .iter()
                .map(|graph_ref| Arc::clone(graph_ref.graph())),
        ))
    }

    /// The named graph `name`, if the dataset has one.
    pub fn named_graph(&self, name: &NamedNode) -> Option<Arc<dyn Graph>> {
        self.named_graphs
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, graph_ref)| Arc::clone(graph_ref.graph()))
    }

    /// The names of the named graphs, in the order they were added.
    pub fn named_graph_names(&self) -> Vec<&NamedNode> {
        self.named_graphs.iter().map(|(name, _)| name).collect()
    }

    /// Groups the tracked graphs of the dataset by repository.
    pub fn repository_groups(&self) -> Vec<RepositoryGroup> {
        group_by_repository(
            &self.default_graphs,
            self.named_graphs.iter().map(|(_, graph_ref)| graph_ref),
        )
    }

    /// Decides how queries are evaluated.
    ///
    /// The plan is derived from the graphs on every call and never cached.
    pub fn federation_plan(&self) -> FederationPlan {
        if self.options.federation == FederationMode::Materialize {
            return FederationPlan::Materialize(MaterializeReason::Forced);
        }
        let untracked = self
            .default_graphs
            .iter()
            .chain(self.named_graphs.iter().map(|(_, graph_ref)| graph_ref))
            .any(|graph_ref| !graph_ref.has_provenance());
        if untracked {
            return FederationPlan::Materialize(MaterializeReason::Untracked);
        }
        let mut groups = self.repository_groups();
        match (groups.pop(), groups.len()) {
            (Some(group), 0) => {
                if group.uses_repository_default() && !self.clauses_for(&group).is_empty() {
                    FederationPlan::Materialize(MaterializeReason::RepositoryDefaultGraph)
                } else {
                    FederationPlan::Rewrite(group)
                }
            }
            (_, others) => {
                FederationPlan::Materialize(MaterializeReason::MultipleRepositories(others + 1))
            }
        }
    }

    /// The dataset clauses for `group`, including the names under which the dataset exposes
    /// graphs of the group's repository.
    fn clauses_for(&self, group: &RepositoryGroup) -> DatasetClauses {
        let repository = group.repository_id();
        DatasetClauses::for_group(
            group,
            self.named_graphs
                .iter()
                .filter(|(_, graph_ref)| graph_ref.repository_id() == Some(repository))
                .map(|(name, _)| name),
        )
    }

    pub(crate) fn default_graph_refs(&self) -> impl Iterator<Item = &GraphRef> {
        self.default_graphs.iter()
    }

    pub(crate) fn named_graph_refs(&self) -> impl Iterator<Item = (&NamedNode, &GraphRef)> {
        self.named_graphs.iter().map(|(name, graph_ref)| (name, graph_ref))
    }

    pub(crate) fn temporary_repositories(&self) -> &dyn RepositoryFactory {
        self.temporary_repositories.as_ref()
    }
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("default_graphs", &self.default_graphs)
            .field("named_graphs", &self.named_graphs)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn unexpected_results(expected: QueryKind, actual: &QueryResults) -> RepositoryError {
    RepositoryError::UnexpectedResults {
        expected,
        actual: actual.kind_name(),
    }
}
