//! Deciding how a [`Dataset`](crate::dataset::Dataset) evaluates a query.
//!
//! If every graph of the dataset lives in the same repository and has provenance, the query is
//! [rewritten](DatasetClauses) with `FROM`/`FROM NAMED` clauses and sent to that repository.
//! Otherwise all graphs are materialized into a temporary repository. This includes the case
//! where the repository's own default graph must be combined with clauses, as any `FROM` or
//! `FROM NAMED` clause replaces the default graph of the repository.

pub(crate) mod materialize;
mod rewrite;

pub use rewrite::DatasetClauses;

use crate::graph_ref::GraphRef;
use rdf_compose_common::{Repository, RepositoryId};
use rdf_compose_model::NamedNode;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// The graphs of a dataset that live in one repository.
///
/// Groups are derived from the dataset on every call and never cached.
#[derive(Clone, Debug)]
pub struct RepositoryGroup {
    repository: Arc<dyn Repository>,
    default_graphs: Vec<Option<NamedNode>>,
    named_graphs: Vec<NamedNode>,
}

impl RepositoryGroup {
    fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            repository,
            default_graphs: Vec::new(),
            named_graphs: Vec::new(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repository
    }

    pub fn repository_id(&self) -> RepositoryId {
        self.repository.id()
    }

    /// The names of the default graphs, in first-seen order. [None] is the repository's own
    /// default graph.
    pub fn default_graphs(&self) -> &[Option<NamedNode>] {
        &self.default_graphs
    }

    /// The repository-side names of the named graphs, in first-seen order.
    pub fn named_graphs(&self) -> &[NamedNode] {
        &self.named_graphs
    }

    /// Whether the repository's own default graph is one of the default graphs.
    pub fn uses_repository_default(&self) -> bool {
        self.default_graphs.contains(&None)
    }
}

/// Partitions the tracked graphs by repository, in first-seen order. Untracked graphs are
/// skipped.
pub(crate) fn group_by_repository<'a>(
    default_graphs: impl IntoIterator<Item = &'a GraphRef>,
    named_graphs: impl IntoIterator<Item = &'a GraphRef>,
) -> Vec<RepositoryGroup> {
    let mut groups = Vec::new();
    for graph_ref in default_graphs {
        if let Some(group) = group_for(&mut groups, graph_ref) {
            let graph_name = graph_ref.graph_name().cloned();
            if !group.default_graphs.contains(&graph_name) {
                group.default_graphs.push(graph_name);
            }
        }
    }
    for graph_ref in named_graphs {
        if let Some(group) = group_for(&mut groups, graph_ref) {
            if let Some(graph_name) = graph_ref.graph_name() {
                if !group.named_graphs.contains(graph_name) {
                    group.named_graphs.push(graph_name.clone());
                }
            }
        }
    }
    groups
}

fn group_for<'g>(
    groups: &'g mut Vec<RepositoryGroup>,
    graph_ref: &GraphRef,
) -> Option<&'g mut RepositoryGroup> {
    let repository = graph_ref.repository()?;
    let id = repository.id();
    if !groups.iter().any(|group| group.repository_id() == id) {
        groups.push(RepositoryGroup::new(Arc::clone(repository)));
    }
    groups.iter_mut().find(|group| group.repository_id() == id)
}

/// How a dataset evaluates queries.
#[derive(Clone, Debug)]
pub enum FederationPlan {
    /// Rewrite the query and send it to the single repository of the group.
    Rewrite(RepositoryGroup),
    /// Copy all graphs into a temporary repository and evaluate the query there.
    Materialize(MaterializeReason),
}

/// Why a dataset cannot rewrite queries for a single repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterializeReason {
    /// At least one graph has no provenance.
    Untracked,
    /// The graphs come from this many repositories.
    MultipleRepositories(usize),
    /// The repository's own default graph is combined with other graphs. A `FROM` or
    /// `FROM NAMED` clause would replace it, so it can not be addressed by a rewritten query.
    RepositoryDefaultGraph,
    /// Materialization was requested by the [options](crate::dataset::DatasetOptions).
    Forced,
}

impl Display for MaterializeReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untracked => f.write_str("a graph has no provenance"),
            Self::MultipleRepositories(count) => {
                write!(f, "graphs come from {count} repositories")
            }
            Self::RepositoryDefaultGraph => {
                f.write_str("the repository default graph is combined with dataset clauses")
            }
            Self::Forced => f.write_str("materialization is forced"),
        }
    }
}
