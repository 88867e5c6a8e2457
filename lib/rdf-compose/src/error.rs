use rdf_compose_common::{RepositoryError, RepositoryId};
use rdf_compose_model::NamedNode;

/// An error raised while assembling a [`Dataset`](crate::dataset::Dataset).
///
/// Errors raised while *querying* a dataset are the unchanged
/// [`RepositoryError`]s of the backends.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// A dataset needs at least one default graph.
    #[error("A dataset requires at least one default graph")]
    NoDefaultGraph,
    /// Two named graphs share the same name.
    #[error("The named graph {0} is declared more than once")]
    DuplicateNamedGraph(NamedNode),
    /// A graph was requested from a repository that does not contain it.
    #[error("Repository {repository} has no graph {name}")]
    UnknownGraph {
        repository: RepositoryId,
        name: NamedNode,
    },
    /// An error raised by a repository while looking up a graph.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
