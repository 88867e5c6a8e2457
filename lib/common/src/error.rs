use crate::RepositoryId;
use rdf_compose_sparql::QueryKind;
use std::error::Error;
use std::io;

/// An error raised by a [Repository](crate::Repository) or one of its [graphs](crate::Graph).
///
/// The federation layer never wraps these errors. What a backend reports is what the caller sees.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RepositoryError {
    /// Error from the OS I/O layer or from the network.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The backend rejected the query or update text.
    #[error("Invalid SPARQL: {0}")]
    Syntax(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The backend failed while evaluating a query or an update.
    #[error("Evaluation failed: {0}")]
    Evaluation(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The backend failed to read or write its data.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The repository has been closed and can no longer be used.
    #[error("Repository {0} is closed")]
    Closed(RepositoryId),
    /// The backend answered a query with results of another kind.
    #[error("Expected results of a {expected} query, got {actual}")]
    UnexpectedResults {
        expected: QueryKind,
        actual: &'static str,
    },
    /// A solution could not be interpreted, e.g. a triple with a literal subject.
    #[error("Invalid solution: {0}")]
    InvalidSolution(String),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl RepositoryError {
    /// Wraps an arbitrary backend error.
    pub fn other(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Other(error.into())
    }
}

impl From<RepositoryError> for io::Error {
    #[inline]
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Io(error) => error,
            RepositoryError::Syntax(error) => Self::new(io::ErrorKind::InvalidInput, error),
            other => Self::other(other),
        }
    }
}
