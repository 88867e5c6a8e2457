use crate::error::RepositoryError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use rdf_compose_model::Triple;
use std::fmt::Debug;

/// A lazy stream of triples.
pub type TripleStream<'a> = BoxStream<'a, Result<Triple, RepositoryError>>;

/// A read-only set of triples.
#[async_trait]
pub trait Graph: Debug + Send + Sync {
    async fn contains(&self, triple: &Triple) -> Result<bool, RepositoryError>;

    /// Returns all triples of the graph.
    async fn triples(&self) -> Result<Vec<Triple>, RepositoryError> {
        self.stream().try_collect().await
    }

    /// Returns the triples of the graph as a lazy stream.
    ///
    /// Implementations should not access the underlying data before the stream is polled.
    fn stream(&self) -> TripleStream<'_>;

    async fn len(&self) -> Result<usize, RepositoryError>;

    async fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len().await? == 0)
    }
}

/// A graph that can be written to.
#[async_trait]
pub trait MutableGraph: Graph {
    /// Inserts `triple`. Returns `true` if the graph did not contain it before.
    async fn insert(&self, triple: &Triple) -> Result<bool, RepositoryError>;

    /// Inserts all `triples` and returns how many of them were new.
    async fn extend(&self, triples: Vec<Triple>) -> Result<usize, RepositoryError> {
        let mut inserted = 0;
        for triple in &triples {
            if self.insert(triple).await? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
