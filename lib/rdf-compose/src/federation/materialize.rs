//! Evaluating a query over graphs copied into a temporary repository.

use crate::dataset::Dataset;
use futures::TryStreamExt;
use rdf_compose_common::{Graph, MutableGraph, QueryResults, Repository, RepositoryError};
use rdf_compose_sparql::Query;
use tracing::{debug, warn};

/// Copies all graphs of `dataset` into a fresh repository and evaluates `query` there.
///
/// The temporary repository is closed exactly once before returning, whether the copy, the
/// evaluation or neither failed. The first error wins: a failure to close is only reported if
/// everything before it succeeded.
pub(crate) async fn evaluate_materialized(
    dataset: &Dataset,
    query: &Query,
) -> Result<QueryResults, RepositoryError> {
    let repository = dataset.temporary_repositories().create().await?;
    debug!(repository = %repository.id(), "Materializing dataset");

    let result = match copy_dataset(dataset, repository.as_ref()).await {
        Ok(()) => repository.query(query).await,
        Err(error) => Err(error),
    };
    let closed = repository.close().await;

    match (result, closed) {
        (Ok(results), Ok(())) => Ok(results),
        (Ok(_), Err(error)) => Err(error),
        (Err(error), Ok(())) => Err(error),
        (Err(error), Err(close_error)) => {
            warn!(
                repository = %repository.id(),
                error = %close_error,
                "Failed to close temporary repository"
            );
            Err(error)
        }
    }
}

async fn copy_dataset(dataset: &Dataset, target: &dyn Repository) -> Result<(), RepositoryError> {
    let default_graph = target.edit_default_graph().await?;
    for graph_ref in dataset.default_graph_refs() {
        let copied = copy_graph(graph_ref.graph().as_ref(), default_graph.as_ref()).await?;
        debug!(copied, "Copied default graph");
    }
    for (name, graph_ref) in dataset.named_graph_refs() {
        let named_graph = target.create_graph(name).await?;
        let copied = copy_graph(graph_ref.graph().as_ref(), named_graph.as_ref()).await?;
        debug!(graph = %name, copied, "Copied named graph");
    }
    Ok(())
}

/// Streams all triples of `source` into `target` without collecting them first.
async fn copy_graph(
    source: &dyn Graph,
    target: &dyn MutableGraph,
) -> Result<usize, RepositoryError> {
    let mut triples = source.stream();
    let mut copied = 0;
    while let Some(triple) = triples.try_next().await? {
        target.insert(&triple).await?;
        copied += 1;
    }
    Ok(copied)
}
