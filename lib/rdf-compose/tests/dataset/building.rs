use crate::test_utils::{ex, triple, SpyRepository, StaticGraph, TestResult};
use rdf_compose::common::Repository;
use rdf_compose::dataset::Dataset;
use rdf_compose::error::DatasetError;
use rdf_compose::GraphRef;
use std::sync::Arc;

#[test]
fn test_requires_default_graph() {
    let result = Dataset::builder()
        .named_graph(
            ex("g"),
            GraphRef::untracked(Arc::new(StaticGraph { triples: vec![] })),
        )
        .build();
    assert!(matches!(result, Err(DatasetError::NoDefaultGraph)));
}

#[test]
fn test_rejects_duplicate_named_graphs() {
    let graph = GraphRef::untracked(Arc::new(StaticGraph {
        triples: vec![triple("a", "b")],
    }));
    let result = Dataset::builder()
        .default_graph(graph.clone())
        .named_graph(ex("g1"), graph.clone())
        .named_graph(ex("g2"), graph.clone())
        .named_graph(ex("g1"), graph)
        .build();
    match result {
        Err(DatasetError::DuplicateNamedGraph(name)) => assert_eq!(name, ex("g1")),
        other => panic!("Expected a duplicate named graph error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_repository_graph() -> TestResult {
    let repository = SpyRepository::new()?;
    let result = GraphRef::repository_graph(repository.clone(), ex("missing")).await;
    match result {
        Err(DatasetError::UnknownGraph { repository: id, name }) => {
            assert_eq!(id, repository.id());
            assert_eq!(name, ex("missing"));
        }
        other => panic!("Expected an unknown graph error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_provenance() -> TestResult {
    let repository = SpyRepository::new()?;
    repository.add_graph(&ex("g"), &[triple("a", "b")]).await?;

    let default = GraphRef::repository_default(repository.clone()).await?;
    let named = GraphRef::repository_graph(repository.clone(), ex("g")).await?;
    let untracked = GraphRef::untracked(Arc::new(StaticGraph { triples: vec![] }));

    let default = default.provenance().ok_or("default graph is not tracked")?;
    assert_eq!(default.graph_name, None);
    let named = named.provenance().ok_or("named graph is not tracked")?;
    assert_eq!(named.graph_name, Some(ex("g")));
    assert_eq!(default.repository, named.repository);
    assert!(!untracked.has_provenance());
    assert_eq!(untracked.provenance(), None);
    Ok(())
}

#[tokio::test]
async fn test_named_graph_lookup() -> TestResult {
    let repository = SpyRepository::new()?;
    repository.add_graph(&ex("g1"), &[triple("a", "b")]).await?;
    repository.add_graph(&ex("g2"), &[]).await?;

    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(repository.clone()).await?)
        .named_graph(
            ex("g2"),
            GraphRef::repository_graph(repository.clone(), ex("g2")).await?,
        )
        .named_graph(
            ex("g1"),
            GraphRef::repository_graph(repository.clone(), ex("g1")).await?,
        )
        .build()?;

    assert_eq!(dataset.named_graph_names(), vec![&ex("g2"), &ex("g1")]);
    let graph = dataset.named_graph(&ex("g1")).ok_or("g1 is missing")?;
    assert!(graph.contains(&triple("a", "b")).await?);
    assert!(dataset.named_graph(&ex("g3")).is_none());
    Ok(())
}
