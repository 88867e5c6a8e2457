use crate::test_utils::{
    ex, select, solution_triples, triple, BrokenGraph, SpyFactory, SpyRepository, StaticGraph,
    TestResult,
};
use rdf_compose::common::RepositoryError;
use rdf_compose::dataset::Dataset;
use rdf_compose::sparql::AskQuery;
use rdf_compose::GraphRef;
use std::sync::Arc;

#[tokio::test]
async fn test_union_of_two_repositories_is_deduplicated() -> TestResult {
    let first = SpyRepository::with_default_graph(&[triple("t1", "o"), triple("t2", "o")]).await?;
    let second =
        SpyRepository::with_default_graph(&[triple("t2", "o"), triple("t3", "o")]).await?;
    let factory = Arc::new(SpyFactory::default());
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(first.clone()).await?)
        .default_graph(GraphRef::repository_default(second.clone()).await?)
        .temporary_repositories(factory.clone())
        .build()?;

    let solutions = dataset
        .select(&select("SELECT * WHERE { ?s ?p ?o }"))
        .await?;

    assert_eq!(
        solution_triples(&solutions),
        vec![triple("t1", "o"), triple("t2", "o"), triple("t3", "o")]
    );
    assert!(first.queries().is_empty());
    assert!(second.queries().is_empty());
    let created = factory.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].close_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_untracked_named_graph_is_copied() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(repository).await?)
        .named_graph(
            ex("g"),
            GraphRef::untracked(Arc::new(StaticGraph {
                triples: vec![triple("c", "d")],
            })),
        )
        .build()?;

    assert!(
        dataset
            .ask(&AskQuery::new(
                "ASK { GRAPH <http://example.com/g> { <http://example.com/c> ?p ?o } }"
            ))
            .await?
    );
    assert!(
        !dataset
            .ask(&AskQuery::new("ASK { <http://example.com/c> ?p ?o }"))
            .await?
    );
    Ok(())
}

#[tokio::test]
async fn test_temporary_repository_closed_when_graph_fails() -> TestResult {
    let factory = Arc::new(SpyFactory::default());
    let dataset = Dataset::builder()
        .default_graph(GraphRef::untracked(Arc::new(StaticGraph {
            triples: vec![triple("a", "b")],
        })))
        .default_graph(GraphRef::untracked(Arc::new(BrokenGraph {
            triples: vec![triple("c", "d")],
        })))
        .temporary_repositories(factory.clone())
        .build()?;

    let error = dataset
        .select(&select("SELECT * WHERE { ?s ?p ?o }"))
        .await
        .err()
        .ok_or("the broken graph was read successfully")?;

    assert!(matches!(error, RepositoryError::Other(_)));
    assert_eq!(error.to_string(), "the graph is broken");
    let created = factory.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].close_count(), 1);
    assert!(created[0].queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_temporary_repository_closed_when_query_fails() -> TestResult {
    let factory = Arc::new(SpyFactory::default());
    let dataset = Dataset::builder()
        .default_graph(GraphRef::untracked(Arc::new(StaticGraph {
            triples: vec![triple("a", "b")],
        })))
        .temporary_repositories(factory.clone())
        .build()?;

    let error = dataset
        .select(&select("SELECT * WHERE {"))
        .await
        .err()
        .ok_or("invalid query was accepted")?;

    assert!(matches!(error, RepositoryError::Syntax(_)));
    let created = factory.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].close_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_each_query_uses_a_new_temporary_repository() -> TestResult {
    let factory = Arc::new(SpyFactory::default());
    let dataset = Dataset::builder()
        .default_graph(GraphRef::untracked(Arc::new(StaticGraph {
            triples: vec![triple("a", "b")],
        })))
        .temporary_repositories(factory.clone())
        .build()?;

    for _ in 0..2 {
        assert!(dataset.ask(&AskQuery::new("ASK { ?s ?p ?o }")).await?);
    }

    let created = factory.created();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|repository| repository.close_count() == 1));
    Ok(())
}
