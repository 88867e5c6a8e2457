use crate::test_utils::{
    ex, select, solution_triples, sorted, triple, SpyRepository, StaticGraph, TestResult,
};
use futures::TryStreamExt;
use rdf_compose::common::{Graph, Repository, RepositoryError};
use rdf_compose::dataset::Dataset;
use rdf_compose::federation::{DatasetClauses, FederationPlan, MaterializeReason};
use rdf_compose::union::OptimizedUnionGraph;
use rdf_compose::GraphRef;
use std::sync::Arc;

#[tokio::test]
async fn test_single_default_graph_is_returned_as_is() -> TestResult {
    let graph: Arc<dyn Graph> = Arc::new(StaticGraph {
        triples: vec![triple("a", "b")],
    });
    let dataset = Dataset::builder()
        .default_graph(GraphRef::untracked(Arc::clone(&graph)))
        .build()?;

    assert!(Arc::ptr_eq(&dataset.default_graph(), &graph));
    Ok(())
}

#[tokio::test]
async fn test_default_graph_view_is_memoized() -> TestResult {
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(SpyRepository::new()?).await?)
        .default_graph(GraphRef::repository_default(SpyRepository::new()?).await?)
        .build()?;

    assert!(Arc::ptr_eq(&dataset.default_graph(), &dataset.default_graph()));
    Ok(())
}

#[tokio::test]
async fn test_default_graph_of_one_repository_is_queried() -> TestResult {
    let repository = SpyRepository::new()?;
    repository
        .add_graph(&ex("g1"), &[triple("a", "b"), triple("b", "c")])
        .await?;
    repository
        .add_graph(&ex("g2"), &[triple("b", "c"), triple("c", "d")])
        .await?;
    repository.add_graph(&ex("g3"), &[triple("x", "y")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_graph(repository.clone(), ex("g1")).await?)
        .default_graph(GraphRef::repository_graph(repository.clone(), ex("g2")).await?)
        .build()?;

    let graph = dataset.default_graph();
    assert_eq!(graph.len().await?, 3);
    assert!(graph.contains(&triple("c", "d")).await?);
    assert!(!graph.contains(&triple("x", "y")).await?);
    assert_eq!(
        sorted(graph.stream().try_collect().await?),
        vec![triple("a", "b"), triple("b", "c"), triple("c", "d")]
    );

    let queries = repository.queries();
    assert!(!queries.is_empty());
    assert!(queries
        .iter()
        .all(|query| query.contains("FROM <http://example.com/g1>\nFROM <http://example.com/g2>")));
    Ok(())
}

#[tokio::test]
async fn test_default_graph_of_several_repositories_is_read() -> TestResult {
    let first = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    let second = SpyRepository::with_default_graph(&[triple("a", "b"), triple("b", "c")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(first.clone()).await?)
        .default_graph(GraphRef::repository_default(second.clone()).await?)
        .build()?;

    let graph = dataset.default_graph();
    assert_eq!(graph.len().await?, 2);
    assert_eq!(graph.triples().await?[0], triple("a", "b"));
    assert!(graph.contains(&triple("b", "c")).await?);
    assert!(first.queries().is_empty());
    assert!(second.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_repository_default_graph_combined_with_named_graph() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    repository.add_graph(&ex("g1"), &[triple("c", "d")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(repository.clone()).await?)
        .default_graph(GraphRef::repository_graph(repository.clone(), ex("g1")).await?)
        .build()?;

    assert!(matches!(
        dataset.federation_plan(),
        FederationPlan::Materialize(MaterializeReason::RepositoryDefaultGraph)
    ));
    let expected = vec![triple("a", "b"), triple("c", "d")];
    let solutions = dataset
        .select(&select("SELECT * WHERE { ?s ?p ?o }"))
        .await?;
    assert_eq!(solution_triples(&solutions), expected);

    let graph = dataset.default_graph();
    assert_eq!(sorted(graph.triples().await?), expected);
    assert_eq!(graph.len().await?, 2);
    assert!(graph.contains(&triple("a", "b")).await?);
    assert!(repository.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_optimized_union_of_repository_default_graph() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    repository.add_graph(&ex("g"), &[triple("c", "d")]).await?;
    let union = OptimizedUnionGraph::new(repository.clone(), DatasetClauses::default());

    assert_eq!(union.triples().await?, vec![triple("a", "b")]);
    assert_eq!(union.len().await?, 1);
    assert!(!union.contains(&triple("c", "d")).await?);
    assert_eq!(union.repository().id(), repository.id());
    Ok(())
}

#[tokio::test]
async fn test_optimized_union_does_not_query_before_polling() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    let union = OptimizedUnionGraph::new(repository.clone(), DatasetClauses::default());

    let stream = union.stream();
    assert!(repository.queries().is_empty());
    assert_eq!(stream.try_collect::<Vec<_>>().await?, vec![triple("a", "b")]);
    assert_eq!(repository.queries().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_len_falls_back_when_count_fails() -> TestResult {
    let repository = SpyRepository::new()?;
    repository
        .add_graph(&ex("g1"), &[triple("a", "b"), triple("b", "c")])
        .await?;
    repository
        .add_graph(&ex("g2"), &[triple("b", "c"), triple("c", "d")])
        .await?;
    let union = OptimizedUnionGraph::new(
        repository.clone(),
        DatasetClauses::new([ex("g1"), ex("g2")], []),
    );
    repository.reject_queries_containing("COUNT");

    assert_eq!(union.len().await?, 3);
    let queries = repository.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].contains("COUNT"));
    assert!(queries[1].contains("SELECT DISTINCT"));
    Ok(())
}

#[tokio::test]
async fn test_len_fails_when_fallback_fails() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    let union = OptimizedUnionGraph::new(repository.clone(), DatasetClauses::default());
    repository.reject_queries_containing("COUNT");
    repository.reject_queries_containing("SELECT DISTINCT");

    let error = union
        .len()
        .await
        .err()
        .ok_or("the length was computed")?;
    assert!(matches!(error, RepositoryError::Other(_)));
    assert!(union.triples().await.is_err());
    assert_eq!(repository.queries().len(), 3);
    Ok(())
}
