use crate::test_utils::{
    ex, select, solution_triples, triple, SpyRepository, StaticGraph, TestResult,
};
use insta::assert_snapshot;
use rdf_compose::common::{QueryResults, Repository, RepositoryError};
use rdf_compose::dataset::{Dataset, DatasetOptions, FederationMode};
use rdf_compose::federation::{FederationPlan, MaterializeReason};
use rdf_compose::model::{Term, Variable};
use rdf_compose::sparql::builder::SelectBuilder;
use rdf_compose::sparql::{AskQuery, ConstructQuery, Query};
use rdf_compose::GraphRef;
use std::sync::Arc;

/// A repository with two named graphs and a dataset whose default graph is `g1` (referenced
/// twice) and whose only named graph is `g2`.
async fn single_repository_dataset(
) -> Result<(Arc<SpyRepository>, Dataset), Box<dyn std::error::Error>> {
    let repository = SpyRepository::with_default_graph(&[triple("hidden", "x")]).await?;
    repository.add_graph(&ex("g1"), &[triple("a", "b")]).await?;
    repository.add_graph(&ex("g2"), &[triple("c", "d")]).await?;

    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_graph(repository.clone(), ex("g1")).await?)
        .default_graph(GraphRef::repository_graph(repository.clone(), ex("g1")).await?)
        .named_graph(
            ex("g2"),
            GraphRef::repository_graph(repository.clone(), ex("g2")).await?,
        )
        .build()?;
    Ok((repository, dataset))
}

#[tokio::test]
async fn test_plan_for_single_repository() -> TestResult {
    let (repository, dataset) = single_repository_dataset().await?;

    let FederationPlan::Rewrite(group) = dataset.federation_plan() else {
        panic!("Expected a rewrite plan");
    };
    assert_eq!(group.repository_id(), repository.id());
    assert_eq!(group.default_graphs(), &[Some(ex("g1"))]);
    assert_eq!(group.named_graphs(), &[ex("g2")]);
    assert_eq!(dataset.repository_groups().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_plan_for_untracked_graph() -> TestResult {
    let repository = SpyRepository::new()?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(repository).await?)
        .named_graph(
            ex("g"),
            GraphRef::untracked(Arc::new(StaticGraph { triples: vec![] })),
        )
        .build()?;

    assert!(matches!(
        dataset.federation_plan(),
        FederationPlan::Materialize(MaterializeReason::Untracked)
    ));
    Ok(())
}

#[tokio::test]
async fn test_plan_for_multiple_repositories() -> TestResult {
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(SpyRepository::new()?).await?)
        .default_graph(GraphRef::repository_default(SpyRepository::new()?).await?)
        .build()?;

    assert!(matches!(
        dataset.federation_plan(),
        FederationPlan::Materialize(MaterializeReason::MultipleRepositories(2))
    ));
    assert_eq!(dataset.repository_groups().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_rewritten_query_has_one_clause_per_graph() -> TestResult {
    let (repository, dataset) = single_repository_dataset().await?;

    let solutions = dataset
        .select(&select("SELECT * WHERE { ?s ?p ?o }"))
        .await?;
    assert_eq!(solution_triples(&solutions), vec![triple("a", "b")]);

    assert_snapshot!(repository.queries().join("\n---\n"), @r"
    SELECT * FROM <http://example.com/g1>
    FROM NAMED <http://example.com/g2>
    WHERE { ?s ?p ?o }
    ");
    Ok(())
}

#[tokio::test]
async fn test_rewritten_query_sees_named_graphs() -> TestResult {
    let (_, dataset) = single_repository_dataset().await?;
    let graph = Variable::new_unchecked("g");

    let query = SelectBuilder::new()
        .variable(graph.clone())
        .where_(|g| {
            g.graph(graph.clone(), |g| {
                g.triple(
                    Variable::new_unchecked("s"),
                    Variable::new_unchecked("p"),
                    Variable::new_unchecked("o"),
                )
            })
        })
        .build_query()
        .render();
    let QueryResults::Solutions(solutions) = dataset.query(&query).await? else {
        panic!("Expected solutions");
    };

    let graphs = solutions
        .iter()
        .filter_map(|solution| solution.get("g").cloned())
        .collect::<Vec<_>>();
    assert_eq!(graphs, vec![Term::from(ex("g2"))]);
    Ok(())
}

#[tokio::test]
async fn test_query_with_dataset_is_not_rewritten() -> TestResult {
    let (repository, dataset) = single_repository_dataset().await?;
    let text = "SELECT ?s\nFROM <http://example.com/g2>\nWHERE { ?s ?p ?o }";

    let solutions = dataset.select(&select(text)).await?;
    assert_eq!(solutions.len(), 1);
    assert_eq!(repository.queries(), vec![text.to_owned()]);
    Ok(())
}

#[tokio::test]
async fn test_repository_default_graph_adds_no_clause() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(repository.clone()).await?)
        .build()?;
    let text = "ASK { <http://example.com/a> ?p ?o }";

    assert!(dataset.ask(&AskQuery::new(text)).await?);
    assert_eq!(repository.queries(), vec![text.to_owned()]);
    Ok(())
}

#[tokio::test]
async fn test_repository_default_graph_with_named_graph_is_materialized() -> TestResult {
    let repository = SpyRepository::with_default_graph(&[triple("a", "b")]).await?;
    repository.add_graph(&ex("g"), &[triple("c", "d")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_default(repository.clone()).await?)
        .named_graph(
            ex("g"),
            GraphRef::repository_graph(repository.clone(), ex("g")).await?,
        )
        .build()?;

    assert!(matches!(
        dataset.federation_plan(),
        FederationPlan::Materialize(MaterializeReason::RepositoryDefaultGraph)
    ));
    let solutions = dataset
        .select(&select("SELECT * WHERE { ?s ?p ?o }"))
        .await?;
    assert_eq!(solution_triples(&solutions), vec![triple("a", "b")]);
    assert!(
        dataset
            .ask(&AskQuery::new(
                "ASK { GRAPH <http://example.com/g> { <http://example.com/c> ?p ?o } }"
            ))
            .await?
    );
    assert!(repository.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_construct_is_rewritten() -> TestResult {
    let (repository, dataset) = single_repository_dataset().await?;

    let triples = dataset
        .construct(&ConstructQuery::new(
            "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }",
        ))
        .await?;
    assert_eq!(triples, vec![triple("a", "b")]);
    assert_snapshot!(repository.queries().join("\n---\n"), @r"
    CONSTRUCT { ?s ?p ?o } FROM <http://example.com/g1>
    FROM NAMED <http://example.com/g2>
    WHERE { ?s ?p ?o }
    ");
    Ok(())
}

#[tokio::test]
async fn test_forced_materialization_bypasses_repository() -> TestResult {
    let repository = SpyRepository::new()?;
    repository.add_graph(&ex("g1"), &[triple("a", "b")]).await?;
    let dataset = Dataset::builder()
        .default_graph(GraphRef::repository_graph(repository.clone(), ex("g1")).await?)
        .options(DatasetOptions::default().with_federation(FederationMode::Materialize))
        .build()?;

    assert!(matches!(
        dataset.federation_plan(),
        FederationPlan::Materialize(MaterializeReason::Forced)
    ));
    let solutions = dataset
        .select(&select("SELECT * WHERE { ?s ?p ?o }"))
        .await?;
    assert_eq!(solution_triples(&solutions), vec![triple("a", "b")]);
    assert!(repository.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_repository_errors_are_unchanged() -> TestResult {
    let (_, dataset) = single_repository_dataset().await?;

    let error = dataset
        .select(&select("SELECT * WHERE { ?s ?p"))
        .await
        .err()
        .ok_or("invalid query was accepted")?;
    assert!(matches!(error, RepositoryError::Syntax(_)));
    Ok(())
}

#[tokio::test]
async fn test_typed_query_of_wrong_kind() -> TestResult {
    let (_, dataset) = single_repository_dataset().await?;

    let error = dataset
        .select(&select("ASK { ?s ?p ?o }"))
        .await
        .err()
        .ok_or("ASK query was accepted as SELECT")?;
    assert!(matches!(error, RepositoryError::UnexpectedResults { .. }));

    let results = dataset
        .query(&Query::from(AskQuery::new("ASK { ?s ?p ?o }")))
        .await?;
    assert_eq!(results, QueryResults::Boolean(true));
    Ok(())
}
