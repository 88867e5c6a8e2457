use crate::federation::DatasetClauses;
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use rdf_compose_common::{Graph, QuerySolution, Repository, RepositoryError, TripleStream};
use rdf_compose_model::{RdfTerm, Subject, Term, Triple, Variable};
use rdf_compose_sparql::ast::{AggregateFunction, ExpressionAst};
use rdf_compose_sparql::builder::{AskBuilder, SelectBuilder};
use rdf_compose_sparql::{AskQuery, Query, SelectQuery};
use std::sync::Arc;
use tracing::warn;

/// The union of graphs that all live in one repository.
///
/// Every operation is a single query to the repository, restricted to the union by `FROM`
/// clauses. Nothing is copied. Triples are returned in the order chosen by the repository.
#[derive(Clone, Debug)]
pub struct OptimizedUnionGraph {
    repository: Arc<dyn Repository>,
    clauses: DatasetClauses,
}

impl OptimizedUnionGraph {
    /// Creates the union of the graphs `clauses` selects in `repository`.
    ///
    /// Empty `clauses` select the repository's default graph.
    pub fn new(repository: Arc<dyn Repository>, clauses: DatasetClauses) -> Self {
        Self {
            repository,
            clauses,
        }
    }

    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repository
    }

    pub fn clauses(&self) -> &DatasetClauses {
        &self.clauses
    }

    fn restrict(&self, query: Query) -> String {
        self.clauses.apply(&query).text().to_owned()
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let count = Variable::new_unchecked("count");
        let query = SelectBuilder::new()
            .expression(
                ExpressionAst::Aggregate {
                    function: AggregateFunction::Count,
                    distinct: true,
                    expression: None,
                },
                count.clone(),
            )
            .where_(|g| g.triple(var_s(), var_p(), var_o()))
            .build_query()
            .render();
        let solutions = self
            .repository
            .select(&SelectQuery::new(self.restrict(query)))
            .await?;
        let value = solutions
            .iter()
            .next()
            .and_then(|solution| solution.get(count.as_str()));
        match value {
            Some(Term::Literal(literal)) => literal.value().parse().map_err(|_| {
                RepositoryError::InvalidSolution(format!("{literal} is not a count"))
            }),
            other => Err(RepositoryError::InvalidSolution(format!(
                "Expected a count, got {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl Graph for OptimizedUnionGraph {
    async fn contains(&self, triple: &Triple) -> Result<bool, RepositoryError> {
        // Blank nodes would act as variables in a query pattern.
        if has_blank_nodes(triple) {
            let mut stream = self.stream();
            while let Some(candidate) = stream.try_next().await? {
                if &candidate == triple {
                    return Ok(true);
                }
            }
            return Ok(false);
        }
        let triple = triple.clone();
        let query = AskBuilder::new()
            .where_(|g| g.triple(triple.subject, triple.predicate, triple.object))
            .build_query()
            .render();
        self.repository
            .ask(&AskQuery::new(self.restrict(query)))
            .await
    }

    async fn triples(&self) -> Result<Vec<Triple>, RepositoryError> {
        let query = SelectBuilder::new()
            .distinct()
            .variables([var_s(), var_p(), var_o()])
            .where_(|g| g.triple(var_s(), var_p(), var_o()))
            .build_query()
            .render();
        self.repository
            .select(&SelectQuery::new(self.restrict(query)))
            .await?
            .iter()
            .map(solution_to_triple)
            .collect()
    }

    fn stream(&self) -> TripleStream<'_> {
        // The query only runs once the stream is polled.
        stream::once(self.triples())
            .map_ok(|triples| stream::iter(triples.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }

    async fn len(&self) -> Result<usize, RepositoryError> {
        match self.count().await {
            Ok(count) => Ok(count),
            Err(error) => {
                warn!(%error, "COUNT query failed, counting the triples instead");
                Ok(self.triples().await?.len())
            }
        }
    }
}

fn var_s() -> Variable {
    Variable::new_unchecked("s")
}

fn var_p() -> Variable {
    Variable::new_unchecked("p")
}

fn var_o() -> Variable {
    Variable::new_unchecked("o")
}

fn solution_to_triple(solution: &QuerySolution) -> Result<Triple, RepositoryError> {
    let value = |variable: Variable| {
        solution.get(variable.as_str()).cloned().ok_or_else(|| {
            RepositoryError::InvalidSolution(format!("{variable} is not bound"))
        })
    };
    let subject = Subject::try_from(RdfTerm::from(value(var_s())?))
        .map_err(|error| RepositoryError::InvalidSolution(error.to_string()))?;
    let predicate = match value(var_p())? {
        Term::NamedNode(node) => node,
        other => {
            return Err(RepositoryError::InvalidSolution(format!(
                "{other} is not a valid predicate"
            )));
        }
    };
    Ok(Triple::new(subject, predicate, value(var_o())?))
}

fn has_blank_nodes(triple: &Triple) -> bool {
    let subject = match &triple.subject {
        Subject::BlankNode(_) => true,
        Subject::NamedNode(_) => false,
        Subject::Triple(inner) => has_blank_nodes(inner),
    };
    let object = match &triple.object {
        Term::BlankNode(_) => true,
        Term::NamedNode(_) | Term::Literal(_) => false,
        Term::Triple(inner) => has_blank_nodes(inner),
    };
    subject || object
}
