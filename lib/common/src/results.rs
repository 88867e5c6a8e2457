use crate::error::RepositoryError;
use rdf_compose_model::{Term, Triple, Variable};
use std::sync::Arc;

/// The result of evaluating a query of any kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResults {
    Solutions(QuerySolutions),
    Boolean(bool),
    Graph(Vec<Triple>),
}

impl QueryResults {
    /// A short name of the result kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Solutions(_) => "solutions",
            Self::Boolean(_) => "boolean",
            Self::Graph(_) => "graph",
        }
    }
}

/// The solutions of a `SELECT` query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuerySolutions {
    variables: Arc<[Variable]>,
    solutions: Vec<QuerySolution>,
}

impl QuerySolutions {
    /// Creates the solutions from rows of values. Each row must have one value per variable.
    pub fn try_new(
        variables: Vec<Variable>,
        rows: impl IntoIterator<Item = Vec<Option<Term>>>,
    ) -> Result<Self, RepositoryError> {
        let variables: Arc<[Variable]> = variables.into();
        let solutions = rows
            .into_iter()
            .map(|values| {
                if values.len() == variables.len() {
                    Ok(QuerySolution {
                        variables: Arc::clone(&variables),
                        values,
                    })
                } else {
                    Err(RepositoryError::InvalidSolution(format!(
                        "Expected {} values, got {}",
                        variables.len(),
                        values.len()
                    )))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            variables,
            solutions,
        })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuerySolution> {
        self.solutions.iter()
    }
}

impl IntoIterator for QuerySolutions {
    type Item = QuerySolution;
    type IntoIter = std::vec::IntoIter<QuerySolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuerySolutions {
    type Item = &'a QuerySolution;
    type IntoIter = std::slice::Iter<'a, QuerySolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A single solution: a possibly partial binding of the projected variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySolution {
    variables: Arc<[Variable]>,
    values: Vec<Option<Term>>,
}

impl QuerySolution {
    /// Returns the value bound to the variable named `variable` (without `?`).
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.variables
            .iter()
            .position(|v| v.as_str() == variable)
            .and_then(|index| self.values.get(index))
            .and_then(Option::as_ref)
    }

    /// Iterates over the bound variables.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.variables
            .iter()
            .zip(&self.values)
            .filter_map(|(variable, value)| value.as_ref().map(|value| (variable, value)))
    }

    pub fn values(&self) -> &[Option<Term>] {
        &self.values
    }
}
