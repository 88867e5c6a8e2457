//! Rendered queries and updates.
//!
//! These value objects are what backends execute. They only carry the SPARQL text and the kind
//! of query, which makes it possible to hand-write a query and still use it everywhere a rendered
//! AST is accepted.

use crate::ast::{SparqlQueryAst, UpdateRequestAst};
use crate::render::{render_query, render_update};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Select,
    Ask,
    Construct,
    Describe,
}

impl QueryKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Ask => "ASK",
            Self::Construct => "CONSTRUCT",
            Self::Describe => "DESCRIBE",
        }
    }
}

impl Display for QueryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Raised when a [Query] of one kind is converted into a value object of another kind.
#[derive(Debug, thiserror::Error)]
#[error("Expected a {expected} query, found a {actual} query")]
pub struct QueryKindMismatch {
    pub expected: QueryKind,
    pub actual: QueryKind,
}

macro_rules! query_value_object {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name {
            text: String,
        }

        impl $name {
            /// Wraps the given SPARQL text. The text is not validated.
            pub fn new(text: impl Into<String>) -> Self {
                Self { text: text.into() }
            }

            pub fn text(&self) -> &str {
                &self.text
            }

            pub fn into_text(self) -> String {
                self.text
            }

            pub fn kind(&self) -> QueryKind {
                QueryKind::$kind
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.text)
            }
        }

        impl From<$name> for Query {
            fn from(value: $name) -> Self {
                Query::$kind(value)
            }
        }

        impl TryFrom<Query> for $name {
            type Error = QueryKindMismatch;

            fn try_from(value: Query) -> Result<Self, Self::Error> {
                match value {
                    Query::$kind(query) => Ok(query),
                    other => Err(QueryKindMismatch {
                        expected: QueryKind::$kind,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

query_value_object!(
    /// A rendered `SELECT` query.
    SelectQuery,
    Select
);
query_value_object!(
    /// A rendered `ASK` query.
    AskQuery,
    Ask
);
query_value_object!(
    /// A rendered `CONSTRUCT` query.
    ConstructQuery,
    Construct
);
query_value_object!(
    /// A rendered `DESCRIBE` query.
    DescribeQuery,
    Describe
);

/// A rendered query of any kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    Select(SelectQuery),
    Ask(AskQuery),
    Construct(ConstructQuery),
    Describe(DescribeQuery),
}

impl Query {
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Select(_) => QueryKind::Select,
            Self::Ask(_) => QueryKind::Ask,
            Self::Construct(_) => QueryKind::Construct,
            Self::Describe(_) => QueryKind::Describe,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Select(query) => query.text(),
            Self::Ask(query) => query.text(),
            Self::Construct(query) => query.text(),
            Self::Describe(query) => query.text(),
        }
    }

    /// Creates a query of the same kind with a different text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::from_kind(self.kind(), text)
    }

    pub fn from_kind(kind: QueryKind, text: impl Into<String>) -> Self {
        match kind {
            QueryKind::Select => Self::Select(SelectQuery::new(text)),
            QueryKind::Ask => Self::Ask(AskQuery::new(text)),
            QueryKind::Construct => Self::Construct(ConstructQuery::new(text)),
            QueryKind::Describe => Self::Describe(DescribeQuery::new(text)),
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&SparqlQueryAst> for Query {
    fn from(value: &SparqlQueryAst) -> Self {
        Self::from_kind(value.kind(), render_query(value))
    }
}

impl From<SparqlQueryAst> for Query {
    fn from(value: SparqlQueryAst) -> Self {
        Self::from(&value)
    }
}

/// A rendered SPARQL update.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UpdateQuery {
    text: String,
}

impl UpdateQuery {
    /// Wraps the given SPARQL text. The text is not validated.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl Display for UpdateQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&UpdateRequestAst> for UpdateQuery {
    fn from(value: &UpdateRequestAst) -> Self {
        Self::new(render_update(value))
    }
}

impl From<UpdateRequestAst> for UpdateQuery {
    fn from(value: UpdateRequestAst) -> Self {
        Self::from(&value)
    }
}
