use crate::ast::{ExpressionAst, PropertyPathAst, SelectQueryAst};
use rdf_compose_model::{RdfTerm, Triple, TripleRef, TripleTerm, Variable};

/// A triple pattern `subject predicate object`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplePatternAst {
    pub subject: RdfTerm,
    pub predicate: RdfTerm,
    pub object: RdfTerm,
}

impl TriplePatternAst {
    pub fn new(
        subject: impl Into<RdfTerm>,
        predicate: impl Into<RdfTerm>,
        object: impl Into<RdfTerm>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl From<Triple> for TriplePatternAst {
    fn from(value: Triple) -> Self {
        Self::new(value.subject, value.predicate, value.object)
    }
}

impl From<TripleRef<'_>> for TriplePatternAst {
    fn from(value: TripleRef<'_>) -> Self {
        value.into_owned().into()
    }
}

impl From<TripleTerm> for TriplePatternAst {
    fn from(value: TripleTerm) -> Self {
        Self {
            subject: value.subject,
            predicate: value.predicate,
            object: value.object,
        }
    }
}

/// A graph pattern.
///
/// `Union` and `Minus` are binary: they hold the pattern they were applied to and the new block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphPatternAst {
    Triple(TriplePatternAst),
    /// `{ p1 . p2 ... }` with the sub-patterns in order.
    Group(Vec<GraphPatternAst>),
    Optional(Box<GraphPatternAst>),
    Union(Box<GraphPatternAst>, Box<GraphPatternAst>),
    Minus(Box<GraphPatternAst>, Box<GraphPatternAst>),
    Graph {
        name: RdfTerm,
        pattern: Box<GraphPatternAst>,
    },
    Service {
        endpoint: RdfTerm,
        silent: bool,
        pattern: Box<GraphPatternAst>,
    },
    /// Inline data. `None` cells are `UNDEF`.
    Values {
        variables: Vec<Variable>,
        rows: Vec<Vec<Option<RdfTerm>>>,
    },
    Path {
        subject: RdfTerm,
        path: PropertyPathAst,
        object: RdfTerm,
    },
    Bind {
        expression: ExpressionAst,
        variable: Variable,
    },
    Filter(ExpressionAst),
    SubSelect(Box<SelectQueryAst>),
    /// `<< s p o >> predicate object`
    QuotedTriple {
        triple: TripleTerm,
        predicate: RdfTerm,
        object: RdfTerm,
    },
}

impl GraphPatternAst {
    /// The empty group `{ }`.
    pub fn empty() -> Self {
        Self::Group(Vec::new())
    }

    pub fn union(left: GraphPatternAst, right: GraphPatternAst) -> Self {
        Self::Union(Box::new(left), Box::new(right))
    }

    pub fn minus(left: GraphPatternAst, right: GraphPatternAst) -> Self {
        Self::Minus(Box::new(left), Box::new(right))
    }

    pub fn optional(pattern: GraphPatternAst) -> Self {
        Self::Optional(Box::new(pattern))
    }

    pub fn graph(name: impl Into<RdfTerm>, pattern: GraphPatternAst) -> Self {
        Self::Graph {
            name: name.into(),
            pattern: Box::new(pattern),
        }
    }
}

impl From<TriplePatternAst> for GraphPatternAst {
    fn from(value: TriplePatternAst) -> Self {
        Self::Triple(value)
    }
}

impl From<SelectQueryAst> for GraphPatternAst {
    fn from(value: SelectQueryAst) -> Self {
        Self::SubSelect(Box::new(value))
    }
}
