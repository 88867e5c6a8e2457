use crate::ast::{DatasetClauseAst, GraphPatternAst, Prologue, TriplePatternAst};
use crate::query::UpdateQuery;
use rdf_compose_model::{NamedNode, RdfTerm};

/// A SPARQL update request: a prologue followed by operations separated by `;`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateRequestAst {
    pub prologue: Prologue,
    pub operations: Vec<UpdateOperationAst>,
}

impl UpdateRequestAst {
    pub fn render(&self) -> UpdateQuery {
        UpdateQuery::from(self)
    }
}

/// A triple pattern, optionally located in a named graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuadPatternAst {
    pub graph: Option<RdfTerm>,
    pub triple: TriplePatternAst,
}

impl QuadPatternAst {
    pub fn in_default_graph(triple: TriplePatternAst) -> Self {
        Self {
            graph: None,
            triple,
        }
    }

    pub fn in_graph(graph: impl Into<RdfTerm>, triple: TriplePatternAst) -> Self {
        Self {
            graph: Some(graph.into()),
            triple,
        }
    }
}

impl From<TriplePatternAst> for QuadPatternAst {
    fn from(value: TriplePatternAst) -> Self {
        Self::in_default_graph(value)
    }
}

/// The target of `CLEAR` and `DROP`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphTargetAst {
    Default,
    Named,
    All,
    Graph(NamedNode),
}

/// The source or destination of `COPY`, `MOVE` and `ADD`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphOrDefaultAst {
    Default,
    Graph(NamedNode),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UpdateOperationAst {
    InsertData(Vec<QuadPatternAst>),
    DeleteData(Vec<QuadPatternAst>),
    DeleteWhere(Vec<QuadPatternAst>),
    /// `WITH ... DELETE { } INSERT { } USING ... WHERE { }`
    Modify {
        with: Option<NamedNode>,
        delete: Vec<QuadPatternAst>,
        insert: Vec<QuadPatternAst>,
        using: DatasetClauseAst,
        pattern: GraphPatternAst,
    },
    Load {
        silent: bool,
        source: NamedNode,
        destination: Option<NamedNode>,
    },
    Clear {
        silent: bool,
        target: GraphTargetAst,
    },
    Create {
        silent: bool,
        graph: NamedNode,
    },
    Drop {
        silent: bool,
        target: GraphTargetAst,
    },
    Copy {
        silent: bool,
        from: GraphOrDefaultAst,
        to: GraphOrDefaultAst,
    },
    Move {
        silent: bool,
        from: GraphOrDefaultAst,
        to: GraphOrDefaultAst,
    },
    Add {
        silent: bool,
        from: GraphOrDefaultAst,
        to: GraphOrDefaultAst,
    },
}
