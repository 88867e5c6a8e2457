use crate::ast::{ExpressionAst, GraphPatternAst, TriplePatternAst};
use crate::query::{Query, QueryKind};
use rdf_compose_model::{NamedNode, RdfTerm, Variable};

/// A complete SPARQL query: the prologue and exactly one query form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SparqlQueryAst {
    pub prologue: Prologue,
    pub form: QueryFormAst,
}

impl SparqlQueryAst {
    pub fn new(prologue: Prologue, form: impl Into<QueryFormAst>) -> Self {
        Self {
            prologue,
            form: form.into(),
        }
    }

    pub fn kind(&self) -> QueryKind {
        match &self.form {
            QueryFormAst::Select(_) => QueryKind::Select,
            QueryFormAst::Ask(_) => QueryKind::Ask,
            QueryFormAst::Construct(_) => QueryKind::Construct,
            QueryFormAst::Describe(_) => QueryKind::Describe,
        }
    }

    /// Renders the query into an executable value object.
    pub fn render(&self) -> Query {
        Query::from(self)
    }

    /// Returns the dataset clause of the query form.
    pub fn dataset(&self) -> &DatasetClauseAst {
        match &self.form {
            QueryFormAst::Select(select) => &select.dataset,
            QueryFormAst::Ask(ask) => &ask.dataset,
            QueryFormAst::Construct(construct) => &construct.dataset,
            QueryFormAst::Describe(describe) => &describe.dataset,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryFormAst {
    Select(SelectQueryAst),
    Ask(AskQueryAst),
    Construct(ConstructQueryAst),
    Describe(DescribeQueryAst),
}

impl From<SelectQueryAst> for QueryFormAst {
    fn from(value: SelectQueryAst) -> Self {
        Self::Select(value)
    }
}

impl From<AskQueryAst> for QueryFormAst {
    fn from(value: AskQueryAst) -> Self {
        Self::Ask(value)
    }
}

impl From<ConstructQueryAst> for QueryFormAst {
    fn from(value: ConstructQueryAst) -> Self {
        Self::Construct(value)
    }
}

impl From<DescribeQueryAst> for QueryFormAst {
    fn from(value: DescribeQueryAst) -> Self {
        Self::Describe(value)
    }
}

/// The declarations preceding a query or an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Prologue {
    /// The SPARQL 1.2 `VERSION` declaration.
    pub version: Option<String>,
    pub base: Option<NamedNode>,
    /// Prefixes in declaration order.
    pub prefixes: Vec<PrefixDecl>,
}

impl Prologue {
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.base.is_none() && self.prefixes.is_empty()
    }
}

/// `PREFIX prefix: <namespace>`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrefixDecl {
    pub prefix: String,
    pub namespace: NamedNode,
}

impl PrefixDecl {
    pub fn new(prefix: impl Into<String>, namespace: NamedNode) -> Self {
        Self {
            prefix: prefix.into(),
            namespace,
        }
    }
}

/// `FROM` and `FROM NAMED` clauses, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DatasetClauseAst {
    pub default_graphs: Vec<NamedNode>,
    pub named_graphs: Vec<NamedNode>,
}

impl DatasetClauseAst {
    pub fn is_empty(&self) -> bool {
        self.default_graphs.is_empty() && self.named_graphs.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectModifier {
    Distinct,
    Reduced,
}

/// A single projected item of a `SELECT`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectItemAst {
    Variable(Variable),
    /// `(expression AS ?alias)`
    Expression {
        expression: ExpressionAst,
        alias: Variable,
    },
}

impl From<Variable> for SelectItemAst {
    fn from(value: Variable) -> Self {
        Self::Variable(value)
    }
}

/// A `SELECT` query, also used for sub-selects.
///
/// An empty `items` list means `SELECT *`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectQueryAst {
    pub modifier: Option<SelectModifier>,
    pub items: Vec<SelectItemAst>,
    pub dataset: DatasetClauseAst,
    pub pattern: GraphPatternAst,
    pub solution_modifiers: SolutionModifiersAst,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SolutionModifiersAst {
    pub group_by: Vec<GroupConditionAst>,
    pub having: Vec<ExpressionAst>,
    pub order_by: Vec<OrderConditionAst>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SolutionModifiersAst {
    pub fn is_empty(&self) -> bool {
        self.group_by.is_empty()
            && self.having.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}

/// `GROUP BY expression` or `GROUP BY (expression AS ?alias)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupConditionAst {
    pub expression: ExpressionAst,
    pub alias: Option<Variable>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderConditionAst {
    Asc(ExpressionAst),
    Desc(ExpressionAst),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AskQueryAst {
    pub dataset: DatasetClauseAst,
    pub pattern: GraphPatternAst,
    pub solution_modifiers: SolutionModifiersAst,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstructQueryAst {
    pub template: Vec<TriplePatternAst>,
    pub dataset: DatasetClauseAst,
    pub pattern: GraphPatternAst,
    pub solution_modifiers: SolutionModifiersAst,
}

/// A `DESCRIBE` query. An empty `targets` list means `DESCRIBE *`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DescribeQueryAst {
    pub targets: Vec<RdfTerm>,
    pub dataset: DatasetClauseAst,
    pub pattern: Option<GraphPatternAst>,
    pub solution_modifiers: SolutionModifiersAst,
}
