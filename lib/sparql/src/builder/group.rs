use crate::ast::{
    ExpressionAst, GraphPatternAst, PropertyPathAst, SelectQueryAst, TriplePatternAst,
};
use rdf_compose_model::{RdfTerm, TripleTerm, Variable};

/// Collects the patterns of a group graph pattern `{ ... }`.
///
/// Nested blocks are built by closures receiving a fresh builder:
///
/// ```
/// # use rdf_compose_model::{NamedNode, Variable};
/// # use rdf_compose_sparql::builder::GroupBuilder;
/// let s = Variable::new_unchecked("s");
/// let name = NamedNode::new_unchecked("http://xmlns.com/foaf/0.1/name");
/// let nick = NamedNode::new_unchecked("http://xmlns.com/foaf/0.1/nick");
/// let pattern = GroupBuilder::new()
///     .triple(s.clone(), name, Variable::new_unchecked("n"))
///     .union(|block| block.triple(s, nick, Variable::new_unchecked("n")))
///     .build();
/// ```
///
/// `union` and `minus` are positional: they combine the *immediately preceding* sibling with the
/// new block. Without a preceding sibling the block is added on its own.
#[derive(Clone, Debug, Default)]
pub struct GroupBuilder {
    patterns: Vec<GraphPatternAst>,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<GraphPatternAst>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    #[must_use]
    pub fn triple(
        self,
        subject: impl Into<RdfTerm>,
        predicate: impl Into<RdfTerm>,
        object: impl Into<RdfTerm>,
    ) -> Self {
        self.pattern(TriplePatternAst::new(subject, predicate, object))
    }

    #[must_use]
    pub fn path(
        self,
        subject: impl Into<RdfTerm>,
        path: impl Into<PropertyPathAst>,
        object: impl Into<RdfTerm>,
    ) -> Self {
        self.pattern(GraphPatternAst::Path {
            subject: subject.into(),
            path: path.into(),
            object: object.into(),
        })
    }

    /// Adds `<< s p o >> predicate object`.
    #[must_use]
    pub fn quoted_triple(
        self,
        triple: TripleTerm,
        predicate: impl Into<RdfTerm>,
        object: impl Into<RdfTerm>,
    ) -> Self {
        self.pattern(GraphPatternAst::QuotedTriple {
            triple,
            predicate: predicate.into(),
            object: object.into(),
        })
    }

    #[must_use]
    pub fn optional(self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        let inner = block(GroupBuilder::new()).into_block();
        self.pattern(GraphPatternAst::optional(inner))
    }

    /// Combines the preceding sibling and `block` into `{ previous } UNION { block }`.
    #[must_use]
    pub fn union(self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.combine_with_previous(block, GraphPatternAst::union)
    }

    /// Combines the preceding sibling and `block` into `previous MINUS { block }`.
    #[must_use]
    pub fn minus(self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.combine_with_previous(block, GraphPatternAst::minus)
    }

    #[must_use]
    pub fn graph(
        self,
        name: impl Into<RdfTerm>,
        block: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        let inner = block(GroupBuilder::new()).into_block();
        self.pattern(GraphPatternAst::graph(name, inner))
    }

    #[must_use]
    pub fn service(
        self,
        endpoint: impl Into<RdfTerm>,
        silent: bool,
        block: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        let inner = block(GroupBuilder::new()).into_block();
        self.pattern(GraphPatternAst::Service {
            endpoint: endpoint.into(),
            silent,
            pattern: Box::new(inner),
        })
    }

    /// Adds `VALUES (variables) { rows }`. `None` cells are written as `UNDEF`.
    #[must_use]
    pub fn values(
        self,
        variables: impl IntoIterator<Item = Variable>,
        rows: impl IntoIterator<Item = Vec<Option<RdfTerm>>>,
    ) -> Self {
        self.pattern(GraphPatternAst::Values {
            variables: variables.into_iter().collect(),
            rows: rows.into_iter().collect(),
        })
    }

    #[must_use]
    pub fn bind(self, expression: ExpressionAst, variable: Variable) -> Self {
        self.pattern(GraphPatternAst::Bind {
            expression,
            variable,
        })
    }

    #[must_use]
    pub fn filter(self, expression: ExpressionAst) -> Self {
        self.pattern(GraphPatternAst::Filter(expression))
    }

    #[must_use]
    pub fn sub_select(self, select: SelectQueryAst) -> Self {
        self.pattern(select)
    }

    /// Adds a nested group `{ ... }`. The group is kept even if it holds a single pattern.
    #[must_use]
    pub fn group(self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        let inner = block(GroupBuilder::new()).patterns;
        self.pattern(GraphPatternAst::Group(inner))
    }

    /// Returns the group with all patterns in insertion order.
    pub fn build(self) -> GraphPatternAst {
        GraphPatternAst::Group(self.patterns)
    }

    /// Returns the pattern used for a nested block. A block with exactly one pattern is unwrapped.
    fn into_block(mut self) -> GraphPatternAst {
        if self.patterns.len() == 1 {
            if let Some(pattern) = self.patterns.pop() {
                return pattern;
            }
        }
        GraphPatternAst::Group(self.patterns)
    }

    fn combine_with_previous(
        mut self,
        block: impl FnOnce(GroupBuilder) -> GroupBuilder,
        combine: fn(GraphPatternAst, GraphPatternAst) -> GraphPatternAst,
    ) -> Self {
        let right = block(GroupBuilder::new()).into_block();
        let combined = match self.patterns.pop() {
            Some(previous) => combine(previous, right),
            None => right,
        };
        self.patterns.push(combined);
        self
    }
}
