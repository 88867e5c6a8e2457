use crate::ast::{
    AskQueryAst, ConstructQueryAst, DatasetClauseAst, DescribeQueryAst, ExpressionAst,
    GraphPatternAst, GroupConditionAst, OrderConditionAst, PrefixDecl, Prologue, SelectItemAst,
    SelectModifier, SelectQueryAst, SolutionModifiersAst, SparqlQueryAst, TriplePatternAst,
};
use crate::builder::GroupBuilder;
use rdf_compose_model::{NamedNode, RdfTerm, Variable};

/// Adds the prologue setters shared by all query builders.
macro_rules! prologue_methods {
    () => {
        /// Declares `PREFIX prefix: <namespace>`.
        #[must_use]
        pub fn prefix(mut self, prefix: impl Into<String>, namespace: NamedNode) -> Self {
            self.prologue.prefixes.push(PrefixDecl::new(prefix, namespace));
            self
        }

        #[must_use]
        pub fn base(mut self, base: NamedNode) -> Self {
            self.prologue.base = Some(base);
            self
        }

        /// Declares the SPARQL 1.2 `VERSION`.
        #[must_use]
        pub fn version(mut self, version: impl Into<String>) -> Self {
            self.prologue.version = Some(version.into());
            self
        }
    };
}

/// Adds the `FROM`/`FROM NAMED` setters shared by all query builders.
macro_rules! dataset_methods {
    () => {
        #[must_use]
        pub fn from(mut self, graph: NamedNode) -> Self {
            self.dataset.default_graphs.push(graph);
            self
        }

        #[must_use]
        pub fn from_named(mut self, graph: NamedNode) -> Self {
            self.dataset.named_graphs.push(graph);
            self
        }
    };
}

/// Adds the solution modifier setters shared by all query forms.
macro_rules! modifier_methods {
    () => {
        #[must_use]
        pub fn group_by(mut self, expression: impl Into<ExpressionAst>) -> Self {
            self.modifiers.group_by.push(GroupConditionAst {
                expression: expression.into(),
                alias: None,
            });
            self
        }

        #[must_use]
        pub fn group_by_as(mut self, expression: ExpressionAst, alias: Variable) -> Self {
            self.modifiers.group_by.push(GroupConditionAst {
                expression,
                alias: Some(alias),
            });
            self
        }

        #[must_use]
        pub fn having(mut self, condition: ExpressionAst) -> Self {
            self.modifiers.having.push(condition);
            self
        }

        #[must_use]
        pub fn order_by(mut self, expression: impl Into<ExpressionAst>) -> Self {
            self.modifiers
                .order_by
                .push(OrderConditionAst::Asc(expression.into()));
            self
        }

        #[must_use]
        pub fn order_by_desc(mut self, expression: impl Into<ExpressionAst>) -> Self {
            self.modifiers
                .order_by
                .push(OrderConditionAst::Desc(expression.into()));
            self
        }

        #[must_use]
        pub fn limit(mut self, limit: u64) -> Self {
            self.modifiers.limit = Some(limit);
            self
        }

        #[must_use]
        pub fn offset(mut self, offset: u64) -> Self {
            self.modifiers.offset = Some(offset);
            self
        }
    };
}

/// Builds a `SELECT` query. Without projected items the query selects `*`.
#[derive(Clone, Debug, Default)]
pub struct SelectBuilder {
    prologue: Prologue,
    modifier: Option<SelectModifier>,
    items: Vec<SelectItemAst>,
    dataset: DatasetClauseAst,
    pattern: Option<GraphPatternAst>,
    modifiers: SolutionModifiersAst,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    prologue_methods!();
    dataset_methods!();
    modifier_methods!();

    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.modifier = Some(SelectModifier::Distinct);
        self
    }

    #[must_use]
    pub fn reduced(mut self) -> Self {
        self.modifier = Some(SelectModifier::Reduced);
        self
    }

    #[must_use]
    pub fn variable(mut self, variable: Variable) -> Self {
        self.items.push(SelectItemAst::Variable(variable));
        self
    }

    #[must_use]
    pub fn variables(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.items
            .extend(variables.into_iter().map(SelectItemAst::Variable));
        self
    }

    /// Projects `(expression AS ?alias)`.
    #[must_use]
    pub fn expression(mut self, expression: ExpressionAst, alias: Variable) -> Self {
        self.items
            .push(SelectItemAst::Expression { expression, alias });
        self
    }

    /// Sets the `WHERE` clause.
    #[must_use]
    pub fn where_(mut self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.pattern = Some(block(GroupBuilder::new()).build());
        self
    }

    /// Sets an already built `WHERE` clause.
    #[must_use]
    pub fn pattern(mut self, pattern: GraphPatternAst) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Returns the query form without prologue, e.g. to use it as a sub-select.
    pub fn build(self) -> SelectQueryAst {
        SelectQueryAst {
            modifier: self.modifier,
            items: self.items,
            dataset: self.dataset,
            pattern: self.pattern.unwrap_or_else(GraphPatternAst::empty),
            solution_modifiers: self.modifiers,
        }
    }

    pub fn build_query(mut self) -> SparqlQueryAst {
        let prologue = std::mem::take(&mut self.prologue);
        SparqlQueryAst::new(prologue, self.build())
    }
}

/// Builds an `ASK` query.
#[derive(Clone, Debug, Default)]
pub struct AskBuilder {
    prologue: Prologue,
    dataset: DatasetClauseAst,
    pattern: Option<GraphPatternAst>,
    modifiers: SolutionModifiersAst,
}

impl AskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    prologue_methods!();
    dataset_methods!();
    modifier_methods!();

    #[must_use]
    pub fn where_(mut self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.pattern = Some(block(GroupBuilder::new()).build());
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: GraphPatternAst) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn build(self) -> AskQueryAst {
        AskQueryAst {
            dataset: self.dataset,
            pattern: self.pattern.unwrap_or_else(GraphPatternAst::empty),
            solution_modifiers: self.modifiers,
        }
    }

    pub fn build_query(mut self) -> SparqlQueryAst {
        let prologue = std::mem::take(&mut self.prologue);
        SparqlQueryAst::new(prologue, self.build())
    }
}

/// Builds a `CONSTRUCT` query.
#[derive(Clone, Debug, Default)]
pub struct ConstructBuilder {
    prologue: Prologue,
    template: Vec<TriplePatternAst>,
    dataset: DatasetClauseAst,
    pattern: Option<GraphPatternAst>,
    modifiers: SolutionModifiersAst,
}

impl ConstructBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    prologue_methods!();
    dataset_methods!();
    modifier_methods!();

    /// Adds a triple to the template.
    #[must_use]
    pub fn template(
        mut self,
        subject: impl Into<RdfTerm>,
        predicate: impl Into<RdfTerm>,
        object: impl Into<RdfTerm>,
    ) -> Self {
        self.template
            .push(TriplePatternAst::new(subject, predicate, object));
        self
    }

    #[must_use]
    pub fn where_(mut self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.pattern = Some(block(GroupBuilder::new()).build());
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: GraphPatternAst) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn build(self) -> ConstructQueryAst {
        ConstructQueryAst {
            template: self.template,
            dataset: self.dataset,
            pattern: self.pattern.unwrap_or_else(GraphPatternAst::empty),
            solution_modifiers: self.modifiers,
        }
    }

    pub fn build_query(mut self) -> SparqlQueryAst {
        let prologue = std::mem::take(&mut self.prologue);
        SparqlQueryAst::new(prologue, self.build())
    }
}

/// Builds a `DESCRIBE` query. Without targets the query describes `*`.
#[derive(Clone, Debug, Default)]
pub struct DescribeBuilder {
    prologue: Prologue,
    targets: Vec<RdfTerm>,
    dataset: DatasetClauseAst,
    pattern: Option<GraphPatternAst>,
    modifiers: SolutionModifiersAst,
}

impl DescribeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    prologue_methods!();
    dataset_methods!();
    modifier_methods!();

    #[must_use]
    pub fn target(mut self, target: impl Into<RdfTerm>) -> Self {
        self.targets.push(target.into());
        self
    }

    #[must_use]
    pub fn where_(mut self, block: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
        self.pattern = Some(block(GroupBuilder::new()).build());
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: GraphPatternAst) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn build(self) -> DescribeQueryAst {
        DescribeQueryAst {
            targets: self.targets,
            dataset: self.dataset,
            pattern: self.pattern,
            solution_modifiers: self.modifiers,
        }
    }

    pub fn build_query(mut self) -> SparqlQueryAst {
        let prologue = std::mem::take(&mut self.prologue);
        SparqlQueryAst::new(prologue, self.build())
    }
}
