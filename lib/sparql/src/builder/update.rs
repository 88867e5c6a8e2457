use crate::ast::{
    DatasetClauseAst, GraphOrDefaultAst, GraphPatternAst, GraphTargetAst, PrefixDecl, Prologue,
    QuadPatternAst, UpdateOperationAst, UpdateRequestAst,
};
use crate::builder::GroupBuilder;
use rdf_compose_model::NamedNode;

/// Builds an update request from a sequence of operations.
#[derive(Clone, Debug, Default)]
pub struct UpdateBuilder {
    prologue: Prologue,
    operations: Vec<UpdateOperationAst>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

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

    #[must_use]
    pub fn operation(mut self, operation: UpdateOperationAst) -> Self {
        self.operations.push(operation);
        self
    }

    #[must_use]
    pub fn insert_data(self, quads: impl IntoIterator<Item = impl Into<QuadPatternAst>>) -> Self {
        self.operation(UpdateOperationAst::InsertData(
            quads.into_iter().map(Into::into).collect(),
        ))
    }

    #[must_use]
    pub fn delete_data(self, quads: impl IntoIterator<Item = impl Into<QuadPatternAst>>) -> Self {
        self.operation(UpdateOperationAst::DeleteData(
            quads.into_iter().map(Into::into).collect(),
        ))
    }

    #[must_use]
    pub fn delete_where(self, quads: impl IntoIterator<Item = impl Into<QuadPatternAst>>) -> Self {
        self.operation(UpdateOperationAst::DeleteWhere(
            quads.into_iter().map(Into::into).collect(),
        ))
    }

    /// Adds `DELETE { delete } INSERT { insert } WHERE { block }`.
    #[must_use]
    pub fn modify(
        self,
        delete: impl IntoIterator<Item = QuadPatternAst>,
        insert: impl IntoIterator<Item = QuadPatternAst>,
        block: impl FnOnce(GroupBuilder) -> GroupBuilder,
    ) -> Self {
        self.modify_with(
            None,
            delete,
            insert,
            DatasetClauseAst::default(),
            block(GroupBuilder::new()).build(),
        )
    }

    /// Adds a modify operation with `WITH` and `USING` clauses.
    #[must_use]
    pub fn modify_with(
        self,
        with: Option<NamedNode>,
        delete: impl IntoIterator<Item = QuadPatternAst>,
        insert: impl IntoIterator<Item = QuadPatternAst>,
        using: DatasetClauseAst,
        pattern: GraphPatternAst,
    ) -> Self {
        self.operation(UpdateOperationAst::Modify {
            with,
            delete: delete.into_iter().collect(),
            insert: insert.into_iter().collect(),
            using,
            pattern,
        })
    }

    #[must_use]
    pub fn load(self, silent: bool, source: NamedNode, destination: Option<NamedNode>) -> Self {
        self.operation(UpdateOperationAst::Load {
            silent,
            source,
            destination,
        })
    }

    #[must_use]
    pub fn clear(self, silent: bool, target: GraphTargetAst) -> Self {
        self.operation(UpdateOperationAst::Clear { silent, target })
    }

    #[must_use]
    pub fn create(self, silent: bool, graph: NamedNode) -> Self {
        self.operation(UpdateOperationAst::Create { silent, graph })
    }

    #[must_use]
    pub fn drop(self, silent: bool, target: GraphTargetAst) -> Self {
        self.operation(UpdateOperationAst::Drop { silent, target })
    }

    #[must_use]
    pub fn copy(self, silent: bool, from: GraphOrDefaultAst, to: GraphOrDefaultAst) -> Self {
        self.operation(UpdateOperationAst::Copy { silent, from, to })
    }

    #[must_use]
    pub fn move_graph(self, silent: bool, from: GraphOrDefaultAst, to: GraphOrDefaultAst) -> Self {
        self.operation(UpdateOperationAst::Move { silent, from, to })
    }

    #[must_use]
    pub fn add(self, silent: bool, from: GraphOrDefaultAst, to: GraphOrDefaultAst) -> Self {
        self.operation(UpdateOperationAst::Add { silent, from, to })
    }

    pub fn build(self) -> UpdateRequestAst {
        UpdateRequestAst {
            prologue: self.prologue,
            operations: self.operations,
        }
    }
}
