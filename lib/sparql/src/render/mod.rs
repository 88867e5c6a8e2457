//! Turns the [AST](crate::ast) into SPARQL text.
//!
//! Rendering is a pure function: the same AST always yields the same text. The layout puts every
//! declaration, dataset clause and solution modifier on its own line and indents group bodies by
//! two spaces. Dataset clauses are placed between the query-form header and `WHERE`, which is the
//! only position the SPARQL grammar accepts.

mod escape;

use crate::ast::{
    AggregateFunction, AskQueryAst, ConstructQueryAst, DatasetClauseAst, DescribeQueryAst,
    ExpressionAst, Function, GraphOrDefaultAst, GraphPatternAst, GraphTargetAst, GroupConditionAst,
    NegatedPredicate, OrderConditionAst, PrefixDecl, Prologue, PropertyPathAst, QuadPatternAst,
    QueryFormAst, SelectItemAst, SelectModifier, SelectQueryAst, SolutionModifiersAst,
    SparqlQueryAst, TriplePatternAst, UpdateOperationAst, UpdateRequestAst,
};
use escape::{is_simple_local_name, write_quoted};
use rdf_compose_model::vocab::xsd;
use rdf_compose_model::{Literal, NamedNodeRef, RdfTerm, TripleTerm, Variable};
use std::fmt::{self, Display, Formatter};

const INDENT: &str = "  ";

/// Renders a query into SPARQL text.
pub fn render_query(query: &SparqlQueryAst) -> String {
    query.to_string()
}

/// Renders an update request into SPARQL text.
pub fn render_update(update: &UpdateRequestAst) -> String {
    update.to_string()
}

impl Display for SparqlQueryAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut writer = SparqlWriter::new(f, &self.prologue.prefixes);
        writer.write_prologue(&self.prologue)?;
        writer.write_query_form(&self.form)
    }
}

impl Display for UpdateRequestAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut writer = SparqlWriter::new(f, &self.prologue.prefixes);
        writer.write_prologue(&self.prologue)?;
        for (i, operation) in self.operations.iter().enumerate() {
            if i > 0 {
                writer.f.write_str(" ;\n")?;
            }
            writer.write_update_operation(operation)?;
        }
        Ok(())
    }
}

/// Writes SPARQL syntax into a [Formatter], tracking the current indentation.
struct SparqlWriter<'a, 'f> {
    f: &'a mut Formatter<'f>,
    prefixes: &'a [PrefixDecl],
    indent: usize,
}

impl<'a, 'f> SparqlWriter<'a, 'f> {
    fn new(f: &'a mut Formatter<'f>, prefixes: &'a [PrefixDecl]) -> Self {
        Self {
            f,
            prefixes,
            indent: 0,
        }
    }

    fn newline(&mut self) -> fmt::Result {
        self.f.write_str("\n")?;
        for _ in 0..self.indent {
            self.f.write_str(INDENT)?;
        }
        Ok(())
    }

    //
    // Prologue & query forms
    //

    fn write_prologue(&mut self, prologue: &Prologue) -> fmt::Result {
        if let Some(version) = &prologue.version {
            self.f.write_str("VERSION ")?;
            write_quoted(self.f, version)?;
            self.f.write_str("\n")?;
        }
        if let Some(base) = &prologue.base {
            writeln!(self.f, "BASE {base}")?;
        }
        for prefix in &prologue.prefixes {
            writeln!(self.f, "PREFIX {}: {}", prefix.prefix, prefix.namespace)?;
        }
        Ok(())
    }

    fn write_query_form(&mut self, form: &QueryFormAst) -> fmt::Result {
        match form {
            QueryFormAst::Select(select) => self.write_select(select),
            QueryFormAst::Ask(ask) => self.write_ask(ask),
            QueryFormAst::Construct(construct) => self.write_construct(construct),
            QueryFormAst::Describe(describe) => self.write_describe(describe),
        }
    }

    fn write_select(&mut self, select: &SelectQueryAst) -> fmt::Result {
        self.f.write_str("SELECT")?;
        match select.modifier {
            Some(SelectModifier::Distinct) => self.f.write_str(" DISTINCT")?,
            Some(SelectModifier::Reduced) => self.f.write_str(" REDUCED")?,
            None => {}
        }
        if select.items.is_empty() {
            self.f.write_str(" *")?;
        }
        for item in &select.items {
            self.f.write_str(" ")?;
            match item {
                SelectItemAst::Variable(variable) => write!(self.f, "{variable}")?,
                SelectItemAst::Expression { expression, alias } => {
                    self.f.write_str("(")?;
                    self.write_expression(expression)?;
                    write!(self.f, " AS {alias})")?;
                }
            }
        }
        self.write_dataset(&select.dataset)?;
        self.newline()?;
        self.f.write_str("WHERE ")?;
        self.write_block(&select.pattern)?;
        self.write_solution_modifiers(&select.solution_modifiers)
    }

    fn write_ask(&mut self, ask: &AskQueryAst) -> fmt::Result {
        self.f.write_str("ASK")?;
        self.write_dataset(&ask.dataset)?;
        self.newline()?;
        self.f.write_str("WHERE ")?;
        self.write_block(&ask.pattern)?;
        self.write_solution_modifiers(&ask.solution_modifiers)
    }

    fn write_construct(&mut self, construct: &ConstructQueryAst) -> fmt::Result {
        self.f.write_str("CONSTRUCT ")?;
        self.write_triples_block(&construct.template)?;
        self.write_dataset(&construct.dataset)?;
        self.newline()?;
        self.f.write_str("WHERE ")?;
        self.write_block(&construct.pattern)?;
        self.write_solution_modifiers(&construct.solution_modifiers)
    }

    fn write_describe(&mut self, describe: &DescribeQueryAst) -> fmt::Result {
        self.f.write_str("DESCRIBE")?;
        if describe.targets.is_empty() {
            self.f.write_str(" *")?;
        }
        for target in &describe.targets {
            self.f.write_str(" ")?;
            self.write_term(target)?;
        }
        self.write_dataset(&describe.dataset)?;
        if let Some(pattern) = &describe.pattern {
            self.newline()?;
            self.f.write_str("WHERE ")?;
            self.write_block(pattern)?;
        }
        self.write_solution_modifiers(&describe.solution_modifiers)
    }

    fn write_dataset(&mut self, dataset: &DatasetClauseAst) -> fmt::Result {
        for graph in &dataset.default_graphs {
            self.newline()?;
            self.f.write_str("FROM ")?;
            self.write_iri(graph.as_ref())?;
        }
        for graph in &dataset.named_graphs {
            self.newline()?;
            self.f.write_str("FROM NAMED ")?;
            self.write_iri(graph.as_ref())?;
        }
        Ok(())
    }

    fn write_solution_modifiers(&mut self, modifiers: &SolutionModifiersAst) -> fmt::Result {
        if !modifiers.group_by.is_empty() {
            self.newline()?;
            self.f.write_str("GROUP BY")?;
            for condition in &modifiers.group_by {
                self.f.write_str(" ")?;
                self.write_group_condition(condition)?;
            }
        }
        if !modifiers.having.is_empty() {
            self.newline()?;
            self.f.write_str("HAVING")?;
            for condition in &modifiers.having {
                self.write_constraint(condition)?;
            }
        }
        if !modifiers.order_by.is_empty() {
            self.newline()?;
            self.f.write_str("ORDER BY")?;
            for condition in &modifiers.order_by {
                let (keyword, expression) = match condition {
                    OrderConditionAst::Asc(expression) => ("ASC", expression),
                    OrderConditionAst::Desc(expression) => ("DESC", expression),
                };
                write!(self.f, " {keyword}(")?;
                self.write_expression(expression)?;
                self.f.write_str(")")?;
            }
        }
        if let Some(limit) = modifiers.limit {
            self.newline()?;
            write!(self.f, "LIMIT {limit}")?;
        }
        if let Some(offset) = modifiers.offset {
            self.newline()?;
            write!(self.f, "OFFSET {offset}")?;
        }
        Ok(())
    }

    fn write_group_condition(&mut self, condition: &GroupConditionAst) -> fmt::Result {
        if let Some(alias) = &condition.alias {
            self.f.write_str("(")?;
            self.write_expression(&condition.expression)?;
            return write!(self.f, " AS {alias})");
        }
        match &condition.expression {
            ExpressionAst::Term(RdfTerm::Variable(variable)) => write!(self.f, "{variable}"),
            expression if is_self_bracketed(expression) => self.write_expression(expression),
            expression => {
                self.f.write_str("(")?;
                self.write_expression(expression)?;
                self.f.write_str(")")
            }
        }
    }

    //
    // Graph patterns
    //

    /// Writes `{ ... }`. A group is written with its children, any other pattern as the only
    /// child.
    fn write_block(&mut self, pattern: &GraphPatternAst) -> fmt::Result {
        match pattern {
            GraphPatternAst::Group(children) => self.write_group(children),
            other => self.write_group(std::slice::from_ref(other)),
        }
    }

    fn write_group(&mut self, children: &[GraphPatternAst]) -> fmt::Result {
        if children.is_empty() {
            return self.f.write_str("{ }");
        }
        self.f.write_str("{")?;
        self.indent += 1;
        for child in children {
            self.newline()?;
            self.write_element(child)?;
        }
        self.indent -= 1;
        self.newline()?;
        self.f.write_str("}")
    }

    /// Writes a pattern as an element of a group, starting at the current position.
    fn write_element(&mut self, pattern: &GraphPatternAst) -> fmt::Result {
        match pattern {
            GraphPatternAst::Triple(triple) => {
                self.write_triple(triple)?;
                self.f.write_str(" .")
            }
            GraphPatternAst::Group(children) => self.write_group(children),
            GraphPatternAst::Optional(inner) => {
                self.f.write_str("OPTIONAL ")?;
                self.write_block(inner)
            }
            GraphPatternAst::Union(left, right) => {
                self.write_union_operand(left)?;
                self.f.write_str(" UNION ")?;
                self.write_block(right)
            }
            GraphPatternAst::Minus(left, right) => {
                // The group keeps MINUS scoped to `left` only.
                self.f.write_str("{")?;
                self.indent += 1;
                match left.as_ref() {
                    GraphPatternAst::Group(children) => {
                        for child in children {
                            self.newline()?;
                            self.write_element(child)?;
                        }
                    }
                    other => {
                        self.newline()?;
                        self.write_element(other)?;
                    }
                }
                self.newline()?;
                self.f.write_str("MINUS ")?;
                self.write_block(right)?;
                self.indent -= 1;
                self.newline()?;
                self.f.write_str("}")
            }
            GraphPatternAst::Graph { name, pattern } => {
                self.f.write_str("GRAPH ")?;
                self.write_term(name)?;
                self.f.write_str(" ")?;
                self.write_block(pattern)
            }
            GraphPatternAst::Service {
                endpoint,
                silent,
                pattern,
            } => {
                self.f.write_str("SERVICE ")?;
                if *silent {
                    self.f.write_str("SILENT ")?;
                }
                self.write_term(endpoint)?;
                self.f.write_str(" ")?;
                self.write_block(pattern)
            }
            GraphPatternAst::Values { variables, rows } => self.write_values(variables, rows),
            GraphPatternAst::Path {
                subject,
                path,
                object,
            } => {
                self.write_term(subject)?;
                self.f.write_str(" ")?;
                self.write_path(path)?;
                self.f.write_str(" ")?;
                self.write_term(object)?;
                self.f.write_str(" .")
            }
            GraphPatternAst::Bind {
                expression,
                variable,
            } => {
                self.f.write_str("BIND(")?;
                self.write_expression(expression)?;
                write!(self.f, " AS {variable})")
            }
            GraphPatternAst::Filter(expression) => {
                self.f.write_str("FILTER")?;
                self.write_constraint(expression)
            }
            GraphPatternAst::SubSelect(select) => {
                self.f.write_str("{")?;
                self.indent += 1;
                self.newline()?;
                self.write_select(select)?;
                self.indent -= 1;
                self.newline()?;
                self.f.write_str("}")
            }
            GraphPatternAst::QuotedTriple {
                triple,
                predicate,
                object,
            } => {
                self.write_triple_term(triple)?;
                self.f.write_str(" ")?;
                self.write_term(predicate)?;
                self.f.write_str(" ")?;
                self.write_term(object)?;
                self.f.write_str(" .")
            }
        }
    }

    fn write_union_operand(&mut self, pattern: &GraphPatternAst) -> fmt::Result {
        match pattern {
            GraphPatternAst::Union(left, right) => {
                self.write_union_operand(left)?;
                self.f.write_str(" UNION ")?;
                self.write_block(right)
            }
            other => self.write_block(other),
        }
    }

    fn write_values(
        &mut self,
        variables: &[Variable],
        rows: &[Vec<Option<RdfTerm>>],
    ) -> fmt::Result {
        self.f.write_str("VALUES (")?;
        for (i, variable) in variables.iter().enumerate() {
            if i > 0 {
                self.f.write_str(" ")?;
            }
            write!(self.f, "{variable}")?;
        }
        self.f.write_str(") {")?;
        if rows.is_empty() {
            return self.f.write_str(" }");
        }
        self.indent += 1;
        for row in rows {
            self.newline()?;
            self.f.write_str("(")?;
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    self.f.write_str(" ")?;
                }
                match value {
                    Some(term) => self.write_term(term)?,
                    None => self.f.write_str("UNDEF")?,
                }
            }
            self.f.write_str(")")?;
        }
        self.indent -= 1;
        self.newline()?;
        self.f.write_str("}")
    }

    fn write_triple(&mut self, triple: &TriplePatternAst) -> fmt::Result {
        self.write_term(&triple.subject)?;
        self.f.write_str(" ")?;
        self.write_term(&triple.predicate)?;
        self.f.write_str(" ")?;
        self.write_term(&triple.object)
    }

    fn write_triples_block(&mut self, triples: &[TriplePatternAst]) -> fmt::Result {
        if triples.is_empty() {
            return self.f.write_str("{ }");
        }
        self.f.write_str("{")?;
        self.indent += 1;
        for triple in triples {
            self.newline()?;
            self.write_triple(triple)?;
            self.f.write_str(" .")?;
        }
        self.indent -= 1;
        self.newline()?;
        self.f.write_str("}")
    }

    //
    // Property paths
    //

    fn write_path(&mut self, path: &PropertyPathAst) -> fmt::Result {
        match path {
            PropertyPathAst::Predicate(predicate) => self.write_iri(predicate.as_ref()),
            PropertyPathAst::Inverse(inner) => {
                self.f.write_str("^")?;
                self.write_path_operand(inner)
            }
            PropertyPathAst::Sequence(left, right) => {
                self.write_path_operand(left)?;
                self.f.write_str("/")?;
                self.write_path_operand(right)
            }
            PropertyPathAst::Alternative(left, right) => {
                self.write_path_operand(left)?;
                self.f.write_str("|")?;
                self.write_path_operand(right)
            }
            PropertyPathAst::ZeroOrMore(inner) => {
                self.write_path_operand(inner)?;
                self.f.write_str("*")
            }
            PropertyPathAst::OneOrMore(inner) => {
                self.write_path_operand(inner)?;
                self.f.write_str("+")
            }
            PropertyPathAst::ZeroOrOne(inner) => {
                self.write_path_operand(inner)?;
                self.f.write_str("?")
            }
            PropertyPathAst::NegatedPropertySet(predicates) => {
                self.f.write_str("!")?;
                if let [NegatedPredicate::Forward(predicate)] = predicates.as_slice() {
                    return self.write_iri(predicate.as_ref());
                }
                self.f.write_str("(")?;
                for (i, predicate) in predicates.iter().enumerate() {
                    if i > 0 {
                        self.f.write_str("|")?;
                    }
                    match predicate {
                        NegatedPredicate::Forward(predicate) => {
                            self.write_iri(predicate.as_ref())?;
                        }
                        NegatedPredicate::Inverse(predicate) => {
                            self.f.write_str("^")?;
                            self.write_iri(predicate.as_ref())?;
                        }
                    }
                }
                self.f.write_str(")")
            }
        }
    }

    /// Compound operands are parenthesized so that mixes of `/` and `|` keep their structure.
    fn write_path_operand(&mut self, path: &PropertyPathAst) -> fmt::Result {
        if path.is_leaf() {
            self.write_path(path)
        } else {
            self.f.write_str("(")?;
            self.write_path(path)?;
            self.f.write_str(")")
        }
    }

    //
    // Expressions
    //

    /// Writes a `FILTER`/`HAVING` constraint, including the separating space.
    fn write_constraint(&mut self, expression: &ExpressionAst) -> fmt::Result {
        self.f.write_str(" ")?;
        if is_self_bracketed(expression) {
            self.write_expression(expression)
        } else {
            self.f.write_str("(")?;
            self.write_expression(expression)?;
            self.f.write_str(")")
        }
    }

    fn write_expression(&mut self, expression: &ExpressionAst) -> fmt::Result {
        match expression {
            ExpressionAst::Term(term) => self.write_term(term),
            ExpressionAst::Comparison {
                operator,
                left,
                right,
            } => self.write_binary(left, operator.as_str(), right),
            ExpressionAst::And(left, right) => self.write_binary(left, "&&", right),
            ExpressionAst::Or(left, right) => self.write_binary(left, "||", right),
            ExpressionAst::Arithmetic {
                operator,
                left,
                right,
            } => self.write_binary(left, operator.as_str(), right),
            ExpressionAst::Not(inner) => {
                self.f.write_str("!")?;
                self.write_primary(inner)
            }
            ExpressionAst::UnaryMinus(inner) => {
                self.f.write_str("-")?;
                self.write_primary(inner)
            }
            ExpressionAst::In {
                expression,
                list,
                negated,
            } => {
                self.f.write_str("(")?;
                self.write_expression(expression)?;
                self.f.write_str(if *negated { " NOT IN " } else { " IN " })?;
                self.write_arguments(list)?;
                self.f.write_str(")")
            }
            ExpressionAst::Function {
                function,
                arguments,
            } => {
                match (function, function.keyword()) {
                    (Function::Custom(iri), _) => self.write_iri(iri.as_ref())?,
                    (_, Some(keyword)) => self.f.write_str(keyword)?,
                    (_, None) => {}
                }
                self.write_arguments(arguments)
            }
            ExpressionAst::Aggregate {
                function,
                distinct,
                expression,
            } => {
                self.f.write_str(function.keyword())?;
                self.f.write_str("(")?;
                if *distinct {
                    self.f.write_str("DISTINCT ")?;
                }
                match expression {
                    Some(expression) => self.write_expression(expression)?,
                    None => self.f.write_str("*")?,
                }
                if let AggregateFunction::GroupConcat {
                    separator: Some(separator),
                } = function
                {
                    self.f.write_str("; SEPARATOR = ")?;
                    write_quoted(self.f, separator)?;
                }
                self.f.write_str(")")
            }
            ExpressionAst::If(condition, then, otherwise) => {
                self.f.write_str("IF(")?;
                self.write_expression(condition)?;
                self.f.write_str(", ")?;
                self.write_expression(then)?;
                self.f.write_str(", ")?;
                self.write_expression(otherwise)?;
                self.f.write_str(")")
            }
            ExpressionAst::Coalesce(arguments) => {
                self.f.write_str("COALESCE")?;
                self.write_arguments(arguments)
            }
            ExpressionAst::Bound(variable) => write!(self.f, "BOUND({variable})"),
            ExpressionAst::Exists(pattern) => {
                self.f.write_str("EXISTS ")?;
                self.write_block(pattern)
            }
            ExpressionAst::NotExists(pattern) => {
                self.f.write_str("NOT EXISTS ")?;
                self.write_block(pattern)
            }
        }
    }

    fn write_binary(
        &mut self,
        left: &ExpressionAst,
        operator: &str,
        right: &ExpressionAst,
    ) -> fmt::Result {
        self.f.write_str("(")?;
        self.write_expression(left)?;
        write!(self.f, " {operator} ")?;
        self.write_expression(right)?;
        self.f.write_str(")")
    }

    fn write_primary(&mut self, expression: &ExpressionAst) -> fmt::Result {
        if matches!(
            expression,
            ExpressionAst::Not(_) | ExpressionAst::UnaryMinus(_)
        ) {
            self.f.write_str("(")?;
            self.write_expression(expression)?;
            self.f.write_str(")")
        } else {
            self.write_expression(expression)
        }
    }

    fn write_arguments(&mut self, arguments: &[ExpressionAst]) -> fmt::Result {
        self.f.write_str("(")?;
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.f.write_str(", ")?;
            }
            self.write_expression(argument)?;
        }
        self.f.write_str(")")
    }

    //
    // Terms
    //

    fn write_term(&mut self, term: &RdfTerm) -> fmt::Result {
        match term {
            RdfTerm::NamedNode(node) => self.write_iri(node.as_ref()),
            RdfTerm::BlankNode(node) => write!(self.f, "{node}"),
            RdfTerm::Literal(literal) => self.write_literal(literal),
            RdfTerm::Variable(variable) => write!(self.f, "{variable}"),
            RdfTerm::Triple(triple) => self.write_triple_term(triple),
        }
    }

    fn write_triple_term(&mut self, triple: &TripleTerm) -> fmt::Result {
        self.f.write_str("<< ")?;
        self.write_term(&triple.subject)?;
        self.f.write_str(" ")?;
        self.write_term(&triple.predicate)?;
        self.f.write_str(" ")?;
        self.write_term(&triple.object)?;
        self.f.write_str(" >>")
    }

    fn write_literal(&mut self, literal: &Literal) -> fmt::Result {
        write_quoted(self.f, literal.value())?;
        if let Some(language) = literal.language() {
            write!(self.f, "@{language}")
        } else if literal.datatype() == xsd::STRING {
            Ok(())
        } else {
            self.f.write_str("^^")?;
            self.write_iri(literal.datatype())
        }
    }

    /// Writes an IRI, compacted with the longest matching declared prefix when possible.
    fn write_iri(&mut self, iri: NamedNodeRef<'_>) -> fmt::Result {
        let compacted = self
            .prefixes
            .iter()
            .filter_map(|decl| {
                iri.as_str()
                    .strip_prefix(decl.namespace.as_str())
                    .filter(|local| is_simple_local_name(local))
                    .map(|local| (decl, local))
            })
            .max_by_key(|(decl, _)| decl.namespace.as_str().len());
        match compacted {
            Some((decl, local)) => write!(self.f, "{}:{local}", decl.prefix),
            None => write!(self.f, "{iri}"),
        }
    }

    //
    // Updates
    //

    fn write_update_operation(&mut self, operation: &UpdateOperationAst) -> fmt::Result {
        match operation {
            UpdateOperationAst::InsertData(quads) => {
                self.f.write_str("INSERT DATA ")?;
                self.write_quads_block(quads)
            }
            UpdateOperationAst::DeleteData(quads) => {
                self.f.write_str("DELETE DATA ")?;
                self.write_quads_block(quads)
            }
            UpdateOperationAst::DeleteWhere(quads) => {
                self.f.write_str("DELETE WHERE ")?;
                self.write_quads_block(quads)
            }
            UpdateOperationAst::Modify {
                with,
                delete,
                insert,
                using,
                pattern,
            } => {
                if let Some(with) = with {
                    self.f.write_str("WITH ")?;
                    self.write_iri(with.as_ref())?;
                    self.newline()?;
                }
                if !delete.is_empty() {
                    self.f.write_str("DELETE ")?;
                    self.write_quads_block(delete)?;
                    self.newline()?;
                }
                if !insert.is_empty() || delete.is_empty() {
                    self.f.write_str("INSERT ")?;
                    self.write_quads_block(insert)?;
                    self.newline()?;
                }
                for graph in &using.default_graphs {
                    self.f.write_str("USING ")?;
                    self.write_iri(graph.as_ref())?;
                    self.newline()?;
                }
                for graph in &using.named_graphs {
                    self.f.write_str("USING NAMED ")?;
                    self.write_iri(graph.as_ref())?;
                    self.newline()?;
                }
                self.f.write_str("WHERE ")?;
                self.write_block(pattern)
            }
            UpdateOperationAst::Load {
                silent,
                source,
                destination,
            } => {
                self.write_keyword_silent("LOAD", *silent)?;
                self.write_iri(source.as_ref())?;
                if let Some(destination) = destination {
                    self.f.write_str(" INTO GRAPH ")?;
                    self.write_iri(destination.as_ref())?;
                }
                Ok(())
            }
            UpdateOperationAst::Clear { silent, target } => {
                self.write_keyword_silent("CLEAR", *silent)?;
                self.write_graph_target(target)
            }
            UpdateOperationAst::Create { silent, graph } => {
                self.write_keyword_silent("CREATE", *silent)?;
                self.f.write_str("GRAPH ")?;
                self.write_iri(graph.as_ref())
            }
            UpdateOperationAst::Drop { silent, target } => {
                self.write_keyword_silent("DROP", *silent)?;
                self.write_graph_target(target)
            }
            UpdateOperationAst::Copy { silent, from, to } => {
                self.write_graph_transfer("COPY", *silent, from, to)
            }
            UpdateOperationAst::Move { silent, from, to } => {
                self.write_graph_transfer("MOVE", *silent, from, to)
            }
            UpdateOperationAst::Add { silent, from, to } => {
                self.write_graph_transfer("ADD", *silent, from, to)
            }
        }
    }

    fn write_keyword_silent(&mut self, keyword: &str, silent: bool) -> fmt::Result {
        self.f.write_str(keyword)?;
        self.f.write_str(if silent { " SILENT " } else { " " })
    }

    fn write_graph_target(&mut self, target: &GraphTargetAst) -> fmt::Result {
        match target {
            GraphTargetAst::Default => self.f.write_str("DEFAULT"),
            GraphTargetAst::Named => self.f.write_str("NAMED"),
            GraphTargetAst::All => self.f.write_str("ALL"),
            GraphTargetAst::Graph(graph) => {
                self.f.write_str("GRAPH ")?;
                self.write_iri(graph.as_ref())
            }
        }
    }

    fn write_graph_transfer(
        &mut self,
        keyword: &str,
        silent: bool,
        from: &GraphOrDefaultAst,
        to: &GraphOrDefaultAst,
    ) -> fmt::Result {
        self.write_keyword_silent(keyword, silent)?;
        self.write_graph_or_default(from)?;
        self.f.write_str(" TO ")?;
        self.write_graph_or_default(to)
    }

    fn write_graph_or_default(&mut self, graph: &GraphOrDefaultAst) -> fmt::Result {
        match graph {
            GraphOrDefaultAst::Default => self.f.write_str("DEFAULT"),
            GraphOrDefaultAst::Graph(graph) => {
                self.f.write_str("GRAPH ")?;
                self.write_iri(graph.as_ref())
            }
        }
    }

    /// Writes quads, grouping consecutive quads of the same graph into one `GRAPH` block.
    fn write_quads_block(&mut self, quads: &[QuadPatternAst]) -> fmt::Result {
        if quads.is_empty() {
            return self.f.write_str("{ }");
        }
        self.f.write_str("{")?;
        self.indent += 1;
        let mut i = 0;
        while i < quads.len() {
            let graph = &quads[i].graph;
            let end = quads[i..]
                .iter()
                .position(|quad| &quad.graph != graph)
                .map_or(quads.len(), |offset| i + offset);
            let triples = quads[i..end].iter().map(|quad| &quad.triple);
            match graph {
                None => {
                    for triple in triples {
                        self.newline()?;
                        self.write_triple(triple)?;
                        self.f.write_str(" .")?;
                    }
                }
                Some(graph) => {
                    self.newline()?;
                    self.f.write_str("GRAPH ")?;
                    self.write_term(graph)?;
                    self.f.write_str(" {")?;
                    self.indent += 1;
                    for triple in triples {
                        self.newline()?;
                        self.write_triple(triple)?;
                        self.f.write_str(" .")?;
                    }
                    self.indent -= 1;
                    self.newline()?;
                    self.f.write_str("}")?;
                }
            }
            i = end;
        }
        self.indent -= 1;
        self.newline()?;
        self.f.write_str("}")
    }
}

/// Returns `true` if the rendered expression can be used as a constraint without brackets.
fn is_self_bracketed(expression: &ExpressionAst) -> bool {
    matches!(
        expression,
        ExpressionAst::Comparison { .. }
            | ExpressionAst::And(..)
            | ExpressionAst::Or(..)
            | ExpressionAst::Arithmetic { .. }
            | ExpressionAst::In { .. }
            | ExpressionAst::Function { .. }
            | ExpressionAst::Aggregate { .. }
            | ExpressionAst::If(..)
            | ExpressionAst::Coalesce(_)
            | ExpressionAst::Bound(_)
            | ExpressionAst::Exists(_)
            | ExpressionAst::NotExists(_)
    )
}

