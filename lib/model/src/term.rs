use crate::TermError;
use oxrdf::{
    BlankNode, Literal, NamedNode, NamedNodeRef, Subject, Term, Triple, TripleRef, Variable,
};
use std::fmt::{Display, Formatter};

/// A term that can appear in a SPARQL pattern.
///
/// In addition to the RDF terms of the data model, an [RdfTerm] can hold a [Variable] or a
/// quoted triple whose components are themselves [RdfTerm]s (RDF-star).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum RdfTerm {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Variable(Variable),
    Triple(Box<TripleTerm>),
}

impl RdfTerm {
    /// Creates an IRI term, validating `iri`.
    pub fn iri(iri: impl Into<String>) -> Result<Self, TermError> {
        Ok(Self::NamedNode(NamedNode::new(iri)?))
    }

    /// Creates a variable term, validating `name`.
    pub fn var(name: impl Into<String>) -> Result<Self, TermError> {
        Ok(Self::Variable(Variable::new(name)?))
    }

    /// Creates a plain string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::new_simple_literal(value))
    }

    /// Creates a language-tagged string literal.
    pub fn lang_string(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, TermError> {
        let language = language.into();
        Literal::new_language_tagged_literal(value, language.clone())
            .map(Self::Literal)
            .map_err(|error| TermError::LanguageTag {
                tag: language,
                message: error.to_string(),
            })
    }

    /// Creates a literal with an explicit datatype.
    pub fn typed(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self::Literal(Literal::new_typed_literal(value, datatype))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns `true` if this term or any nested quoted triple contains a variable.
    pub fn has_variables(&self) -> bool {
        match self {
            Self::Variable(_) => true,
            Self::Triple(triple) => {
                triple.subject.has_variables()
                    || triple.predicate.has_variables()
                    || triple.object.has_variables()
            }
            Self::NamedNode(_) | Self::BlankNode(_) | Self::Literal(_) => false,
        }
    }
}

impl Display for RdfTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NamedNode(node) => node.fmt(f),
            Self::BlankNode(node) => node.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
            Self::Variable(variable) => variable.fmt(f),
            Self::Triple(triple) => triple.fmt(f),
        }
    }
}

impl From<NamedNode> for RdfTerm {
    fn from(value: NamedNode) -> Self {
        Self::NamedNode(value)
    }
}

impl From<NamedNodeRef<'_>> for RdfTerm {
    fn from(value: NamedNodeRef<'_>) -> Self {
        Self::NamedNode(value.into_owned())
    }
}

impl From<BlankNode> for RdfTerm {
    fn from(value: BlankNode) -> Self {
        Self::BlankNode(value)
    }
}

impl From<Literal> for RdfTerm {
    fn from(value: Literal) -> Self {
        Self::Literal(value)
    }
}

impl From<Variable> for RdfTerm {
    fn from(value: Variable) -> Self {
        Self::Variable(value)
    }
}

impl From<TripleTerm> for RdfTerm {
    fn from(value: TripleTerm) -> Self {
        Self::Triple(Box::new(value))
    }
}

impl From<Triple> for RdfTerm {
    fn from(value: Triple) -> Self {
        Self::Triple(Box::new(value.into()))
    }
}

impl From<Subject> for RdfTerm {
    fn from(value: Subject) -> Self {
        match value {
            Subject::NamedNode(node) => Self::NamedNode(node),
            Subject::BlankNode(node) => Self::BlankNode(node),
            Subject::Triple(triple) => Self::from(*triple),
        }
    }
}

impl From<Term> for RdfTerm {
    fn from(value: Term) -> Self {
        match value {
            Term::NamedNode(node) => Self::NamedNode(node),
            Term::BlankNode(node) => Self::BlankNode(node),
            Term::Literal(literal) => Self::Literal(literal),
            Term::Triple(triple) => Self::from(*triple),
        }
    }
}

impl TryFrom<RdfTerm> for Term {
    type Error = TermError;

    fn try_from(value: RdfTerm) -> Result<Self, Self::Error> {
        match value {
            RdfTerm::NamedNode(node) => Ok(Term::NamedNode(node)),
            RdfTerm::BlankNode(node) => Ok(Term::BlankNode(node)),
            RdfTerm::Literal(literal) => Ok(Term::Literal(literal)),
            RdfTerm::Variable(_) => Err(TermError::UnboundVariable(value)),
            RdfTerm::Triple(triple) => Ok(Term::Triple(Box::new(Triple::try_from(*triple)?))),
        }
    }
}

impl TryFrom<RdfTerm> for Subject {
    type Error = TermError;

    fn try_from(value: RdfTerm) -> Result<Self, Self::Error> {
        match value {
            RdfTerm::NamedNode(node) => Ok(Subject::NamedNode(node)),
            RdfTerm::BlankNode(node) => Ok(Subject::BlankNode(node)),
            RdfTerm::Triple(triple) => {
                Ok(Subject::Triple(Box::new(Triple::try_from(*triple)?)))
            }
            RdfTerm::Variable(_) => Err(TermError::UnboundVariable(value)),
            RdfTerm::Literal(_) => Err(TermError::InvalidSubject(value)),
        }
    }
}

/// A quoted triple whose components may be variables.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TripleTerm {
    pub subject: RdfTerm,
    pub predicate: RdfTerm,
    pub object: RdfTerm,
}

impl TripleTerm {
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

impl Display for TripleTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<< {} {} {} >>", self.subject, self.predicate, self.object)
    }
}

impl From<Triple> for TripleTerm {
    fn from(value: Triple) -> Self {
        Self {
            subject: value.subject.into(),
            predicate: value.predicate.into(),
            object: value.object.into(),
        }
    }
}

impl From<TripleRef<'_>> for TripleTerm {
    fn from(value: TripleRef<'_>) -> Self {
        value.into_owned().into()
    }
}

impl TryFrom<TripleTerm> for Triple {
    type Error = TermError;

    fn try_from(value: TripleTerm) -> Result<Self, Self::Error> {
        let predicate = match value.predicate {
            RdfTerm::NamedNode(node) => node,
            RdfTerm::Variable(_) => return Err(TermError::UnboundVariable(value.predicate)),
            other => return Err(TermError::InvalidPredicate(other)),
        };
        Ok(Triple::new(
            Subject::try_from(value.subject)?,
            predicate,
            Term::try_from(value.object)?,
        ))
    }
}
