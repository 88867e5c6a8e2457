use crate::RdfTerm;
use oxiri::IriParseError;
use oxrdf::VariableNameParseError;

/// An error raised while creating or converting an [RdfTerm].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TermError {
    /// The IRI is invalid.
    #[error(transparent)]
    Iri(#[from] IriParseError),
    /// The variable name is invalid.
    #[error(transparent)]
    Variable(#[from] VariableNameParseError),
    /// The language tag of a literal is invalid.
    #[error("Invalid language tag '{tag}': {message}")]
    LanguageTag { tag: String, message: String },
    /// A variable was found where a concrete RDF term is required.
    #[error("The variable {0} can not be converted into an RDF term")]
    UnboundVariable(RdfTerm),
    /// The term can not be used in the subject position of a triple.
    #[error("{0} can not be used as the subject of a triple")]
    InvalidSubject(RdfTerm),
    /// The term can not be used in the predicate position of a triple.
    #[error("{0} can not be used as the predicate of a triple")]
    InvalidPredicate(RdfTerm),
}
