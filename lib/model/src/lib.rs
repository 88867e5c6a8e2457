mod error;
mod term;

pub use error::*;
pub use term::*;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, BlankNodeRef, GraphName, GraphNameRef, IriParseError,
    Literal, LiteralRef, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad,
    QuadRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef, Variable,
    VariableNameParseError, VariableRef,
};
