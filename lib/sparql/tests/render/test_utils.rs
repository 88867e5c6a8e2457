use rdf_compose_model::{NamedNode, Variable};
use std::error::Error;

pub type TestResult = Result<(), Box<dyn Error>>;

pub fn ex_namespace() -> NamedNode {
    NamedNode::new_unchecked("http://example.com/")
}

pub fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{local}"))
}

pub fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

/// Checks that an independent SPARQL parser accepts the rendered query.
pub fn assert_valid_query(text: &str) -> TestResult {
    spargebra::Query::parse(text, None)?;
    Ok(())
}

/// Checks that an independent SPARQL parser accepts the rendered update.
pub fn assert_valid_update(text: &str) -> TestResult {
    spargebra::Update::parse(text, None)?;
    Ok(())
}
