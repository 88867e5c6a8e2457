//! SPARQL 1.1 property paths.
//!
//! | Syntax        | Variant                |
//! |---------------|------------------------|
//! | `iri`         | `Predicate`            |
//! | `^path`       | `Inverse`              |
//! | `p/q`         | `Sequence`             |
//! | `p\|q`        | `Alternative`          |
//! | `path*`       | `ZeroOrMore`           |
//! | `path+`       | `OneOrMore`            |
//! | `path?`       | `ZeroOrOne`            |
//! | `!(a\|^b)`    | `NegatedPropertySet`   |

use rdf_compose_model::NamedNode;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPathAst {
    Predicate(NamedNode),
    Inverse(Box<PropertyPathAst>),
    Sequence(Box<PropertyPathAst>, Box<PropertyPathAst>),
    Alternative(Box<PropertyPathAst>, Box<PropertyPathAst>),
    ZeroOrMore(Box<PropertyPathAst>),
    OneOrMore(Box<PropertyPathAst>),
    ZeroOrOne(Box<PropertyPathAst>),
    NegatedPropertySet(Vec<NegatedPredicate>),
}

impl PropertyPathAst {
    pub fn predicate(predicate: NamedNode) -> Self {
        Self::Predicate(predicate)
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self::Inverse(Box::new(self))
    }

    /// `self / next`
    #[must_use]
    pub fn then(self, next: PropertyPathAst) -> Self {
        Self::Sequence(Box::new(self), Box::new(next))
    }

    /// `self | other`
    #[must_use]
    pub fn or(self, other: PropertyPathAst) -> Self {
        Self::Alternative(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn zero_or_more(self) -> Self {
        Self::ZeroOrMore(Box::new(self))
    }

    #[must_use]
    pub fn one_or_more(self) -> Self {
        Self::OneOrMore(Box::new(self))
    }

    #[must_use]
    pub fn zero_or_one(self) -> Self {
        Self::ZeroOrOne(Box::new(self))
    }

    /// Leaves never need parentheses when used as an operand.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Predicate(_) | Self::NegatedPropertySet(_))
    }
}

impl From<NamedNode> for PropertyPathAst {
    fn from(value: NamedNode) -> Self {
        Self::Predicate(value)
    }
}

/// An element of a negated property set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NegatedPredicate {
    Forward(NamedNode),
    Inverse(NamedNode),
}
