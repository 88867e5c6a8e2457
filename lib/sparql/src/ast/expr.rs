use crate::ast::GraphPatternAst;
use rdf_compose_model::{NamedNode, RdfTerm, Variable};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExpressionAst {
    /// A variable, IRI, literal or quoted triple.
    Term(RdfTerm),
    Comparison {
        operator: ComparisonOperator,
        left: Box<ExpressionAst>,
        right: Box<ExpressionAst>,
    },
    And(Box<ExpressionAst>, Box<ExpressionAst>),
    Or(Box<ExpressionAst>, Box<ExpressionAst>),
    Not(Box<ExpressionAst>),
    Arithmetic {
        operator: ArithmeticOperator,
        left: Box<ExpressionAst>,
        right: Box<ExpressionAst>,
    },
    UnaryMinus(Box<ExpressionAst>),
    /// `expression IN (list)` or `expression NOT IN (list)`
    In {
        expression: Box<ExpressionAst>,
        list: Vec<ExpressionAst>,
        negated: bool,
    },
    Function {
        function: Function,
        arguments: Vec<ExpressionAst>,
    },
    /// An aggregate. `expression == None` is only meaningful for `COUNT(*)`.
    Aggregate {
        function: AggregateFunction,
        distinct: bool,
        expression: Option<Box<ExpressionAst>>,
    },
    If(Box<ExpressionAst>, Box<ExpressionAst>, Box<ExpressionAst>),
    Coalesce(Vec<ExpressionAst>),
    Bound(Variable),
    Exists(Box<GraphPatternAst>),
    NotExists(Box<GraphPatternAst>),
}

impl ExpressionAst {
    pub fn var(variable: Variable) -> Self {
        Self::Term(RdfTerm::Variable(variable))
    }

    pub fn term(term: impl Into<RdfTerm>) -> Self {
        Self::Term(term.into())
    }

    pub fn call(function: Function, arguments: impl IntoIterator<Item = ExpressionAst>) -> Self {
        Self::Function {
            function,
            arguments: arguments.into_iter().collect(),
        }
    }

    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Self::Aggregate {
            function: AggregateFunction::Count,
            distinct: false,
            expression: None,
        }
    }

    pub fn aggregate(
        function: AggregateFunction,
        distinct: bool,
        expression: ExpressionAst,
    ) -> Self {
        Self::Aggregate {
            function,
            distinct,
            expression: Some(Box::new(expression)),
        }
    }

    #[must_use]
    pub fn compare(self, operator: ComparisonOperator, other: ExpressionAst) -> Self {
        Self::Comparison {
            operator,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    #[must_use]
    pub fn equal(self, other: ExpressionAst) -> Self {
        self.compare(ComparisonOperator::Equal, other)
    }

    #[must_use]
    pub fn greater(self, other: ExpressionAst) -> Self {
        self.compare(ComparisonOperator::Greater, other)
    }

    #[must_use]
    pub fn less(self, other: ExpressionAst) -> Self {
        self.compare(ComparisonOperator::Less, other)
    }

    #[must_use]
    pub fn and(self, other: ExpressionAst) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: ExpressionAst) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    #[must_use]
    pub fn arithmetic(self, operator: ArithmeticOperator, other: ExpressionAst) -> Self {
        Self::Arithmetic {
            operator,
            left: Box::new(self),
            right: Box::new(other),
        }
    }
}

impl From<Variable> for ExpressionAst {
    fn from(value: Variable) -> Self {
        Self::var(value)
    }
}

impl From<RdfTerm> for ExpressionAst {
    fn from(value: RdfTerm) -> Self {
        Self::Term(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl ComparisonOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }
}

/// A SPARQL built-in call or a custom function identified by an IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Str,
    Lang,
    LangMatches,
    Datatype,
    Iri,
    BNode,
    Rand,
    Abs,
    Ceil,
    Floor,
    Round,
    Concat,
    SubStr,
    StrLen,
    Replace,
    UCase,
    LCase,
    EncodeForUri,
    Contains,
    StrStarts,
    StrEnds,
    StrBefore,
    StrAfter,
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    Timezone,
    Tz,
    Now,
    Uuid,
    StrUuid,
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    StrLang,
    StrDt,
    SameTerm,
    IsIri,
    IsBlank,
    IsLiteral,
    IsNumeric,
    Regex,
    Triple,
    Subject,
    Predicate,
    Object,
    IsTriple,
    Custom(NamedNode),
}

impl Function {
    /// The keyword of a built-in call, `None` for custom functions.
    pub fn keyword(&self) -> Option<&'static str> {
        Some(match self {
            Self::Str => "STR",
            Self::Lang => "LANG",
            Self::LangMatches => "LANGMATCHES",
            Self::Datatype => "DATATYPE",
            Self::Iri => "IRI",
            Self::BNode => "BNODE",
            Self::Rand => "RAND",
            Self::Abs => "ABS",
            Self::Ceil => "CEIL",
            Self::Floor => "FLOOR",
            Self::Round => "ROUND",
            Self::Concat => "CONCAT",
            Self::SubStr => "SUBSTR",
            Self::StrLen => "STRLEN",
            Self::Replace => "REPLACE",
            Self::UCase => "UCASE",
            Self::LCase => "LCASE",
            Self::EncodeForUri => "ENCODE_FOR_URI",
            Self::Contains => "CONTAINS",
            Self::StrStarts => "STRSTARTS",
            Self::StrEnds => "STRENDS",
            Self::StrBefore => "STRBEFORE",
            Self::StrAfter => "STRAFTER",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hours => "HOURS",
            Self::Minutes => "MINUTES",
            Self::Seconds => "SECONDS",
            Self::Timezone => "TIMEZONE",
            Self::Tz => "TZ",
            Self::Now => "NOW",
            Self::Uuid => "UUID",
            Self::StrUuid => "STRUUID",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::StrLang => "STRLANG",
            Self::StrDt => "STRDT",
            Self::SameTerm => "sameTerm",
            Self::IsIri => "isIRI",
            Self::IsBlank => "isBLANK",
            Self::IsLiteral => "isLITERAL",
            Self::IsNumeric => "isNUMERIC",
            Self::Regex => "REGEX",
            Self::Triple => "TRIPLE",
            Self::Subject => "SUBJECT",
            Self::Predicate => "PREDICATE",
            Self::Object => "OBJECT",
            Self::IsTriple => "isTRIPLE",
            Self::Custom(_) => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    Sample,
    GroupConcat { separator: Option<String> },
}

impl AggregateFunction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::Sample => "SAMPLE",
            Self::GroupConcat { .. } => "GROUP_CONCAT",
        }
    }
}
