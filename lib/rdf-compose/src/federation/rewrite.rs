use crate::federation::RepositoryGroup;
use rdf_compose_model::NamedNode;
use rdf_compose_sparql::{Query, QueryKind};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// A line that starts with `FROM` (after optional indentation).
static FROM_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*FROM\b").ok());

/// The prologue followed by the query form keyword, which is captured.
static QUERY_HEAD: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\A(?:\s|#[^\n]*|PREFIX\s*[^\s:<]*:\s*<[^>]*>|BASE\s*<[^>]*>|VERSION\s*(?:"[^"]*"|'[^']*'))*(SELECT|ASK|CONSTRUCT|DESCRIBE)\b"#,
    )
    .ok()
});

/// The `FROM` and `FROM NAMED` clauses that restrict a query to the graphs of a dataset.
///
/// Each graph name appears at most once, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetClauses {
    default_graphs: Vec<NamedNode>,
    named_graphs: Vec<NamedNode>,
}

impl DatasetClauses {
    pub fn new(
        default_graphs: impl IntoIterator<Item = NamedNode>,
        named_graphs: impl IntoIterator<Item = NamedNode>,
    ) -> Self {
        Self {
            default_graphs: deduplicate(default_graphs),
            named_graphs: deduplicate(named_graphs),
        }
    }

    /// Builds the clauses for a repository group.
    ///
    /// Default graphs without a name are the repository's own default graph and produce no clause.
    /// `dataset_named_graphs` are the names under which the dataset exposes this repository's
    /// named graphs. They are added to the group's named graphs unless already present.
    pub fn for_group<'a>(
        group: &'a RepositoryGroup,
        dataset_named_graphs: impl IntoIterator<Item = &'a NamedNode>,
    ) -> Self {
        Self::new(
            group.default_graphs().iter().flatten().cloned(),
            group
                .named_graphs()
                .iter()
                .chain(dataset_named_graphs)
                .cloned(),
        )
    }

    pub fn default_graphs(&self) -> &[NamedNode] {
        &self.default_graphs
    }

    pub fn named_graphs(&self) -> &[NamedNode] {
        &self.named_graphs
    }

    pub fn is_empty(&self) -> bool {
        self.default_graphs.is_empty() && self.named_graphs.is_empty()
    }

    /// Returns `query` restricted to these clauses.
    ///
    /// The query is returned unchanged if there are no clauses, if it already declares a dataset,
    /// or if its text is not recognized. In the last case the repository reports the error.
    pub fn apply(&self, query: &Query) -> Query {
        match self.rewrite(query.text()) {
            Some(text) => query.with_text(text),
            None => query.clone(),
        }
    }

    /// Inserts the clauses into the query `text` right before its `WHERE` clause.
    ///
    /// Returns [None] whenever [apply](Self::apply) keeps the query unchanged.
    pub fn rewrite(&self, text: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let (Some(from_line), Some(query_head)) = (FROM_LINE.as_ref(), QUERY_HEAD.as_ref()) else {
            return None;
        };
        if from_line.is_match(text) {
            debug!("Query already declares a dataset, keeping it unchanged");
            return None;
        }
        let Some(keyword) = query_head.captures(text).and_then(|captures| captures.get(1)) else {
            debug!("Query form not recognized, keeping it unchanged");
            return None;
        };
        let kind = match keyword.as_str().to_ascii_uppercase().as_str() {
            "SELECT" => QueryKind::Select,
            "ASK" => QueryKind::Ask,
            "CONSTRUCT" => QueryKind::Construct,
            _ => QueryKind::Describe,
        };
        let Some(position) = clause_position(text, keyword.end(), kind) else {
            debug!(%kind, "No position for dataset clauses found, keeping query unchanged");
            return None;
        };

        let (head, tail) = text.split_at(position);
        let mut rewritten = String::with_capacity(text.len() + 32 * self.len());
        rewritten.push_str(head);
        if !head.ends_with(char::is_whitespace) {
            rewritten.push('\n');
        }
        rewritten.push_str(&self.to_string());
        if !tail.is_empty() {
            rewritten.push('\n');
            rewritten.push_str(tail);
        }
        trace!(query = %rewritten, "Rewrote query");
        Some(rewritten)
    }

    fn len(&self) -> usize {
        self.default_graphs.len() + self.named_graphs.len()
    }
}

impl Display for DatasetClauses {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let default = self.default_graphs.iter().map(|graph| ("FROM", graph));
        let named = self.named_graphs.iter().map(|graph| ("FROM NAMED", graph));
        for (i, (keyword, graph)) in default.chain(named).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{keyword} {graph}")?;
        }
        Ok(())
    }
}

fn deduplicate(graphs: impl IntoIterator<Item = NamedNode>) -> Vec<NamedNode> {
    let mut seen = FxHashSet::default();
    graphs
        .into_iter()
        .filter(|graph| seen.insert(graph.clone()))
        .collect()
}

/// Finds the offset where dataset clauses belong: the `WHERE` keyword, the opening brace of the
/// `WHERE` clause, or the first solution modifier.
///
/// Returns [None] if the query already has a `FROM` clause or its structure is not recognized.
fn clause_position(text: &str, offset: usize, kind: QueryKind) -> Option<usize> {
    let mut lexer = Lexer::new(text, offset);
    if kind == QueryKind::Construct {
        match lexer.next()? {
            Token::OpenBrace(_) => lexer.skip_group()?,
            Token::Word(start, end) if text[start..end].eq_ignore_ascii_case("WHERE") => {
                return Some(start);
            }
            _ => return None,
        }
    }

    let mut depth = 0_usize;
    while let Some(token) = lexer.next() {
        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => depth = depth.saturating_sub(1),
            Token::OpenBrace(start) if depth == 0 => return Some(start),
            Token::Word(start, end) if depth == 0 => {
                let word = &text[start..end];
                if word.eq_ignore_ascii_case("FROM") {
                    return None;
                }
                if CLAUSE_KEYWORDS
                    .iter()
                    .any(|keyword| word.eq_ignore_ascii_case(keyword))
                {
                    return Some(start);
                }
            }
            _ => {}
        }
    }
    // `DESCRIBE <iri>` may end without any clause.
    (kind == QueryKind::Describe).then_some(text.len())
}

const CLAUSE_KEYWORDS: [&str; 7] = [
    "WHERE", "GROUP", "HAVING", "ORDER", "LIMIT", "OFFSET", "VALUES",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Word(usize, usize),
    OpenBrace(usize),
    CloseBrace,
    OpenParen,
    CloseParen,
    Other,
}

/// Splits query text into the few tokens needed to find clause boundaries.
///
/// IRIs, string literals and comments are skipped so that braces and keywords inside them are
/// ignored. Token offsets are always on ASCII bytes and therefore valid `str` boundaries.
struct Lexer<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str, position: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            position,
        }
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.position + offset).copied()
    }

    /// Skips up to and including the brace closing the group that was just opened.
    fn skip_group(&mut self) -> Option<()> {
        let mut depth = 1_usize;
        while depth > 0 {
            match self.next()? {
                Token::OpenBrace(_) => depth += 1,
                Token::CloseBrace => depth -= 1,
                _ => {}
            }
        }
        Some(())
    }

    fn skip_comment(&mut self) {
        while let Some(byte) = self.peek_byte(0) {
            self.position += 1;
            if byte == b'\n' {
                break;
            }
        }
    }

    fn skip_string(&mut self, quote: u8) {
        let long = self.peek_byte(1) == Some(quote) && self.peek_byte(2) == Some(quote);
        self.position += if long { 3 } else { 1 };
        while let Some(byte) = self.peek_byte(0) {
            if byte == b'\\' {
                self.position += 2;
            } else if byte == quote
                && (!long
                    || (self.peek_byte(1) == Some(quote) && self.peek_byte(2) == Some(quote)))
            {
                self.position += if long { 3 } else { 1 };
                return;
            } else if byte == b'\n' && !long {
                return;
            } else {
                self.position += 1;
            }
        }
    }

    /// Skips an IRI. A `<` that does not start an IRI is a comparison and only `<` is skipped.
    fn skip_iri(&mut self) {
        let mut end = self.position + 1;
        while let Some(&byte) = self.bytes.get(end) {
            match byte {
                b'>' => {
                    self.position = end + 1;
                    return;
                }
                b'<' | b'"' | b'{' | b'}' | b'|' | b'^' | b'`' | b'\\' => break,
                byte if byte.is_ascii_whitespace() => break,
                _ => end += 1,
            }
        }
        self.position += 1;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let byte = self.peek_byte(0)?;
            let start = self.position;
            match byte {
                byte if byte.is_ascii_whitespace() => self.position += 1,
                b'#' => self.skip_comment(),
                b'"' | b'\'' => {
                    self.skip_string(byte);
                    return Some(Token::Other);
                }
                b'<' => {
                    self.skip_iri();
                    return Some(Token::Other);
                }
                b'{' | b'}' | b'(' | b')' => {
                    self.position += 1;
                    return Some(match byte {
                        b'{' => Token::OpenBrace(start),
                        b'}' => Token::CloseBrace,
                        b'(' => Token::OpenParen,
                        _ => Token::CloseParen,
                    });
                }
                byte if is_word_byte(byte) => {
                    while self.peek_byte(0).is_some_and(is_word_byte) {
                        self.position += 1;
                    }
                    return Some(Token::Word(start, self.position));
                }
                _ => {
                    self.position += 1;
                    return Some(Token::Other);
                }
            }
        }
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'_' | b':' | b'-' | b'?' | b'$' | b'.')
        || !byte.is_ascii()
}
