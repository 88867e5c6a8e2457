use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use rdf_compose::common::{
    Graph, MutableGraph, QuerySolutions, Repository, RepositoryError, RepositoryFactory,
    RepositoryId,
};
use rdf_compose::memory::MemoryRepository;
use rdf_compose::model::{NamedNode, Term, Triple};
use rdf_compose::sparql::{AskQuery, ConstructQuery, DescribeQuery, SelectQuery, UpdateQuery};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub type TestResult = Result<(), Box<dyn Error>>;

pub fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{local}"))
}

pub fn triple(subject: &str, object: &str) -> Triple {
    Triple::new(ex(subject), ex("p"), ex(object))
}

/// Reads `?s ?p ?o` solutions back into triples, sorted.
pub fn solution_triples(solutions: &QuerySolutions) -> Vec<Triple> {
    let mut triples = solutions
        .iter()
        .filter_map(|solution| {
            let Some(Term::NamedNode(subject)) = solution.get("s") else {
                return None;
            };
            let Some(Term::NamedNode(predicate)) = solution.get("p") else {
                return None;
            };
            let object = solution.get("o")?;
            Some(Triple::new(subject.clone(), predicate.clone(), object.clone()))
        })
        .collect::<Vec<_>>();
    triples.sort_by_key(ToString::to_string);
    triples
}

pub fn sorted(mut triples: Vec<Triple>) -> Vec<Triple> {
    triples.sort_by_key(ToString::to_string);
    triples
}

/// A [MemoryRepository] that records the queries it evaluates and counts how often it is closed.
///
/// Queries containing one of the [rejected](SpyRepository::reject_queries_containing) fragments
/// are recorded and then fail.
#[derive(Debug)]
pub struct SpyRepository {
    inner: MemoryRepository,
    queries: Mutex<Vec<String>>,
    rejected: Mutex<Vec<String>>,
    closed: AtomicUsize,
}

impl SpyRepository {
    pub fn new() -> Result<Arc<Self>, RepositoryError> {
        Ok(Arc::new(Self {
            inner: MemoryRepository::new()?,
            queries: Mutex::new(Vec::new()),
            rejected: Mutex::new(Vec::new()),
            closed: AtomicUsize::new(0),
        }))
    }

    /// Creates a repository with `triples` in its default graph.
    pub async fn with_default_graph(triples: &[Triple]) -> Result<Arc<Self>, RepositoryError> {
        let repository = Self::new()?;
        repository
            .edit_default_graph()
            .await?
            .extend(triples.to_vec())
            .await?;
        Ok(repository)
    }

    /// Adds a named graph holding `triples`.
    pub async fn add_graph(
        &self,
        name: &NamedNode,
        triples: &[Triple],
    ) -> Result<(), RepositoryError> {
        self.create_graph(name).await?.extend(triples.to_vec()).await?;
        Ok(())
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|queries| queries.clone()).unwrap_or_default()
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Makes every later query whose text contains `fragment` fail.
    pub fn reject_queries_containing(&self, fragment: &str) {
        if let Ok(mut rejected) = self.rejected.lock() {
            rejected.push(fragment.to_owned());
        }
    }

    fn record(&self, text: &str) -> Result<(), RepositoryError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(text.to_owned());
        }
        let rejected = self
            .rejected
            .lock()
            .map(|rejected| rejected.iter().any(|fragment| text.contains(fragment.as_str())))
            .unwrap_or_default();
        if rejected {
            return Err(RepositoryError::other("query rejected"));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for SpyRepository {
    fn id(&self) -> RepositoryId {
        self.inner.id()
    }

    async fn select(&self, query: &SelectQuery) -> Result<QuerySolutions, RepositoryError> {
        self.record(query.text())?;
        self.inner.select(query).await
    }

    async fn ask(&self, query: &AskQuery) -> Result<bool, RepositoryError> {
        self.record(query.text())?;
        self.inner.ask(query).await
    }

    async fn construct(&self, query: &ConstructQuery) -> Result<Vec<Triple>, RepositoryError> {
        self.record(query.text())?;
        self.inner.construct(query).await
    }

    async fn describe(&self, query: &DescribeQuery) -> Result<Vec<Triple>, RepositoryError> {
        self.record(query.text())?;
        self.inner.describe(query).await
    }

    async fn update(&self, update: &UpdateQuery) -> Result<(), RepositoryError> {
        self.inner.update(update).await
    }

    async fn default_graph(&self) -> Result<Arc<dyn Graph>, RepositoryError> {
        self.inner.default_graph().await
    }

    async fn graph(&self, name: &NamedNode) -> Result<Option<Arc<dyn Graph>>, RepositoryError> {
        self.inner.graph(name).await
    }

    async fn graph_names(&self) -> Result<Vec<NamedNode>, RepositoryError> {
        self.inner.graph_names().await
    }

    async fn create_graph(
        &self,
        name: &NamedNode,
    ) -> Result<Arc<dyn MutableGraph>, RepositoryError> {
        self.inner.create_graph(name).await
    }

    async fn edit_default_graph(&self) -> Result<Arc<dyn MutableGraph>, RepositoryError> {
        self.inner.edit_default_graph().await
    }

    async fn close(&self) -> Result<(), RepositoryError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}

/// Creates [SpyRepository]s and keeps them for inspection.
#[derive(Debug, Default)]
pub struct SpyFactory {
    created: Mutex<Vec<Arc<SpyRepository>>>,
}

impl SpyFactory {
    pub fn created(&self) -> Vec<Arc<SpyRepository>> {
        self.created
            .lock()
            .map(|created| created.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RepositoryFactory for SpyFactory {
    async fn create(&self) -> Result<Arc<dyn Repository>, RepositoryError> {
        let repository = SpyRepository::new()?;
        if let Ok(mut created) = self.created.lock() {
            created.push(Arc::clone(&repository));
        }
        Ok(repository)
    }
}

/// A graph that yields its triples and then fails.
#[derive(Debug)]
pub struct BrokenGraph {
    pub triples: Vec<Triple>,
}

#[async_trait]
impl Graph for BrokenGraph {
    async fn contains(&self, triple: &Triple) -> Result<bool, RepositoryError> {
        Ok(self.triples.contains(triple))
    }

    fn stream(&self) -> BoxStream<'_, Result<Triple, RepositoryError>> {
        stream::iter(self.triples.clone().into_iter().map(Ok))
            .chain(stream::once(async {
                Err(RepositoryError::other("the graph is broken"))
            }))
            .boxed()
    }

    async fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.triples.len())
    }
}

/// A graph that is not part of any repository.
#[derive(Debug)]
pub struct StaticGraph {
    pub triples: Vec<Triple>,
}

#[async_trait]
impl Graph for StaticGraph {
    async fn contains(&self, triple: &Triple) -> Result<bool, RepositoryError> {
        Ok(self.triples.contains(triple))
    }

    fn stream(&self) -> BoxStream<'_, Result<Triple, RepositoryError>> {
        stream::iter(self.triples.clone().into_iter().map(Ok)).boxed()
    }

    async fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.triples.len())
    }
}

/// Wraps a query text as a `SELECT` query.
pub fn select(text: &str) -> SelectQuery {
    SelectQuery::new(text)
}
