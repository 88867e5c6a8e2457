use oxigraph::sparql::EvaluationError;
use oxigraph::store::StorageError;
use rdf_compose_common::RepositoryError;

pub(crate) fn storage_error(error: StorageError) -> RepositoryError {
    RepositoryError::Storage(Box::new(error))
}

pub(crate) fn evaluation_error(error: EvaluationError) -> RepositoryError {
    match error {
        EvaluationError::Parsing(error) => RepositoryError::Syntax(Box::new(error)),
        EvaluationError::Storage(error) => storage_error(error),
        error => RepositoryError::Evaluation(Box::new(error)),
    }
}
