use crate::data_store::error::DataStoreError;
use crate::query::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfsUpError {
    #[error(transparent)]
    DataStore(#[from] DataStoreError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Failed to read configuration")]
    Configuration(#[from] config::ConfigError),

    #[error("Failed to bind '{0}'")]
    Bind(String, #[source] std::io::Error),

    #[error("HTTP server stopped unexpectedly")]
    Serve(#[source] std::io::Error),
}
