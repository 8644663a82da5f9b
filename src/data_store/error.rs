use crate::types::dates::DateFormatError;
use crate::types::table::Table;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataStoreError {
    #[error("The measurement table has no rows")]
    EmptyDataset,

    #[error("Required column '{column}' not found in {table} table")]
    MissingColumn {
        table: Table,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Malformed date '{value}' in {table} table, expected YYYY-MM-DD")]
    MalformedDate {
        table: Table,
        value: String,
        #[source]
        source: DateFormatError,
    },

    #[error("Dataset file '{0}' does not exist")]
    FileNotFound(PathBuf),

    #[error("Unsupported dataset file '{0}', expected a .csv or .parquet file")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read metadata for '{0}'")]
    MetadataRead(PathBuf, #[source] std::io::Error),

    // Errors during parquet writing (inside blocking task)
    #[error("I/O error writing parquet cache file '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing parquet cache file '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to read parquet file '{0}'")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Failed to read CSV file '{path}' for the {table} table")]
    CsvRead {
        table: Table,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing {table} table: {source}")]
    Polars {
        table: Table,
        #[source]
        source: PolarsError,
    },
}

impl DataStoreError {
    pub(crate) fn polars(table: Table) -> impl FnOnce(PolarsError) -> DataStoreError {
        move |source| DataStoreError::Polars { table, source }
    }
}
