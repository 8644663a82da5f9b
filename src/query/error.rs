use crate::data_store::error::DataStoreError;
use crate::types::dates::DateFormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No measurements are available")]
    EmptyDataset,

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDateFormat {
        value: String,
        #[source]
        source: DateFormatError,
    },

    #[error(transparent)]
    Store(DataStoreError),
}

impl From<DataStoreError> for QueryError {
    fn from(error: DataStoreError) -> Self {
        match error {
            DataStoreError::EmptyDataset => QueryError::EmptyDataset,
            other => QueryError::Store(other),
        }
    }
}
