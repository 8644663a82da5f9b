use crate::data_store::error::DataStoreError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "surfs_up_cache";

/// Default location for the Parquet cache of CSV sources, under the platform cache directory.
pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join(CACHE_DIR_NAME))
}

pub async fn ensure_cache_dir_exists(path: &Path) -> Result<(), DataStoreError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(DataStoreError::CacheDirCreation(
                    path.to_path_buf(),
                    io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "path exists but is not a directory",
                    ),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path)
                .await
                .map_err(|e| DataStoreError::CacheDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(DataStoreError::MetadataRead(path.to_path_buf(), e)),
    }
}
