use crate::data_store::error::DataStoreError;
use crate::data_store::frame_store::{normalize, FrameStore};
use crate::types::table::Table;
use crate::utils::ensure_cache_dir_exists;
use bon::bon;
use log::{info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

pub const DEFAULT_MEASUREMENT_FILE: &str = "hawaii_measurements.csv";
pub const DEFAULT_STATION_FILE: &str = "hawaii_stations.csv";

/// Reads the measurement and station tables from a data directory.
///
/// Each table is a `.csv` file (with a header row) or a `.parquet` file. When a
/// cache directory is set, a CSV table is normalized and written to the cache as
/// Parquet, and later loads read the cached copy for as long as it is at least as
/// new as the CSV.
///
/// # Example
///
/// ```no_run
/// use surfs_up::{DataStore, DatasetLoader};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = DatasetLoader::builder()
///     .data_dir("Resources")
///     .cache_dir("/tmp/surfs_up")
///     .build()
///     .load()
///     .await?;
/// println!("Latest reading: {}", store.max_date()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    data_dir: PathBuf,
    cache_dir: Option<PathBuf>,
    measurement_file: String,
    station_file: String,
}

#[bon]
impl DatasetLoader {
    #[builder]
    pub fn new(
        #[builder(into)] data_dir: PathBuf,
        #[builder(into)] cache_dir: Option<PathBuf>,
        #[builder(into, default = DEFAULT_MEASUREMENT_FILE.to_string())] measurement_file: String,
        #[builder(into, default = DEFAULT_STATION_FILE.to_string())] station_file: String,
    ) -> Self {
        Self {
            data_dir,
            cache_dir,
            measurement_file,
            station_file,
        }
    }
}

impl DatasetLoader {
    /// Loads both tables and builds the immutable store.
    ///
    /// # Errors
    ///
    /// Any failure here is a startup failure: a missing or unreadable file, an
    /// unsupported extension, a missing required column or a malformed date.
    pub async fn load(&self) -> Result<FrameStore, DataStoreError> {
        let (measurements, stations) = tokio::try_join!(
            self.get_frame(Table::Measurement),
            self.get_frame(Table::Station)
        )?;
        task::spawn_blocking(move || FrameStore::from_frames(measurements, stations)).await?
    }

    fn file_name(&self, table: Table) -> &str {
        match table {
            Table::Measurement => &self.measurement_file,
            Table::Station => &self.station_file,
        }
    }

    /// Loads one table, going through the Parquet cache for CSV sources.
    async fn get_frame(&self, table: Table) -> Result<DataFrame, DataStoreError> {
        let source = self.data_dir.join(self.file_name(table));
        if fs::metadata(&source).await.is_err() {
            return Err(DataStoreError::FileNotFound(source));
        }

        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("parquet") => {
                info!("Reading {} table from {:?}", table, source);
                Self::read_parquet(&source).await
            }
            Some("csv") => match &self.cache_dir {
                Some(cache_dir) => self.get_cached_csv(table, &source, cache_dir).await,
                None => {
                    info!("Reading {} table from {:?}", table, source);
                    Self::read_csv(table, &source).await
                }
            },
            _ => Err(DataStoreError::UnsupportedFormat(source)),
        }
    }

    async fn get_cached_csv(
        &self,
        table: Table,
        source: &Path,
        cache_dir: &Path,
    ) -> Result<DataFrame, DataStoreError> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_else(|| table.name());
        let parquet_path = cache_dir.join(format!("{}{}.parquet", table.cache_file_prefix(), stem));

        if Self::is_fresh(&parquet_path, source).await? {
            info!(
                "Cache hit for {} table at {:?}",
                table, parquet_path
            );
            return Self::read_parquet(&parquet_path).await;
        }

        warn!(
            "Cache miss for {} table, reading {:?}",
            table, source
        );
        let df = Self::read_csv(table, source).await?;
        let df = task::spawn_blocking(move || normalize(table, df)).await??;

        ensure_cache_dir_exists(cache_dir).await?;
        let df = Self::cache_dataframe(df, &parquet_path).await?;
        info!("Cached {} table to {:?}", table, parquet_path);
        Ok(df)
    }

    /// Whether `cache` exists and was written no earlier than `source` was modified.
    async fn is_fresh(cache: &Path, source: &Path) -> Result<bool, DataStoreError> {
        let cache_meta = match fs::metadata(cache).await {
            Ok(meta) => meta,
            Err(_) => return Ok(false),
        };
        let source_meta = fs::metadata(source)
            .await
            .map_err(|e| DataStoreError::MetadataRead(source.to_path_buf(), e))?;

        let cache_modified = cache_meta
            .modified()
            .map_err(|e| DataStoreError::MetadataRead(cache.to_path_buf(), e))?;
        let source_modified = source_meta
            .modified()
            .map_err(|e| DataStoreError::MetadataRead(source.to_path_buf(), e))?;

        if cache_modified < source_modified {
            warn!("Cache file {:?} is older than {:?}", cache, source);
            return Ok(false);
        }
        Ok(true)
    }

    /// Parses a CSV file with a header row using a blocking task.
    async fn read_csv(table: Table, path: &Path) -> Result<DataFrame, DataStoreError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path_buf.clone()))
                .map_err(|e| DataStoreError::CsvRead {
                    table,
                    path: path_buf.clone(),
                    source: e,
                })?
                .finish()
                .map_err(|e| DataStoreError::CsvRead {
                    table,
                    path: path_buf,
                    source: e,
                })
        })
        .await?
    }

    async fn read_parquet(path: &Path) -> Result<DataFrame, DataStoreError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            LazyFrame::scan_parquet(&path_buf, Default::default())
                .and_then(|frame| frame.collect())
                .map_err(|e| DataStoreError::ParquetScan(path_buf, e))
        })
        .await?
    }

    /// Writes a DataFrame to a Parquet file using spawn_blocking and hands it back.
    async fn cache_dataframe(mut df: DataFrame, path: &Path) -> Result<DataFrame, DataStoreError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| DataStoreError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| DataStoreError::ParquetWritePolars(path_buf, e))?;
            Ok::<DataFrame, DataStoreError>(df)
        })
        .await?
    }
}
