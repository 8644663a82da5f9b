//! Read-only access to the measurement and station tables.
//!
//! [`DataStore`] is the seam between the query layer and storage. The only
//! implementation shipped is [`FrameStore`], an in-memory Polars snapshot built
//! once by [`DatasetLoader`] and never mutated afterwards, so it can be shared
//! across request handlers without locking.

pub mod dataset_loader;
pub mod error;
pub mod frame_store;

use crate::types::readings::{PrecipitationReading, StationActivity, TemperatureStats};
use chrono::NaiveDate;
use error::DataStoreError;

pub use dataset_loader::DatasetLoader;
pub use frame_store::FrameStore;

/// Filtered scans and aggregates over an immutable climate dataset.
pub trait DataStore: Send + Sync {
    /// Latest measurement date.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::EmptyDataset`] when the measurement table has no rows.
    fn max_date(&self) -> Result<NaiveDate, DataStoreError>;

    /// Every `(date, prcp)` pair with `date >= since`, across all stations,
    /// ordered by date and then station.
    fn precipitation_since(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, DataStoreError>;

    /// Every station identifier, one per station row, in row order.
    fn all_station_ids(&self) -> Result<Vec<String>, DataStoreError>;

    /// `tobs` values of one station with `date >= since`, oldest first.
    fn temperatures_for_station_since(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<f64>, DataStoreError>;

    /// Min/mean/max of `tobs` over `date >= start` (and `date <= end` when given).
    ///
    /// Returns `Ok(None)` when no rows match.
    fn temperature_stats_in_range(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Option<TemperatureStats>, DataStoreError>;

    /// The station with the most measurement rows, ties going to the smallest id.
    ///
    /// Returns `Ok(None)` when the measurement table is empty.
    fn most_active_station(&self) -> Result<Option<StationActivity>, DataStoreError>;
}
