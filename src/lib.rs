//! Read-only HTTP API over a static climate dataset of precipitation and
//! temperature readings keyed by station and date.
//!
//! The crate is layered:
//! - [`DataStore`] abstracts the measurement and station tables; [`FrameStore`]
//!   implements it over an in-memory Polars snapshot built by [`DatasetLoader`].
//! - [`QueryService`] answers the five API queries: route listing, stations,
//!   trailing-year precipitation, trailing-year temperatures at the most active
//!   station, and temperature summaries over a date range.
//! - [`server`] maps those results onto axum routes under `/api/v1.0`.

mod app;
mod data_store;
mod error;
mod filtering;
mod query;
pub mod server;
mod settings;
#[cfg(test)]
mod test_utils;
mod types;
mod utils;

pub use app::run;
pub use error::SurfsUpError;
pub use settings::{get_configuration, DatasetSettings, ServerSettings, Settings};

pub use data_store::dataset_loader::{DEFAULT_MEASUREMENT_FILE, DEFAULT_STATION_FILE};
pub use data_store::error::DataStoreError;
pub use data_store::{DataStore, DatasetLoader, FrameStore};
pub use filtering::ClimateFrameFilterExt;

pub use query::{list_routes, PrecipitationByDate, QueryError, QueryService, API_PREFIX};

pub use types::dates::{
    format_date, parse_date, window_start, DateFormatError, DATE_FORMAT, WINDOW_DAYS,
};
pub use types::readings::{
    PrecipitationReading, StationActivity, TemperatureStats, TemperatureSummary,
};
pub use types::table::Table;
