//! Contains [`QueryService`], which answers the API's queries over any [`DataStore`].

use crate::data_store::DataStore;
use crate::query::error::QueryError;
use crate::query::routes::list_routes;
use crate::types::dates::{parse_date, window_start};
use crate::types::readings::{StationActivity, TemperatureSummary};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Precipitation keyed by `YYYY-MM-DD`, iterating in date order.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Answers the API's queries against an immutable [`DataStore`].
///
/// The most active station (the one with the most measurement rows) is resolved
/// once in [`QueryService::new`]; the dataset never changes afterwards, so it is
/// never recomputed.
///
/// # Example
///
/// ```
/// use polars::prelude::*;
/// use surfs_up::{FrameStore, QueryService};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let measurements = df!(
///     "station" => ["USC00519281", "USC00519397", "USC00519281"],
///     "date" => ["2017-08-21", "2017-08-22", "2017-08-23"],
///     "prcp" => [Some(0.1), Some(0.0), None],
///     "tobs" => [76.0, 80.0, 79.0],
/// )?;
/// let stations = df!("station" => ["USC00519397", "USC00519281"])?;
/// let service = QueryService::new(FrameStore::from_frames(measurements, stations)?)?;
///
/// assert_eq!(service.temperature_observations()?, vec![76.0, 79.0]);
/// let summary = service.stats("2017-08-22", None)?;
/// assert_eq!(summary.tmax, Some(80.0));
/// # Ok(())
/// # }
/// ```
pub struct QueryService<S> {
    store: S,
    most_active: Option<StationActivity>,
}

impl<S: DataStore> QueryService<S> {
    /// Wraps a store and resolves its most active station.
    ///
    /// An empty dataset is accepted here; the date-window queries report it
    /// as [`QueryError::EmptyDataset`] when called.
    pub fn new(store: S) -> Result<Self, QueryError> {
        let most_active = store.most_active_station()?;
        match &most_active {
            Some(activity) => info!(
                "Most active station is {} with {} observations",
                activity.station, activity.observations
            ),
            None => warn!("No measurements loaded, most active station is undefined"),
        }
        Ok(Self { store, most_active })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn most_active_station(&self) -> Option<&StationActivity> {
        self.most_active.as_ref()
    }

    /// The route templates served by the API. No data access.
    pub fn list_routes(&self) -> Vec<String> {
        list_routes()
    }

    /// Precipitation for the trailing 365 days of the dataset, one entry per date.
    ///
    /// When several stations report on the same date the last reading in
    /// (date, station) order wins, so the value comes from the station with the
    /// largest id, even if that value is null. Readings are not averaged.
    pub fn precipitation(&self) -> Result<PrecipitationByDate, QueryError> {
        let since = self.window_start()?;
        let mut by_date = PrecipitationByDate::new();
        for reading in self.store.precipitation_since(since)? {
            by_date.insert(reading.date, reading.precipitation);
        }
        debug!("Precipitation since {}: {} dates", since, by_date.len());
        Ok(by_date)
    }

    /// Every station id, in the order the station table lists them.
    pub fn stations(&self) -> Result<Vec<String>, QueryError> {
        Ok(self.store.all_station_ids()?)
    }

    /// Temperatures observed at the most active station over the trailing 365 days.
    pub fn temperature_observations(&self) -> Result<Vec<f64>, QueryError> {
        let since = self.window_start()?;
        let station = self
            .most_active
            .as_ref()
            .ok_or(QueryError::EmptyDataset)?;
        Ok(self
            .store
            .temperatures_for_station_since(&station.station, since)?)
    }

    /// Min/avg/max temperature from `start` onwards, or between `start` and `end`
    /// inclusive.
    ///
    /// A range that matches nothing, including one where `end` precedes `start`,
    /// yields [`TemperatureSummary::empty`].
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidDateFormat`] if either date is not `YYYY-MM-DD`.
    pub fn stats(&self, start: &str, end: Option<&str>) -> Result<TemperatureSummary, QueryError> {
        let start = parse_query_date(start)?;
        let end = end.map(parse_query_date).transpose()?;
        let stats = self.store.temperature_stats_in_range(start, end)?;
        Ok(TemperatureSummary::from(stats))
    }

    fn window_start(&self) -> Result<NaiveDate, QueryError> {
        Ok(window_start(self.store.max_date()?))
    }
}

fn parse_query_date(value: &str) -> Result<NaiveDate, QueryError> {
    parse_date(value).map_err(|e| QueryError::InvalidDateFormat {
        value: value.to_string(),
        source: e,
    })
}
