//! Contains [`FrameStore`], the Polars-backed [`DataStore`].

use crate::data_store::error::DataStoreError;
use crate::data_store::DataStore;
use crate::filtering::ClimateFrameFilterExt;
use crate::types::dates::parse_date;
use crate::types::readings::{PrecipitationReading, StationActivity, TemperatureStats};
use crate::types::table::{Table, COL_DATE, COL_PRCP, COL_STATION, COL_TOBS};
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;

const COL_OBSERVATIONS: &str = "observations";
const COL_TMIN: &str = "tmin";
const COL_TAVG: &str = "tavg";
const COL_TMAX: &str = "tmax";

/// Retrieves a column by name, naming the table in the error.
fn get_column<'a>(
    df: &'a DataFrame,
    table: Table,
    col: &str,
) -> Result<&'a Column, DataStoreError> {
    df.column(col).map_err(|e| DataStoreError::MissingColumn {
        table,
        column: col.to_string(),
        source: e,
    })
}

fn get_strings(df: &DataFrame, table: Table, col: &str) -> Result<Vec<String>, DataStoreError> {
    Ok(get_column(df, table, col)?
        .str()
        .map_err(DataStoreError::polars(table))?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}

fn get_opt_float(df: &DataFrame, table: Table, col: &str) -> Result<Option<f64>, DataStoreError> {
    Ok(get_column(df, table, col)?
        .f64()
        .map_err(DataStoreError::polars(table))?
        .into_iter()
        .next()
        .flatten())
}

/// Selects, casts and cleans one table so the query code can rely on its schema.
///
/// Required columns must be present. Optional columns are kept when present.
/// Rows with a null key column are dropped, and every `date` must parse as
/// `YYYY-MM-DD`.
pub(crate) fn normalize(table: Table, df: DataFrame) -> Result<DataFrame, DataStoreError> {
    let mut selection = Vec::new();
    for (name, dtype) in table.required_columns() {
        get_column(&df, table, name)?;
        selection.push(col(name).cast(dtype));
    }
    for (name, dtype) in table.optional_columns() {
        if df.column(name).is_ok() {
            selection.push(col(name).cast(dtype));
        }
    }

    let not_null = table
        .key_columns()
        .into_iter()
        .map(|name| col(name).is_not_null())
        .reduce(|acc, expr| acc.and(expr))
        .unwrap_or_else(|| lit(true));

    let original_height = df.height();
    let normalized = df
        .lazy()
        .select(selection)
        .filter(not_null)
        .collect()
        .map_err(DataStoreError::polars(table))?;

    let dropped = original_height - normalized.height();
    if dropped > 0 {
        warn!(
            "Dropped {} {} rows with a missing {}",
            dropped,
            table,
            table.key_columns().join(" or ")
        );
    }

    if table.required_columns().iter().any(|(name, _)| *name == COL_DATE) {
        for value in get_column(&normalized, table, COL_DATE)?
            .str()
            .map_err(DataStoreError::polars(table))?
            .into_iter()
            .flatten()
        {
            parse_date(value).map_err(|e| DataStoreError::MalformedDate {
                table,
                value: value.to_string(),
                source: e,
            })?;
        }
    }

    Ok(normalized)
}

/// An immutable, in-memory snapshot of the measurement and station tables.
///
/// Every query starts a `LazyFrame` over the stored frames (the columns are
/// shared), applies filters and aggregations, and collects. Nothing is ever
/// written back, so a `FrameStore` can be shared freely between threads.
///
/// Instances come from [`crate::DatasetLoader`] or, for data already in memory,
/// [`FrameStore::from_frames`].
#[derive(Clone)]
pub struct FrameStore {
    measurements: DataFrame,
    stations: DataFrame,
}

impl FrameStore {
    /// Builds a store from raw measurement and station frames.
    ///
    /// Both frames are normalized first: required columns are checked and cast,
    /// rows without a key are dropped and dates are validated.
    ///
    /// # Errors
    ///
    /// Returns [`DataStoreError::MissingColumn`] if a required column is absent and
    /// [`DataStoreError::MalformedDate`] if a measurement date is not `YYYY-MM-DD`.
    ///
    /// # Example
    ///
    /// ```
    /// use polars::prelude::*;
    /// use surfs_up::{DataStore, FrameStore};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let measurements = df!(
    ///     "station" => ["USC00519281", "USC00519281"],
    ///     "date" => ["2017-08-22", "2017-08-23"],
    ///     "prcp" => [Some(0.1), None],
    ///     "tobs" => [76.0, 79.0],
    /// )?;
    /// let stations = df!("station" => ["USC00519281"])?;
    ///
    /// let store = FrameStore::from_frames(measurements, stations)?;
    /// assert_eq!(store.max_date()?.to_string(), "2017-08-23");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_frames(
        measurements: DataFrame,
        stations: DataFrame,
    ) -> Result<Self, DataStoreError> {
        let measurements = normalize(Table::Measurement, measurements)?;
        let stations = normalize(Table::Station, stations)?;
        info!(
            "Dataset snapshot holds {} measurement rows and {} stations",
            measurements.height(),
            stations.height()
        );
        Ok(Self {
            measurements,
            stations,
        })
    }

    fn measurements(&self) -> LazyFrame {
        self.measurements.clone().lazy()
    }

    fn collect_measurements(&self, frame: LazyFrame) -> Result<DataFrame, DataStoreError> {
        frame
            .collect()
            .map_err(DataStoreError::polars(Table::Measurement))
    }
}

impl DataStore for FrameStore {
    fn max_date(&self) -> Result<NaiveDate, DataStoreError> {
        let df = self.collect_measurements(
            self.measurements()
                .select([col(COL_DATE)])
                .sort([COL_DATE], SortMultipleOptions::default().with_order_descending(true))
                .limit(1),
        )?;

        let value = get_strings(&df, Table::Measurement, COL_DATE)?
            .into_iter()
            .next()
            .ok_or(DataStoreError::EmptyDataset)?;
        parse_date(&value).map_err(|e| DataStoreError::MalformedDate {
            table: Table::Measurement,
            value,
            source: e,
        })
    }

    fn precipitation_since(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, DataStoreError> {
        let df = self.collect_measurements(
            self.measurements()
                .filter_since(since)
                .sort(
                    [COL_DATE, COL_STATION],
                    SortMultipleOptions::default().with_maintain_order(true),
                )
                .select([col(COL_DATE), col(COL_PRCP)]),
        )?;

        let dates = get_column(&df, Table::Measurement, COL_DATE)?
            .str()
            .map_err(DataStoreError::polars(Table::Measurement))?;
        let prcp = get_column(&df, Table::Measurement, COL_PRCP)?
            .f64()
            .map_err(DataStoreError::polars(Table::Measurement))?;

        let readings: Vec<PrecipitationReading> = dates
            .into_iter()
            .zip(prcp.into_iter())
            .filter_map(|(date, precipitation)| {
                date.map(|date| PrecipitationReading {
                    date: date.to_string(),
                    precipitation,
                })
            })
            .collect();
        debug!("{} precipitation readings since {}", readings.len(), since);
        Ok(readings)
    }

    fn all_station_ids(&self) -> Result<Vec<String>, DataStoreError> {
        let df = self
            .stations
            .clone()
            .lazy()
            .select([col(COL_STATION)])
            .collect()
            .map_err(DataStoreError::polars(Table::Station))?;
        get_strings(&df, Table::Station, COL_STATION)
    }

    fn temperatures_for_station_since(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<f64>, DataStoreError> {
        let df = self.collect_measurements(
            self.measurements()
                .filter_station(station)
                .filter_since(since)
                .sort([COL_DATE], SortMultipleOptions::default().with_maintain_order(true))
                .select([col(COL_TOBS)]),
        )?;

        let temperatures: Vec<f64> = get_column(&df, Table::Measurement, COL_TOBS)?
            .f64()
            .map_err(DataStoreError::polars(Table::Measurement))?
            .into_iter()
            .flatten()
            .collect();
        debug!(
            "{} temperature readings for station {} since {}",
            temperatures.len(),
            station,
            since
        );
        Ok(temperatures)
    }

    fn temperature_stats_in_range(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Option<TemperatureStats>, DataStoreError> {
        let df = self.collect_measurements(self.measurements().filter_range(start, end).select([
            col(COL_TOBS).min().alias(COL_TMIN),
            col(COL_TOBS).mean().alias(COL_TAVG),
            col(COL_TOBS).max().alias(COL_TMAX),
        ]))?;

        let min = get_opt_float(&df, Table::Measurement, COL_TMIN)?;
        let avg = get_opt_float(&df, Table::Measurement, COL_TAVG)?;
        let max = get_opt_float(&df, Table::Measurement, COL_TMAX)?;

        Ok(match (min, avg, max) {
            (Some(min), Some(avg), Some(max)) => Some(TemperatureStats { min, avg, max }),
            _ => None,
        })
    }

    fn most_active_station(&self) -> Result<Option<StationActivity>, DataStoreError> {
        let df = self.collect_measurements(
            self.measurements()
                .group_by([col(COL_STATION)])
                .agg([len().cast(DataType::Int64).alias(COL_OBSERVATIONS)])
                .sort(
                    [COL_OBSERVATIONS, COL_STATION],
                    SortMultipleOptions::default().with_order_descending_multi([true, false]),
                )
                .limit(1),
        )?;

        let station = get_strings(&df, Table::Measurement, COL_STATION)?
            .into_iter()
            .next();
        let observations = get_column(&df, Table::Measurement, COL_OBSERVATIONS)?
            .i64()
            .map_err(DataStoreError::polars(Table::Measurement))?
            .into_iter()
            .next()
            .flatten();

        Ok(match (station, observations) {
            (Some(station), Some(observations)) => Some(StationActivity {
                station,
                observations,
            }),
            _ => None,
        })
    }
}
