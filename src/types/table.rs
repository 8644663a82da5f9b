//! Defines the two tables of the climate dataset and the columns each one is
//! expected to carry once loaded.

use polars::prelude::DataType;
use std::fmt;

pub const COL_STATION: &str = "station";
pub const COL_DATE: &str = "date";
pub const COL_PRCP: &str = "prcp"; // Precipitation
pub const COL_TOBS: &str = "tobs"; // Observed temperature

pub const COL_NAME: &str = "name";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_ELEVATION: &str = "elevation";

/// One of the two tables the service reads at startup.
///
/// Each table has a fixed set of required columns. The station table also has
/// descriptive columns that are kept when the source provides them but never
/// queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// One row per (station, date) reading.
    Measurement,
    /// One row per observation site.
    Station,
}

impl Table {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Table::Measurement => "measurement",
            Table::Station => "station",
        }
    }

    pub(crate) fn cache_file_prefix(&self) -> String {
        format!("{}-", self.name())
    }

    /// Columns that must exist, with the type each one is cast to on load.
    pub(crate) fn required_columns(&self) -> Vec<(&'static str, DataType)> {
        match self {
            Table::Measurement => vec![
                (COL_STATION, DataType::String),
                (COL_DATE, DataType::String),
                (COL_PRCP, DataType::Float64),
                (COL_TOBS, DataType::Float64),
            ],
            Table::Station => vec![(COL_STATION, DataType::String)],
        }
    }

    /// Columns carried along when present.
    pub(crate) fn optional_columns(&self) -> Vec<(&'static str, DataType)> {
        match self {
            Table::Measurement => vec![],
            Table::Station => vec![
                (COL_NAME, DataType::String),
                (COL_LATITUDE, DataType::Float64),
                (COL_LONGITUDE, DataType::Float64),
                (COL_ELEVATION, DataType::Float64),
            ],
        }
    }

    /// Columns that may not be null; rows violating this are dropped on load.
    pub(crate) fn key_columns(&self) -> Vec<&'static str> {
        match self {
            Table::Measurement => vec![COL_STATION, COL_DATE],
            Table::Station => vec![COL_STATION],
        }
    }
}

/// Formats a `Table` using its name.
///
/// # Examples
///
/// ```
/// use surfs_up::Table;
///
/// assert_eq!(Table::Measurement.to_string(), "measurement");
/// assert_eq!(format!("{}", Table::Station), "station");
/// ```
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
