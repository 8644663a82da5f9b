//! Plain row and result types produced by the store and the query layer.

use serde::Serialize;

/// A single `(date, prcp)` pair from the measurement table.
#[derive(Debug, PartialEq, Clone)]
pub struct PrecipitationReading {
    pub date: String,               // date, YYYY-MM-DD
    pub precipitation: Option<f64>, // prcp, null when the station did not report
}

/// Minimum, mean and maximum of `tobs` over a set of measurement rows.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct TemperatureStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

/// How many measurement rows a station contributed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// The temperature summary returned for a start (and optional end) date.
///
/// All three fields are `None` when no rows matched, which serializes as
/// `{"TMIN": null, "TAVG": null, "TMAX": null}` rather than zeros.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct TemperatureSummary {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}

impl TemperatureSummary {
    /// The summary for a range with no matching rows.
    pub fn empty() -> Self {
        Self {
            tmin: None,
            tavg: None,
            tmax: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tmin.is_none() && self.tavg.is_none() && self.tmax.is_none()
    }
}

impl From<Option<TemperatureStats>> for TemperatureSummary {
    fn from(stats: Option<TemperatureStats>) -> Self {
        match stats {
            Some(stats) => Self {
                tmin: Some(stats.min),
                tavg: Some(stats.avg),
                tmax: Some(stats.max),
            },
            None => Self::empty(),
        }
    }
}
