//! Shared fixture dataset for unit tests.
//!
//! Max date is 2017-08-23, so the trailing window starts on 2016-08-23.
//! USC00519281 has the most rows (5), then USC00519397 (3), then USC00513117 (2).
//! USC00518838 is a station with no measurements.
//!
//! Two dates are shared between stations:
//! - 2017-01-01: USC00519281 = 0.5, USC00519397 = 0.3
//! - 2017-01-15: USC00513117 = 0.7, USC00519281 = null

use crate::data_store::FrameStore;
use polars::prelude::*;
use std::path::Path;

pub const MOST_ACTIVE: &str = "USC00519281";

pub const MEASUREMENTS_CSV: &str = "\
id,station,date,prcp,tobs
1,USC00519281,2016-08-22,1.0,70
2,USC00519397,2016-08-23,0.0,81
3,USC00519281,2017-01-01,0.5,62
4,USC00519397,2017-01-01,0.3,64
5,USC00513117,2017-01-15,0.7,60
6,USC00519281,2017-01-15,,66
7,USC00519397,2017-01-31,0.05,70
8,USC00513117,2017-02-01,0.0,58
9,USC00519281,2017-08-22,0.1,76
10,USC00519281,2017-08-23,0.2,79
";

pub const STATIONS_CSV: &str = "\
id,station,name,latitude,longitude,elevation
1,USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0
2,USC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6
3,USC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9
4,USC00518838,\"UPPER WAHIAWA 874.3, HI US\",21.4992,-158.0111,306.6
";

pub fn measurement_frame() -> DataFrame {
    df!(
        "station" => [
            "USC00519281", "USC00519397", "USC00519281", "USC00519397", "USC00513117",
            "USC00519281", "USC00519397", "USC00513117", "USC00519281", "USC00519281",
        ],
        "date" => [
            "2016-08-22", "2016-08-23", "2017-01-01", "2017-01-01", "2017-01-15",
            "2017-01-15", "2017-01-31", "2017-02-01", "2017-08-22", "2017-08-23",
        ],
        "prcp" => [
            Some(1.0), Some(0.0), Some(0.5), Some(0.3), Some(0.7),
            None, Some(0.05), Some(0.0), Some(0.1), Some(0.2),
        ],
        "tobs" => [70.0, 81.0, 62.0, 64.0, 60.0, 66.0, 70.0, 58.0, 76.0, 79.0],
    )
    .unwrap()
}

pub fn station_frame() -> DataFrame {
    df!(
        "station" => ["USC00519397", "USC00513117", "USC00519281", "USC00518838"],
        "name" => [
            "WAIKIKI 717.2, HI US",
            "KANEOHE 838.1, HI US",
            "WAIHEE 837.5, HI US",
            "UPPER WAHIAWA 874.3, HI US",
        ],
    )
    .unwrap()
}

pub fn fixture_store() -> FrameStore {
    FrameStore::from_frames(measurement_frame(), station_frame()).unwrap()
}

pub fn empty_store() -> FrameStore {
    let measurements = measurement_frame().head(Some(0));
    FrameStore::from_frames(measurements, station_frame()).unwrap()
}

/// Writes the fixture tables as `hawaii_measurements.csv` and `hawaii_stations.csv`.
pub fn write_fixture_csvs(dir: &Path) {
    std::fs::write(dir.join("hawaii_measurements.csv"), MEASUREMENTS_CSV).unwrap();
    std::fs::write(dir.join("hawaii_stations.csv"), STATIONS_CSV).unwrap();
}
