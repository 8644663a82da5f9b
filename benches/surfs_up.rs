use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use surfs_up::{format_date, FrameStore, QueryService};

/// Roughly the shape of the Hawaii dataset: 9 stations, ~7 years of daily readings.
fn synthetic_store() -> FrameStore {
    let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    let stations: Vec<String> = (0..9).map(|i| format!("USC0051{:04}", i)).collect();

    let mut station_col = Vec::new();
    let mut date_col = Vec::new();
    let mut prcp_col = Vec::new();
    let mut tobs_col = Vec::new();
    for day in 0..2792 {
        let date = format_date(start + Duration::days(day));
        for (i, station) in stations.iter().enumerate() {
            if (day as usize + i) % 7 == 0 {
                continue;
            }
            station_col.push(station.clone());
            date_col.push(date.clone());
            prcp_col.push(if day % 5 == 0 { None } else { Some((day % 13) as f64 / 10.0) });
            tobs_col.push(60.0 + ((day as usize * 7 + i) % 25) as f64);
        }
    }

    let measurements = df!(
        "station" => station_col,
        "date" => date_col,
        "prcp" => prcp_col,
        "tobs" => tobs_col,
    )
    .unwrap();
    let stations = df!("station" => stations).unwrap();
    FrameStore::from_frames(measurements, stations).unwrap()
}

fn bench_queries(c: &mut Criterion) {
    let service = QueryService::new(synthetic_store()).unwrap();
    c.bench_function("precipitation", |b| b.iter(|| service.precipitation().unwrap()));
    c.bench_function("tobs", |b| b.iter(|| service.temperature_observations().unwrap()));
    c.bench_function("stats_range", |b| {
        b.iter(|| {
            service
                .stats(black_box("2016-01-01"), Some(black_box("2016-12-31")))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
