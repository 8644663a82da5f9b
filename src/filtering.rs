use crate::types::dates::format_date;
use crate::types::table::{COL_DATE, COL_STATION};
use chrono::NaiveDate;
use polars::prelude::{col, lit, Expr, LazyFrame};

/// Date and station filters over a measurement `LazyFrame`.
///
/// The `date` column holds `YYYY-MM-DD` strings, so bounds are compared as
/// strings; the loader rejects any stored date not in that exact shape.
pub trait ClimateFrameFilterExt {
    /// Keeps rows with `date >= start`.
    fn filter_since(self, start: NaiveDate) -> LazyFrame;

    /// Keeps rows with `date >= start` and, when `end` is given, `date <= end`.
    ///
    /// An `end` before `start` is not rejected; it simply matches nothing.
    fn filter_range(self, start: NaiveDate, end: Option<NaiveDate>) -> LazyFrame;

    /// Keeps rows recorded by the given station.
    fn filter_station(self, station: &str) -> LazyFrame;
}

fn date_at_or_after(start: NaiveDate) -> Expr {
    col(COL_DATE).gt_eq(lit(format_date(start)))
}

impl ClimateFrameFilterExt for LazyFrame {
    fn filter_since(self, start: NaiveDate) -> LazyFrame {
        self.filter(date_at_or_after(start))
    }

    fn filter_range(self, start: NaiveDate, end: Option<NaiveDate>) -> LazyFrame {
        match end {
            Some(end) => self.filter(
                date_at_or_after(start).and(col(COL_DATE).lt_eq(lit(format_date(end)))),
            ),
            None => self.filter_since(start),
        }
    }

    fn filter_station(self, station: &str) -> LazyFrame {
        self.filter(col(COL_STATION).eq(lit(station)))
    }
}
