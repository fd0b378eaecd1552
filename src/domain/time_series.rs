// Time series domain model and date-range filtering
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// `YYYY.MM.DD HH:mm:ss.ffff` as emitted by the data loggers.
const LOGGER_TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S%.f";

// ISO-8601 forms beyond strict RFC 3339. `%#z` also accepts `Z`.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%#z",
];
const NAIVE_FORMATS: [&str; 6] = [
    LOGGER_TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub time: String,
    pub strain1: f64,
    pub strain2: f64,
    pub strain3: f64,
    pub temp1: f64,
    pub temp2: f64,
    pub temp3: f64,
}

impl TimeSeriesPoint {
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.time)
    }
}

/// Inclusive calendar-day range. A missing `to` covers the `from` day only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn last_day(&self) -> NaiveDate {
        self.to.unwrap_or(self.from)
    }

    /// Whole UTC calendar days, so sub-millisecond instants at the very end
    /// of the last day still count.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let day = instant.date_naive();
        day >= self.from && day <= self.last_day()
    }

    pub fn label(&self) -> String {
        let from = self.from.format("%b %d, %Y");
        match self.to {
            Some(to) => format!("{} - {}", from, to.format("%b %d, %Y")),
            None => from.to_string(),
        }
    }
}

/// Parse RFC 3339 / ISO-8601 or the logger format. Timestamps without an
/// offset are taken as UTC, and a bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSeries {
    pub points: Vec<TimeSeriesPoint>,
    /// Points removed because their timestamp could not be parsed.
    pub dropped: usize,
}

pub fn filter_by_date_range(points: &[TimeSeriesPoint], range: Option<&DateRange>) -> FilteredSeries {
    let Some(range) = range else {
        return FilteredSeries {
            points: points.to_vec(),
            dropped: 0,
        };
    };

    let mut dropped = 0;
    let filtered: Vec<TimeSeriesPoint> = points
        .iter()
        .filter(|point| match point.instant() {
            Some(instant) => range.contains(instant),
            None => {
                dropped += 1;
                tracing::debug!("Dropping point with unparseable timestamp: {:?}", point.time);
                false
            }
        })
        .cloned()
        .collect();

    if dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} points with unparseable timestamps",
            dropped,
            points.len()
        );
    }

    FilteredSeries {
        points: filtered,
        dropped,
    }
}
