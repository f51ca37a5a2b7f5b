use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use utoipa::ToSchema;

use super::RawObservation;

const SECONDS_PER_HALF_DAY: f64 = 12.0 * 60.0 * 60.0;

/// One representative reading per calendar day, as served to the charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherObservation {
    /// Epoch milliseconds of the selected reading
    pub timestamp: i64,
    /// °F
    pub temperature: f64,
    /// Relative humidity, %
    pub humidity: f64,
    /// Rain accumulated over the whole day, inches
    pub rain: f64,
}

/// Readings bucketed by UTC calendar date.
pub type DayGroups<'a> = BTreeMap<Date, Vec<&'a RawObservation>>;

/// Maximum daily-rain accumulation seen per UTC calendar date.
pub type DailyRainTable = BTreeMap<Date, f64>;

/// Builds the per-day rain table.
///
/// The upstream field is a running total that resets at midnight, so the
/// day's figure is the largest value seen, never a sum. Missing rain counts as 0.
pub fn compute_daily_rain(records: &[RawObservation]) -> DailyRainTable {
    records
        .iter()
        .filter_map(|record| Some((record.date()?, record.daily_rain.unwrap_or(0.0))))
        .fold(DailyRainTable::new(), |mut table, (date, rain)| {
            let max = table.entry(date).or_insert(0.0);
            *max = max.max(rain);
            table
        })
}

/// Groups usable records by the UTC date of their timestamp, keeping input order
/// within each day. Records without a finite timestamp are dropped.
pub fn group_by_day(records: &[RawObservation]) -> DayGroups<'_> {
    records
        .iter()
        .filter_map(|record| Some((record.date()?, record)))
        .fold(DayGroups::new(), |mut groups, (date, record)| {
            groups.entry(date).or_default().push(record);
            groups
        })
}

/// Noon UTC of `date`, in epoch seconds.
pub fn noon_timestamp(date: Date) -> f64 {
    date.midnight().assume_utc().unix_timestamp() as f64 + SECONDS_PER_HALF_DAY
}

/// Picks the reading closest to noon. On a tie the earlier-encountered reading wins.
pub fn nearest_to_noon<'a>(date: Date, day: &[&'a RawObservation]) -> Option<&'a RawObservation> {
    let noon = noon_timestamp(date);
    let distance = |record: &RawObservation| {
        record
            .valid_timestamp()
            .map_or(f64::INFINITY, |ts| (ts - noon).abs())
    };

    day.iter().copied().reduce(|best, candidate| {
        if distance(candidate) < distance(best) {
            candidate
        } else {
            best
        }
    })
}

/// Reduces raw minute readings to one [`WeatherObservation`] per day, sorted by
/// timestamp.
///
/// A day whose noon-nearest reading lacks a finite temperature or humidity is
/// left out entirely. An empty result means nothing usable was found.
pub fn reduce_to_daily(records: &[RawObservation]) -> Vec<WeatherObservation> {
    let daily_rain = compute_daily_rain(records);

    let mut daily: Vec<WeatherObservation> = group_by_day(records)
        .into_iter()
        .filter_map(|(date, day)| {
            let selected = nearest_to_noon(date, &day)?;
            let timestamp = selected.valid_timestamp()?;
            let temperature = selected.temperature.filter(|t| t.is_finite())?;
            let humidity = selected.humidity.filter(|h| h.is_finite())?;

            Some(WeatherObservation {
                timestamp: (timestamp * 1000.0) as i64,
                temperature,
                humidity,
                rain: daily_rain.get(&date).copied().unwrap_or(0.0),
            })
        })
        .collect();

    daily.sort_by_key(|obs| obs.timestamp);
    daily
}
