mod raw;
mod reducer;

pub use raw::{utc_date, RawObservation};
pub use reducer::{
    compute_daily_rain, group_by_day, nearest_to_noon, noon_timestamp, reduce_to_daily,
    DailyRainTable, DayGroups, WeatherObservation,
};
