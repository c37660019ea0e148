//! Time windows and limits used by the statistics endpoint.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::types::Timestamp;

/// Number of query groups reported in `topQueries`.
pub const TOP_QUERIES_LIMIT: i64 = 10;

/// Length of the rolling "week" window, in days.
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Lower bounds (inclusive) on `created_at` for the windowed counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindows {
    /// Midnight of the current day in the clock's own time zone.
    pub today_start: Timestamp,
    /// `now` minus [`WEEK_WINDOW_DAYS`].
    pub week_start: Timestamp,
}

impl StatsWindows {
    /// Compute the windows relative to `now`.
    ///
    /// When local midnight falls in a DST gap the earliest valid local time of
    /// the day is used instead; `now` itself is the last resort.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today_start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| {
                tz.from_local_datetime(&midnight)
                    .earliest()
                    .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
            })
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| now.with_timezone(&Utc));

        Self {
            today_start,
            week_start: now.with_timezone(&Utc) - Duration::days(WEEK_WINDOW_DAYS),
        }
    }

    /// Windows for the server's local clock.
    pub fn now_local() -> Self {
        Self::at(&chrono::Local::now())
    }
}
