//! Hourly timestamp index spanning one calendar year.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

/// Timestamp layout used for console output and CSV export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Evenly spaced hourly timestamps.
///
/// Every profile, temperature series and demand column is aligned on the
/// same index, so its length is the single source of truth for row counts.
///
/// # Examples
///
/// ```
/// use heat_demand::index::HourlyIndex;
///
/// let index = HourlyIndex::for_year(2010).expect("2010 is a valid year");
/// assert_eq!(index.len(), 8760);
/// assert_eq!(HourlyIndex::for_year(2012).map(|i| i.len()), Some(8784));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyIndex {
    /// First timestamp of the index.
    start: NaiveDateTime,
    /// Number of hourly steps.
    len: usize,
}

impl HourlyIndex {
    /// Builds the index covering every hour of `year`, starting at midnight
    /// on January 1st.
    ///
    /// Returns `None` if `year` is outside the range chrono can represent.
    pub fn for_year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?;
        let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?.and_hms_opt(0, 0, 0)?;
        let hours = usize::try_from((end - start).num_hours()).ok()?;
        Some(Self { start, len: hours })
    }

    /// Builds an index of `len` hours starting at `start`.
    pub fn from_start(start: NaiveDateTime, len: usize) -> Self {
        Self { start, len }
    }

    /// Number of hourly steps.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the index holds no timestamps.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First timestamp of the index.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Calendar year of the first timestamp.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Timestamp at position `i`, or `None` past the end.
    pub fn timestamp(&self, i: usize) -> Option<NaiveDateTime> {
        if i >= self.len {
            return None;
        }
        let hours = i64::try_from(i).ok()?;
        self.start.checked_add_signed(TimeDelta::hours(hours))
    }

    /// Iterates over all timestamps in order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        (0..self.len).filter_map(|i| self.timestamp(i))
    }

    /// Collects the timestamps into a vector.
    pub fn to_vec(&self) -> Vec<NaiveDateTime> {
        self.iter().collect()
    }
}
