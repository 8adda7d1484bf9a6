//! Holiday calendars consumed by profile generation.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Holiday dates mapped to human-readable labels.
pub type HolidayMap = BTreeMap<NaiveDate, String>;

/// Public holidays in England and Wales for 2010, including the
/// substitute days for Christmas falling on a weekend.
const GB_2010: [(u32, u32, &str); 11] = [
    (1, 1, "New year"),
    (4, 2, "Good Friday"),
    (4, 4, "Easter Sunday"),
    (4, 5, "Easter Monday"),
    (5, 3, "Early May Bank Holiday"),
    (5, 31, "Spring Bank Holiday"),
    (8, 30, "Late Summer Bank Holiday"),
    (12, 25, "Christmas Day"),
    (12, 26, "Boxing Day"),
    (12, 27, "Christmas Shift"),
    (12, 28, "Boxing Day Shift"),
];

/// Calendar errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// Holidays were requested for a year the calendar does not cover.
    #[error("holidays are configured for {configured}, but {requested} was requested")]
    YearMismatch { configured: i32, requested: i32 },
    /// A configured holiday does not belong to the calendar year.
    #[error("holiday {date} ({name}) lies outside {year}")]
    OutsideYear {
        date: NaiveDate,
        name: String,
        year: i32,
    },
}

/// Supplies the holidays of a calendar year.
pub trait HolidayProvider {
    /// Returns every holiday of `year`.
    ///
    /// # Errors
    ///
    /// Returns a `CalendarError` if the provider cannot answer for `year`.
    fn holidays(&self, year: i32) -> Result<HolidayMap, CalendarError>;
}

/// A fixed, explicitly configured holiday list for exactly one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHolidays {
    year: i32,
    holidays: HolidayMap,
}

impl FixedHolidays {
    /// Creates a calendar for `year`.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::OutsideYear` for the first date that does not
    /// fall within `year`.
    pub fn new(year: i32, holidays: HolidayMap) -> Result<Self, CalendarError> {
        if let Some((date, name)) = holidays.iter().find(|(date, _)| date.year() != year) {
            return Err(CalendarError::OutsideYear {
                date: *date,
                name: name.clone(),
                year,
            });
        }
        Ok(Self { year, holidays })
    }

    /// England and Wales public holidays for 2010.
    pub fn gb_2010() -> Self {
        Self {
            year: 2010,
            holidays: gb_2010_holidays(),
        }
    }

    /// The single year this calendar covers.
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl HolidayProvider for FixedHolidays {
    fn holidays(&self, year: i32) -> Result<HolidayMap, CalendarError> {
        if year != self.year {
            return Err(CalendarError::YearMismatch {
                configured: self.year,
                requested: year,
            });
        }
        Ok(self.holidays.clone())
    }
}

/// England and Wales public holidays for 2010 as a map.
pub fn gb_2010_holidays() -> HolidayMap {
    GB_2010
        .iter()
        .filter_map(|&(month, day, name)| {
            NaiveDate::from_ymd_opt(2010, month, day).map(|date| (date, name.to_string()))
        })
        .collect()
}
