//! Broadcast days for schedule slots.
//!
//! A slot airs either on a recurring pattern (daily, weekdays, weekends) or
//! on one specific weekday. The integer code is only the storage and wire
//! form: -3 daily, -2 weekdays, -1 weekends, 0..=6 Monday..Sunday.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayError {
    #[error("Invalid day code: {0} (expected -3..=6)")]
    InvalidCode(i64),

    #[error("Unknown day: {0}")]
    Unknown(String),
}

/// Recurring broadcast pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekdays,
    Weekends,
}

/// When a schedule slot airs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Day {
    Recurring(Recurrence),
    Single(Weekday),
}

/// Grouping used when presenting the day choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayGroup {
    Recurring,
    SingleDay,
}

impl DayGroup {
    pub fn label(self) -> &'static str {
        match self {
            DayGroup::Recurring => "Recurring",
            DayGroup::SingleDay => "Single day",
        }
    }
}

impl Day {
    pub const DAILY: Day = Day::Recurring(Recurrence::Daily);
    pub const WEEKDAYS: Day = Day::Recurring(Recurrence::Weekdays);
    pub const WEEKENDS: Day = Day::Recurring(Recurrence::Weekends);

    /// Every day choice, recurring patterns first, in code order
    pub const ALL: [Day; 10] = [
        Day::DAILY,
        Day::WEEKDAYS,
        Day::WEEKENDS,
        Day::Single(Weekday::Mon),
        Day::Single(Weekday::Tue),
        Day::Single(Weekday::Wed),
        Day::Single(Weekday::Thu),
        Day::Single(Weekday::Fri),
        Day::Single(Weekday::Sat),
        Day::Single(Weekday::Sun),
    ];

    /// Storage code of this day
    pub fn code(self) -> i8 {
        match self {
            Day::Recurring(Recurrence::Daily) => -3,
            Day::Recurring(Recurrence::Weekdays) => -2,
            Day::Recurring(Recurrence::Weekends) => -1,
            Day::Single(weekday) => weekday.num_days_from_monday() as i8,
        }
    }

    /// Decode a storage code
    pub fn from_code(code: i64) -> Result<Self, DayError> {
        match code {
            -3 => Ok(Day::DAILY),
            -2 => Ok(Day::WEEKDAYS),
            -1 => Ok(Day::WEEKENDS),
            0..=6 => Ok(Day::Single(WEEKDAYS[code as usize])),
            _ => Err(DayError::InvalidCode(code)),
        }
    }

    /// Human-readable label ("Weekends", "Monday", ...)
    pub fn label(self) -> &'static str {
        match self {
            Day::Recurring(Recurrence::Daily) => "Daily",
            Day::Recurring(Recurrence::Weekdays) => "Weekdays",
            Day::Recurring(Recurrence::Weekends) => "Weekends",
            Day::Single(Weekday::Mon) => "Monday",
            Day::Single(Weekday::Tue) => "Tuesday",
            Day::Single(Weekday::Wed) => "Wednesday",
            Day::Single(Weekday::Thu) => "Thursday",
            Day::Single(Weekday::Fri) => "Friday",
            Day::Single(Weekday::Sat) => "Saturday",
            Day::Single(Weekday::Sun) => "Sunday",
        }
    }

    pub fn group(self) -> DayGroup {
        match self {
            Day::Recurring(_) => DayGroup::Recurring,
            Day::Single(_) => DayGroup::SingleDay,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Day {
    type Err = DayError;

    /// Accepts a storage code, a recurring label or a weekday name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Day::from_code(code);
        }

        match s.to_lowercase().as_str() {
            "daily" => Ok(Day::DAILY),
            "weekdays" | "weekday" => Ok(Day::WEEKDAYS),
            "weekends" | "weekend" => Ok(Day::WEEKENDS),
            other => other
                .parse::<Weekday>()
                .map(Day::Single)
                .map_err(|_| DayError::Unknown(s.to_string())),
        }
    }
}

impl From<Day> for i8 {
    fn from(day: Day) -> Self {
        day.code()
    }
}

impl TryFrom<i8> for Day {
    type Error = DayError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Day::from_code(code.into())
    }
}

impl ToSql for Day {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.code())))
    }
}

impl FromSql for Day {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = i64::column_result(value)?;
        Day::from_code(code).map_err(|_| FromSqlError::OutOfRange(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for day in Day::ALL {
            assert_eq!(Day::from_code(day.code().into()), Ok(day));
        }
        let codes: Vec<i8> = Day::ALL.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![-3, -2, -1, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_codes() {
        assert_eq!(Day::from_code(-4), Err(DayError::InvalidCode(-4)));
        assert_eq!(Day::from_code(7), Err(DayError::InvalidCode(7)));
    }

    #[test]
    fn test_labels_and_groups() {
        assert_eq!(Day::WEEKENDS.label(), "Weekends");
        assert_eq!(Day::Single(Weekday::Mon).to_string(), "Monday");
        assert_eq!(Day::DAILY.group().label(), "Recurring");
        assert_eq!(Day::Single(Weekday::Sun).group(), DayGroup::SingleDay);
    }

    #[test]
    fn test_parse() {
        assert_eq!("-1".parse::<Day>(), Ok(Day::WEEKENDS));
        assert_eq!("Daily".parse::<Day>(), Ok(Day::DAILY));
        assert_eq!("weekdays".parse::<Day>(), Ok(Day::WEEKDAYS));
        assert_eq!("tue".parse::<Day>(), Ok(Day::Single(Weekday::Tue)));
        assert_eq!("Saturday".parse::<Day>(), Ok(Day::Single(Weekday::Sat)));
        assert!(matches!("someday".parse::<Day>(), Err(DayError::Unknown(_))));
        assert_eq!("9".parse::<Day>(), Err(DayError::InvalidCode(9)));
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Day::WEEKENDS).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Day::Single(Weekday::Wed)).unwrap(), "2");
        let parsed: Day = serde_json::from_str("-3").unwrap();
        assert_eq!(parsed, Day::DAILY);
        assert!(serde_json::from_str::<Day>("12").is_err());
    }
}
