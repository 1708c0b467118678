//! Radio and TV schedule slots.
//!
//! A slot is a passive lookup record: one program, one day pattern, one
//! wall-clock time range. Slots are not expanded into occurrences and
//! overlapping slots are allowed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use super::day::Day;
use super::ids::{ProgramId, ScheduleSlotId};

/// Which broadcast schedule a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    Radio,
    Tv,
}

impl Medium {
    pub fn as_str(self) -> &'static str {
        match self {
            Medium::Radio => "radio",
            Medium::Tv => "tv",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Medium {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "radio" | "fm" => Ok(Medium::Radio),
            "tv" | "television" => Ok(Medium::Tv),
            _ => anyhow::bail!("Unknown medium: {}", s),
        }
    }
}

impl ToSql for Medium {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Medium {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "radio" => Ok(Medium::Radio),
            "tv" => Ok(Medium::Tv),
            other => Err(FromSqlError::Other(
                format!("unknown medium: {}", other).into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduleSlot {
    pub program: ProgramId,
    pub medium: Medium,
    pub day: Day,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewScheduleSlot {
    pub fn new(
        program: ProgramId,
        medium: Medium,
        day: Day,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            program,
            medium,
            day,
            start_time,
            end_time,
        }
    }

    pub fn radio(program: ProgramId, day: Day, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self::new(program, Medium::Radio, day, start_time, end_time)
    }

    pub fn tv(program: ProgramId, day: Day, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self::new(program, Medium::Tv, day, start_time, end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: ScheduleSlotId,
    pub program: ProgramId,
    pub medium: Medium,
    pub day: Day,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}
