//! Store-assigned record identifiers.
//!
//! Every record is keyed by an SQLite rowid. Each entity gets its own
//! newtype so a `BioId` can never be passed where a `ProgramId` is expected.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the raw row id
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

record_id!(
    /// Identifier of a content page
    ContentId
);
record_id!(
    /// Identifier of a job category
    JobCategoryId
);
record_id!(
    /// Identifier of a staff bio
    BioId
);
record_id!(
    /// Identifier of an announcement
    AnnouncementId
);
record_id!(
    /// Identifier of a program
    ProgramId
);
record_id!(
    /// Identifier of a radio or TV schedule slot
    ScheduleSlotId
);
record_id!(
    /// Identifier of an article
    ArticleId
);
record_id!(
    /// Account in the external identity system
    UserId
);
