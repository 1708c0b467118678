//! Announcement operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::domain::{Announcement, AnnouncementId, NewAnnouncement};

use super::{validated, Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, text, pub_date, image, active";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Announcement> {
    Ok(Announcement {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        pub_date: row.get(3)?,
        image: row.get(4)?,
        active: row.get(5)?,
    })
}

impl Store {
    pub fn create_announcement(&mut self, new: NewAnnouncement) -> StoreResult<Announcement> {
        validated("announcement", &new)?;

        self.conn.execute(
            "INSERT INTO announcements (title, text, pub_date, image, active) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new.title, new.text, new.pub_date, new.image, new.active],
        )?;
        let id = AnnouncementId(self.conn.last_insert_rowid());
        info!(%id, active = new.active, "Created announcement");

        Ok(Announcement {
            id,
            title: new.title,
            text: new.text,
            pub_date: new.pub_date,
            image: new.image,
            active: new.active,
        })
    }

    pub fn get_announcement(&self, id: AnnouncementId) -> StoreResult<Option<Announcement>> {
        let sql = format!("SELECT {} FROM announcements WHERE id = ?1", COLUMNS);
        Ok(self.conn.query_row(&sql, [id], from_row).optional()?)
    }

    pub fn list_announcements(&self) -> StoreResult<Vec<Announcement>> {
        self.query_announcements("")
    }

    /// Active announcements, most recently published first; undated ones last
    pub fn list_active_announcements(&self) -> StoreResult<Vec<Announcement>> {
        self.query_announcements("WHERE active = 1 ORDER BY pub_date IS NULL, pub_date DESC, id DESC")
    }

    fn query_announcements(&self, tail: &str) -> StoreResult<Vec<Announcement>> {
        let tail = if tail.is_empty() { "ORDER BY id" } else { tail };
        let sql = format!("SELECT {} FROM announcements {}", COLUMNS, tail);
        let mut stmt = self.conn.prepare(&sql)?;
        let announcements = stmt
            .query_map([], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(announcements)
    }

    pub fn update_announcement(&mut self, announcement: &Announcement) -> StoreResult<Announcement> {
        validated("announcement", announcement)?;

        let changed = self.conn.execute(
            "UPDATE announcements SET title = ?1, text = ?2, pub_date = ?3, image = ?4, active = ?5 \
             WHERE id = ?6",
            params![
                announcement.title,
                announcement.text,
                announcement.pub_date,
                announcement.image,
                announcement.active,
                announcement.id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "announcement",
                id: announcement.id.get(),
            });
        }

        Ok(announcement.clone())
    }

    pub fn delete_announcement(&mut self, id: AnnouncementId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM announcements WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "announcement",
                id: id.get(),
            });
        }
        info!(%id, "Deleted announcement");
        Ok(())
    }
}
