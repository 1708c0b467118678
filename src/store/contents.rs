//! Content page operations.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::domain::{derive_slug, Content, ContentId, NewContent};

use super::{validated, Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, text, image, slug";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Content> {
    Ok(Content {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        image: row.get(3)?,
        slug: row.get(4)?,
    })
}

pub(crate) fn fetch(conn: &Connection, id: ContentId) -> rusqlite::Result<Option<Content>> {
    let sql = format!("SELECT {} FROM contents WHERE id = ?1", COLUMNS);
    conn.query_row(&sql, [id], from_row).optional()
}

impl Store {
    /// Create a content page, deriving its slug from the title when unset
    pub fn create_content(&mut self, new: NewContent) -> StoreResult<Content> {
        validated("content", &new)?;
        let slug = derive_slug(new.slug.as_deref(), Some(&new.title));

        self.conn.execute(
            "INSERT INTO contents (title, text, image, slug) VALUES (?1, ?2, ?3, ?4)",
            params![new.title, new.text, new.image, slug],
        )?;
        let id = ContentId(self.conn.last_insert_rowid());
        info!(%id, slug = ?slug, "Created content");

        Ok(Content {
            id,
            title: new.title,
            text: new.text,
            image: new.image,
            slug,
        })
    }

    pub fn get_content(&self, id: ContentId) -> StoreResult<Option<Content>> {
        Ok(fetch(&self.conn, id)?)
    }

    /// First content page with this slug (slugs are not unique)
    pub fn get_content_by_slug(&self, slug: &str) -> StoreResult<Option<Content>> {
        let sql = format!(
            "SELECT {} FROM contents WHERE slug = ?1 ORDER BY id LIMIT 1",
            COLUMNS
        );
        Ok(self.conn.query_row(&sql, [slug], from_row).optional()?)
    }

    pub fn list_contents(&self) -> StoreResult<Vec<Content>> {
        let sql = format!("SELECT {} FROM contents ORDER BY id", COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let contents = stmt
            .query_map([], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contents)
    }

    /// Save changes to a content page.
    ///
    /// A set slug is kept as-is; an unset one is derived again from the title.
    pub fn update_content(&mut self, content: &Content) -> StoreResult<Content> {
        validated("content", content)?;
        let slug = derive_slug(content.slug.as_deref(), Some(&content.title));

        let changed = self.conn.execute(
            "UPDATE contents SET title = ?1, text = ?2, image = ?3, slug = ?4 WHERE id = ?5",
            params![content.title, content.text, content.image, slug, content.id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "content",
                id: content.id.get(),
            });
        }

        Ok(Content {
            slug,
            ..content.clone()
        })
    }

    pub fn delete_content(&mut self, id: ContentId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contents WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "content",
                id: id.get(),
            });
        }
        info!(%id, "Deleted content");
        Ok(())
    }
}
