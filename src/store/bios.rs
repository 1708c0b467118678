//! Staff bio operations.
//!
//! Bios are never deleted directly; see
//! [`Store::delete_bio_and_reassign_articles`].

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::domain::{derive_slug, Bio, BioId, NewBio, UserId, ValidationError};

use super::error::unique_violation;
use super::{ensure_reference, validated, Store, StoreError, StoreResult};

const COLUMNS: &str = "id, user_id, name, job_title, job_category_id, image, text, slug, visible";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Bio> {
    Ok(Bio {
        id: row.get(0)?,
        user: row.get(1)?,
        name: row.get(2)?,
        job_title: row.get(3)?,
        job_category: row.get(4)?,
        image: row.get(5)?,
        text: row.get(6)?,
        slug: row.get(7)?,
        visible: row.get(8)?,
    })
}

pub(crate) fn fetch(conn: &Connection, id: BioId) -> rusqlite::Result<Option<Bio>> {
    let sql = format!("SELECT {} FROM bios WHERE id = ?1", COLUMNS);
    conn.query_row(&sql, [id], from_row).optional()
}

fn query(conn: &Connection, filter: &str) -> rusqlite::Result<Vec<Bio>> {
    let sql = format!("SELECT {} FROM bios {} ORDER BY id", COLUMNS, filter);
    let mut stmt = conn.prepare(&sql)?;
    let bios = stmt
        .query_map([], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(bios)
}

/// Fail when another bio already uses `name`
fn ensure_name_free(conn: &Connection, name: Option<&str>, except: Option<BioId>) -> StoreResult<()> {
    let Some(name) = name else {
        return Ok(());
    };

    let taken = conn
        .query_row(
            "SELECT 1 FROM bios WHERE name = ?1 AND id IS NOT ?2",
            params![name, except],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if taken {
        return Err(ValidationError::Duplicate {
            field: "name",
            value: name.to_string(),
        }
        .into());
    }
    Ok(())
}

impl Store {
    /// Create a bio, deriving its slug from the name when unset
    pub fn create_bio(&mut self, new: NewBio) -> StoreResult<Bio> {
        validated("bio", &new)?;
        let slug = derive_slug(new.slug.as_deref(), new.name.as_deref());

        let tx = self.conn.transaction()?;
        ensure_reference(
            &tx,
            "job_categories",
            "job category",
            new.job_category.map(|c| c.get()),
        )?;
        ensure_name_free(&tx, new.name.as_deref(), None)?;

        tx.execute(
            "INSERT INTO bios (user_id, name, job_title, job_category_id, image, text, slug, visible) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                new.user,
                new.name,
                new.job_title,
                new.job_category,
                new.image,
                new.text,
                slug,
                new.visible
            ],
        )
        .map_err(|err| unique_violation(err, "name", new.name.as_deref().unwrap_or_default()))?;
        let id = BioId(tx.last_insert_rowid());
        tx.commit()?;

        info!(%id, slug = ?slug, "Created bio");
        Ok(Bio {
            id,
            user: new.user,
            name: new.name,
            job_title: new.job_title,
            job_category: new.job_category,
            image: new.image,
            text: new.text,
            slug,
            visible: new.visible,
        })
    }

    pub fn get_bio(&self, id: BioId) -> StoreResult<Option<Bio>> {
        Ok(fetch(&self.conn, id)?)
    }

    /// First bio with this slug (slugs are not unique)
    pub fn get_bio_by_slug(&self, slug: &str) -> StoreResult<Option<Bio>> {
        let sql = format!(
            "SELECT {} FROM bios WHERE slug = ?1 ORDER BY id LIMIT 1",
            COLUMNS
        );
        Ok(self.conn.query_row(&sql, [slug], from_row).optional()?)
    }

    pub fn list_bios(&self) -> StoreResult<Vec<Bio>> {
        Ok(query(&self.conn, "")?)
    }

    /// Bios shown on the public staff page
    pub fn list_visible_bios(&self) -> StoreResult<Vec<Bio>> {
        Ok(query(&self.conn, "WHERE visible = 1")?)
    }

    /// Save changes to a bio.
    ///
    /// A set slug is kept as-is; an unset one is derived again from the name.
    pub fn update_bio(&mut self, bio: &Bio) -> StoreResult<Bio> {
        validated("bio", bio)?;
        let slug = derive_slug(bio.slug.as_deref(), bio.name.as_deref());

        let tx = self.conn.transaction()?;
        ensure_reference(
            &tx,
            "job_categories",
            "job category",
            bio.job_category.map(|c| c.get()),
        )?;
        ensure_name_free(&tx, bio.name.as_deref(), Some(bio.id))?;

        let changed = tx
            .execute(
                "UPDATE bios SET user_id = ?1, name = ?2, job_title = ?3, job_category_id = ?4, \
                 image = ?5, text = ?6, slug = ?7, visible = ?8 WHERE id = ?9",
                params![
                    bio.user,
                    bio.name,
                    bio.job_title,
                    bio.job_category,
                    bio.image,
                    bio.text,
                    slug,
                    bio.visible,
                    bio.id
                ],
            )
            .map_err(|err| unique_violation(err, "name", bio.name.as_deref().unwrap_or_default()))?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "bio",
                id: bio.id.get(),
            });
        }
        tx.commit()?;

        Ok(Bio {
            slug,
            ..bio.clone()
        })
    }

    /// Clear the account link on every bio tied to `user`.
    ///
    /// Called when the account is removed from the identity system; the
    /// bios themselves stay. Returns how many bios were detached.
    pub fn detach_user(&mut self, user: UserId) -> StoreResult<usize> {
        let detached = self
            .conn
            .execute("UPDATE bios SET user_id = NULL WHERE user_id = ?1", [user])?;
        info!(%user, detached, "Detached user from bios");
        Ok(detached)
    }
}
