//! Program operations.
//!
//! Program titles are unique and slugs are always assigned by the store.
//! Listings are alphabetical by title, ignoring case and accents.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::domain::{collation_key, derive_slug, BioId, NewProgram, Program, ProgramId, ValidationError};

use super::error::unique_violation;
use super::{ensure_reference, validated, Store, StoreError, StoreResult};

const COLUMNS: &str = "id, title, slug, producer_id, producer_name, description, link";


fn from_row(row: &Row<'_>) -> rusqlite::Result<Program> {
    Ok(Program {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        producer: row.get(3)?,
        producer_name: row.get(4)?,
        description: row.get(5)?,
        link: row.get(6)?,
    })
}

pub(crate) fn fetch(conn: &Connection, id: ProgramId) -> rusqlite::Result<Option<Program>> {
    let sql = format!("SELECT {} FROM programs WHERE id = ?1", COLUMNS);
    conn.query_row(&sql, [id], from_row).optional()
}

/// Title order ignoring case and accents (NOCASE only folds ASCII)
fn alphabetical(mut programs: Vec<Program>) -> Vec<Program> {
    programs.sort_by_cached_key(|p| (collation_key(&p.title), p.title.clone(), p.id));
    programs
}

fn ensure_title_free(conn: &Connection, title: &str, except: Option<ProgramId>) -> StoreResult<()> {
    let taken = conn
        .query_row(
            "SELECT 1 FROM programs WHERE title = ?1 AND id IS NOT ?2",
            params![title, except],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if taken {
        return Err(ValidationError::Duplicate {
            field: "title",
            value: title.to_string(),
        }
        .into());
    }
    Ok(())
}

impl Store {
    /// Create a program; its slug is derived from the title
    pub fn create_program(&mut self, new: NewProgram) -> StoreResult<Program> {
        validated("program", &new)?;
        let slug = derive_slug(None, Some(&new.title));

        let tx = self.conn.transaction()?;
        ensure_reference(&tx, "bios", "bio", new.producer.map(|p| p.get()))?;
        ensure_title_free(&tx, &new.title, None)?;

        tx.execute(
            "INSERT INTO programs (title, slug, producer_id, producer_name, description, link) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.title,
                slug,
                new.producer,
                new.producer_name,
                new.description,
                new.link
            ],
        )
        .map_err(|err| unique_violation(err, "title", &new.title))?;
        let id = ProgramId(tx.last_insert_rowid());
        tx.commit()?;

        info!(%id, slug = ?slug, "Created program");
        Ok(Program {
            id,
            title: new.title,
            slug,
            producer: new.producer,
            producer_name: new.producer_name,
            description: new.description,
            link: new.link,
        })
    }

    pub fn get_program(&self, id: ProgramId) -> StoreResult<Option<Program>> {
        Ok(fetch(&self.conn, id)?)
    }

    /// First program with this slug (slugs are not unique)
    pub fn get_program_by_slug(&self, slug: &str) -> StoreResult<Option<Program>> {
        let sql = format!(
            "SELECT {} FROM programs WHERE slug = ?1 ORDER BY id LIMIT 1",
            COLUMNS
        );
        Ok(self.conn.query_row(&sql, [slug], from_row).optional()?)
    }

    /// All programs, alphabetical by title
    pub fn list_programs(&self) -> StoreResult<Vec<Program>> {
        let sql = format!("SELECT {} FROM programs", COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let programs = stmt
            .query_map([], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(alphabetical(programs))
    }

    /// Programs produced by a staff bio, alphabetical by title
    pub fn programs_by_producer(&self, producer: BioId) -> StoreResult<Vec<Program>> {
        let sql = format!("SELECT {} FROM programs WHERE producer_id = ?1", COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let programs = stmt
            .query_map([producer], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(alphabetical(programs))
    }

    /// Save changes to a program.
    ///
    /// The slug is not editable: the stored slug is kept, or derived from
    /// the title if the program never got one. `program.slug` is ignored.
    pub fn update_program(&mut self, program: &Program) -> StoreResult<Program> {
        validated("program", program)?;

        let tx = self.conn.transaction()?;
        let stored = fetch(&tx, program.id)?.ok_or(StoreError::NotFound {
            entity: "program",
            id: program.id.get(),
        })?;
        ensure_reference(&tx, "bios", "bio", program.producer.map(|p| p.get()))?;
        ensure_title_free(&tx, &program.title, Some(program.id))?;

        let slug = derive_slug(stored.slug.as_deref(), Some(&program.title));
        tx.execute(
            "UPDATE programs SET title = ?1, slug = ?2, producer_id = ?3, producer_name = ?4, \
             description = ?5, link = ?6 WHERE id = ?7",
            params![
                program.title,
                slug,
                program.producer,
                program.producer_name,
                program.description,
                program.link,
                program.id
            ],
        )
        .map_err(|err| unique_violation(err, "title", &program.title))?;
        tx.commit()?;

        Ok(Program {
            slug,
            ..program.clone()
        })
    }

    /// Delete a program together with its radio and TV schedule slots
    pub fn delete_program(&mut self, id: ProgramId) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        let slots: i64 = tx.query_row(
            "SELECT COUNT(*) FROM schedule_slots WHERE program_id = ?1",
            [id],
            |row| row.get(0),
        )?;

        let changed = tx.execute("DELETE FROM programs WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "program",
                id: id.get(),
            });
        }
        tx.commit()?;

        info!(%id, slots, "Deleted program");
        Ok(())
    }
}
