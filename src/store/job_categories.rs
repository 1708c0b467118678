//! Job category operations.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::domain::{JobCategory, JobCategoryId, NewJobCategory};

use super::{validated, Store, StoreError, StoreResult};

const COLUMNS: &str = "id, name, priority";

fn from_row(row: &Row<'_>) -> rusqlite::Result<JobCategory> {
    Ok(JobCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        priority: row.get(2)?,
    })
}

pub(crate) fn fetch(conn: &Connection, id: JobCategoryId) -> rusqlite::Result<Option<JobCategory>> {
    let sql = format!("SELECT {} FROM job_categories WHERE id = ?1", COLUMNS);
    conn.query_row(&sql, [id], from_row).optional()
}

impl Store {
    pub fn create_job_category(&mut self, new: NewJobCategory) -> StoreResult<JobCategory> {
        validated("job category", &new)?;

        self.conn.execute(
            "INSERT INTO job_categories (name, priority) VALUES (?1, ?2)",
            params![new.name, new.priority],
        )?;
        let id = JobCategoryId(self.conn.last_insert_rowid());
        info!(%id, name = %new.name, "Created job category");

        Ok(JobCategory {
            id,
            name: new.name,
            priority: new.priority,
        })
    }

    pub fn get_job_category(&self, id: JobCategoryId) -> StoreResult<Option<JobCategory>> {
        Ok(fetch(&self.conn, id)?)
    }

    /// All categories, lowest priority first; unprioritized ones last by name
    pub fn list_job_categories(&self) -> StoreResult<Vec<JobCategory>> {
        let sql = format!(
            "SELECT {} FROM job_categories \
             ORDER BY priority IS NULL, priority, name, id",
            COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let categories = stmt
            .query_map([], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn update_job_category(&mut self, category: &JobCategory) -> StoreResult<JobCategory> {
        validated("job category", category)?;

        let changed = self.conn.execute(
            "UPDATE job_categories SET name = ?1, priority = ?2 WHERE id = ?3",
            params![category.name, category.priority, category.id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "job category",
                id: category.id.get(),
            });
        }

        Ok(category.clone())
    }

    /// Delete a category. Bios in it stay, with their category cleared.
    pub fn delete_job_category(&mut self, id: JobCategoryId) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        let detached: i64 = tx.query_row(
            "SELECT COUNT(*) FROM bios WHERE job_category_id = ?1",
            [id],
            |row| row.get(0),
        )?;

        let changed = tx.execute("DELETE FROM job_categories WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "job category",
                id: id.get(),
            });
        }
        tx.commit()?;

        info!(%id, detached, "Deleted job category");
        Ok(())
    }
}
