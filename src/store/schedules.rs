//! Radio and TV schedule slot operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use crate::domain::{Medium, NewScheduleSlot, ProgramId, ScheduleSlot, ScheduleSlotId};

use super::{ensure_reference, Store, StoreError, StoreResult};

const COLUMNS: &str = "id, program_id, medium, day, start_time, end_time";

/// Recurring patterns first, then Monday..Sunday, then by time
const ORDER: &str = "ORDER BY day, start_time, id";

fn from_row(row: &Row<'_>) -> rusqlite::Result<ScheduleSlot> {
    Ok(ScheduleSlot {
        id: row.get(0)?,
        program: row.get(1)?,
        medium: row.get(2)?,
        day: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
    })
}

impl Store {
    /// Add a slot to the radio or TV schedule
    pub fn create_slot(&mut self, new: NewScheduleSlot) -> StoreResult<ScheduleSlot> {
        let tx = self.conn.transaction()?;
        ensure_reference(&tx, "programs", "program", Some(new.program.get()))?;

        tx.execute(
            "INSERT INTO schedule_slots (program_id, medium, day, start_time, end_time) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new.program, new.medium, new.day, new.start_time, new.end_time],
        )?;
        let id = ScheduleSlotId(tx.last_insert_rowid());
        tx.commit()?;

        info!(%id, program = %new.program, medium = %new.medium, day = %new.day, "Created schedule slot");
        Ok(ScheduleSlot {
            id,
            program: new.program,
            medium: new.medium,
            day: new.day,
            start_time: new.start_time,
            end_time: new.end_time,
        })
    }

    pub fn get_slot(&self, id: ScheduleSlotId) -> StoreResult<Option<ScheduleSlot>> {
        let sql = format!("SELECT {} FROM schedule_slots WHERE id = ?1", COLUMNS);
        Ok(self.conn.query_row(&sql, [id], from_row).optional()?)
    }

    /// The whole radio or TV schedule
    pub fn list_slots(&self, medium: Medium) -> StoreResult<Vec<ScheduleSlot>> {
        let sql = format!(
            "SELECT {} FROM schedule_slots WHERE medium = ?1 {}",
            COLUMNS, ORDER
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let slots = stmt
            .query_map([medium], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(slots)
    }

    /// Slots of one program, optionally restricted to one medium
    pub fn slots_for_program(
        &self,
        program: ProgramId,
        medium: Option<Medium>,
    ) -> StoreResult<Vec<ScheduleSlot>> {
        let sql = format!(
            "SELECT {} FROM schedule_slots \
             WHERE program_id = ?1 AND (?2 IS NULL OR medium = ?2) {}",
            COLUMNS, ORDER
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let slots = stmt
            .query_map(params![program, medium], from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(slots)
    }

    pub fn update_slot(&mut self, slot: &ScheduleSlot) -> StoreResult<ScheduleSlot> {
        let tx = self.conn.transaction()?;
        ensure_reference(&tx, "programs", "program", Some(slot.program.get()))?;

        let changed = tx.execute(
            "UPDATE schedule_slots SET program_id = ?1, medium = ?2, day = ?3, \
             start_time = ?4, end_time = ?5 WHERE id = ?6",
            params![
                slot.program,
                slot.medium,
                slot.day,
                slot.start_time,
                slot.end_time,
                slot.id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "schedule slot",
                id: slot.id.get(),
            });
        }
        tx.commit()?;

        Ok(*slot)
    }

    pub fn delete_slot(&mut self, id: ScheduleSlotId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM schedule_slots WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "schedule slot",
                id: id.get(),
            });
        }
        info!(%id, "Deleted schedule slot");
        Ok(())
    }
}
