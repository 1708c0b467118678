//! Schedule Integration Tests
//!
//! Tests for radio/TV schedule slots, broadcast day codes and the
//! program -> slot cascade.

use airwaves::domain::{Day, Medium, NewProgram, NewScheduleSlot, ProgramId};
use airwaves::{Store, StoreError};
use chrono::{NaiveTime, Weekday};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn store_with_program(title: &str) -> (Store, ProgramId) {
    let mut store = Store::open_in_memory().unwrap();
    let program = store.create_program(NewProgram::new(title, "")).unwrap();
    (store, program.id)
}

#[test]
fn test_weekends_slot_round_trip() {
    let (mut store, program) = store_with_program("Saturday Sessions");

    let slot = store
        .create_slot(NewScheduleSlot::radio(program, Day::WEEKENDS, time(6, 0), time(9, 30)))
        .unwrap();

    let stored = store.get_slot(slot.id).unwrap().unwrap();
    assert_eq!(stored, slot);
    assert_eq!(stored.day, Day::WEEKENDS);
    assert_eq!(stored.day.code(), -1);
    assert_eq!(stored.start_time, time(6, 0));
    assert_eq!(stored.end_time, time(9, 30));
    assert_eq!(stored.to_string(), "Weekends 06:00-09:30");
}

#[test]
fn test_day_stored_as_code() {
    let (mut store, program) = store_with_program("Friday Night");
    let slot = store
        .create_slot(NewScheduleSlot::tv(program, Day::Single(Weekday::Fri), time(20, 0), time(22, 0)))
        .unwrap();

    let (day, medium): (i64, String) = store
        .connection()
        .query_row(
            "SELECT day, medium FROM schedule_slots WHERE id = ?1",
            [slot.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(day, 4);
    assert_eq!(medium, "tv");
}

#[test]
fn test_schedules_separated_by_medium() {
    let (mut store, program) = store_with_program("Simulcast");
    store
        .create_slot(NewScheduleSlot::radio(program, Day::DAILY, time(7, 0), time(8, 0)))
        .unwrap();
    store
        .create_slot(NewScheduleSlot::tv(program, Day::WEEKDAYS, time(19, 0), time(20, 0)))
        .unwrap();

    let radio = store.list_slots(Medium::Radio).unwrap();
    assert_eq!(radio.len(), 1);
    assert_eq!(radio[0].day, Day::DAILY);

    let tv = store.list_slots(Medium::Tv).unwrap();
    assert_eq!(tv.len(), 1);
    assert_eq!(tv[0].day, Day::WEEKDAYS);

    assert_eq!(store.slots_for_program(program, None).unwrap().len(), 2);
    assert_eq!(
        store.slots_for_program(program, Some(Medium::Tv)).unwrap().len(),
        1
    );
}

#[test]
fn test_schedule_ordered_by_day_then_time() {
    let (mut store, program) = store_with_program("Rotation");
    let monday_late = store
        .create_slot(NewScheduleSlot::radio(program, Day::Single(Weekday::Mon), time(22, 0), time(23, 0)))
        .unwrap();
    let sunday = store
        .create_slot(NewScheduleSlot::radio(program, Day::Single(Weekday::Sun), time(10, 0), time(11, 0)))
        .unwrap();
    let daily = store
        .create_slot(NewScheduleSlot::radio(program, Day::DAILY, time(12, 0), time(13, 0)))
        .unwrap();
    let monday_early = store
        .create_slot(NewScheduleSlot::radio(program, Day::Single(Weekday::Mon), time(6, 0), time(7, 0)))
        .unwrap();

    let ids: Vec<_> = store
        .list_slots(Medium::Radio)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![daily.id, monday_early.id, monday_late.id, sunday.id]);
}

#[test]
fn test_program_delete_removes_slots() {
    let (mut store, program) = store_with_program("Cancelled Show");
    let other = store.create_program(NewProgram::new("Survivor", "")).unwrap();

    store
        .create_slot(NewScheduleSlot::radio(program, Day::DAILY, time(7, 0), time(8, 0)))
        .unwrap();
    store
        .create_slot(NewScheduleSlot::tv(program, Day::WEEKENDS, time(9, 0), time(10, 0)))
        .unwrap();
    let kept = store
        .create_slot(NewScheduleSlot::radio(other.id, Day::DAILY, time(8, 0), time(9, 0)))
        .unwrap();

    store.delete_program(program).unwrap();

    assert!(store.slots_for_program(program, None).unwrap().is_empty());
    assert_eq!(store.list_slots(Medium::Radio).unwrap(), vec![kept]);
    assert!(store.list_slots(Medium::Tv).unwrap().is_empty());
}

#[test]
fn test_slot_for_missing_program() {
    let mut store = Store::open_in_memory().unwrap();

    let result = store.create_slot(NewScheduleSlot::radio(
        ProgramId(9),
        Day::DAILY,
        time(7, 0),
        time(8, 0),
    ));
    assert!(matches!(
        result,
        Err(StoreError::Reference { entity: "program", id: 9 })
    ));
}

#[test]
fn test_update_and_delete_slot() {
    let (mut store, program) = store_with_program("Movable");
    let mut slot = store
        .create_slot(NewScheduleSlot::radio(program, Day::DAILY, time(7, 0), time(8, 0)))
        .unwrap();

    slot.day = Day::Single(Weekday::Wed);
    slot.end_time = time(8, 30);
    store.update_slot(&slot).unwrap();
    assert_eq!(store.get_slot(slot.id).unwrap().unwrap(), slot);

    store.delete_slot(slot.id).unwrap();
    assert!(store.get_slot(slot.id).unwrap().is_none());
    assert!(matches!(
        store.delete_slot(slot.id),
        Err(StoreError::NotFound { .. })
    ));
}
