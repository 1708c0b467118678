//! Store Integration Tests
//!
//! Tests for slugs, uniqueness, ordering and foreign-key behaviour of the
//! editorial records.

use airwaves::domain::{
    slugify, BioId, JobCategoryId, NewAnnouncement, NewBio, NewContent, NewJobCategory,
    NewProgram, UserId, ValidationError,
};
use airwaves::{Store, StoreError};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

#[test]
fn test_content_slug_derived_from_title() {
    let mut store = Store::open_in_memory().unwrap();

    let content = store
        .create_content(NewContent::new("Morning Show!", "<p>Hello</p>"))
        .unwrap();
    assert_eq!(content.slug.as_deref(), Some("morning-show"));

    let found = store.get_content_by_slug("morning-show").unwrap().unwrap();
    assert_eq!(found.id, content.id);
}

#[test]
fn test_long_title_slug_not_cut() {
    let mut store = Store::open_in_memory().unwrap();
    let title = "The Very Long Weekly Aleutian Fisheries And Community Report Hour";

    let content = store.create_content(NewContent::new(title, "")).unwrap();
    assert_eq!(
        content.slug.as_deref(),
        Some("the-very-long-weekly-aleutian-fisheries-and-community-report-hour")
    );

    let program = store.create_program(NewProgram::new(title, "")).unwrap();
    assert_eq!(program.slug, Some(slugify(title)));

    let stored = store.get_content(content.id).unwrap().unwrap();
    assert_eq!(stored.slug, Some(slugify(title)));
}

#[test]
fn test_explicit_slug_preserved() {
    let mut store = Store::open_in_memory().unwrap();

    let content = store
        .create_content(NewContent::new("Contact Us", "").with_slug("reach_us-2024"))
        .unwrap();
    assert_eq!(content.slug.as_deref(), Some("reach_us-2024"));

    // Retitling keeps the existing slug
    let mut edited = content.clone();
    edited.title = "Get in Touch".to_string();
    let updated = store.update_content(&edited).unwrap();
    assert_eq!(updated.slug.as_deref(), Some("reach_us-2024"));

    let stored = store.get_content(content.id).unwrap().unwrap();
    assert_eq!(stored.title, "Get in Touch");
    assert_eq!(stored.slug.as_deref(), Some("reach_us-2024"));
}

#[test]
fn test_invalid_content_rejected() {
    let mut store = Store::open_in_memory().unwrap();

    let result = store.create_content(NewContent::new("x".repeat(501), ""));
    match result {
        Err(StoreError::Validation(ValidationError::TooLong { field, max, actual })) => {
            assert_eq!(field, "title");
            assert_eq!(max, 500);
            assert_eq!(actual, 501);
        }
        other => panic!("Expected TooLong, got {:?}", other),
    }

    assert!(store.list_contents().unwrap().is_empty());
}

#[test]
fn test_duplicate_program_title_rejected() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .create_program(NewProgram::new("Jazz Hour", "Late night jazz"))
        .unwrap();

    let result = store.create_program(NewProgram::new("Jazz Hour", "Another one"));
    assert!(result.as_ref().unwrap_err().is_validation());
    match result {
        Err(StoreError::Validation(ValidationError::Duplicate { field, value })) => {
            assert_eq!(field, "title");
            assert_eq!(value, "Jazz Hour");
        }
        other => panic!("Expected Duplicate, got {:?}", other),
    }

    let programs = store.list_programs().unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].description, "Late night jazz");
}

#[test]
fn test_program_slug_not_user_editable() {
    let mut store = Store::open_in_memory().unwrap();
    let program = store
        .create_program(NewProgram::new("Drive Time", ""))
        .unwrap();
    assert_eq!(program.slug.as_deref(), Some("drive-time"));

    let mut edited = program.clone();
    edited.slug = Some("hijacked".to_string());
    edited.title = "Drive Time Extra".to_string();
    let updated = store.update_program(&edited).unwrap();

    assert_eq!(updated.slug.as_deref(), Some("drive-time"));
    assert!(store.get_program_by_slug("hijacked").unwrap().is_none());
}

#[test]
fn test_programs_listed_alphabetically() {
    let mut store = Store::open_in_memory().unwrap();
    for title in ["Zebra Talk", "afternoon Mix", "Breakfast Club", "Morning Show"] {
        store.create_program(NewProgram::new(title, "")).unwrap();
    }

    let titles: Vec<String> = store
        .list_programs()
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(
        titles,
        vec!["afternoon Mix", "Breakfast Club", "Morning Show", "Zebra Talk"]
    );
}

#[test]
fn test_programs_alphabetical_ignoring_accents() {
    let mut store = Store::open_in_memory().unwrap();
    for title in ["Zebra", "Éclat", "apple"] {
        store.create_program(NewProgram::new(title, "")).unwrap();
    }

    let titles: Vec<String> = store
        .list_programs()
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["apple", "Éclat", "Zebra"]);
}

#[test]
fn test_program_with_missing_producer() {
    let mut store = Store::open_in_memory().unwrap();

    let result = store.create_program(NewProgram::new("Ghost Show", "").produced_by(BioId(7)));
    assert!(matches!(
        result,
        Err(StoreError::Reference { entity: "bio", id: 7 })
    ));
    assert!(store.list_programs().unwrap().is_empty());
}

#[test]
fn test_producer_credit_prefers_bio_name() {
    let mut store = Store::open_in_memory().unwrap();
    let bio = store.create_bio(NewBio::named("J. Doe", "Producer")).unwrap();
    let program = store
        .create_program(
            NewProgram::new("Evening News", "")
                .produced_by(bio.id)
                .with_producer_name("News Desk"),
        )
        .unwrap();

    assert_eq!(program.producer_credit(Some(&bio)), Some("J. Doe"));
    assert_eq!(program.producer_credit(None), Some("News Desk"));

    let produced = store.programs_by_producer(bio.id).unwrap();
    assert_eq!(produced.len(), 1);
    assert_eq!(produced[0].id, program.id);
}

#[test]
fn test_job_category_delete_keeps_bios() {
    let mut store = Store::open_in_memory().unwrap();
    let category = store
        .create_job_category(NewJobCategory::new("News").with_priority(1))
        .unwrap();
    let bio = store
        .create_bio(NewBio::named("J. Doe", "Anchor").with_category(category.id))
        .unwrap();

    store.delete_job_category(category.id).unwrap();

    let bio = store.get_bio(bio.id).unwrap().unwrap();
    assert_eq!(bio.job_category, None);
    assert!(store.get_job_category(category.id).unwrap().is_none());
}

#[test]
fn test_job_categories_ordered_by_priority() {
    let mut store = Store::open_in_memory().unwrap();
    store.create_job_category(NewJobCategory::new("Volunteers")).unwrap();
    store
        .create_job_category(NewJobCategory::new("Management").with_priority(1))
        .unwrap();
    store
        .create_job_category(NewJobCategory::new("Hosts").with_priority(5))
        .unwrap();

    let names: Vec<String> = store
        .list_job_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Management", "Hosts", "Volunteers"]);
}

#[test]
fn test_bio_name_unique() {
    let mut store = Store::open_in_memory().unwrap();
    store.create_bio(NewBio::named("J. Doe", "Anchor")).unwrap();

    let result = store.create_bio(NewBio::named("J. Doe", "Reporter"));
    assert!(matches!(
        result,
        Err(StoreError::Validation(ValidationError::Duplicate { field: "name", .. }))
    ));

    // Unnamed bios do not collide
    store.create_bio(NewBio::new("Intern")).unwrap();
    store.create_bio(NewBio::new("Intern")).unwrap();
    assert_eq!(store.list_bios().unwrap().len(), 3);
}

#[test]
fn test_update_bio_name_unique() {
    let mut store = Store::open_in_memory().unwrap();
    store.create_bio(NewBio::named("J. Doe", "Anchor")).unwrap();
    let other = store.create_bio(NewBio::named("A. Smith", "Reporter")).unwrap();

    // Saving under its own name is fine
    let mut edited = other.clone();
    edited.job_title = "Senior Reporter".to_string();
    store.update_bio(&edited).unwrap();

    edited.name = Some("J. Doe".to_string());
    let result = store.update_bio(&edited);
    match result {
        Err(StoreError::Validation(ValidationError::Duplicate { field, value })) => {
            assert_eq!(field, "name");
            assert_eq!(value, "J. Doe");
        }
        other => panic!("Expected Duplicate, got {:?}", other),
    }

    let stored = store.get_bio(other.id).unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("A. Smith"));
    assert_eq!(stored.job_title, "Senior Reporter");
}

#[test]
fn test_update_job_category() {
    let mut store = Store::open_in_memory().unwrap();
    let news = store
        .create_job_category(NewJobCategory::new("News").with_priority(1))
        .unwrap();
    store
        .create_job_category(NewJobCategory::new("Hosts").with_priority(2))
        .unwrap();

    let mut edited = news.clone();
    edited.name = "Newsroom".to_string();
    edited.priority = Some(3);
    store.update_job_category(&edited).unwrap();

    let names: Vec<String> = store
        .list_job_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Hosts", "Newsroom"]);

    edited.name = String::new();
    assert!(matches!(
        store.update_job_category(&edited),
        Err(StoreError::Validation(ValidationError::Required { field: "name" }))
    ));

    store.delete_job_category(news.id).unwrap();
    assert!(matches!(
        store.update_job_category(&news),
        Err(StoreError::NotFound { entity: "job category", .. })
    ));
}

#[test]
fn test_update_announcement() {
    let mut store = Store::open_in_memory().unwrap();
    let announcement = store
        .create_announcement(NewAnnouncement::new("Pledge drive", "", true))
        .unwrap();

    let mut edited = announcement.clone();
    edited.title = "Pledge drive extended".to_string();
    edited.active = false;
    edited.pub_date = Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    store.update_announcement(&edited).unwrap();

    assert!(store.list_active_announcements().unwrap().is_empty());
    let stored = store.get_announcement(announcement.id).unwrap().unwrap();
    assert_eq!(stored, edited);

    store.delete_announcement(announcement.id).unwrap();
    assert!(matches!(
        store.update_announcement(&edited),
        Err(StoreError::NotFound { entity: "announcement", .. })
    ));
}

#[test]
fn test_bio_missing_category() {
    let mut store = Store::open_in_memory().unwrap();

    let result = store.create_bio(NewBio::named("J. Doe", "Anchor").with_category(JobCategoryId(3)));
    assert!(matches!(
        result,
        Err(StoreError::Reference { entity: "job category", id: 3 })
    ));
}

#[test]
fn test_visible_bios() {
    let mut store = Store::open_in_memory().unwrap();
    store.create_bio(NewBio::named("On Air", "Host")).unwrap();
    store.create_bio(NewBio::named("Backstage", "Engineer").hidden()).unwrap();

    let visible = store.list_visible_bios().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name.as_deref(), Some("On Air"));
    assert_eq!(visible[0].slug.as_deref(), Some("on-air"));
}

#[test]
fn test_detach_user_keeps_bio() {
    let mut store = Store::open_in_memory().unwrap();
    let bio = store
        .create_bio(NewBio::named("J. Doe", "Anchor").with_user(UserId(12)))
        .unwrap();

    assert_eq!(store.detach_user(UserId(12)).unwrap(), 1);
    assert_eq!(store.detach_user(UserId(12)).unwrap(), 0);

    let bio = store.get_bio(bio.id).unwrap().unwrap();
    assert_eq!(bio.user, None);
    assert_eq!(bio.name.as_deref(), Some("J. Doe"));
}

#[test]
fn test_active_announcements_newest_first() {
    let mut store = Store::open_in_memory().unwrap();
    let older = store
        .create_announcement(
            NewAnnouncement::new("Older", "", true)
                .published_at(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()),
        )
        .unwrap();
    let newer = store
        .create_announcement(
            NewAnnouncement::new("Newer", "", true)
                .published_at(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()),
        )
        .unwrap();
    let undated = store
        .create_announcement(NewAnnouncement::new("Undated", "", true))
        .unwrap();
    store
        .create_announcement(NewAnnouncement::new("Retired", "", false))
        .unwrap();

    let ids: Vec<_> = store
        .list_active_announcements()
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![newer.id, older.id, undated.id]);
    assert_eq!(store.list_announcements().unwrap().len(), 4);

    let stored = store.get_announcement(older.id).unwrap().unwrap();
    assert_eq!(stored.pub_date, older.pub_date);
}

#[test]
fn test_update_missing_record() {
    let mut store = Store::open_in_memory().unwrap();
    let content = store.create_content(NewContent::new("About", "")).unwrap();
    store.delete_content(content.id).unwrap();

    assert!(matches!(
        store.update_content(&content),
        Err(StoreError::NotFound { entity: "content", .. })
    ));
    assert!(matches!(
        store.delete_content(content.id),
        Err(StoreError::NotFound { .. })
    ));
}

#[test]
fn test_on_disk_store_persists() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("airwaves.db");

    {
        let mut store = Store::open(&path).unwrap();
        store
            .create_program(NewProgram::new("Morning Show", "Wake up"))
            .unwrap();
    }

    let store = Store::open(&path).unwrap();
    let program = store.get_program_by_slug("morning-show").unwrap().unwrap();
    assert_eq!(program.title, "Morning Show");
}
