mod common;

use chrono::NaiveDate;
use common::{memory_pool, seed_user, ts};
use timedesk::config::WorkConfig;
use timedesk::core::entries::{EntryLogic, validate};
use timedesk::db::queries::count_entries;
use timedesk::errors::AppError;
use timedesk::models::category::EntryCategory;
use timedesk::models::entry::{EntryFilter, EntryInput, InsertOutcome};
use timedesk::models::user::Role;

fn input(date: &str, start: &str, end: &str, kind: &str) -> EntryInput {
    EntryInput {
        date: date.into(),
        start_time: start.into(),
        end_time: end.into(),
        category: kind.into(),
        description: "standup".into(),
    }
}

#[test]
fn validation_rejects_bad_fields() {
    let work = WorkConfig::default();

    assert!(matches!(
        validate(&input("2024-13-01", "09:00", "10:00", "work"), &work),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        validate(&input("2024-11-25", "9:00", "10:00", "work"), &work),
        Err(AppError::InvalidTime(_))
    ));
    assert!(matches!(
        validate(&input("2024-11-25", "09:00", "24:00", "work"), &work),
        Err(AppError::InvalidTime(_))
    ));
    assert!(matches!(
        validate(&input("2024-11-25", "09:00", "10:00", "lunch"), &work),
        Err(AppError::InvalidCategory(_))
    ));

    let mut long = input("2024-11-25", "09:00", "10:00", "work");
    long.description = "é".repeat(work.max_description_length + 1);
    assert!(matches!(validate(&long, &work), Err(AppError::DescriptionTooLong(500))));

    long.description = "é".repeat(work.max_description_length);
    assert!(validate(&long, &work).is_ok());
}

#[test]
fn category_input_is_lenient() {
    let v = validate(&input("2024-11-25", "09:00", "10:00", " Course "), &WorkConfig::default()).unwrap();
    assert_eq!(v.category, EntryCategory::Course);
}

#[test]
fn duplicates_are_skipped_not_errors() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let bob = seed_user(&pool, "bob", Role::User);
    let work = WorkConfig::default();
    let now = ts("2024-11-25 18:00:00");
    let e = input("2024-11-25", "09:00", "12:00", "work");

    let first = EntryLogic::create(&pool, &work, &alice, &e, now).unwrap();
    assert!(first.was_inserted());
    assert_eq!(EntryLogic::create(&pool, &work, &alice, &e, now).unwrap(), InsertOutcome::Skipped);

    // same interval for another owner, or another category, is distinct
    assert!(EntryLogic::create(&pool, &work, &bob, &e, now).unwrap().was_inserted());
    let course = input("2024-11-25", "09:00", "12:00", "course");
    assert!(EntryLogic::create(&pool, &work, &alice, &course, now).unwrap().was_inserted());

    assert_eq!(count_entries(&pool.conn).unwrap(), 3);
}

#[test]
fn daily_limit_is_per_owner_and_date() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let bob = seed_user(&pool, "bob", Role::User);
    let work = WorkConfig {
        max_entries_per_day: 2,
        ..WorkConfig::default()
    };
    let now = ts("2024-11-25 18:00:00");

    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "08:00", "09:00", "work"), now).unwrap();
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "09:00", "10:00", "work"), now).unwrap();
    assert!(matches!(
        EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "10:00", "11:00", "work"), now),
        Err(AppError::DailyLimitReached(2))
    ));

    assert!(EntryLogic::create(&pool, &work, &alice, &input("2024-11-26", "10:00", "11:00", "work"), now).is_ok());
    assert!(EntryLogic::create(&pool, &work, &bob, &input("2024-11-25", "10:00", "11:00", "work"), now).is_ok());
}

#[test]
fn moving_an_entry_respects_the_target_day_limit() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let work = WorkConfig {
        max_entries_per_day: 2,
        ..WorkConfig::default()
    };
    let now = ts("2024-11-26 18:00:00");

    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "08:00", "09:00", "work"), now).unwrap();
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "09:00", "10:00", "work"), now).unwrap();
    let InsertOutcome::Inserted(id) =
        EntryLogic::create(&pool, &work, &alice, &input("2024-11-26", "09:00", "10:00", "work"), now).unwrap()
    else {
        panic!("expected insert");
    };
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-26", "10:00", "11:00", "work"), now).unwrap();

    assert!(matches!(
        EntryLogic::update(&pool, &work, &alice, id, &input("2024-11-25", "13:00", "14:00", "work"), now),
        Err(AppError::DailyLimitReached(2))
    ));

    // editing within a full day is still allowed
    assert_eq!(
        EntryLogic::update(&pool, &work, &alice, id, &input("2024-11-26", "09:00", "09:30", "work"), now).unwrap(),
        InsertOutcome::Inserted(id)
    );
}

#[test]
fn only_owner_or_admin_may_modify() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let bob = seed_user(&pool, "bob", Role::User);
    let boss = seed_user(&pool, "boss", Role::Admin);
    let work = WorkConfig::default();
    let now = ts("2024-11-25 18:00:00");

    let InsertOutcome::Inserted(id) =
        EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "09:00", "12:00", "work"), now).unwrap()
    else {
        panic!("expected insert");
    };

    let edit = input("2024-11-25", "09:00", "12:30", "work");
    assert!(matches!(
        EntryLogic::update(&pool, &work, &bob, id, &edit, now),
        Err(AppError::Forbidden)
    ));
    assert!(matches!(EntryLogic::delete(&pool, &bob, id), Err(AppError::Forbidden)));

    assert_eq!(
        EntryLogic::update(&pool, &work, &alice, id, &edit, now).unwrap(),
        InsertOutcome::Inserted(id)
    );
    let removed = EntryLogic::delete(&pool, &boss, id).unwrap();
    assert_eq!(removed.duration_minutes(), 210);
    assert_eq!(removed.user_id, alice.id);

    assert!(matches!(EntryLogic::delete(&pool, &boss, id), Err(AppError::EntryNotFound(_))));
}

#[test]
fn update_onto_existing_entry_is_skipped() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let work = WorkConfig::default();
    let now = ts("2024-11-25 18:00:00");

    let a = input("2024-11-25", "09:00", "10:00", "work");
    let b = input("2024-11-25", "10:00", "11:00", "work");
    EntryLogic::create(&pool, &work, &alice, &a, now).unwrap();
    let InsertOutcome::Inserted(id_b) = EntryLogic::create(&pool, &work, &alice, &b, now).unwrap() else {
        panic!("expected insert");
    };

    assert_eq!(
        EntryLogic::update(&pool, &work, &alice, id_b, &a, now).unwrap(),
        InsertOutcome::Skipped
    );
}

#[test]
fn listing_filters_and_last_end_time() {
    let pool = memory_pool();
    let alice = seed_user(&pool, "alice", Role::User);
    let bob = seed_user(&pool, "bob", Role::User);
    let work = WorkConfig::default();
    let now = ts("2024-11-25 18:00:00");

    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "13:00", "17:00", "work"), now).unwrap();
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "09:00", "12:00", "work"), now).unwrap();
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "12:00", "12:30", "break"), now).unwrap();
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-28", "09:00", "10:00", "course"), now).unwrap();
    EntryLogic::create(&pool, &work, &bob, &input("2024-11-25", "09:00", "18:00", "work"), now).unwrap();

    let d25 = NaiveDate::from_ymd_opt(2024, 11, 25).unwrap();

    let alice_day = EntryLogic::list(
        &pool,
        &EntryFilter {
            from: Some(d25),
            to: Some(d25),
            user_id: Some(alice.id),
            ..Default::default()
        },
    )
    .unwrap();
    let starts: Vec<String> = alice_day.iter().map(|e| e.start_str()).collect();
    assert_eq!(starts, ["09:00", "12:00", "13:00"]);

    let breaks = EntryLogic::list(
        &pool,
        &EntryFilter {
            category: Some(EntryCategory::Break),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(breaks.len(), 1);

    assert_eq!(EntryLogic::list(&pool, &EntryFilter::default()).unwrap().len(), 5);

    assert_eq!(
        EntryLogic::last_end_time(&pool, &alice, d25).unwrap().as_deref(),
        Some("17:00")
    );
    assert_eq!(
        EntryLogic::last_end_time(&pool, &alice, NaiveDate::from_ymd_opt(2024, 11, 26).unwrap()).unwrap(),
        None
    );
}

#[test]
fn deleting_a_user_removes_their_entries() {
    let pool = memory_pool();
    let _boss = seed_user(&pool, "boss", Role::Admin);
    let alice = seed_user(&pool, "alice", Role::User);
    let work = WorkConfig::default();
    EntryLogic::create(&pool, &work, &alice, &input("2024-11-25", "09:00", "12:00", "work"), ts("2024-11-25 18:00:00")).unwrap();

    timedesk::core::users::UserLogic::delete(&pool, alice.id).unwrap();
    assert_eq!(count_entries(&pool.conn).unwrap(), 0);
}
