use jiff::civil::date;
use tempfile::NamedTempFile;
use waypoint_core::{
    models::{ActivityCategory, Destination, NewActivity, NewTrip, UpdateDayRequest},
    Database, ItineraryError, TripPolicy,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn new_trip(start: (i16, i8, i8), end: (i16, i8, i8)) -> NewTrip {
    NewTrip {
        title: "Test Trip".to_string(),
        description: None,
        destination: Destination::labeled("Porto, Portugal"),
        start_date: date(start.0, start.1, start.2),
        end_date: date(end.0, end.1, end.2),
        budget: None,
        cover_image: None,
        images: Vec::new(),
    }
}

fn new_activity(title: &str) -> NewActivity {
    NewActivity {
        title: title.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Reopening an initialized file is fine.
    Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_create_trip_generates_days() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 5)))
        .expect("Failed to create trip");

    assert!(trip.id > 0);
    assert_eq!(trip.owner_id, "alice");
    assert_eq!(trip.days.len(), 5);
    for (i, day) in trip.days.iter().enumerate() {
        assert_eq!(day.day_number, i as u32 + 1);
        assert_eq!(day.title, format!("Day {}", i + 1));
        assert_eq!(day.trip_id, trip.id);
        assert!(day.activities.is_empty());
    }
    assert_eq!(trip.days[0].date, date(2024, 6, 1));
    assert_eq!(trip.days[4].date, date(2024, 6, 5));
}

#[test]
fn test_create_trip_stores_images_in_order() {
    let (_temp_file, mut db) = create_test_db();

    let mut trip = new_trip((2024, 6, 1), (2024, 6, 1));
    trip.images = vec![
        "https://img.example.com/b.jpg".to_string(),
        "https://img.example.com/a.jpg".to_string(),
    ];
    trip.destination.latitude = Some(41.1579);
    trip.destination.address = Some(serde_json::json!({ "city": "Porto" }));

    let trip = db.create_trip("alice", &trip).expect("Failed to create trip");
    let urls: Vec<_> = trip.images.iter().map(|i| i.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://img.example.com/b.jpg", "https://img.example.com/a.jpg"]
    );
    assert_eq!(trip.images[1].order, 1);
    assert_eq!(trip.destination.latitude, Some(41.1579));
    assert_eq!(
        trip.destination.address,
        Some(serde_json::json!({ "city": "Porto" }))
    );
}

#[test]
fn test_create_trip_rejects_reversed_range_without_writing() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.create_trip("alice", &new_trip((2024, 6, 5), (2024, 6, 1)));
    assert!(matches!(result, Err(ItineraryError::InvalidInput { .. })));
    assert!(db.list_trips("alice").unwrap().is_empty());
}

#[test]
fn test_get_trip_missing() {
    let (_temp_file, db) = create_test_db();
    assert!(db.get_trip(42).unwrap().is_none());
    assert!(db.get_day(42).unwrap().is_none());
    assert!(db.get_activity(42).unwrap().is_none());
}

#[test]
fn test_list_trips_by_owner_ordered_by_start() {
    let (_temp_file, mut db) = create_test_db();

    let later = db
        .create_trip("alice", &new_trip((2025, 3, 1), (2025, 3, 2)))
        .unwrap();
    let earlier = db
        .create_trip("alice", &new_trip((2024, 11, 1), (2024, 11, 3)))
        .unwrap();
    db.create_trip("bob", &new_trip((2024, 1, 1), (2024, 1, 1)))
        .unwrap();

    db.add_activity(earlier.days[0].id, &NewActivity {
        cost: 30.0,
        ..new_activity("Lunch")
    })
    .unwrap();

    let trips = db.list_trips("alice").unwrap();
    assert_eq!(
        trips.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![earlier.id, later.id]
    );
    assert_eq!(trips[0].day_count, 3);
    assert_eq!(trips[0].activity_count, 1);
    assert_eq!(trips[0].total_cost, 30.0);
    assert_eq!(trips[1].activity_count, 0);

    assert!(db.list_trips("carol").unwrap().is_empty());
}

#[test]
fn test_add_activity_appends_in_order() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 2)))
        .unwrap();
    let day_id = trip.days[1].id;

    let first = db.add_activity(day_id, &new_activity("Museum")).unwrap();
    let second = db
        .add_activity(day_id, &NewActivity {
            category: ActivityCategory::Food,
            ..new_activity("Dinner")
        })
        .unwrap();

    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);
    assert_eq!(second.category, ActivityCategory::Food);

    let stored = db.get_activities(day_id).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].title, "Dinner");

    // Other days are untouched.
    assert!(db.get_activities(trip.days[0].id).unwrap().is_empty());
}

#[test]
fn test_add_activity_to_missing_day() {
    let (_temp_file, mut db) = create_test_db();
    let err = db.add_activity(999, &new_activity("Nowhere")).unwrap_err();
    assert!(matches!(err, ItineraryError::DayNotFound { id: 999 }));
}

#[test]
fn test_delete_activity_keeps_positions_contiguous() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 1)))
        .unwrap();
    let day_id = trip.days[0].id;

    let ids: Vec<u64> = ["A", "B", "C", "D"]
        .iter()
        .map(|t| db.add_activity(day_id, &new_activity(t)).unwrap().id)
        .collect();

    let removed = db.delete_activity(ids[1]).unwrap();
    assert_eq!(removed.title, "B");

    let remaining = db.get_activities(day_id).unwrap();
    assert_eq!(
        remaining.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(),
        vec!["A", "C", "D"]
    );
    assert_eq!(
        remaining.iter().map(|a| a.position).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    // The next append lands right after the last one.
    let appended = db.add_activity(day_id, &new_activity("E")).unwrap();
    assert_eq!(appended.position, 3);

    assert!(matches!(
        db.delete_activity(ids[1]),
        Err(ItineraryError::ActivityNotFound { .. })
    ));
}

#[test]
fn test_reorder_activities() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 1)))
        .unwrap();
    let day_id = trip.days[0].id;
    let a = db.add_activity(day_id, &new_activity("A")).unwrap().id;
    let b = db.add_activity(day_id, &new_activity("B")).unwrap().id;
    let c = db.add_activity(day_id, &new_activity("C")).unwrap().id;

    let reordered = db.reorder_activities(day_id, &[c, a, b]).unwrap();
    assert_eq!(reordered.iter().map(|x| x.id).collect::<Vec<_>>(), vec![c, a, b]);
    assert_eq!(
        reordered.iter().map(|x| x.position).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn test_reorder_rejects_non_permutations_and_keeps_order() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 2)))
        .unwrap();
    let day_id = trip.days[0].id;
    let a = db.add_activity(day_id, &new_activity("A")).unwrap().id;
    let b = db.add_activity(day_id, &new_activity("B")).unwrap().id;
    let foreign = db
        .add_activity(trip.days[1].id, &new_activity("Elsewhere"))
        .unwrap()
        .id;

    for bad in [vec![a], vec![a, a], vec![a, foreign], vec![a, b, foreign]] {
        let err = db.reorder_activities(day_id, &bad).unwrap_err();
        assert!(
            matches!(err, ItineraryError::InvalidInput { ref field, .. } if field == "activity_ids"),
            "unexpected error for {bad:?}: {err:?}"
        );
    }

    let unchanged = db.get_activities(day_id).unwrap();
    assert_eq!(unchanged.iter().map(|x| x.id).collect::<Vec<_>>(), vec![a, b]);

    assert!(matches!(
        db.reorder_activities(999, &[]),
        Err(ItineraryError::DayNotFound { id: 999 })
    ));
    // An empty day accepts the empty permutation.
    let empty_day = db
        .create_trip("alice", &new_trip((2024, 7, 1), (2024, 7, 1)))
        .unwrap()
        .days[0]
        .id;
    assert!(db.reorder_activities(empty_day, &[]).unwrap().is_empty());
}

#[test]
fn test_move_activity() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 1)))
        .unwrap();
    let day_id = trip.days[0].id;
    let a = db.add_activity(day_id, &new_activity("A")).unwrap().id;
    let b = db.add_activity(day_id, &new_activity("B")).unwrap().id;
    let c = db.add_activity(day_id, &new_activity("C")).unwrap().id;

    let moved = db.move_activity(c, 0).unwrap();
    assert_eq!(moved.iter().map(|x| x.id).collect::<Vec<_>>(), vec![c, a, b]);

    // Positions past the end clamp to the last slot.
    let moved = db.move_activity(c, 99).unwrap();
    assert_eq!(moved.iter().map(|x| x.id).collect::<Vec<_>>(), vec![a, b, c]);
    assert_eq!(moved[2].position, 2);

    assert!(matches!(
        db.move_activity(12345, 0),
        Err(ItineraryError::ActivityNotFound { id: 12345 })
    ));
}

#[test]
fn test_update_day() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 2)))
        .unwrap();
    let day_id = trip.days[1].id;

    let day = db
        .update_day(day_id, &UpdateDayRequest {
            title: Some("Day trip to Sintra".to_string()),
            notes: Some("Train from Rossio at 9".to_string()),
        })
        .unwrap();
    assert_eq!(day.title, "Day trip to Sintra");
    assert_eq!(day.notes.as_deref(), Some("Train from Rossio at 9"));
    assert_eq!(day.date, date(2024, 6, 2));

    let day = db
        .update_day(day_id, &UpdateDayRequest {
            title: None,
            notes: Some(String::new()),
        })
        .unwrap();
    assert_eq!(day.title, "Day trip to Sintra");
    assert_eq!(day.notes, None);

    assert!(matches!(
        db.update_day(999, &UpdateDayRequest::default()),
        Err(ItineraryError::DayNotFound { id: 999 })
    ));
}

#[test]
fn test_delete_trip_cascades() {
    let (temp_file, mut db) = create_test_db();
    let mut params = new_trip((2024, 6, 1), (2024, 6, 3));
    params.images = vec!["https://img.example.com/1.jpg".to_string()];
    let trip = db.create_trip("alice", &params).unwrap();
    let activity = db
        .add_activity(trip.days[2].id, &new_activity("Fado night"))
        .unwrap();

    let deleted = db.delete_trip(trip.id).unwrap();
    assert_eq!(deleted.days.len(), 3);
    assert_eq!(deleted.activity_count(), 1);

    assert!(db.get_trip(trip.id).unwrap().is_none());
    assert!(db.get_day(trip.days[0].id).unwrap().is_none());
    assert!(db.get_activity(activity.id).unwrap().is_none());

    let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
    for table in ["trip_images", "itinerary_days", "activities"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "{table} still has rows");
    }

    assert!(matches!(
        db.delete_trip(trip.id),
        Err(ItineraryError::TripNotFound { .. })
    ));
}

#[test]
fn test_update_trip_shrinks_and_grows_itinerary() {
    let (_temp_file, mut db) = create_test_db();
    let policy = TripPolicy::default();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 4)))
        .unwrap();
    let kept = db.add_activity(trip.days[1].id, &new_activity("Kept")).unwrap();
    let dropped = db
        .add_activity(trip.days[3].id, &new_activity("Dropped"))
        .unwrap();

    let shrunk = db
        .update_trip(
            trip.id,
            &waypoint_core::models::UpdateTripRequest {
                start_date: Some(date(2024, 6, 10)),
                end_date: Some(date(2024, 6, 11)),
                ..Default::default()
            },
            &policy,
        )
        .unwrap();

    assert_eq!(shrunk.days.len(), 2);
    assert_eq!(shrunk.days[0].id, trip.days[0].id);
    assert_eq!(shrunk.days[1].date, date(2024, 6, 11));
    assert_eq!(shrunk.days[1].activities[0].id, kept.id);
    assert!(db.get_activity(dropped.id).unwrap().is_none());

    let grown = db
        .update_trip(
            trip.id,
            &waypoint_core::models::UpdateTripRequest {
                end_date: Some(date(2024, 6, 13)),
                ..Default::default()
            },
            &policy,
        )
        .unwrap();
    assert_eq!(grown.days.len(), 4);
    assert_eq!(grown.days[3].title, "Day 4");
    assert_eq!(grown.days[3].date, date(2024, 6, 13));
    assert_eq!(grown.days[1].activities.len(), 1);
}

#[test]
fn test_update_trip_rejects_reversed_dates_without_changes() {
    let (_temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 3)))
        .unwrap();

    let err = db
        .update_trip(
            trip.id,
            &waypoint_core::models::UpdateTripRequest {
                end_date: Some(date(2024, 5, 1)),
                ..Default::default()
            },
            &TripPolicy::default(),
        )
        .unwrap_err();
    assert!(err.is_validation());

    let stored = db.get_trip(trip.id).unwrap().unwrap();
    assert_eq!(stored.end_date, date(2024, 6, 3));
    assert_eq!(stored.days.len(), 3);
}

#[test]
fn test_reads_release_the_file_for_other_writers() {
    let (temp_file, mut writer) = create_test_db();
    let reader = Database::new(temp_file.path()).unwrap();
    let trip = writer
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 3)))
        .unwrap();

    let before = reader.get_trip(trip.id).unwrap().unwrap();
    assert_eq!(before.days.len(), 3);
    assert!(reader.get_day(before.days[0].id).unwrap().is_some());

    writer
        .update_trip(
            trip.id,
            &waypoint_core::models::UpdateTripRequest {
                start_date: Some(date(2024, 7, 1)),
                end_date: Some(date(2024, 7, 5)),
                ..Default::default()
            },
            &TripPolicy::default(),
        )
        .unwrap();

    let after = reader.get_trip(trip.id).unwrap().unwrap();
    assert_eq!(after.start_date, date(2024, 7, 1));
    assert_eq!(after.days.len(), 5);
    for (offset, day) in after.days.iter().enumerate() {
        assert_eq!(day.day_number, offset as u32 + 1);
        assert_eq!(day.date, date(2024, 7, 1 + offset as i8));
    }
}

#[test]
fn test_schema_rejects_negative_costs() {
    let (temp_file, mut db) = create_test_db();
    let trip = db
        .create_trip("alice", &new_trip((2024, 6, 1), (2024, 6, 1)))
        .unwrap();

    let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
    let result = conn.execute(
        "INSERT INTO activities (day_id, title, cost, category, position, created_at, updated_at) VALUES (?1, 'x', -1, 'food', 0, 'now', 'now')",
        [trip.days[0].id as i64],
    );
    assert!(result.is_err());
}
