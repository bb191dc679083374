mod common;

use attendance::error::AppError;
use attendance::models::{ClassSchedule, ConflictQuery, DayOfWeek, ScheduleRequest};
use attendance::services::ScheduleService;
use chrono::NaiveTime;
use common::{Fixture, seed, setup_test_db, time};

fn request(fx: &Fixture, room: &str, day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> ScheduleRequest {
    ScheduleRequest {
        offered_course_id: fx.offered.id.clone(),
        classroom_id: room.to_string(),
        day_of_week: day,
        start_time: start,
        end_time: end,
        is_active: true,
    }
}

fn assert_no_overlaps(schedules: &[ClassSchedule]) {
    for (i, a) in schedules.iter().enumerate() {
        for b in &schedules[i + 1..] {
            let clash = a.is_active
                && b.is_active
                && a.classroom_id == b.classroom_id
                && a.day_of_week == b.day_of_week
                && a.overlaps(b.start_time, b.end_time);
            assert!(!clash, "schedules {} and {} overlap", a.id, b.id);
        }
    }
}

#[tokio::test]
async fn test_identical_slot_is_rejected() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    let first = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 30)))
        .await
        .expect("first booking should succeed");

    let err = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 30)))
        .await
        .unwrap_err();

    match err {
        AppError::ScheduleConflict(ids) => assert_eq!(ids, vec![first.id]),
        other => panic!("expected ScheduleConflict, got {:?}", other),
    }
    assert_eq!(service.list_schedules(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_back_to_back_and_other_rooms_are_allowed() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 30)))
        .await
        .unwrap();
    service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(10, 30), time(12, 0)))
        .await
        .expect("touching intervals do not overlap");
    service
        .create_schedule(request(&fx, &fx.room_b.id, DayOfWeek::Monday, time(9, 0), time(10, 30)))
        .await
        .expect("different room");
    service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Tuesday, time(9, 0), time(10, 30)))
        .await
        .expect("different day");

    let err = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(10, 0), time(11, 0)))
        .await
        .unwrap_err();
    match err {
        AppError::ScheduleConflict(ids) => assert_eq!(ids.len(), 2),
        other => panic!("expected ScheduleConflict, got {:?}", other),
    }

    assert_no_overlaps(&service.list_schedules(false).await.unwrap());
}

#[tokio::test]
async fn test_invalid_range_and_unknown_references() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    let err = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Friday, time(11, 0), time(11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = service
        .create_schedule(request(&fx, "no-such-room", DayOfWeek::Friday, time(9, 0), time(10, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_check_conflicts_excludes_given_schedule() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    let booked = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Wednesday, time(13, 0), time(14, 0)))
        .await
        .unwrap();

    let mut query = ConflictQuery {
        classroom_id: fx.room_a.id.clone(),
        day_of_week: DayOfWeek::Wednesday,
        start_time: time(13, 30),
        end_time: time(15, 0),
        exclude_schedule_id: None,
    };
    let found = service.check_conflicts(&query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, booked.id);

    query.exclude_schedule_id = Some(booked.id.clone());
    assert!(service.check_conflicts(&query).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_does_not_conflict_with_itself() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    let booked = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Thursday, time(8, 0), time(9, 0)))
        .await
        .unwrap();
    let other = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Thursday, time(10, 0), time(11, 0)))
        .await
        .unwrap();

    let moved = service
        .update_schedule(&booked.id, request(&fx, &fx.room_a.id, DayOfWeek::Thursday, time(8, 30), time(9, 30)))
        .await
        .expect("moving within its own slot is fine");
    assert_eq!(moved.start_time, time(8, 30));

    let err = service
        .update_schedule(&booked.id, request(&fx, &fx.room_a.id, DayOfWeek::Thursday, time(9, 30), time(10, 30)))
        .await
        .unwrap_err();
    match err {
        AppError::ScheduleConflict(ids) => assert_eq!(ids, vec![other.id]),
        other => panic!("expected ScheduleConflict, got {:?}", other),
    }

    let err = service
        .update_schedule("missing", request(&fx, &fx.room_a.id, DayOfWeek::Thursday, time(8, 0), time(9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_deactivated_slot_frees_room_and_blocks_reactivation() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    let original = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 0)))
        .await
        .unwrap();
    service.deactivate_schedule(&original.id).await.unwrap();
    service
        .deactivate_schedule(&original.id)
        .await
        .expect("deactivating twice is a no-op");

    let replacement = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 0)))
        .await
        .expect("inactive schedules do not block the slot");

    let err = service
        .update_schedule(&original.id, request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 0)))
        .await
        .unwrap_err();
    match err {
        AppError::ScheduleConflict(ids) => assert_eq!(ids, vec![replacement.id.clone()]),
        other => panic!("expected ScheduleConflict, got {:?}", other),
    }

    let active = service.list_schedules(true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, replacement.id);
    assert_no_overlaps(&service.list_schedules(false).await.unwrap());

    let err = service.deactivate_schedule("missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_and_listing_queries() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    let monday = service
        .create_schedule(request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 0)))
        .await
        .unwrap();
    service
        .create_schedule(request(&fx, &fx.room_b.id, DayOfWeek::Friday, time(9, 0), time(10, 0)))
        .await
        .unwrap();

    let mondays = service.list_by_day(DayOfWeek::Monday).await.unwrap();
    assert_eq!(mondays.len(), 1);
    assert_eq!(service.list_by_course(&fx.course.id).await.unwrap().len(), 2);

    service.delete_schedule(&monday.id).await.unwrap();
    assert!(matches!(
        service.get_schedule(&monday.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        service.delete_schedule(&monday.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_listings_follow_calendar_weekday_order() {
    let pool = setup_test_db().await;
    let fx = seed(&pool).await;
    let service = ScheduleService::new(pool.clone());

    for (day, start) in [
        (DayOfWeek::Friday, time(8, 0)),
        (DayOfWeek::Wednesday, time(13, 0)),
        (DayOfWeek::Monday, time(10, 0)),
        (DayOfWeek::Sunday, time(9, 0)),
        (DayOfWeek::Monday, time(7, 0)),
    ] {
        service
            .create_schedule(request(&fx, &fx.room_a.id, day, start, start + chrono::Duration::hours(1)))
            .await
            .unwrap();
    }

    let expected = vec![
        (DayOfWeek::Monday, time(7, 0)),
        (DayOfWeek::Monday, time(10, 0)),
        (DayOfWeek::Wednesday, time(13, 0)),
        (DayOfWeek::Friday, time(8, 0)),
        (DayOfWeek::Sunday, time(9, 0)),
    ];
    let order = |rows: Vec<ClassSchedule>| -> Vec<(DayOfWeek, NaiveTime)> {
        rows.into_iter().map(|s| (s.day_of_week, s.start_time)).collect()
    };

    assert_eq!(order(service.list_schedules(false).await.unwrap()), expected);
    assert_eq!(order(service.list_by_course(&fx.course.id).await.unwrap()), expected);
}

#[tokio::test]
async fn test_concurrent_identical_creates_store_one_and_reject_the_rest() {
    let (pool, path) = common::setup_file_db(5).await;
    let fx = seed(&pool).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = ScheduleService::new(pool.clone());
        let req = request(&fx, &fx.room_a.id, DayOfWeek::Monday, time(9, 0), time(10, 30));
        handles.push(tokio::spawn(async move { service.create_schedule(req).await }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => created += 1,
            Err(AppError::ScheduleConflict(_)) => conflicts += 1,
            Err(other) => panic!("expected ScheduleConflict, got {:?}", other),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);

    let stored = ScheduleService::new(pool.clone()).list_schedules(false).await.unwrap();
    assert_eq!(stored.len(), 1);

    common::remove_file_db(pool, path).await;
}
