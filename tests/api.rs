mod helpers;

use chrono::{Duration, Utc};
use helpers::setup::spawn_app;
use std::sync::Arc;
use tanam_domain::{PlantingHistory, Reminder};
use tanam_infra::RealSys;
use tanam_sdk::{
    APIError, CreateReminderInput, DismissalStore, InMemoryKeyValueStore, NotificationSurface,
    ReminderId, ReminderType, SurfaceStatus, TanamSDK, ID,
};

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_upcoming_reminders_requires_session() {
    let (app, sdk) = spawn_app().await;
    assert!(matches!(
        sdk.reminder.upcoming().await,
        Err(APIError::Unauthorized)
    ));

    let forged = TanamSDK::new(app.address.clone(), "not-a-token");
    assert!(matches!(
        forged.reminder.upcoming().await,
        Err(APIError::Unauthorized)
    ));

    let missing = ReminderId::Persisted(ID::new());
    assert!(matches!(
        sdk.reminder.complete(&missing).await,
        Err(APIError::Unauthorized)
    ));
}

#[actix_web::main]
#[test]
async fn test_synthesizes_watering_reminder_for_active_planting() {
    let (app, _) = spawn_app().await;
    let user_id = ID::new();
    let tomato = PlantingHistory::new(user_id.clone(), "Tomat");
    app.ctx
        .repos
        .planting_histories
        .insert(&tomato)
        .await
        .expect("Expected to insert planting");
    let mut harvested = PlantingHistory::new(user_id.clone(), "Cabai");
    harvested.is_completed = true;
    app.ctx
        .repos
        .planting_histories
        .insert(&harvested)
        .await
        .expect("Expected to insert planting");

    let sdk = app.sdk_for(&user_id);
    let reminders = sdk
        .reminder
        .upcoming()
        .await
        .expect("Expected to get reminders");
    assert_eq!(reminders.len(), 1);
    let watering = &reminders[0];
    assert_eq!(
        watering.id.to_string(),
        format!("auto-reminder-{}-watering", tomato.id)
    );
    assert_eq!(watering.reminder_type, ReminderType::Watering);
    assert_eq!(watering.message, "Siram tanaman Tomat Anda");
    assert_eq!(watering.crop_name.as_deref(), Some("Tomat"));
    assert!(!watering.is_completed);

    let again = sdk
        .reminder
        .upcoming()
        .await
        .expect("Expected to get reminders");
    assert_eq!(again[0].id, watering.id);

    // Other users do not see it
    let stranger = app.sdk_for(&ID::new());
    assert!(stranger
        .reminder
        .upcoming()
        .await
        .expect("Expected to get reminders")
        .is_empty());
}

#[actix_web::main]
#[test]
async fn test_complete_reminder_is_idempotent() {
    let (app, _) = spawn_app().await;
    let user_id = ID::new();
    let now = Utc::now();
    let reminder = Reminder::new(
        user_id.clone(),
        ReminderType::Fertilizing,
        "Beri pupuk kompos",
        now + Duration::days(1),
        now,
    );
    app.ctx
        .repos
        .reminders
        .insert(&reminder)
        .await
        .expect("Expected to insert reminder");

    let sdk = app.sdk_for(&user_id);
    let reminder_id = ReminderId::Persisted(reminder.id.clone());
    let upcoming = sdk.reminder.upcoming().await.expect("Expected reminders");
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, reminder_id);

    for _ in 0..2 {
        let res = sdk
            .reminder
            .complete(&reminder_id)
            .await
            .expect("Expected to complete reminder");
        assert!(res.ok);
    }

    let stored = app
        .ctx
        .repos
        .reminders
        .find_by_user(&reminder.id, &user_id)
        .await
        .expect("Expected to query reminder")
        .expect("Expected reminder to exist");
    assert!(stored.is_completed);
    assert!(stored.completed_at.is_some());
}

#[actix_web::main]
#[test]
async fn test_cannot_complete_reminder_of_other_user() {
    let (app, _) = spawn_app().await;
    let owner = ID::new();
    let now = Utc::now();
    let reminder = Reminder::new(owner.clone(), ReminderType::Harvest, "Panen", now, now);
    app.ctx
        .repos
        .reminders
        .insert(&reminder)
        .await
        .expect("Expected to insert reminder");

    let stranger = app.sdk_for(&ID::new());
    let res = stranger
        .reminder
        .complete(&ReminderId::Persisted(reminder.id.clone()))
        .await;
    assert!(matches!(res, Err(APIError::NotFound)));

    let stored = app
        .ctx
        .repos
        .reminders
        .find_by_user(&reminder.id, &owner)
        .await
        .expect("Expected to query reminder")
        .expect("Expected reminder to exist");
    assert!(!stored.is_completed);
}

#[actix_web::main]
#[test]
async fn test_complete_unknown_reminders_is_not_found() {
    let (app, _) = spawn_app().await;
    let user_id = ID::new();
    let sdk = app.sdk_for(&user_id);

    let unknown = ReminderId::Persisted(ID::new());
    let synthesized = ReminderId::Synthesized {
        planting_id: ID::new(),
        kind: ReminderType::Watering,
    };
    for reminder_id in [unknown, synthesized] {
        assert!(matches!(
            sdk.reminder.complete(&reminder_id).await,
            Err(APIError::NotFound)
        ));
    }
}

#[actix_web::main]
#[test]
async fn test_created_watering_reminder_replaces_synthesized_one() {
    let (app, _) = spawn_app().await;
    let user_id = ID::new();
    let tomato = PlantingHistory::new(user_id.clone(), "Tomat");
    app.ctx
        .repos
        .planting_histories
        .insert(&tomato)
        .await
        .expect("Expected to insert planting");

    let sdk = app.sdk_for(&user_id);
    let created = sdk
        .reminder
        .create(CreateReminderInput {
            reminder_type: ReminderType::Watering,
            message: "Siram tomat pagi ini".into(),
            scheduled_date: Utc::now() + Duration::hours(2),
            planting_history_id: Some(tomato.id.clone()),
        })
        .await
        .expect("Expected to create reminder")
        .reminder;
    assert_eq!(created.user_id, user_id);
    assert_eq!(created.planting_history_id, Some(tomato.id.clone()));

    let upcoming = sdk.reminder.upcoming().await.expect("Expected reminders");
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, ReminderId::Persisted(created.id));

    // Plantings of other users can not be referenced
    let stranger = app.sdk_for(&ID::new());
    let res = stranger
        .reminder
        .create(CreateReminderInput {
            reminder_type: ReminderType::Watering,
            message: "Siram".into(),
            scheduled_date: Utc::now(),
            planting_history_id: Some(tomato.id),
        })
        .await;
    assert!(matches!(res, Err(APIError::NotFound)));
}

#[actix_web::main]
#[test]
async fn test_notification_surface_against_server() {
    let (app, _) = spawn_app().await;
    let user_id = ID::new();
    let now = Utc::now();
    let tomato = PlantingHistory::new(user_id.clone(), "Tomat");
    app.ctx
        .repos
        .planting_histories
        .insert(&tomato)
        .await
        .expect("Expected to insert planting");
    let harvest = Reminder::new(user_id.clone(), ReminderType::Harvest, "Panen tomat", now, now);
    app.ctx
        .repos
        .reminders
        .insert(&harvest)
        .await
        .expect("Expected to insert reminder");

    let sdk = app.sdk_for(&user_id);
    let dismissals = DismissalStore::new(
        Arc::new(InMemoryKeyValueStore::new()),
        Arc::new(RealSys {}),
    );
    let surface = NotificationSurface::new(Arc::new(sdk.reminder.clone()), dismissals);
    assert_eq!(surface.status(), SurfaceStatus::Loading);

    surface.refresh().await;
    let view = surface.view();
    assert_eq!(view.status, SurfaceStatus::IdleWithItems);
    assert_eq!(view.badge.as_deref(), Some("2"));

    let harvest_id = ReminderId::Persisted(harvest.id.clone());
    let watering_id = ReminderId::Synthesized {
        planting_id: tomato.id.clone(),
        kind: ReminderType::Watering,
    };
    surface
        .complete(&harvest_id)
        .await
        .expect("Expected to complete reminder");
    surface.dismiss(&watering_id);
    assert_eq!(surface.status(), SurfaceStatus::IdleEmpty);

    // The server still synthesizes the watering reminder, the dismissal hides it
    surface.refresh().await;
    assert_eq!(surface.status(), SurfaceStatus::IdleEmpty);
    assert_eq!(surface.badge(), None);
}
