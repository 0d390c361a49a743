//! Unit tests for the notification worker

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio_util::sync::CancellationToken;

use crate::domain::entities::notification::{Message, NewNotification, NotificationKind};
use crate::domain::entities::recovery_code::RecoveryCode;
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{CodeRepository, MockStore};
use crate::services::clock::{Clock, ManualClock};
use crate::services::notification::{NotificationWorker, NotificationWorkerConfig, WorkerState};

use super::mocks::RecordingNotifier;

type TestWorker = NotificationWorker<MockStore, MockStore, MockStore>;

fn worker(store: &MockStore, notifier: Arc<RecordingNotifier>, clock: Arc<ManualClock>) -> TestWorker {
    let store = Arc::new(store.clone());
    NotificationWorker::new(
        store.clone(),
        store.clone(),
        store,
        notifier,
        clock,
        NotificationWorkerConfig {
            poll_interval: StdDuration::from_millis(100),
        },
    )
}

fn seed_user(store: &MockStore, email: &str, clock: &ManualClock) -> User {
    let user = User::new(email, email.split('@').next().unwrap_or(email), b"hash".to_vec(), clock.now());
    store.insert_user(user.clone());
    user
}

#[tokio::test]
async fn test_empty_outbox_polls_nothing() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let worker = worker(&store, notifier.clone(), clock);

    assert_eq!(worker.poll_once().await.unwrap(), None);
    assert!(notifier.deliveries().is_empty());
    assert_eq!(worker.state(), WorkerState::Idle);
}

#[tokio::test]
async fn test_delivers_each_kind_with_expected_content() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let user = seed_user(&store, "wes@example.com", &clock);

    store.insert_task(NewNotification::new(user.id, NotificationKind::Welcome, clock.now()));
    store.insert_task(NewNotification::new(user.id, NotificationKind::ChangeEmail, clock.now()));
    store
        .save_code(
            RecoveryCode::new(user.id, "XY12Z9", clock.now()),
            NewNotification::new(user.id, NotificationKind::PassRecovery, clock.now()),
        )
        .await
        .unwrap();

    let worker = worker(&store, notifier.clone(), clock.clone());
    clock.advance(Duration::seconds(5));
    while worker.poll_once().await.unwrap().is_some() {}

    assert_eq!(
        notifier.deliveries(),
        vec![
            ("wes@example.com".to_string(), Message::new(NotificationKind::Welcome, "Welcome")),
            (
                "wes@example.com".to_string(),
                Message::new(NotificationKind::ChangeEmail, "Change email successful")
            ),
            ("wes@example.com".to_string(), Message::new(NotificationKind::PassRecovery, "XY12Z9")),
        ]
    );
    for task in store.tasks() {
        assert!(task.is_done);
        assert_eq!(task.exec_time, Some(clock.now()));
    }
}

#[tokio::test]
async fn test_delivers_in_creation_order() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let late = seed_user(&store, "late@example.com", &clock);
    let early = seed_user(&store, "early@example.com", &clock);

    store.insert_task(NewNotification::new(late.id, NotificationKind::Welcome, clock.now()));
    store.insert_task(NewNotification::new(
        early.id,
        NotificationKind::Welcome,
        clock.now() - Duration::minutes(1),
    ));

    let worker = worker(&store, notifier.clone(), clock);
    while worker.poll_once().await.unwrap().is_some() {}

    let contacts: Vec<_> = notifier.deliveries().into_iter().map(|(c, _)| c).collect();
    assert_eq!(contacts, vec!["early@example.com", "late@example.com"]);
}

#[tokio::test]
async fn test_notifier_failure_is_fatal_and_leaves_task_pending() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::failing_after(1));
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let user = seed_user(&store, "xena@example.com", &clock);
    store.insert_task(NewNotification::new(user.id, NotificationKind::Welcome, clock.now()));
    store.insert_task(NewNotification::new(user.id, NotificationKind::ChangeEmail, clock.now()));
    store.insert_task(NewNotification::new(user.id, NotificationKind::ChangeEmail, clock.now()));

    let worker = worker(&store, notifier.clone(), clock);
    let result = worker.run(CancellationToken::new()).await;

    match result.unwrap_err() {
        DomainError::Internal { message } => assert!(message.contains("gateway")),
        other => panic!("Expected Internal, got {:?}", other),
    }
    assert_eq!(worker.state(), WorkerState::Failed);
    assert_eq!(notifier.deliveries().len(), 1);
    assert_eq!(store.pending_tasks().len(), 2);
}

#[tokio::test]
async fn test_missing_recovery_code_is_fatal() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let user = seed_user(&store, "yuri@example.com", &clock);
    store.insert_task(NewNotification::new(user.id, NotificationKind::PassRecovery, clock.now()));

    let worker = worker(&store, notifier.clone(), clock);

    match worker.poll_once().await.unwrap_err() {
        DomainError::NotFound { resource } => assert_eq!(resource, "recovery code"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert!(notifier.deliveries().is_empty());
    assert_eq!(store.pending_tasks().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_while_idle_stops_cleanly() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let worker = Arc::new(worker(&store, notifier, clock));
    let shutdown = CancellationToken::new();

    let handle = worker.clone().spawn(shutdown.clone());
    tokio::time::sleep(StdDuration::from_millis(250)).await;
    shutdown.cancel();

    assert!(handle.await.unwrap().is_ok());
    assert_eq!(worker.state(), WorkerState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_picks_up_tasks_enqueued_while_idle() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let user = seed_user(&store, "zoe@example.com", &clock);
    let worker = Arc::new(worker(&store, notifier.clone(), clock.clone()));
    let shutdown = CancellationToken::new();

    let handle = worker.clone().spawn(shutdown.clone());
    tokio::time::sleep(StdDuration::from_millis(150)).await;
    assert!(notifier.deliveries().is_empty());

    store.insert_task(NewNotification::new(user.id, NotificationKind::Welcome, clock.now()));
    tokio::time::sleep(StdDuration::from_millis(150)).await;

    assert_eq!(notifier.deliveries().len(), 1);
    assert!(store.pending_tasks().is_empty());

    shutdown.cancel();
    assert!(handle.await.unwrap().is_ok());
}

#[tokio::test]
async fn test_cancelled_before_start_does_not_poll() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let user = seed_user(&store, "abe@example.com", &clock);
    store.insert_task(NewNotification::new(user.id, NotificationKind::Welcome, clock.now()));

    let worker = worker(&store, notifier.clone(), clock);
    let shutdown = CancellationToken::new();
    shutdown.cancel();

    worker.run(shutdown).await.unwrap();

    assert!(notifier.deliveries().is_empty());
    assert_eq!(store.pending_tasks().len(), 1);
    assert_eq!(worker.state(), WorkerState::Stopped);
}

#[tokio::test]
async fn test_state_transitions_are_observable() {
    let store = MockStore::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let user = seed_user(&store, "bea@example.com", &clock);
    store.insert_task(NewNotification::new(user.id, NotificationKind::Welcome, clock.now()));

    let worker = worker(&store, notifier, clock);
    let mut states = worker.subscribe();
    assert_eq!(*states.borrow_and_update(), WorkerState::Idle);

    let delivered = worker.poll_once().await.unwrap();

    assert!(delivered.is_some());
    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), WorkerState::Idle);
}
