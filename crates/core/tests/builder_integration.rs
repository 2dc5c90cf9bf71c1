//! Step-by-step builder behaviour.

mod support;

use adtkit_core::{AdtConnection, ObjectBuilder};
use adtkit_domain::{AdtError, CheckVersion, OperationMethod as M, SessionType, TransportConfig};

use support::{sap_error, FixedTransports, MockConnection, ScriptedOperations, TestConfig, LOCK_HANDLE};

const SOURCE: &str = "REPORT z_test_1.";

fn builder(ops: &ScriptedOperations, config: TestConfig) -> (std::sync::Arc<MockConnection>, ObjectBuilder<ScriptedOperations>) {
    let connection = MockConnection::new();
    let builder = ObjectBuilder::new(connection.clone(), ops.clone(), config);
    (connection, builder)
}

#[tokio::test]
async fn manual_chain_collects_results() {
    let ops = ScriptedOperations::new();
    let (connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1").with_source(SOURCE));

    builder.validate().await.unwrap().create().await.unwrap();
    builder.lock().await.unwrap();
    assert_eq!(connection.session_type(), SessionType::Stateful);
    assert_eq!(builder.lock_handle().map(|h| h.as_str()), Some(LOCK_HANDLE));

    builder
        .check_new_source()
        .await
        .unwrap()
        .update()
        .await
        .unwrap()
        .unlock()
        .await
        .unwrap()
        .activate()
        .await
        .unwrap();

    assert_eq!(connection.session_type(), SessionType::Stateless);
    assert!(builder.lock_handle().is_none());
    assert!(builder.validation_response().is_some());
    assert!(builder.create_result().is_some());
    assert!(builder.update_result().is_some());
    assert!(builder.unlock_result().is_some());
    assert!(builder.activate_result().is_some());
    assert!(!builder.has_errors());
    assert_eq!(
        builder.state().completed_methods(),
        vec![M::Validate, M::Create, M::Lock, M::Check, M::Update, M::Unlock, M::Activate]
    );
}

#[tokio::test]
async fn steps_between_lock_and_unlock_run_stateful() {
    let ops = ScriptedOperations::new();
    let (_connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1").with_source(SOURCE));

    builder.lock().await.unwrap().update().await.unwrap().unlock().await.unwrap();
    builder.check(CheckVersion::Inactive).await.unwrap();

    let sessions: Vec<_> = ops.calls().into_iter().map(|c| (c.method, c.session)).collect();
    assert_eq!(
        sessions,
        vec![
            (M::Lock, SessionType::Stateful),
            (M::Update, SessionType::Stateful),
            (M::Unlock, SessionType::Stateful),
            (M::Check, SessionType::Stateless),
        ]
    );
}

#[tokio::test]
async fn update_without_lock_is_rejected_locally() {
    let ops = ScriptedOperations::new();
    let (_connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1").with_source(SOURCE));

    let error = builder.update().await.err().unwrap();

    assert!(matches!(error, AdtError::InvalidInput(_)));
    assert!(ops.calls().is_empty());
    assert_eq!(builder.errors()[0].method, M::Update);
}

#[tokio::test]
async fn failed_lock_leaves_session_stateless() {
    let ops = ScriptedOperations::new().fail_on(M::Lock, AdtError::Lock("locked by DEVELOPER".into()));
    let (connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));

    assert!(builder.lock().await.is_err());

    assert!(!builder.in_stateful_session());
    assert_eq!(connection.session_type(), SessionType::Stateless);
    assert_eq!(builder.errors()[0].method, M::Lock);
}

#[tokio::test]
async fn force_unlock_after_failed_update_releases_lock() {
    let ops = ScriptedOperations::new().fail_on(M::Update, sap_error("source rejected"));
    let (connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1").with_source(SOURCE));

    builder.lock().await.unwrap();
    assert!(builder.update().await.is_err());
    builder.force_unlock().await;

    assert_eq!(ops.count(M::Unlock), 1);
    assert!(builder.lock_handle().is_none());
    assert_eq!(connection.session_type(), SessionType::Stateless);
    assert_eq!(builder.state().completed_methods(), vec![M::Lock, M::ForceUnlock]);
}

#[tokio::test]
async fn force_unlock_swallows_unlock_errors() {
    let ops = ScriptedOperations::new().fail_on(M::Unlock, AdtError::Lock("stale handle".into()));
    let (connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));

    builder.lock().await.unwrap();
    builder.force_unlock().await;

    assert!(builder.lock_handle().is_none());
    assert_eq!(connection.session_type(), SessionType::Stateless);
    assert_eq!(builder.errors().last().map(|e| e.method), Some(M::ForceUnlock));
}

#[tokio::test]
async fn failed_unlock_keeps_lock_and_session() {
    let ops = ScriptedOperations::new().fail_first(M::Unlock, 1, sap_error("unlock failed"));
    let (connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));

    builder.lock().await.unwrap();
    assert!(builder.unlock().await.is_err());

    assert_eq!(builder.lock_handle().map(|h| h.as_str()), Some(LOCK_HANDLE));
    assert!(builder.in_stateful_session());
    assert_eq!(connection.session_type(), SessionType::Stateful);
    assert_eq!(builder.errors().last().map(|e| e.method), Some(M::Unlock));

    builder.force_unlock().await;

    let sessions: Vec<_> = ops.calls().into_iter().map(|c| (c.method, c.session)).collect();
    assert_eq!(
        sessions,
        vec![
            (M::Lock, SessionType::Stateful),
            (M::Unlock, SessionType::Stateful),
            (M::Unlock, SessionType::Stateful),
        ]
    );
    assert!(builder.lock_handle().is_none());
    assert!(!builder.in_stateful_session());
    assert_eq!(connection.session_type(), SessionType::Stateless);
    assert_eq!(builder.state().completed_methods(), vec![M::Lock, M::ForceUnlock]);
}

#[tokio::test]
async fn force_unlock_without_lock_is_a_no_op() {
    let ops = ScriptedOperations::new();
    let (_connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));

    builder.force_unlock().await;

    assert!(ops.calls().is_empty());
}

#[tokio::test]
async fn created_transport_is_used_by_later_steps() {
    let ops = ScriptedOperations::new();
    let (_connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));
    let transports = FixedTransports { number: "DEVK900123".to_string() };

    builder
        .create_transport(&transports, &TransportConfig::new("AdtKit test"))
        .await
        .unwrap()
        .create()
        .await
        .unwrap();

    assert_eq!(builder.transport_result().map(|t| t.number.as_str()), Some("DEVK900123"));
    assert_eq!(ops.calls()[0].transport.as_deref(), Some("DEVK900123"));
}

#[tokio::test]
async fn delete_checks_deletion_first() {
    let ops = ScriptedOperations::new();
    let (_connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));

    builder.delete().await.unwrap();

    assert_eq!(ops.methods(), vec![M::CheckDeletion, M::Delete]);
    assert!(builder.delete_result().is_some());
}

#[tokio::test]
async fn read_source_is_kept_in_state() {
    let ops = ScriptedOperations::new();
    let (_connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1").with_source(SOURCE));

    builder.read().await.unwrap().read_source(CheckVersion::Active).await.unwrap();

    assert_eq!(builder.source_result(), Some(SOURCE));
    assert!(builder.read_result().is_some());
}

#[tokio::test]
async fn dropping_a_locked_builder_restores_stateless() {
    let ops = ScriptedOperations::new();
    let (connection, mut builder) = builder(&ops, TestConfig::new("Z_TEST_1"));

    builder.lock().await.unwrap();
    drop(builder);

    assert_eq!(connection.session_type(), SessionType::Stateless);
}
