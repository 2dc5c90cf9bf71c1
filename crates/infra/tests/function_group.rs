//! Function group locking and metadata updates

mod support;

use std::sync::Arc;

use adtkit_core::{AdtConnection, StatefulSession, UpdateOptions};
use adtkit_domain::{
    AdtError, CheckVersion, FunctionGroupConfig, LockHandle, OperationMethod, SessionType,
};
use adtkit_infra::objects::function_group::{
    check_function_group, lock_function_group, unlock_function_group,
};
use adtkit_infra::AdtFunctionGroup;
use support::*;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GROUP_URI: &str = "/sap/bc/adt/functions/groups/zfg_demo";

fn group() -> FunctionGroupConfig {
    FunctionGroupConfig::new("ZFG_DEMO", "ZPKG", "Demo function group")
}

async fn mount_lock(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(GROUP_URI))
        .and(query_param("_action", "LOCK"))
        .and(query_param("accessMode", "MODIFY"))
        .and(header("X-sap-adt-sessiontype", "stateful"))
        .respond_with(ResponseTemplate::new(200).set_body_string(lock_body(LOCK_HANDLE)))
        .mount(server)
        .await;
}

async fn mount_unlock(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(GROUP_URI))
        .and(query_param("_action", "UNLOCK"))
        .and(query_param("lockHandle", LOCK_HANDLE))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn lock_and_unlock_inside_a_stateful_session() {
    let server = sap_server().await;
    mount_lock(&server).await;
    mount_unlock(&server).await;

    let connection: Arc<dyn AdtConnection> = connection(&server);
    let session = StatefulSession::begin(connection.clone());

    let lock = lock_function_group(session.connection(), &group()).await.unwrap();
    assert_eq!(lock.handle.as_str(), LOCK_HANDLE);
    assert!(lock.is_local);

    unlock_function_group(session.connection(), &group(), &lock.handle).await.unwrap();
    session.end();

    assert_eq!(connection.session_type(), SessionType::Stateless);
}

#[tokio::test]
async fn lock_refusal_in_successful_response_keeps_sap_message() {
    let server = sap_server().await;

    Mock::given(method("POST"))
        .and(path(GROUP_URI))
        .and(query_param("_action", "LOCK"))
        .respond_with(ResponseTemplate::new(200).set_body_string(exception_body(
            "ExceptionResourceNoAccess",
            "ZFG_DEMO is currently being edited by OTHERUSER",
        )))
        .mount(&server)
        .await;

    let connection = connection(&server);
    let error = lock_function_group(connection.as_ref(), &group()).await.unwrap_err();

    assert!(error.to_string().contains("being edited by OTHERUSER"), "{error}");
}

#[tokio::test]
async fn unlock_with_stale_handle_fails() {
    let server = sap_server().await;
    mount_unlock(&server).await;

    Mock::given(method("POST"))
        .and(path(GROUP_URI))
        .and(query_param("_action", "UNLOCK"))
        .and(query_param("lockHandle", "STALE"))
        .respond_with(ResponseTemplate::new(400).set_body_string(exception_body(
            "ExceptionResourceInvalidLockHandle",
            "Lock handle is not valid",
        )))
        .mount(&server)
        .await;

    let connection = connection(&server);
    let error = unlock_function_group(connection.as_ref(), &group(), &LockHandle::new("STALE"))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        AdtError::Sap { status: 400, ref exception_type, .. }
            if exception_type.as_deref() == Some("ExceptionResourceInvalidLockHandle")
    ));
}

#[tokio::test]
async fn update_rewrites_the_group_document() {
    let server = sap_server().await;
    mount_lock(&server).await;
    mount_unlock(&server).await;

    Mock::given(method("PUT"))
        .and(path(GROUP_URI))
        .and(query_param("lockHandle", LOCK_HANDLE))
        .and(header("Content-Type", "application/vnd.sap.adt.functions.groups.v3+xml"))
        .and(body_string_contains(r#"adtcore:description="Renamed group""#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // an empty group is reported as broken until it gets a function module
    Mock::given(method("POST"))
        .and(path("/sap/bc/adt/checkruns"))
        .respond_with(ResponseTemplate::new(200).set_body_string(check_body(
            GROUP_URI,
            &[("E", "REPORT/PROGRAM statement is missing", 1)],
        )))
        .mount(&server)
        .await;

    let mut config = group();
    config.description = "Renamed group".into();

    let adapter = AdtFunctionGroup::for_connection(connection(&server));
    let state = adapter.update(&config, &UpdateOptions::default()).await.unwrap();

    let steps: Vec<OperationMethod> = state.completed.iter().map(|step| step.method).collect();
    assert_eq!(
        steps,
        vec![
            OperationMethod::Lock,
            OperationMethod::Check,
            OperationMethod::Update,
            OperationMethod::Unlock,
            OperationMethod::Check,
        ]
    );
    assert!(state.activate_result.is_none());
}

#[tokio::test]
async fn other_check_errors_still_fail() {
    let server = sap_server().await;

    Mock::given(method("POST"))
        .and(path("/sap/bc/adt/checkruns"))
        .respond_with(ResponseTemplate::new(200).set_body_string(check_body(
            GROUP_URI,
            &[("E", "Include LZFG_DEMOTOP does not exist", 2)],
        )))
        .mount(&server)
        .await;

    let connection = connection(&server);
    let error = check_function_group(connection.as_ref(), &group(), CheckVersion::Inactive, None)
        .await
        .unwrap_err();
    assert!(matches!(error, AdtError::Check(ref text) if text.contains("LZFG_DEMOTOP")));
}
