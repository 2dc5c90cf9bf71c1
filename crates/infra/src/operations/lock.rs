use adtkit_core::AdtConnection;
use adtkit_domain::constants::ACCEPT_LOCK;
use adtkit_domain::{AdtError, AdtRequest, AdtResponse, LockHandle, LockResult, Result};
use tracing::debug;

use crate::xml;

/// `POST {uri}?_action=LOCK&accessMode=MODIFY`
///
/// Must run while the connection is stateful; the handle is only valid in
/// that session.
pub async fn lock_object(connection: &dyn AdtConnection, object_uri: &str) -> Result<LockResult> {
    let request = AdtRequest::post(object_uri)
        .query("_action", "LOCK")
        .query("accessMode", "MODIFY")
        .accept(ACCEPT_LOCK);

    let response = connection.make_adt_request(request).await.map_err(|error| match error {
        AdtError::Sap { message, .. } => AdtError::Lock(format!("{object_uri}: {message}")),
        other => other,
    })?;

    let result = parse_lock_result(&response.body)?;
    debug!(uri = object_uri, lock_handle = ?result.handle, "object locked");
    Ok(result)
}

/// `POST {uri}?_action=UNLOCK&lockHandle={handle}`
pub async fn unlock_object(
    connection: &dyn AdtConnection,
    object_uri: &str,
    handle: &LockHandle,
) -> Result<AdtResponse> {
    let request = AdtRequest::post(object_uri)
        .query("_action", "UNLOCK")
        .query("lockHandle", handle.as_str());

    let response = connection.make_adt_request(request).await?;
    debug!(uri = object_uri, "object unlocked");
    Ok(response)
}

/// Parse a `com.sap.adt.lock.result` payload.
pub fn parse_lock_result(body: &str) -> Result<LockResult> {
    let values = xml::abap_values(body)?;
    let value = |field: &str| {
        values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let handle = value("LOCK_HANDLE")
        .ok_or_else(|| AdtError::Lock("lock response carries no LOCK_HANDLE".into()))?;

    Ok(LockResult {
        handle: LockHandle::new(handle),
        correction_number: value("CORRNR"),
        correction_user: value("CORRUSER"),
        correction_text: value("CORRTEXT"),
        is_local: value("IS_LOCAL").is_some_and(|flag| flag.eq_ignore_ascii_case("X")),
    })
}
