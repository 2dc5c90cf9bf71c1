//! Two-step deletion: `/sap/bc/adt/deletion/check`, then `/deletion/delete`

use adtkit_core::AdtConnection;
use adtkit_domain::constants::{
    CONTENT_TYPE_DELETION, CONTENT_TYPE_DELETION_CHECK, DELETION_CHECK_PATH, DELETION_DELETE_PATH,
};
use adtkit_domain::{AdtError, AdtRequest, AdtResponse, Result};
use tracing::{debug, info};

use crate::xml::{self, escape};

pub fn deletion_check_body(object_uri: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<del:checkRequest xmlns:del="http://www.sap.com/adt/deletion" xmlns:adtcore="http://www.sap.com/adt/core">
  <del:object adtcore:uri="{}"/>
</del:checkRequest>"#,
        escape(object_uri)
    )
}

pub fn deletion_body(object_uri: &str, transport_request: Option<&str>) -> String {
    let transport = transport_request
        .map(|number| format!("\n    <del:transportNumber>{}</del:transportNumber>", escape(number)))
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<del:deletionRequest xmlns:del="http://www.sap.com/adt/deletion" xmlns:adtcore="http://www.sap.com/adt/core">
  <del:object adtcore:uri="{uri}">{transport}
  </del:object>
</del:deletionRequest>"#,
        uri = escape(object_uri),
    )
}

/// Ask SAP whether the object can be deleted.
///
/// Fails with `InvalidInput` when the response marks the object as not
/// deletable.
pub async fn check_deletion(
    connection: &dyn AdtConnection,
    object_uri: &str,
) -> Result<AdtResponse> {
    let request = AdtRequest::post(DELETION_CHECK_PATH)
        .content_type(CONTENT_TYPE_DELETION_CHECK)
        .accept(CONTENT_TYPE_DELETION_CHECK)
        .body(deletion_check_body(object_uri));

    let response = connection.make_adt_request(request).await?;
    if let Some(reason) = deletion_refused(&response.body)? {
        return Err(AdtError::InvalidInput(format!("{object_uri} cannot be deleted: {reason}")));
    }
    debug!(uri = object_uri, "deletion check passed");
    Ok(response)
}

pub async fn delete_object(
    connection: &dyn AdtConnection,
    object_uri: &str,
    transport_request: Option<&str>,
) -> Result<AdtResponse> {
    let request = AdtRequest::post(DELETION_DELETE_PATH)
        .content_type(CONTENT_TYPE_DELETION)
        .accept(CONTENT_TYPE_DELETION)
        .body(deletion_body(object_uri, transport_request));

    let response = connection.make_adt_request(request).await?;
    info!(uri = object_uri, "object deleted");
    Ok(response)
}

fn deletion_refused(body: &str) -> Result<Option<String>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let root = xml::parse(body)?;
    let refused = root
        .find_all("object")
        .into_iter()
        .find(|object| object.attr("isDeletable").is_some_and(|v| v == "false"));

    Ok(refused.map(|object| {
        object
            .text_of("message")
            .or_else(|| object.attr("message").map(str::to_string))
            .unwrap_or_else(|| "refused by SAP".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_body_includes_transport_when_set() {
        let body = deletion_body("/sap/bc/adt/programs/programs/z_test_1", Some("DEVK900042"));
        assert!(body.contains("<del:transportNumber>DEVK900042</del:transportNumber>"));
        assert!(!deletion_body("/x", None).contains("transportNumber"));
    }

    #[test]
    fn refused_deletion_is_detected() {
        let body = r#"<del:checkResponse xmlns:del="http://www.sap.com/adt/deletion">
  <del:object del:isDeletable="false"><del:message>Object is still used by Z_OTHER</del:message></del:object>
</del:checkResponse>"#;
        assert_eq!(deletion_refused(body).unwrap().as_deref(), Some("Object is still used by Z_OTHER"));
        assert_eq!(deletion_refused("").unwrap(), None);
    }
}
