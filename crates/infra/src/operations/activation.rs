//! Activation (`/sap/bc/adt/activation`)

use adtkit_core::AdtConnection;
use adtkit_domain::constants::{ACTIVATION_PATH, CONTENT_TYPE_ACTIVATION};
use adtkit_domain::{
    ActivationMessage, ActivationResult, AdtRequest, CheckSeverity, ObjectReference, Result,
};
use tracing::{debug, info};

use crate::xml::{self, escape};

pub fn activation_request_body(objects: &[ObjectReference]) -> String {
    let references: String = objects
        .iter()
        .map(|object| {
            format!(
                r#"
  <adtcore:objectReference adtcore:uri="{}" adtcore:type="{}" adtcore:name="{}"/>"#,
                escape(&object.uri),
                escape(&object.adt_type),
                escape(&object.name),
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<adtcore:objectReferences xmlns:adtcore="http://www.sap.com/adt/core">{references}
</adtcore:objectReferences>"#
    )
}

/// Activate the inactive versions of `objects` and fail on activation errors.
pub async fn activate_object(
    connection: &dyn AdtConnection,
    object: &ObjectReference,
) -> Result<ActivationResult> {
    let request = AdtRequest::post(ACTIVATION_PATH)
        .query("method", "activate")
        .query("preauditRequested", "true")
        .content_type(CONTENT_TYPE_ACTIVATION)
        .accept(CONTENT_TYPE_ACTIVATION)
        .body(activation_request_body(std::slice::from_ref(object)));

    let response = connection.make_adt_request(request).await?;
    let result = parse_activation_result(&response.body)?;
    debug!(uri = %object.uri, messages = result.messages.len(), "activation finished");

    let result = result.into_result(&object.name)?;
    info!(object = %object.name, "object activated");
    Ok(result)
}

/// Parse a `chkl:messages` response. An empty body means the activation ran
/// without messages.
pub fn parse_activation_result(body: &str) -> Result<ActivationResult> {
    if body.trim().is_empty() {
        return Ok(ActivationResult {
            activated: true,
            checked: true,
            generated: true,
            messages: Vec::new(),
        });
    }

    let root = xml::parse(body)?;
    let messages: Vec<ActivationMessage> = root
        .find_all("msg")
        .into_iter()
        .map(|node| ActivationMessage {
            severity: CheckSeverity::from_code(node.attr("type").unwrap_or("I")),
            text: node
                .text_of("txt")
                .or_else(|| node.text_of("shortText"))
                .unwrap_or_default(),
            object_description: node.attr("objDescr").map(str::to_string),
            href: node.attr("href").map(str::to_string),
            line: node.attr("line").and_then(|line| line.parse().ok()),
        })
        .collect();

    let has_errors = messages.iter().any(|m| m.severity == CheckSeverity::Error);
    let flag = |name: &str| {
        root.find("properties").and_then(|props| props.attr(name)).map(|v| v == "true")
    };

    Ok(ActivationResult {
        activated: flag("activationExecuted").unwrap_or(!has_errors),
        checked: flag("checkExecuted").unwrap_or(true),
        generated: flag("generationExecuted").unwrap_or(!has_errors),
        messages,
    })
}
