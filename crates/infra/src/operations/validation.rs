//! Object name validation
//!
//! Each kind has its own validation endpoint; all of them answer with an
//! `asx:abap` payload carrying `SEVERITY`, `SHORT_TEXT` and `LONG_TEXT`.

use adtkit_core::AdtConnection;
use adtkit_domain::constants::ACCEPT_VALIDATION;
use adtkit_domain::{AdtRequest, Result, ValidationOutcome};
use tracing::debug;

use crate::xml;

/// Send a kind-specific validation request and fail on `ERROR` severity.
pub async fn validate_object_name(
    connection: &dyn AdtConnection,
    object_name: &str,
    request: AdtRequest,
) -> Result<ValidationOutcome> {
    let response = connection.make_adt_request(request.accept(ACCEPT_VALIDATION)).await?;
    let outcome = parse_validation_outcome(&response.body)?;
    debug!(object = object_name, severity = %outcome.severity, "name validated");
    outcome.into_result(object_name)
}

/// Parse a validation payload. An empty body means the name is fine.
pub fn parse_validation_outcome(body: &str) -> Result<ValidationOutcome> {
    if body.trim().is_empty() {
        return Ok(ValidationOutcome { severity: "OK".to_string(), ..Default::default() });
    }

    let values = xml::abap_values(body)?;
    let value = |field: &str| {
        values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    Ok(ValidationOutcome {
        severity: value("SEVERITY").unwrap_or_else(|| "OK".to_string()),
        short_text: value("SHORT_TEXT"),
        long_text: value("LONG_TEXT"),
    })
}

#[cfg(test)]
mod tests {
    use adtkit_domain::AdtError;

    use super::*;

    fn payload(severity: &str, text: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<asx:abap xmlns:asx="http://www.sap.com/abapxml" version="1.0">
  <asx:values><DATA><SEVERITY>{severity}</SEVERITY><SHORT_TEXT>{text}</SHORT_TEXT><LONG_TEXT/></DATA></asx:values>
</asx:abap>"#
        )
    }

    #[test]
    fn ok_severity_passes() {
        let outcome = parse_validation_outcome(&payload("OK", "")).unwrap();
        assert_eq!(outcome.severity, "OK");
        assert!(outcome.short_text.is_none());
        assert!(outcome.into_result("Z_TEST_1").is_ok());
    }

    #[test]
    fn error_severity_fails_with_short_text() {
        let outcome =
            parse_validation_outcome(&payload("ERROR", "Program Z_TEST_1 already exists")).unwrap();
        match outcome.into_result("Z_TEST_1") {
            Err(AdtError::Validation(message)) => assert!(message.contains("already exists")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
