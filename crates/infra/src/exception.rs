//! SAP exception bodies and status classification
//!
//! ADT reports failures as `<exc:exception>` documents:
//!
//! ```xml
//! <exc:exception xmlns:exc="http://www.sap.com/abapxml/types/communicationframework">
//!   <namespace id="com.sap.adt"/>
//!   <type id="ExceptionResourceAlreadyExists"/>
//!   <message lang="EN">Resource Program Z_TEST_1 does already exist.</message>
//! </exc:exception>
//! ```

use adtkit_domain::AdtError;

use crate::xml;

const MAX_RAW_BODY: usize = 512;

/// Parsed `<exc:exception>` payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SapException {
    pub namespace: Option<String>,
    pub exception_type: Option<String>,
    pub message: Option<String>,
}

/// Parse an exception body. Returns `None` for anything else.
pub fn parse_exception(body: &str) -> Option<SapException> {
    if !body.contains("exception") {
        return None;
    }
    let root = xml::parse(body).ok()?;
    if root.local_name() != "exception" {
        return None;
    }

    Some(SapException {
        namespace: root.find("namespace").and_then(|n| n.attr("id")).map(str::to_string),
        exception_type: root.find("type").and_then(|n| n.attr("id")).map(str::to_string),
        message: root
            .text_of("message")
            .or_else(|| root.text_of("localizedMessage"))
            .map(|text| text.trim().to_string()),
    })
}

/// Map a non-2xx response to an error.
///
/// 404 -> `NotFound`, 401/403 -> `Auth`, everything else -> `Sap` with the
/// exception type and message when the body carries one.
pub fn error_from_response(status: u16, body: &str) -> AdtError {
    let exception = parse_exception(body).unwrap_or_default();
    let message = exception.message.unwrap_or_else(|| fallback_message(status, body));

    match status {
        404 => AdtError::NotFound(message),
        401 | 403 => AdtError::Auth(message),
        _ => AdtError::Sap { status, exception_type: exception.exception_type, message },
    }
}

fn fallback_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('<') {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("unknown status");
        return format!("HTTP {status} {reason}");
    }
    trimmed.chars().take(MAX_RAW_BODY).collect()
}
