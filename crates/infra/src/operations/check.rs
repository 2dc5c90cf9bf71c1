//! Syntax check runs (`/sap/bc/adt/checkruns`)

use adtkit_core::AdtConnection;
use adtkit_domain::constants::{
    ACCEPT_CHECKRUN, CHECKRUN_PATH, CHECK_REPORTER, CONTENT_TYPE_CHECKRUN, CONTENT_TYPE_TEXT,
};
use adtkit_domain::{
    AdtRequest, CheckMessage, CheckReport, CheckSeverity, CheckVersion, Result,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::xml::{self, escape};

/// Build the `chkrun:checkObjectList` request body.
///
/// With `source`, the text is checked in place of what is stored under
/// `source_uri`, so a new version can be verified before it is written.
pub fn check_request_body(
    object_uri: &str,
    version: CheckVersion,
    source: Option<(&str, &str)>,
) -> String {
    let artifacts = match source {
        Some((source_uri, text)) => format!(
            r#"
    <chkrun:artifacts>
      <chkrun:artifact chkrun:contentType="{content_type}" chkrun:uri="{uri}">
        <chkrun:content>{content}</chkrun:content>
      </chkrun:artifact>
    </chkrun:artifacts>
  "#,
            content_type = escape(CONTENT_TYPE_TEXT),
            uri = escape(source_uri),
            content = STANDARD.encode(text.as_bytes()),
        ),
        None => String::new(),
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<chkrun:checkObjectList xmlns:chkrun="http://www.sap.com/adt/checkrun" xmlns:adtcore="http://www.sap.com/adt/core">
  <chkrun:checkObject adtcore:uri="{uri}" chkrun:version="{version}">{artifacts}</chkrun:checkObject>
</chkrun:checkObjectList>"#,
        uri = escape(object_uri),
        version = version.as_str(),
    )
}

/// Run the ABAP check and return the unfiltered report.
pub async fn run_check(
    connection: &dyn AdtConnection,
    object_uri: &str,
    source_uri: &str,
    version: CheckVersion,
    source: Option<&str>,
) -> Result<CheckReport> {
    let body = check_request_body(object_uri, version, source.map(|text| (source_uri, text)));
    let request = AdtRequest::post(CHECKRUN_PATH)
        .query("reporters", CHECK_REPORTER)
        .content_type(CONTENT_TYPE_CHECKRUN)
        .accept(ACCEPT_CHECKRUN)
        .body(body);

    let response = connection.make_adt_request(request).await?;
    let report = parse_check_report(&response.body)?;
    debug!(
        uri = object_uri,
        %version,
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "check run finished"
    );
    Ok(report)
}

/// Run the check, drop `benign` messages and fail when errors remain.
pub async fn check_object(
    connection: &dyn AdtConnection,
    object_name: &str,
    object_uri: &str,
    source_uri: &str,
    version: CheckVersion,
    source: Option<&str>,
    benign: &[&str],
) -> Result<CheckReport> {
    run_check(connection, object_uri, source_uri, version, source)
        .await?
        .without_benign(benign)
        .into_result(object_name)
}

/// Parse a `chkrun:checkRunReports` response. An empty body is a clean run.
pub fn parse_check_report(body: &str) -> Result<CheckReport> {
    if body.trim().is_empty() {
        return Ok(CheckReport::default());
    }

    let root = xml::parse(body)?;
    let mut report = CheckReport::default();

    if let Some(node) = root.find("checkReport") {
        report.reporter = node.attr("reporter").map(str::to_string);
        report.triggering_uri = node.attr("triggeringUri").map(str::to_string);
        report.status = node.attr("status").map(str::to_string);
        report.status_text = node.attr("statusText").map(str::to_string);
    }

    for node in root.find_all("checkMessage") {
        let text = node
            .attr("shortText")
            .map(str::to_string)
            .or_else(|| node.text_of("shortText"))
            .unwrap_or_default();
        let mut message =
            CheckMessage::new(CheckSeverity::from_code(node.attr("type").unwrap_or("I")), text);
        message.uri = node.attr("uri").map(str::to_string);
        message.code = node.attr("code").map(str::to_string);
        if let Some((line, column)) = message.uri.as_deref().and_then(parse_position) {
            message.line = Some(line);
            message.column = Some(column);
        }
        report.messages.push(message);
    }

    Ok(report)
}

/// `...#start=12,4` -> `(12, 4)`
fn parse_position(uri: &str) -> Option<(u32, u32)> {
    let (_, fragment) = uri.split_once("#start=")?;
    let (line, rest) = fragment.split_once(',').unwrap_or((fragment, "0"));
    let column: String = rest.chars().take_while(char::is_ascii_digit).collect();
    Some((line.parse().ok()?, column.parse().unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_ENDIF: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<chkrun:checkRunReports xmlns:chkrun="http://www.sap.com/adt/checkrun">
  <chkrun:checkReport chkrun:reporter="abapCheckRun" chkrun:triggeringUri="/sap/bc/adt/programs/programs/z_test_1" chkrun:status="processed" chkrun:statusText="Object Z_TEST_1 has been checked">
    <chkrun:checkMessageList>
      <chkrun:checkMessage chkrun:uri="/sap/bc/adt/programs/programs/z_test_1/source/main#start=3,0" chkrun:type="E" chkrun:shortText="IF block is not closed. ENDIF is missing." chkrun:code="MESSAGE_G-A"/>
      <chkrun:checkMessage chkrun:uri="/sap/bc/adt/programs/programs/z_test_1/source/main#start=1,0" chkrun:type="W" chkrun:shortText="Variable LV_X is not used."/>
    </chkrun:checkMessageList>
  </chkrun:checkReport>
</chkrun:checkRunReports>"#;

    #[test]
    fn parses_messages_with_positions() {
        let report = parse_check_report(MISSING_ENDIF).unwrap();

        assert_eq!(report.reporter.as_deref(), Some("abapCheckRun"));
        assert_eq!(report.status.as_deref(), Some("processed"));
        assert_eq!(report.messages.len(), 2);

        let error = &report.messages[0];
        assert_eq!(error.severity, CheckSeverity::Error);
        assert_eq!(error.line, Some(3));
        assert_eq!(error.column, Some(0));
        assert_eq!(error.code.as_deref(), Some("MESSAGE_G-A"));
        assert_eq!(report.messages[1].severity, CheckSeverity::Warning);
    }

    #[test]
    fn remaining_errors_fail_with_sap_text() {
        let error = parse_check_report(MISSING_ENDIF)
            .unwrap()
            .into_result("Z_TEST_1")
            .unwrap_err();
        assert!(error.to_string().contains("ENDIF is missing"));
        assert!(error.to_string().contains("line 3"));
    }

    #[test]
    fn empty_body_is_a_clean_report() {
        assert!(parse_check_report("").unwrap().messages.is_empty());
    }

    #[test]
    fn body_embeds_new_source_as_base64() {
        let body = check_request_body(
            "/sap/bc/adt/programs/programs/z_test_1",
            CheckVersion::Inactive,
            Some(("/sap/bc/adt/programs/programs/z_test_1/source/main", "REPORT z_test_1.")),
        );

        assert!(body.contains(r#"chkrun:version="inactive""#));
        assert!(body.contains(&STANDARD.encode("REPORT z_test_1.")));
        assert!(body.contains(r#"chkrun:uri="/sap/bc/adt/programs/programs/z_test_1/source/main""#));
    }

    #[test]
    fn body_without_source_has_no_artifacts() {
        let body = check_request_body("/sap/bc/adt/oo/classes/zcl_a", CheckVersion::Active, None);
        assert!(!body.contains("artifacts"));
        assert!(body.contains(r#"chkrun:version="active""#));
    }

    #[test]
    fn positions_are_read_from_uri_fragment() {
        assert_eq!(parse_position("/x/source/main#start=12,4"), Some((12, 4)));
        assert_eq!(parse_position("/x/source/main#start=7"), Some((7, 0)));
        assert_eq!(parse_position("/x/source/main"), None);
    }
}
