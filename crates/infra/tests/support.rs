//! Mock SAP system shared by the infra integration tests
#![allow(dead_code)]

use std::sync::Arc;

use adtkit_domain::ConnectionConfig;
use adtkit_infra::HttpAdtConnection;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CSRF_TOKEN: &str = "csrf-token-0001";
pub const LOCK_HANDLE: &str = "E3B0C44298FC1C149AFBF4C8996FB924";

/// Start a mock SAP system that hands out [`CSRF_TOKEN`] on discovery.
pub async fn sap_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sap/bc/adt/discovery"))
        .and(header("x-csrf-token", "Fetch"))
        .respond_with(ResponseTemplate::new(200).insert_header("x-csrf-token", CSRF_TOKEN))
        .mount(&server)
        .await;
    server
}

pub fn connection_config(server: &MockServer) -> ConnectionConfig {
    let mut config = ConnectionConfig::new(server.uri(), "DEVELOPER", "s3cret");
    config.client = Some("100".into());
    config.timeout_seconds = 5;
    config
}

pub fn connection(server: &MockServer) -> Arc<HttpAdtConnection> {
    Arc::new(HttpAdtConnection::new(connection_config(server)).expect("valid connection config"))
}

pub fn lock_body(handle: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<asx:abap xmlns:asx="http://www.sap.com/abapxml" version="1.0">
  <asx:values>
    <DATA>
      <LOCK_HANDLE>{handle}</LOCK_HANDLE>
      <CORRNR/>
      <CORRUSER/>
      <CORRTEXT/>
      <IS_LOCAL>X</IS_LOCAL>
    </DATA>
  </asx:values>
</asx:abap>"#
    )
}

pub fn validation_body(severity: &str, short_text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<asx:abap xmlns:asx="http://www.sap.com/abapxml" version="1.0">
  <asx:values><DATA><SEVERITY>{severity}</SEVERITY><SHORT_TEXT>{short_text}</SHORT_TEXT><LONG_TEXT/></DATA></asx:values>
</asx:abap>"#
    )
}

pub fn exception_body(exception_type: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<exc:exception xmlns:exc="http://www.sap.com/abapxml/types/communicationframework">
  <namespace id="com.sap.adt"/>
  <type id="{exception_type}"/>
  <message lang="EN">{message}</message>
</exc:exception>"#
    )
}

/// Check run response with `(type, shortText, line)` messages.
pub fn check_body(uri: &str, messages: &[(&str, &str, u32)]) -> String {
    let messages: String = messages
        .iter()
        .map(|(kind, text, line)| {
            format!(
                r#"
      <chkrun:checkMessage chkrun:uri="{uri}/source/main#start={line},0" chkrun:type="{kind}" chkrun:shortText="{text}"/>"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<chkrun:checkRunReports xmlns:chkrun="http://www.sap.com/adt/checkrun">
  <chkrun:checkReport chkrun:reporter="abapCheckRun" chkrun:triggeringUri="{uri}" chkrun:status="processed" chkrun:statusText="Object has been checked">
    <chkrun:checkMessageList>{messages}
    </chkrun:checkMessageList>
  </chkrun:checkReport>
</chkrun:checkRunReports>"#
    )
}
