//! Transport organizer (`/sap/bc/adt/cts/transportrequests`)

use adtkit_core::{AdtConnection, TransportService};
use adtkit_domain::constants::{CONTENT_TYPE_TRANSPORT, TRANSPORT_REQUESTS_PATH};
use adtkit_domain::{
    AdtError, AdtRequest, Result, TransportConfig, TransportRequest, TransportRequestType,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::xml::{self, escape};

/// Transport numbers look like `DEVK900042`: system id, `K`, six digits.
static TRANSPORT_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z0-9]{3}K\d{6}\b").expect("TRANSPORT_NUMBER should compile - this is a bug")
});

pub fn transport_request_body(config: &TransportConfig) -> String {
    let owner = config
        .owner
        .as_deref()
        .map(|owner| format!(r#" tm:owner="{}""#, escape(owner)))
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<tm:root xmlns:tm="http://www.sap.com/cts/adt/tm" tm:useraction="newrequest">
  <tm:request tm:desc="{description}" tm:type="{request_type}" tm:target="{target}" tm:cts_project="">
    <tm:task{owner}/>
  </tm:request>
</tm:root>"#,
        description = escape(&config.description),
        request_type = config.request_type,
        target = escape(config.target.as_deref().unwrap_or("LOCAL")),
    )
}

/// Create a transport request and return it with its new number.
pub async fn create_transport(
    connection: &dyn AdtConnection,
    config: &TransportConfig,
) -> Result<TransportRequest> {
    let request = AdtRequest::post(TRANSPORT_REQUESTS_PATH)
        .content_type(CONTENT_TYPE_TRANSPORT)
        .accept(CONTENT_TYPE_TRANSPORT)
        .body(transport_request_body(config));

    let response = connection.make_adt_request(request).await?;
    let mut transport = parse_transport(&response.body)?;
    transport.description.get_or_insert_with(|| config.description.clone());
    transport.request_type.get_or_insert(config.request_type);
    info!(number = %transport.number, "transport request created");
    Ok(transport)
}

pub async fn read_transport(
    connection: &dyn AdtConnection,
    number: &str,
) -> Result<TransportRequest> {
    let path = format!("{TRANSPORT_REQUESTS_PATH}/{}", urlencoding::encode(number));
    let response = connection
        .make_adt_request(AdtRequest::get(path).accept(CONTENT_TYPE_TRANSPORT))
        .await?;
    parse_transport(&response.body)
}

/// Read the request from a `tm:root` document. Some releases answer a
/// create with a bare URI or number instead, which is accepted too.
pub fn parse_transport(body: &str) -> Result<TransportRequest> {
    if body.trim_start().starts_with('<') {
        let root = xml::parse(body)?;
        if let Some(node) = root.find("request") {
            if let Some(number) = node.attr("number").filter(|n| !n.is_empty()) {
                return Ok(TransportRequest {
                    number: number.to_string(),
                    description: node.attr("desc").map(str::to_string),
                    owner: node.attr("owner").map(str::to_string),
                    target: node.attr("target").map(str::to_string),
                    status: node.attr("status").map(str::to_string),
                    request_type: node.attr("type").and_then(|t| t.parse::<TransportRequestType>().ok()),
                });
            }
        }
    }

    TRANSPORT_NUMBER
        .find(body)
        .map(|found| TransportRequest::new(found.as_str()))
        .ok_or_else(|| AdtError::Xml("transport response carries no request number".into()))
}

/// [`TransportService`] backed by the ADT transport organizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Transports;

#[async_trait]
impl TransportService for Transports {
    async fn create_transport(
        &self,
        connection: &dyn AdtConnection,
        config: &TransportConfig,
    ) -> Result<TransportRequest> {
        create_transport(connection, config).await
    }

    async fn read_transport(
        &self,
        connection: &dyn AdtConnection,
        number: &str,
    ) -> Result<TransportRequest> {
        read_transport(connection, number).await
    }
}
