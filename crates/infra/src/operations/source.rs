use adtkit_core::AdtConnection;
use adtkit_domain::constants::CONTENT_TYPE_TEXT;
use adtkit_domain::{AdtRequest, AdtResponse, CheckVersion, LockHandle, Result};
use tracing::debug;

/// `POST {collection}[?corrNr=..]` with the object's creation document.
pub async fn create_object(
    connection: &dyn AdtConnection,
    collection_uri: &str,
    content_type: &str,
    body: String,
    transport_request: Option<&str>,
) -> Result<AdtResponse> {
    let request = AdtRequest::post(collection_uri)
        .query_opt("corrNr", transport_request)
        .content_type(content_type)
        .accept(content_type)
        .body(body);

    let response = connection.make_adt_request(request).await?;
    debug!(collection = collection_uri, status = response.status, "object created");
    Ok(response)
}

/// `GET {uri}`: object metadata document.
pub async fn read_metadata(
    connection: &dyn AdtConnection,
    object_uri: &str,
    accept: &str,
) -> Result<AdtResponse> {
    connection.make_adt_request(AdtRequest::get(object_uri).accept(accept)).await
}

/// `GET {source_uri}?version=..`: plain-text source.
pub async fn read_source(
    connection: &dyn AdtConnection,
    source_uri: &str,
    version: CheckVersion,
) -> Result<String> {
    let request =
        AdtRequest::get(source_uri).query("version", version.as_str()).accept("text/plain");
    Ok(connection.make_adt_request(request).await?.body)
}

/// `PUT {source_uri}?lockHandle=..[&corrNr=..]` with the new source.
pub async fn update_source(
    connection: &dyn AdtConnection,
    source_uri: &str,
    handle: &LockHandle,
    transport_request: Option<&str>,
    source: &str,
) -> Result<AdtResponse> {
    let request = AdtRequest::put(source_uri)
        .query("lockHandle", handle.as_str())
        .query_opt("corrNr", transport_request)
        .content_type(CONTENT_TYPE_TEXT)
        .body(source);

    let response = connection.make_adt_request(request).await?;
    debug!(uri = source_uri, bytes = source.len(), "source written");
    Ok(response)
}

/// `PUT {uri}?lockHandle=..[&corrNr=..]` with a metadata document.
pub async fn update_metadata(
    connection: &dyn AdtConnection,
    object_uri: &str,
    handle: &LockHandle,
    transport_request: Option<&str>,
    content_type: &str,
    body: String,
) -> Result<AdtResponse> {
    let request = AdtRequest::put(object_uri)
        .query("lockHandle", handle.as_str())
        .query_opt("corrNr", transport_request)
        .content_type(content_type)
        .body(body);

    connection.make_adt_request(request).await
}
