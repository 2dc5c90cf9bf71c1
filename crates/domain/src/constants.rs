//! ADT protocol constants
//!
//! Centralized location for endpoint paths, header names and content types
//! used by the ADT client.

// Endpoints
pub const DISCOVERY_PATH: &str = "/sap/bc/adt/discovery";
pub const CHECKRUN_PATH: &str = "/sap/bc/adt/checkruns";
pub const ACTIVATION_PATH: &str = "/sap/bc/adt/activation";
pub const DELETION_CHECK_PATH: &str = "/sap/bc/adt/deletion/check";
pub const DELETION_DELETE_PATH: &str = "/sap/bc/adt/deletion/delete";
pub const TRANSPORT_REQUESTS_PATH: &str = "/sap/bc/adt/cts/transportrequests";

// Headers
pub const HEADER_CSRF_TOKEN: &str = "x-csrf-token";
pub const HEADER_SESSION_TYPE: &str = "X-sap-adt-sessiontype";
pub const HEADER_CONNECTION_ID: &str = "sap-adt-connection-id";
pub const CSRF_FETCH: &str = "Fetch";
pub const CSRF_REQUIRED: &str = "Required";

// Content types
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
pub const CONTENT_TYPE_CHECKRUN: &str = "application/vnd.sap.adt.checkobjects+xml";
pub const ACCEPT_CHECKRUN: &str = "application/vnd.sap.adt.checkmessages+xml";
pub const CONTENT_TYPE_ACTIVATION: &str = "application/xml";
pub const CONTENT_TYPE_DELETION_CHECK: &str =
    "application/vnd.sap.adt.deletion.check.request.v1+xml";
pub const CONTENT_TYPE_DELETION: &str = "application/vnd.sap.adt.deletion.request.v1+xml";
pub const CONTENT_TYPE_TRANSPORT: &str = "application/vnd.sap.adt.transportorganizer.v1+xml";
pub const ACCEPT_LOCK: &str = "application/vnd.sap.as+xml;charset=UTF-8;dataname=com.sap.adt.lock.result;q=0.8, application/vnd.sap.as+xml;charset=UTF-8;dataname=com.sap.adt.lock.result2;q=0.9";
pub const ACCEPT_VALIDATION: &str = "application/vnd.sap.as+xml";

// Check reporters
pub const CHECK_REPORTER: &str = "abapCheckRun";

// Messages SAP reports that never indicate a real problem in the object.
pub const BENIGN_CHECK_MESSAGES: &[&str] = &["Kerberos library not loaded", "has been checked"];

// Errors an empty function group produces until its first module exists.
pub const EMPTY_FUNCTION_GROUP_MESSAGES: &[&str] =
    &["REPORT/PROGRAM statement is missing", "does not contain any function modules"];

// Defaults
pub const DEFAULT_LANGUAGE: &str = "EN";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
