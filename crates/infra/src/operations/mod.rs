//! Kind-independent ADT calls
//!
//! Each function issues one request through [`AdtConnection`] and returns
//! the raw response or a parsed value. Object modules combine them with
//! their own URIs and payloads.
//!
//! [`AdtConnection`]: adtkit_core::AdtConnection

pub mod activation;
pub mod check;
pub mod deletion;
pub mod lock;
pub mod source;
pub mod validation;

pub use activation::{activate_object, parse_activation_result};
pub use check::{check_object, parse_check_report, run_check};
pub use deletion::{check_deletion, delete_object};
pub use lock::{lock_object, parse_lock_result, unlock_object};
pub use source::{create_object, read_metadata, read_source, update_metadata, update_source};
pub use validation::{parse_validation_outcome, validate_object_name};

/// `{collection}/{name}` with the name lower-cased and percent-encoded,
/// as ADT addresses repository objects.
pub fn object_uri(collection: &str, name: &str) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), encode_name(name))
}

/// Lower-case and percent-encode an object name for use in a path segment.
pub fn encode_name(name: &str) -> String {
    urlencoding::encode(&name.to_lowercase()).into_owned()
}
