//! Conversions from external infrastructure errors into domain errors.

use adtkit_domain::AdtError;
use quick_xml::Error as XmlError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AdtError);

impl From<InfraError> for AdtError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AdtError> for InfraError {
    fn from(value: AdtError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAdtError {
    fn into_adt(self) -> AdtError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AdtError */
/* -------------------------------------------------------------------------- */

impl IntoAdtError for HttpError {
    fn into_adt(self) -> AdtError {
        if self.is_timeout() {
            return AdtError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return AdtError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return AdtError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => AdtError::Auth(message),
                404 => AdtError::NotFound(message),
                _ => AdtError::Sap { status: code, exception_type: None, message },
            };
        }

        AdtError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_adt())
    }
}

/* -------------------------------------------------------------------------- */
/* quick_xml::Error → AdtError */
/* -------------------------------------------------------------------------- */

impl IntoAdtError for XmlError {
    fn into_adt(self) -> AdtError {
        AdtError::Xml(format!("malformed ADT payload: {self}"))
    }
}

impl From<XmlError> for InfraError {
    fn from(value: XmlError) -> Self {
        InfraError(value.into_adt())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
