//! Encoding of API documents as JSON, XML or MessagePack.

use salvo::http::{StatusCode, header::CONTENT_TYPE};
use salvo::Response;
use serde::{Serialize, de::DeserializeOwned};

use openmensa_db::model::user::User;

use crate::error::{AppError, AppResult};

use super::format::ApiFormat;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// A value rendered as the body of an API response.
pub trait Document: Serialize {
    /// Name of the XML root element.
    const ROOT: &'static str;

    /// ## Errors
    /// Returns `Encoding` if the value cannot be written as XML.
    fn to_xml(&self) -> AppResult<String> {
        quick_xml::se::to_string_with_root(Self::ROOT, self)
            .map_err(|e| AppError::Encoding(e.to_string()))
    }
}

/// ## Summary
/// Encodes a document in the given format.
///
/// ## Errors
/// Returns `Encoding` if serialization fails.
pub fn encode<D: Document>(format: ApiFormat, document: &D) -> AppResult<Vec<u8>> {
    match format {
        ApiFormat::Json => {
            serde_json::to_vec(document).map_err(|e| AppError::Encoding(e.to_string()))
        }
        ApiFormat::Xml => Ok(format!("{XML_DECLARATION}{}", document.to_xml()?).into_bytes()),
        ApiFormat::Msgpack => {
            rmp_serde::to_vec_named(document).map_err(|e| AppError::Encoding(e.to_string()))
        }
    }
}

/// ## Summary
/// Decodes a request body in the given format.
///
/// ## Errors
/// Returns `BadRequest` if the body is not a valid document.
pub fn decode<T: DeserializeOwned>(format: ApiFormat, body: &[u8]) -> AppResult<T> {
    let bad_request = |e: &dyn std::fmt::Display| AppError::BadRequest(e.to_string());
    match format {
        ApiFormat::Json => serde_json::from_slice(body).map_err(|e| bad_request(&e)),
        ApiFormat::Xml => {
            let text = std::str::from_utf8(body).map_err(|e| bad_request(&e))?;
            quick_xml::de::from_str(text).map_err(|e| bad_request(&e))
        }
        ApiFormat::Msgpack => rmp_serde::from_slice(body).map_err(|e| bad_request(&e)),
    }
}

/// ## Summary
/// Writes `document` with `status` and the format's content type.
///
/// ## Errors
/// Returns `Encoding` if serialization fails; nothing is written then.
pub fn render<D: Document>(
    res: &mut Response,
    format: ApiFormat,
    status: StatusCode,
    document: &D,
) -> AppResult<()> {
    let body = encode(format, document)?;
    res.status_code(status);
    res.add_header(CONTENT_TYPE, format.content_type(), true)
        .map_err(|e| AppError::Encoding(e.to_string()))?;
    res.body(body);
    Ok(())
}

/// Error body of every failed API request.
#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<&'static str>,
}

impl Document for ErrorDocument {
    const ROOT: &'static str = "error";
}

/// ## Summary
/// Renders `error` for `actor`. Falls back to a plain text body if the
/// error document itself cannot be encoded.
pub fn render_error(res: &mut Response, format: ApiFormat, actor: &User, error: &AppError) {
    let status = error.status_code(actor);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    let document = ErrorDocument {
        status: status.as_u16(),
        message: error.public_message(),
        fields: error.invalid_fields(),
    };
    if let Err(e) = render(res, format, status, &document) {
        tracing::error!(error = %e, "Failed to encode error document");
        res.status_code(status);
        res.render(document.message);
    }
}
