//! Response formats of the versioned API.

use crate::error::{AppError, AppResult};

/// Query parameter naming the response format.
pub const FORMAT_PARAM: &str = "format";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Json,
    Xml,
    Msgpack,
}

impl ApiFormat {
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "msgpack" => Some(Self::Msgpack),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Msgpack => "msgpack",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json; charset=utf-8",
            Self::Xml => "application/xml; charset=utf-8",
            Self::Msgpack => "application/msgpack",
        }
    }

    /// ## Summary
    /// Picks the format of a request. A suffix on the last path segment wins
    /// over the `format` query parameter.
    ///
    /// ## Errors
    /// Returns `UnsupportedFormat` if neither names a known format.
    pub fn negotiate(suffix: Option<&str>, query: Option<&str>) -> AppResult<Self> {
        suffix
            .or(query)
            .and_then(Self::parse)
            .ok_or(AppError::UnsupportedFormat)
    }
}

impl std::fmt::Display for ApiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
