//! Path and format resolution for the versioned API.
//!
//! ## Summary
//! Splits the request path below `/api/v2` into the addressed resource and
//! the requested format, which comes from a suffix on the last segment
//! (`/api/v2/users.json`) or from the `format` query parameter. Requests
//! naming no supported format are answered with `406 Not Acceptable`.
//!
//! Every response passing this middleware carries the API version header.

use salvo::Depot;
use salvo::http::{StatusCode, header::HeaderName};

use crate::app::api::{
    API_V2_ROUTE_PREFIX, USERS_ROUTE_COMPONENT,
    format::{ApiFormat, FORMAT_PARAM},
    headers::custom_header_name,
};
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};

pub const API_PATH_KEY: &str = "__api_path";

const WHOAMI_ROUTE_COMPONENT: &str = "whoami";

/// What a versioned API path addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiResource {
    Whoami,
    Users,
    User(uuid::Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    /// `None` for paths that address nothing.
    pub resource: Option<ApiResource>,
    pub format: ApiFormat,
}

impl ApiPath {
    /// ## Summary
    /// Parses a path relative to `/api/v2`.
    ///
    /// ## Errors
    /// Returns `UnsupportedFormat` if neither the suffix nor `query_format`
    /// names a supported format.
    pub fn parse(path: &str, query_format: Option<&str>) -> AppResult<Self> {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut suffix = None;
        if let Some(last) = segments.pop() {
            match last.rsplit_once('.') {
                Some((base, ext)) => {
                    segments.push(base);
                    suffix = Some(ext);
                }
                None => segments.push(last),
            }
        }

        let format = ApiFormat::negotiate(suffix, query_format)?;
        let resource = match segments.as_slice() {
            [WHOAMI_ROUTE_COMPONENT] => Some(ApiResource::Whoami),
            [USERS_ROUTE_COMPONENT] => Some(ApiResource::Users),
            [USERS_ROUTE_COMPONENT, id] => uuid::Uuid::parse_str(id).ok().map(ApiResource::User),
            _ => None,
        };

        Ok(Self { resource, format })
    }
}

/// ## Summary
/// Retrieves the parsed API path from the depot.
///
/// ## Errors
/// Returns an error if the API path middleware did not run.
pub fn get_api_path_from_depot(depot: &Depot) -> AppResult<ApiPath> {
    depot.get::<ApiPath>(API_PATH_KEY).cloned().map_err(|_err| {
        AppError::CoreError(openmensa_core::error::CoreError::InvariantViolation(
            "API path not found in depot",
        ))
    })
}

/// Middleware handler resolving the versioned API path and format.
pub struct ApiPathMiddleware;

#[salvo::async_trait]
impl salvo::Handler for ApiPathMiddleware {
    #[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let version = match get_config_from_depot(depot) {
            Ok(settings) => settings.api.version,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };
        match HeaderName::try_from(custom_header_name("api_version")) {
            Ok(name) => {
                if let Err(e) = res.add_header(name, version.to_string(), true) {
                    tracing::warn!(error = %e, "Failed to set API version header");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Invalid API version header name"),
        }

        let path = req.uri().path();
        let relative = path.strip_prefix(API_V2_ROUTE_PREFIX).unwrap_or(path);
        let query_format = req.query::<String>(FORMAT_PARAM);

        match ApiPath::parse(relative, query_format.as_deref()) {
            Ok(api_path) => {
                tracing::debug!(
                    resource = ?api_path.resource,
                    format = %api_path.format,
                    "API path resolved"
                );
                depot.insert(API_PATH_KEY, api_path);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting request without supported format");
                res.status_code(StatusCode::NOT_ACCEPTABLE);
                res.render(e.to_string());
                ctrl.skip_rest();
            }
        }
    }
}
