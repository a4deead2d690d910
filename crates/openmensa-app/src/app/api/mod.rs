mod app_specific;
pub mod format;
pub mod headers;
pub mod response;
mod v2;

use salvo::Router;

use crate::middleware::{api_path::ApiPathMiddleware, auth::AuthMiddleware};

// Re-export route constants from core
pub use openmensa_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, API_V2_ROUTE_COMPONENT, API_V2_ROUTE_PREFIX,
    USERS_ROUTE_COMPONENT, USERS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: the unversioned endpoints and version 2.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(
            Router::with_path(API_V2_ROUTE_COMPONENT)
                .hoop(ApiPathMiddleware)
                .hoop(AuthMiddleware)
                .push(v2::routes()),
        )
}
