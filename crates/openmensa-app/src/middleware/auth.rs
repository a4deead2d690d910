use salvo::Depot;
use salvo::http::header::AUTHORIZATION;
use tracing::error;

use crate::store_handler::get_store_from_depot;
use openmensa_service::auth::{authenticate, depot::depot_keys};

/// Query parameter accepted in place of the `Authorization` header.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// ## Summary
/// Extracts the access token from `Authorization: Bearer <token>`, falling
/// back to the `access_token` query parameter.
#[must_use]
pub fn request_token(req: &salvo::Request) -> Option<String> {
    let from_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("bearer")
                .then(|| token.trim().to_string())
        });

    from_header.or_else(|| req.query::<String>(ACCESS_TOKEN_PARAM))
}

/// ## Summary
/// Resolves the request's access token into a `RequestContext` and stores it
/// in the depot. Requests without a usable token continue as anonymous.
///
/// ## Side Effects
/// Inserts the context under `depot_keys::REQUEST_CONTEXT`.
///
/// ## Errors
/// Responds with 500 if the store is unavailable or cannot be read.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let store = match get_store_from_depot(depot) {
            Ok(store) => store,
            Err(e) => {
                error!(error = ?e, "Failed to get record store from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        let token = request_token(req);
        match authenticate(store.as_ref(), token.as_deref()) {
            Ok(context) => {
                tracing::debug!(
                    login = %context.current_user().login,
                    has_client = context.current_client().is_some(),
                    "Request context resolved"
                );
                depot.insert(depot_keys::REQUEST_CONTEXT, context);
            }
            Err(e) => {
                error!(error = ?e, "Authentication failed with error");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                res.body("Internal Server Error");
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Every request passing it carries a `RequestContext`, anonymous or not.
pub struct AuthMiddleware;
