// Unversioned endpoints under /api.

use salvo::Router;

mod healthcheck;

#[must_use]
pub fn routes() -> Router {
    Router::new().push(healthcheck::routes())
}
