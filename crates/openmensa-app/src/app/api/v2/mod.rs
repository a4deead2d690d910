//! Version 2 of the API.
//!
//! Routing below `/api/v2` is done on the `ApiPath` resolved by the path
//! middleware, so one handler per method dispatches on the resource.

mod users;
mod views;
mod whoami;

use std::sync::Arc;

use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, Router, handler};

use openmensa_db::store::Repository;
use openmensa_service::auth::{Ability, get_ability_from_depot};

use crate::config::{Settings, get_config_from_depot};
use crate::error::{AppError, AppResult};
use crate::middleware::api_path::{ApiPath, ApiResource, get_api_path_from_depot};
use crate::store_handler::get_store_from_depot;

use super::response::render_error;

/// Everything a v2 handler needs from the depot.
pub(super) struct ApiContext {
    pub store: Arc<dyn Repository>,
    pub settings: Arc<Settings>,
    pub ability: Ability,
    pub path: ApiPath,
}

impl ApiContext {
    fn from_depot(depot: &Depot) -> AppResult<Self> {
        Ok(Self {
            store: get_store_from_depot(depot)?,
            settings: get_config_from_depot(depot)?,
            ability: get_ability_from_depot(depot)?,
            path: get_api_path_from_depot(depot)?,
        })
    }
}

fn not_found() -> AppError {
    AppError::NotFound("no such resource".to_string())
}

/// Builds the context, answering 500 if the depot is incomplete.
fn context(depot: &Depot, res: &mut Response) -> Option<ApiContext> {
    match ApiContext::from_depot(depot) {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            tracing::error!(error = ?e, "Incomplete request depot");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render("Internal Server Error");
            None
        }
    }
}

fn finish(ctx: &ApiContext, res: &mut Response, outcome: AppResult<()>) {
    if let Err(e) = outcome {
        render_error(res, ctx.path.format, ctx.ability.actor(), &e);
    }
}

#[handler]
async fn get(depot: &mut Depot, res: &mut Response) {
    let Some(ctx) = context(depot, res) else {
        return;
    };
    let outcome = match ctx.path.resource {
        Some(ApiResource::Whoami) => whoami::show(&ctx, res),
        Some(ApiResource::Users) => users::index(&ctx, res),
        Some(ApiResource::User(id)) => users::show(&ctx, res, id),
        None => Err(not_found()),
    };
    finish(&ctx, res, outcome);
}

#[handler]
async fn post(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(ctx) = context(depot, res) else {
        return;
    };
    let outcome = match ctx.path.resource {
        Some(ApiResource::Users) => users::create(&ctx, req, res).await,
        Some(_) => Err(AppError::MethodNotAllowed),
        None => Err(not_found()),
    };
    finish(&ctx, res, outcome);
}

#[handler]
async fn put(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(ctx) = context(depot, res) else {
        return;
    };
    let outcome = match ctx.path.resource {
        Some(ApiResource::User(id)) => users::update(&ctx, req, res, id).await,
        Some(_) => Err(AppError::MethodNotAllowed),
        None => Err(not_found()),
    };
    finish(&ctx, res, outcome);
}

#[handler]
async fn delete(depot: &mut Depot, res: &mut Response) {
    let Some(ctx) = context(depot, res) else {
        return;
    };
    let outcome = match ctx.path.resource {
        Some(ApiResource::User(id)) => users::destroy(&ctx, res, id),
        Some(_) => Err(AppError::MethodNotAllowed),
        None => Err(not_found()),
    };
    finish(&ctx, res, outcome);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("{**rest}")
        .get(get)
        .post(post)
        .put(put)
        .patch(put)
        .delete(delete)
}
