//! `/api/v2/users` handlers.

use salvo::http::StatusCode;
use salvo::{Request, Response};

use openmensa_service::user::{
    UserAttributes, create_user, destroy_user, list_users, show_user, update_user,
};

use crate::app::api::response::{decode, render};
use crate::error::{AppError, AppResult};

use super::{
    ApiContext,
    views::{UserList, UserView},
};

async fn read_attributes(ctx: &ApiContext, req: &mut Request) -> AppResult<UserAttributes> {
    let body = req
        .payload()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if body.is_empty() {
        return Ok(UserAttributes::default());
    }
    decode(ctx.path.format, body)
}

#[tracing::instrument(skip_all)]
pub(super) fn index(ctx: &ApiContext, res: &mut Response) -> AppResult<()> {
    let users = list_users(ctx.store.as_ref(), &ctx.ability)?;
    render(
        res,
        ctx.path.format,
        StatusCode::OK,
        &UserList::from(users.as_slice()),
    )
}

#[tracing::instrument(skip(ctx, res))]
pub(super) fn show(ctx: &ApiContext, res: &mut Response, id: uuid::Uuid) -> AppResult<()> {
    let user = show_user(ctx.store.as_ref(), &ctx.ability, id)?;
    render(
        res,
        ctx.path.format,
        StatusCode::OK,
        &UserView::from(user.as_ref()),
    )
}

#[tracing::instrument(skip_all)]
pub(super) async fn create(
    ctx: &ApiContext,
    req: &mut Request,
    res: &mut Response,
) -> AppResult<()> {
    let attributes = read_attributes(ctx, req).await?;
    let user = create_user(
        ctx.store.as_ref(),
        &ctx.ability,
        &ctx.settings.i18n,
        attributes,
    )?;
    render(
        res,
        ctx.path.format,
        StatusCode::CREATED,
        &UserView::from(&user),
    )
}

#[tracing::instrument(skip(ctx, req, res))]
pub(super) async fn update(
    ctx: &ApiContext,
    req: &mut Request,
    res: &mut Response,
    id: uuid::Uuid,
) -> AppResult<()> {
    let attributes = read_attributes(ctx, req).await?;
    let user = update_user(ctx.store.as_ref(), &ctx.ability, id, attributes)?;
    render(res, ctx.path.format, StatusCode::OK, &UserView::from(&user))
}

#[tracing::instrument(skip(ctx, res))]
pub(super) fn destroy(ctx: &ApiContext, res: &mut Response, id: uuid::Uuid) -> AppResult<()> {
    destroy_user(ctx.store.as_ref(), &ctx.ability, id)?;
    res.status_code(StatusCode::NO_CONTENT);
    Ok(())
}
