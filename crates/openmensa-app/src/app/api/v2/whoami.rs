use salvo::Response;
use salvo::http::StatusCode;

use crate::app::api::response::render;
use crate::error::AppResult;

use super::{ApiContext, views::UserView};

/// The current user; anonymous requests see the anonymous user.
pub(super) fn show(ctx: &ApiContext, res: &mut Response) -> AppResult<()> {
    let actor = ctx.ability.actor();
    render(
        res,
        ctx.path.format,
        StatusCode::OK,
        &UserView::from(actor.as_ref()),
    )
}
