use std::sync::Arc;

use openmensa_db::{model::user::User, store::Repository};

use super::context::RequestContext;
use crate::error::ServiceResult;
use crate::token::digest_token;

/// ## Summary
/// Looks up a user by id, resolving internal ids to their singletons.
///
/// ## Errors
/// Returns an error if the store cannot be read.
pub fn find_user<S: Repository + ?Sized>(
    store: &S,
    id: uuid::Uuid,
) -> ServiceResult<Option<Arc<User>>> {
    if let Some(internal) = User::internal_by_id(id) {
        return Ok(Some(internal));
    }
    Ok(store.find_user(id)?.map(Arc::new))
}

/// ## Summary
/// Builds the request context for an optional bearer token.
///
/// A missing, unknown, expired or revoked token, or one whose user is gone,
/// yields an anonymous context. Only store failures are errors.
///
/// ## Errors
/// Returns an error if the store cannot be read.
#[tracing::instrument(skip(store, token), fields(has_token = token.is_some()))]
pub fn authenticate<S: Repository + ?Sized>(
    store: &S,
    token: Option<&str>,
) -> ServiceResult<RequestContext> {
    let Some(secret) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        tracing::trace!("No access token, treating as anonymous");
        return Ok(RequestContext::anonymous());
    };

    let Some(access_token) = store.find_token_by_digest(&digest_token(secret))? else {
        tracing::debug!("Unknown access token, treating as anonymous");
        return Ok(RequestContext::anonymous());
    };

    if !access_token.is_active(chrono::Utc::now()) {
        tracing::debug!(token_id = %access_token.id, "Inactive access token, treating as anonymous");
        return Ok(RequestContext::anonymous());
    }

    let Some(user) = find_user(store, access_token.user_id)? else {
        tracing::warn!(
            token_id = %access_token.id,
            user_id = %access_token.user_id,
            "Access token owner no longer exists"
        );
        return Ok(RequestContext::anonymous());
    };

    let client = match access_token.client_id {
        Some(client_id) => store.find_client(client_id)?,
        None => None,
    };

    tracing::debug!(user_id = %user.id, login = %user.login, "Access token resolved");

    Ok(RequestContext::for_user(user)
        .with_client(client)
        .with_scope(access_token.scope))
}
