//! Startup provisioning of the configured administrator.

use std::sync::Arc;

use openmensa_core::config::Settings;
use openmensa_db::{model::user::User, store::Repository};
use openmensa_service::{
    auth::{Ability, Authorizer},
    token::{IssuedToken, issue_token, token_lifetime},
    user::{UserAttributes, create_user},
};

use crate::error::AppResult;

/// ## Summary
/// Creates the administrator named in `auth.bootstrap_admin`, acting as the
/// system user, and issues a token for it. An existing login is left as it
/// is and gets no new token.
///
/// ## Errors
/// Returns an error if the administrator is invalid or cannot be stored, or
/// if `auth.token_ttl_hours` is out of range. Nothing is created then.
#[tracing::instrument(skip_all)]
pub fn bootstrap_admin<S: Repository + ?Sized>(
    store: &S,
    authorizer: &Authorizer,
    settings: &Settings,
) -> AppResult<Option<IssuedToken>> {
    let Some(admin) = &settings.auth.bootstrap_admin else {
        tracing::debug!("No bootstrap administrator configured");
        return Ok(None);
    };

    if store.find_user_by_login(&admin.login)?.is_some() {
        tracing::info!(login = %admin.login, "Bootstrap administrator already exists");
        return Ok(None);
    }

    let ttl = token_lifetime(settings.auth.token_ttl_hours)?;
    let system = Ability::new(authorizer.clone(), User::system());
    let user = create_user(
        store,
        &system,
        &settings.i18n,
        UserAttributes {
            login: Some(admin.login.clone()),
            name: Some(admin.name.clone()),
            email: admin.email.clone(),
            admin: Some(true),
            ..UserAttributes::default()
        },
    )?;

    let issued = issue_token(store, &user, None, None, Some(ttl))?;

    tracing::info!(user_id = %user.id, login = %user.login, "Bootstrap administrator created");
    Ok(Some(issued))
}
