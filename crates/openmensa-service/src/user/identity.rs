//! Sign in through an external login provider.
//!
//! The provider handshake happens elsewhere; this module only receives the
//! verified account (provider, uid and profile info) and maps it to a user.

use openmensa_core::config::{AuthConfig, I18nConfig, Provider};
use openmensa_db::{
    error::DbError,
    model::user::{User, identity::Identity, identity::NewIdentity},
    store::Repository,
};

use crate::error::{ServiceError, ServiceResult};

use super::{
    attributes::UserAttributes,
    service::register_user,
    validation::{is_reserved_login, is_valid_email},
};

/// Profile data reported by a provider for a verified account.
#[derive(Debug, Clone, Default)]
pub struct AuthInfo {
    pub nickname: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Outcome of a sign in.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub user: User,
    pub identity: Identity,
    /// `true` if the user was registered by this sign in.
    pub registered: bool,
}

fn nickname(info: &AuthInfo) -> String {
    info.nickname
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

fn fallback_login(provider: Provider, uid: &str) -> String {
    let uid: String = uid.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("{provider}_{uid}")
}

fn is_free<S: Repository + ?Sized>(store: &S, login: &str) -> ServiceResult<bool> {
    Ok(!is_reserved_login(login) && store.find_user_by_login(login)?.is_none())
}

/// First free login of `base`, `base_1`, `base_2`, ...
fn free_login<S: Repository + ?Sized>(store: &S, base: String) -> ServiceResult<String> {
    if is_free(store, &base)? {
        return Ok(base);
    }
    for n in 1..u32::MAX {
        let login = format!("{base}_{n}");
        if is_free(store, &login)? {
            return Ok(login);
        }
    }
    Err(ServiceError::InvariantViolation("no free login left"))
}

fn linked<S: Repository + ?Sized>(store: &S, identity: Identity) -> ServiceResult<SignIn> {
    let user = store.find_user(identity.user_id)?.ok_or_else(|| {
        ServiceError::NotFound(format!("user {} of identity", identity.user_id))
    })?;
    tracing::debug!(user_id = %user.id, "Signed in with linked identity");
    Ok(SignIn {
        user,
        identity,
        registered: false,
    })
}

/// Links a freshly registered user to the provider account. The user is
/// removed again if linking fails; if the account got linked concurrently,
/// that link wins.
fn link<S: Repository + ?Sized>(
    store: &S,
    user: User,
    provider: Provider,
    uid: &str,
) -> ServiceResult<SignIn> {
    let err = match store.insert_identity(NewIdentity {
        user_id: user.id,
        provider,
        uid: uid.to_string(),
    }) {
        Ok(identity) => {
            tracing::info!(user_id = %user.id, identity_id = %identity.id, "Registered user via provider");
            return Ok(SignIn {
                user,
                identity,
                registered: true,
            });
        }
        Err(err) => err,
    };

    tracing::warn!(user_id = %user.id, error = %err, "Linking identity failed, removing user");
    store.delete_user(user.id)?;
    if matches!(err, DbError::UniqueViolation { .. }) {
        if let Some(identity) = store.find_identity(provider, uid)? {
            return linked(store, identity);
        }
    }
    Err(err.into())
}

/// ## Summary
/// Returns the user linked to the provider account, registering a new
/// regular user and linking the account on first sign in.
///
/// The nickname becomes the login when it is free and not reserved;
/// otherwise the login is derived from provider and uid, with a numeric
/// suffix if that is taken as well. An email the provider reports in an
/// invalid shape is dropped. A failed link leaves no user behind.
///
/// ## Errors
/// Returns `InvalidConfiguration` if the provider is not enabled,
/// `Validation` if no valid user can be built, or a store error.
#[tracing::instrument(skip(store, auth, i18n, info), fields(provider = %provider))]
pub fn sign_in<S: Repository + ?Sized>(
    store: &S,
    auth: &AuthConfig,
    i18n: &I18nConfig,
    provider: Provider,
    uid: &str,
    info: AuthInfo,
) -> ServiceResult<SignIn> {
    if auth.provider(provider).is_none() {
        return Err(ServiceError::InvalidConfiguration(format!(
            "login provider {provider} is not enabled"
        )));
    }

    if let Some(identity) = store.find_identity(provider, uid)? {
        return linked(store, identity);
    }

    let nickname = nickname(&info);
    let login = if !nickname.is_empty() && is_free(store, &nickname)? {
        nickname
    } else {
        free_login(store, fallback_login(provider, uid))?
    };
    let name = info
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| login.clone());
    let email = info
        .email
        .filter(|e| is_valid_email(Some(e.as_str())));

    let user = register_user(
        store,
        i18n,
        UserAttributes {
            login: Some(login),
            email,
            name: Some(name),
            ..UserAttributes::default()
        },
    )?;
    link(store, user, provider, uid)
}

/// ## Summary
/// Lists the provider accounts linked to a user.
///
/// ## Errors
/// Returns a store error.
pub fn identities<S: Repository + ?Sized>(store: &S, user: &User) -> ServiceResult<Vec<Identity>> {
    Ok(store.identities_for_user(user.id)?)
}
