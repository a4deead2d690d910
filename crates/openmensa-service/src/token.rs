//! Access token issuing and revocation.
//!
//! Only the SHA-256 digest of a token secret is stored. The secret itself is
//! returned once, when the token is issued.

use sha2::{Digest, Sha256};

use openmensa_db::{
    model::{
        token::{AbilityScope, AccessToken, Client},
        user::User,
    },
    store::Repository,
};

use crate::error::{ServiceError, ServiceResult};

/// A freshly issued token and its secret.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub secret: String,
    pub token: AccessToken,
}

/// Hex-encoded SHA-256 of a token secret.
#[must_use]
pub fn digest_token(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

fn generate_secret() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// ## Summary
/// The lifetime of tokens issued now, for a configured number of hours.
///
/// ## Errors
/// Returns `InvalidConfiguration` if a token issued now would expire past
/// the representable date range.
pub fn token_lifetime(hours: u32) -> ServiceResult<chrono::Duration> {
    let ttl = chrono::Duration::hours(i64::from(hours));
    expiry(chrono::Utc::now(), ttl)?;
    Ok(ttl)
}

fn expiry(
    now: chrono::DateTime<chrono::Utc>,
    ttl: chrono::Duration,
) -> ServiceResult<chrono::DateTime<chrono::Utc>> {
    now.checked_add_signed(ttl).ok_or_else(|| {
        ServiceError::InvalidConfiguration(format!("token lifetime {ttl} is out of range"))
    })
}

/// ## Summary
/// Issues a token for `user`, optionally bound to a client and scope.
/// `ttl` of `None` issues a token that never expires.
///
/// ## Errors
/// Returns `AccessDenied` for the anonymous user, `InvalidConfiguration` for
/// a lifetime past the representable date range, or a store error.
#[tracing::instrument(skip(store, user, client, scope), fields(user_id = %user.id))]
pub fn issue_token<S: Repository + ?Sized>(
    store: &S,
    user: &User,
    client: Option<&Client>,
    scope: Option<AbilityScope>,
    ttl: Option<chrono::Duration>,
) -> ServiceResult<IssuedToken> {
    if !user.is_logged() && !user.is_admin() {
        return Err(ServiceError::AccessDenied(format!(
            "tokens cannot be issued for {}",
            user.login
        )));
    }

    let now = chrono::Utc::now();
    let expires_at = ttl.map(|ttl| expiry(now, ttl)).transpose()?;
    let secret = generate_secret();
    let token = store.insert_token(AccessToken {
        id: uuid::Uuid::now_v7(),
        digest: digest_token(&secret),
        user_id: user.id,
        client_id: client.map(|c| c.id),
        scope,
        expires_at,
        revoked_at: None,
        created_at: now,
    })?;

    tracing::info!(token_id = %token.id, expires_at = ?token.expires_at, "Access token issued");

    Ok(IssuedToken { secret, token })
}

/// ## Summary
/// Revokes the token with the given secret. Unknown secrets are ignored.
///
/// ## Errors
/// Returns a store error.
#[tracing::instrument(skip(store, secret))]
pub fn revoke_token<S: Repository + ?Sized>(store: &S, secret: &str) -> ServiceResult<bool> {
    let Some(token) = store.find_token_by_digest(&digest_token(secret))? else {
        return Ok(false);
    };
    store.revoke_token(token.id, chrono::Utc::now())?;
    tracing::info!(token_id = %token.id, "Access token revoked");
    Ok(true)
}
