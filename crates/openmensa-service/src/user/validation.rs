//! User record validation.

use std::sync::LazyLock;

use regex::Regex;

use openmensa_core::constants::RESERVED_LOGINS;
use openmensa_db::{
    model::user::{NewUser, User},
    store::Repository,
};

use crate::error::ServiceResult;
use crate::validation::{BLANK, INVALID, ValidationErrors, is_blank};

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static LOGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid login pattern"));

// local@domain.tld; single-label domains are rejected
#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("valid email pattern")
});

const RESERVED: &str = "is reserved";
pub(crate) const TAKEN: &str = "has already been taken";

/// Returns `true` for a login that belongs to an internal user.
#[must_use]
pub fn is_reserved_login(login: &str) -> bool {
    RESERVED_LOGINS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(login))
}

/// An empty email counts as absent.
#[must_use]
pub fn is_valid_email(email: Option<&str>) -> bool {
    match email {
        None | Some("") => true,
        Some(email) => EMAIL_PATTERN.is_match(email),
    }
}

fn check_fields<S: Repository + ?Sized>(
    store: &S,
    own_id: Option<uuid::Uuid>,
    login: &str,
    email: Option<&str>,
    name: &str,
) -> ServiceResult<ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if login.is_empty() {
        errors.add("login", BLANK);
    } else if !LOGIN_PATTERN.is_match(login) {
        errors.add("login", INVALID);
    } else if is_reserved_login(login) {
        errors.add("login", RESERVED);
    } else if store
        .find_user_by_login(login)?
        .is_some_and(|existing| Some(existing.id) != own_id)
    {
        errors.add("login", TAKEN);
    }

    if is_blank(Some(name)) {
        errors.add("name", BLANK);
    }

    if !is_valid_email(email) {
        errors.add("email", INVALID);
    }

    Ok(errors)
}

/// ## Summary
/// Validates a user before it is first persisted.
///
/// ## Errors
/// Returns `Validation` listing every failing field, or a store error.
pub fn validate_new_user<S: Repository + ?Sized>(store: &S, user: &NewUser) -> ServiceResult<()> {
    check_fields(store, None, &user.login, user.email.as_deref(), &user.name)?
        .into_result()
        .map_err(Into::into)
}

/// ## Summary
/// Validates changes to a persisted user. The user's own login does not
/// count as taken.
///
/// ## Errors
/// Returns `Validation` listing every failing field, or a store error.
pub fn validate_user<S: Repository + ?Sized>(store: &S, user: &User) -> ServiceResult<()> {
    check_fields(
        store,
        Some(user.id),
        &user.login,
        user.email.as_deref(),
        &user.name,
    )?
    .into_result()
    .map_err(Into::into)
}
