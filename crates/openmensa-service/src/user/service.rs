//! User record operations, each guarded by the caller's ability.

use std::sync::Arc;

use openmensa_core::config::I18nConfig;
use openmensa_db::{
    error::DbError,
    model::user::{NewUser, User},
    store::Repository,
};

use crate::auth::{Ability, Action, Target, find_user};
use crate::error::{ServiceError, ServiceResult};
use crate::validation::ValidationErrors;

use super::{
    attributes::{Operation, UserAttributes, safe_attributes},
    validation::{TAKEN, validate_new_user, validate_user},
};

/// A lost race on the login index is reported like any other taken login.
fn login_taken(e: DbError) -> ServiceError {
    match e {
        DbError::UniqueViolation {
            column: "login", ..
        } => {
            let mut errors = ValidationErrors::new();
            errors.add("login", TAKEN);
            ServiceError::Validation(errors)
        }
        other => other.into(),
    }
}

fn lookup<S: Repository + ?Sized>(store: &S, id: uuid::Uuid) -> ServiceResult<Arc<User>> {
    find_user(store, id)?.ok_or_else(|| ServiceError::NotFound(format!("user {id}")))
}

fn insert<S: Repository + ?Sized>(store: &S, new_user: NewUser) -> ServiceResult<User> {
    validate_new_user(store, &new_user)?;
    let user = store.insert_user(new_user).map_err(login_taken)?;
    tracing::info!(user_id = %user.id, login = %user.login, admin = user.admin, "User created");
    Ok(user)
}

/// ## Summary
/// Lists every persisted user, ordered by login.
///
/// ## Errors
/// Returns `AccessDenied` unless the actor may index users.
#[tracing::instrument(skip(store, ability), fields(actor = %ability.actor().login))]
pub fn list_users<S: Repository + ?Sized>(store: &S, ability: &Ability) -> ServiceResult<Vec<User>> {
    ability.authorize(Action::Index, Target::Users)?;
    Ok(store.all_users()?)
}

/// ## Summary
/// Loads one user, including the internal users by their fixed ids.
///
/// ## Errors
/// Returns `NotFound` for an unknown id and `AccessDenied` if the actor
/// may not see the user.
#[tracing::instrument(skip(store, ability), fields(actor = %ability.actor().login))]
pub fn show_user<S: Repository + ?Sized>(
    store: &S,
    ability: &Ability,
    id: uuid::Uuid,
) -> ServiceResult<Arc<User>> {
    let user = lookup(store, id)?;
    ability.authorize(Action::Show, Target::User(&user))?;
    Ok(user)
}

/// ## Summary
/// Creates a user on behalf of the actor.
///
/// Fields the actor may not assign are dropped; the locale fields default to
/// the configured locale and time zone.
///
/// ## Errors
/// Returns `AccessDenied` unless the actor may create users, and
/// `Validation` if the resulting record is invalid.
#[tracing::instrument(skip(store, ability, i18n, attributes), fields(actor = %ability.actor().login))]
pub fn create_user<S: Repository + ?Sized>(
    store: &S,
    ability: &Ability,
    i18n: &I18nConfig,
    attributes: UserAttributes,
) -> ServiceResult<User> {
    ability.authorize(Action::Create, Target::Users)?;
    let allowed = safe_attributes(ability.actor(), Operation::Create);
    let new_user = attributes
        .sanitize(&allowed)?
        .into_new_user(&i18n.default_time_zone, &i18n.default_locale);
    insert(store, new_user)
}

/// ## Summary
/// Self registration. Needs no ability; only the registration fields are
/// applied, so the new user is never an administrator.
///
/// ## Errors
/// Returns `Validation` if the resulting record is invalid.
#[tracing::instrument(skip(store, i18n, attributes))]
pub fn register_user<S: Repository + ?Sized>(
    store: &S,
    i18n: &I18nConfig,
    attributes: UserAttributes,
) -> ServiceResult<User> {
    let allowed = safe_attributes(&User::anonymous(), Operation::Create);
    let new_user = attributes
        .sanitize(&allowed)?
        .into_new_user(&i18n.default_time_zone, &i18n.default_locale);
    insert(store, new_user)
}

/// ## Summary
/// Applies a payload to an existing user.
///
/// ## Errors
/// Returns `NotFound`, `AccessDenied` unless the actor may update this user
/// and assign at least the payload's allowed fields, or `Validation`.
#[tracing::instrument(skip(store, ability, attributes), fields(actor = %ability.actor().login))]
pub fn update_user<S: Repository + ?Sized>(
    store: &S,
    ability: &Ability,
    id: uuid::Uuid,
    attributes: UserAttributes,
) -> ServiceResult<User> {
    let target = lookup(store, id)?;
    ability.authorize(Action::Update, Target::User(&target))?;

    let allowed = safe_attributes(ability.actor(), Operation::Update(&target));
    let mut user = (*target).clone();
    attributes.sanitize(&allowed)?.assign(&mut user);
    validate_user(store, &user)?;

    let user = store.update_user(user).map_err(login_taken)?;
    tracing::info!(user_id = %user.id, "User updated");
    Ok(user)
}

/// ## Summary
/// Destroys a user together with its identities and tokens.
///
/// ## Errors
/// Returns `NotFound`, `AccessDenied` unless the actor may destroy this
/// user, or `NotDestructible` for administrators and internal users.
#[tracing::instrument(skip(store, ability), fields(actor = %ability.actor().login))]
pub fn destroy_user<S: Repository + ?Sized>(
    store: &S,
    ability: &Ability,
    id: uuid::Uuid,
) -> ServiceResult<()> {
    let target = lookup(store, id)?;
    ability.authorize(Action::Destroy, Target::User(&target))?;

    // holds even under a policy that grants destroy on administrators
    if !target.is_destructible() {
        return Err(ServiceError::NotDestructible(format!("user {}", target.login)));
    }

    store.delete_user(target.id)?;
    tracing::info!(user_id = %target.id, login = %target.login, "User destroyed");
    Ok(())
}
