//! Store traits.
//!
//! Lookups are synchronous; implementations must make each write atomic with
//! respect to its uniqueness checks.

pub mod memory;

use openmensa_core::config::Provider;

use crate::error::DbResult;
use crate::model::{
    meal::{Meal, NewMeal},
    token::{AccessToken, Client},
    user::{
        NewUser, User,
        identity::{Identity, NewIdentity},
    },
};

pub trait UserStore: Send + Sync {
    /// ## Errors
    /// Returns `UniqueViolation` if the login is already taken.
    fn insert_user(&self, new_user: NewUser) -> DbResult<User>;

    /// ## Errors
    /// Returns `RecordNotFound` if the user does not exist, or
    /// `UniqueViolation` if the new login belongs to another user.
    fn update_user(&self, user: User) -> DbResult<User>;

    /// Deletes a user together with its identities and tokens.
    ///
    /// ## Errors
    /// Returns `RecordNotFound` if the user does not exist.
    fn delete_user(&self, id: uuid::Uuid) -> DbResult<()>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn find_user(&self, id: uuid::Uuid) -> DbResult<Option<User>>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn find_user_by_login(&self, login: &str) -> DbResult<Option<User>>;

    /// All persisted users, ordered by login. Internal users never appear.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn all_users(&self) -> DbResult<Vec<User>>;
}

pub trait TokenStore: Send + Sync {
    /// ## Errors
    /// Returns `UniqueViolation` if the digest is already stored.
    fn insert_token(&self, token: AccessToken) -> DbResult<AccessToken>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn find_token_by_digest(&self, digest: &str) -> DbResult<Option<AccessToken>>;

    /// ## Errors
    /// Returns `RecordNotFound` if the token does not exist.
    fn revoke_token(&self, id: uuid::Uuid, at: chrono::DateTime<chrono::Utc>) -> DbResult<()>;

    /// ## Errors
    /// Returns `UniqueViolation` if the client identifier is already taken.
    fn insert_client(&self, client: Client) -> DbResult<Client>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn find_client(&self, id: uuid::Uuid) -> DbResult<Option<Client>>;
}

pub trait IdentityStore: Send + Sync {
    /// ## Errors
    /// Returns `UniqueViolation` if the provider account is already linked,
    /// or `RecordNotFound` if the user does not exist.
    fn insert_identity(&self, identity: NewIdentity) -> DbResult<Identity>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn find_identity(&self, provider: Provider, uid: &str) -> DbResult<Option<Identity>>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn identities_for_user(&self, user_id: uuid::Uuid) -> DbResult<Vec<Identity>>;
}

pub trait MealStore: Send + Sync {
    /// ## Errors
    /// Returns an error if the store cannot be written.
    fn insert_meal(&self, meal: NewMeal) -> DbResult<Meal>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn meals_for(&self, cafeteria_id: u64, date: chrono::NaiveDate) -> DbResult<Vec<Meal>>;
}

/// Everything the service layer needs from persistence.
pub trait Repository: UserStore + TokenStore + IdentityStore + MealStore {}

impl<T> Repository for T where T: UserStore + TokenStore + IdentityStore + MealStore {}
