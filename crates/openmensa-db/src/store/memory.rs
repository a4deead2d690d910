use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use openmensa_core::config::Provider;

use super::{IdentityStore, MealStore, TokenStore, UserStore};
use crate::error::{DbError, DbResult};
use crate::model::{
    meal::{Meal, NewMeal},
    token::{AccessToken, Client},
    user::{
        NewUser, User, UserKind,
        identity::{Identity, NewIdentity},
    },
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<uuid::Uuid, User>,
    tokens: HashMap<uuid::Uuid, AccessToken>,
    clients: HashMap<uuid::Uuid, Client>,
    identities: HashMap<uuid::Uuid, Identity>,
    meals: Vec<Meal>,
}

impl Tables {
    fn login_taken(&self, login: &str, except: Option<uuid::Uuid>) -> bool {
        self.users
            .values()
            .any(|u| u.login == login && Some(u.id) != except)
    }
}

/// In-process store shared between request handlers.
///
/// Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_err| DbError::LockPoisoned)
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_err| DbError::LockPoisoned)
    }
}

impl UserStore for MemoryStore {
    #[tracing::instrument(skip(self, new_user), fields(login = %new_user.login))]
    fn insert_user(&self, new_user: NewUser) -> DbResult<User> {
        let mut tables = self.write()?;

        if tables.login_taken(&new_user.login, None) {
            return Err(DbError::UniqueViolation {
                table: "user",
                column: "login",
            });
        }

        let now = chrono::Utc::now();
        let user = User {
            id: uuid::Uuid::now_v7(),
            login: new_user.login,
            email: new_user.email,
            name: new_user.name,
            time_zone: new_user.time_zone,
            language: new_user.language,
            admin: new_user.admin,
            kind: UserKind::Regular,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "User inserted");
        Ok(user)
    }

    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    fn update_user(&self, mut user: User) -> DbResult<User> {
        let mut tables = self.write()?;

        if !tables.users.contains_key(&user.id) {
            return Err(DbError::RecordNotFound {
                table: "user",
                id: user.id,
            });
        }
        if tables.login_taken(&user.login, Some(user.id)) {
            return Err(DbError::UniqueViolation {
                table: "user",
                column: "login",
            });
        }

        user.updated_at = chrono::Utc::now();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    fn delete_user(&self, id: uuid::Uuid) -> DbResult<()> {
        let mut tables = self.write()?;

        if tables.users.remove(&id).is_none() {
            return Err(DbError::RecordNotFound { table: "user", id });
        }
        tables.identities.retain(|_, identity| identity.user_id != id);
        tables.tokens.retain(|_, token| token.user_id != id);

        tracing::debug!(user_id = %id, "User deleted");
        Ok(())
    }

    fn find_user(&self, id: uuid::Uuid) -> DbResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn find_user_by_login(&self, login: &str) -> DbResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.login == login)
            .cloned())
    }

    fn all_users(&self) -> DbResult<Vec<User>> {
        let mut users: Vec<User> = self
            .read()?
            .users
            .values()
            .filter(|u| !u.is_internal())
            .cloned()
            .collect();
        users.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(users)
    }
}

impl TokenStore for MemoryStore {
    fn insert_token(&self, token: AccessToken) -> DbResult<AccessToken> {
        let mut tables = self.write()?;

        if tables.tokens.values().any(|t| t.digest == token.digest) {
            return Err(DbError::UniqueViolation {
                table: "access_token",
                column: "digest",
            });
        }
        tables.tokens.insert(token.id, token.clone());
        Ok(token)
    }

    fn find_token_by_digest(&self, digest: &str) -> DbResult<Option<AccessToken>> {
        Ok(self
            .read()?
            .tokens
            .values()
            .find(|t| t.digest == digest)
            .cloned())
    }

    fn revoke_token(&self, id: uuid::Uuid, at: chrono::DateTime<chrono::Utc>) -> DbResult<()> {
        let mut tables = self.write()?;
        let token = tables.tokens.get_mut(&id).ok_or(DbError::RecordNotFound {
            table: "access_token",
            id,
        })?;
        if token.revoked_at.is_none() {
            token.revoked_at = Some(at);
        }
        Ok(())
    }

    fn insert_client(&self, client: Client) -> DbResult<Client> {
        let mut tables = self.write()?;

        if tables
            .clients
            .values()
            .any(|c| c.identifier == client.identifier)
        {
            return Err(DbError::UniqueViolation {
                table: "client",
                column: "identifier",
            });
        }
        tables.clients.insert(client.id, client.clone());
        Ok(client)
    }

    fn find_client(&self, id: uuid::Uuid) -> DbResult<Option<Client>> {
        Ok(self.read()?.clients.get(&id).cloned())
    }
}

impl IdentityStore for MemoryStore {
    fn insert_identity(&self, identity: NewIdentity) -> DbResult<Identity> {
        let mut tables = self.write()?;

        if !tables.users.contains_key(&identity.user_id) {
            return Err(DbError::RecordNotFound {
                table: "user",
                id: identity.user_id,
            });
        }
        if tables
            .identities
            .values()
            .any(|i| i.provider == identity.provider && i.uid == identity.uid)
        {
            return Err(DbError::UniqueViolation {
                table: "identity",
                column: "uid",
            });
        }

        let identity = Identity {
            id: uuid::Uuid::now_v7(),
            user_id: identity.user_id,
            provider: identity.provider,
            uid: identity.uid,
            created_at: chrono::Utc::now(),
        };
        tables.identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    fn find_identity(&self, provider: Provider, uid: &str) -> DbResult<Option<Identity>> {
        Ok(self
            .read()?
            .identities
            .values()
            .find(|i| i.provider == provider && i.uid == uid)
            .cloned())
    }

    fn identities_for_user(&self, user_id: uuid::Uuid) -> DbResult<Vec<Identity>> {
        let mut identities: Vec<Identity> = self
            .read()?
            .identities
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        identities.sort_by_key(|i| i.created_at);
        Ok(identities)
    }
}

impl MealStore for MemoryStore {
    fn insert_meal(&self, meal: NewMeal) -> DbResult<Meal> {
        let meal = Meal {
            id: uuid::Uuid::now_v7(),
            cafeteria_id: meal.cafeteria_id,
            date: meal.date,
            category: meal.category,
            name: meal.name,
            created_at: chrono::Utc::now(),
        };
        self.write()?.meals.push(meal.clone());
        Ok(meal)
    }

    fn meals_for(&self, cafeteria_id: u64, date: chrono::NaiveDate) -> DbResult<Vec<Meal>> {
        Ok(self
            .read()?
            .meals
            .iter()
            .filter(|m| m.cafeteria_id == cafeteria_id && m.date == date)
            .cloned()
            .collect())
    }
}
