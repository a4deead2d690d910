use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A registered API client application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: uuid::Uuid,
    pub name: String,
    pub identifier: String,
}

/// A restriction of what a token may do, stored as action names.
///
/// A token without a scope carries the full ability of its user; a scoped
/// token can never exceed it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityScope {
    actions: BTreeSet<String>,
}

impl AbilityScope {
    #[must_use]
    pub fn new<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn permits(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }
}

/// A bearer token. Only the digest of the secret is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub id: uuid::Uuid,
    pub digest: String,
    pub user_id: uuid::Uuid,
    pub client_id: Option<uuid::Uuid>,
    pub scope: Option<AbilityScope>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub revoked_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AccessToken {
    /// Returns `true` if the token is neither revoked nor expired at `now`.
    #[must_use]
    pub fn is_active(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at.is_none_or(|expires| expires > now)
    }
}
