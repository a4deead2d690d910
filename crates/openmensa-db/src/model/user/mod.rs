pub mod identity;
pub mod internal;

use serde::{Deserialize, Serialize};

/// How a user record came to exist.
///
/// Regular records are created through registration or by an administrator;
/// the two internal kinds only ever exist as process singletons (see
/// [`internal`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    Regular,
    System,
    Anonymous,
}

/// Role classification of a user, derived from its kind and admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Regular,
    Administrator,
    System,
    Anonymous,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "user",
            Self::Administrator => "administrator",
            Self::System => "system",
            Self::Anonymous => "anonymous",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: uuid::Uuid,
    pub login: String,
    pub email: Option<String>,
    pub name: String,
    pub time_zone: String,
    pub language: String,
    pub admin: bool,
    pub kind: UserKind,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self.kind {
            UserKind::System => Role::System,
            UserKind::Anonymous => Role::Anonymous,
            UserKind::Regular if self.admin => Role::Administrator,
            UserKind::Regular => Role::Regular,
        }
    }

    /// Only regular records (including administrators) can be logged in.
    #[must_use]
    pub const fn is_logged(&self) -> bool {
        matches!(self.kind, UserKind::Regular)
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        match self.kind {
            UserKind::System => true,
            UserKind::Anonymous => false,
            UserKind::Regular => self.admin,
        }
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        !matches!(self.kind, UserKind::Regular)
    }

    /// Administrators and internal users can never be destroyed.
    #[must_use]
    pub const fn is_destructible(&self) -> bool {
        !self.is_admin() && !self.is_internal()
    }
}

/// Insertable user record. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub login: String,
    pub email: Option<String>,
    pub name: String,
    pub time_zone: String,
    pub language: String,
    pub admin: bool,
}
