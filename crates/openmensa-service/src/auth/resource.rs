//! Targets of an authorization check.
//!
//! Policies never name individual users. A check against a user instance is
//! reduced to the relation between actor and target, and the relation is
//! what Casbin matches as the `obj` parameter.

use openmensa_db::model::user::User;

/// What an action is performed on.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// The users collection itself (`index`, `new`, `create`).
    Users,
    /// A single user record.
    User(&'a User),
}

impl std::fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Users => f.write_str("users"),
            Self::User(user) => write!(f, "user {}", user.login),
        }
    }
}

/// How a target relates to the acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// The users collection.
    Collection,
    /// The actor's own record.
    Itself,
    /// Another administrator.
    PeerAdministrator,
    /// Another regular user.
    Member,
    /// The system or anonymous user.
    Internal,
}

impl Relation {
    /// Classifies `target` as seen by `actor`.
    ///
    /// Identity wins over every other relation, so an internal user looking
    /// at itself is `Itself`.
    #[must_use]
    pub fn between(actor: &User, target: Target<'_>) -> Self {
        match target {
            Target::Users => Self::Collection,
            Target::User(user) if user.id == actor.id => Self::Itself,
            Target::User(user) if user.is_internal() => Self::Internal,
            Target::User(user) if user.is_admin() => Self::PeerAdministrator,
            Target::User(_) => Self::Member,
        }
    }

    /// Returns the Casbin object string for this relation.
    #[must_use]
    pub const fn as_casbin_object(self) -> &'static str {
        match self {
            Self::Collection => "users",
            Self::Itself => "self",
            Self::PeerAdministrator => "admin",
            Self::Member => "user",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_casbin_object())
    }
}
