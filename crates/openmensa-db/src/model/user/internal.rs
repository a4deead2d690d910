//! Process-wide singleton users.
//!
//! The system and anonymous users are never stored. Each is created on first
//! access and the same `Arc` is handed out for the rest of the process
//! lifetime. `OnceLock` guarantees a single instance even when the first
//! accesses race.

use std::sync::{Arc, OnceLock};

use openmensa_core::constants::{ANONYMOUS_LOGIN, DEFAULT_LOCALE, DEFAULT_TIME_ZONE, SYSTEM_LOGIN};

use super::{User, UserKind};

static SYSTEM: OnceLock<Arc<User>> = OnceLock::new();
static ANONYMOUS: OnceLock<Arc<User>> = OnceLock::new();

const SYSTEM_ID: uuid::Uuid = uuid::Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0001);
const ANONYMOUS_ID: uuid::Uuid = uuid::Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0002);

fn build(id: uuid::Uuid, login: &str, name: &str, kind: UserKind) -> Arc<User> {
    let now = chrono::Utc::now();

    tracing::debug!(login, "Creating internal user");

    Arc::new(User {
        id,
        login: login.to_string(),
        email: None,
        name: name.to_string(),
        time_zone: DEFAULT_TIME_ZONE.to_string(),
        language: DEFAULT_LOCALE.to_string(),
        admin: matches!(kind, UserKind::System),
        kind,
        created_at: now,
        updated_at: now,
    })
}

impl User {
    /// The system user. Always the same instance.
    #[must_use]
    pub fn system() -> Arc<Self> {
        SYSTEM
            .get_or_init(|| build(SYSTEM_ID, SYSTEM_LOGIN, "System", UserKind::System))
            .clone()
    }

    /// The anonymous user. Always the same instance.
    #[must_use]
    pub fn anonymous() -> Arc<Self> {
        ANONYMOUS
            .get_or_init(|| {
                build(
                    ANONYMOUS_ID,
                    ANONYMOUS_LOGIN,
                    "Anonymous",
                    UserKind::Anonymous,
                )
            })
            .clone()
    }

    /// Resolves the id of an internal user to its singleton.
    #[must_use]
    pub fn internal_by_id(id: uuid::Uuid) -> Option<Arc<Self>> {
        if id == SYSTEM_ID {
            Some(Self::system())
        } else if id == ANONYMOUS_ID {
            Some(Self::anonymous())
        } else {
            None
        }
    }
}
