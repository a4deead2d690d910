use openmensa_core::config::Provider;
use serde::Serialize;

/// A link between a user and an account at an external login provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub provider: Provider,
    pub uid: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub user_id: uuid::Uuid,
    pub provider: Provider,
    pub uid: String,
}
