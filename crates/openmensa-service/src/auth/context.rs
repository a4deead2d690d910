//! Per-request authentication context.
//!
//! The current user lives here instead of in process-wide state. The auth
//! middleware builds one context per request and drops it with the request.

use std::sync::Arc;

use openmensa_db::model::{
    token::{AbilityScope, Client},
    user::User,
};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    user: Option<Arc<User>>,
    client: Option<Client>,
    scope: Option<AbilityScope>,
}

impl RequestContext {
    /// A context without a user; `current_user` is anonymous.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_user(user: Arc<User>) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_client(mut self, client: Option<Client>) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Option<AbilityScope>) -> Self {
        self.scope = scope;
        self
    }

    /// The user of this request, or the anonymous user when none is set.
    #[must_use]
    pub fn current_user(&self) -> Arc<User> {
        self.user.clone().unwrap_or_else(User::anonymous)
    }

    /// Replaces the user; `None` resets to anonymous.
    pub fn set_current_user(&mut self, user: Option<Arc<User>>) {
        self.user = user;
    }

    #[must_use]
    pub const fn current_client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    #[must_use]
    pub const fn scope(&self) -> Option<&AbilityScope> {
        self.scope.as_ref()
    }
}
