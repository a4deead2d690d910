use std::sync::Arc;

use openmensa_db::model::{token::AbilityScope, user::User};

use crate::error::ServiceResult;

use super::{
    action::Action,
    context::RequestContext,
    resource::Target,
    service::{AuthzResult, Authorizer},
};

/// What one actor may do, optionally narrowed by a token scope.
#[derive(Clone)]
pub struct Ability {
    authorizer: Authorizer,
    actor: Arc<User>,
    scope: Option<AbilityScope>,
}

impl Ability {
    #[must_use]
    pub fn new(authorizer: Authorizer, actor: Arc<User>) -> Self {
        Self {
            authorizer,
            actor,
            scope: None,
        }
    }

    /// The ability of the request's current user, restricted by its token scope.
    #[must_use]
    pub fn for_request(authorizer: Authorizer, context: &RequestContext) -> Self {
        Self {
            authorizer,
            actor: context.current_user(),
            scope: context.scope().cloned(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Option<AbilityScope>) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub const fn actor(&self) -> &Arc<User> {
        &self.actor
    }

    /// ## Errors
    /// Returns `CasbinError` if Casbin evaluation fails.
    pub fn check(&self, action: Action, target: Target<'_>) -> ServiceResult<AuthzResult> {
        if let Some(scope) = &self.scope
            && !scope.permits(action.as_casbin_action())
        {
            tracing::debug!(action = %action, "Action outside of token scope");
            return Ok(AuthzResult::Denied);
        }
        self.authorizer.check(&self.actor, action, target)
    }

    /// Evaluation failures count as denial.
    #[must_use]
    pub fn can(&self, action: Action, target: Target<'_>) -> bool {
        match self.check(action, target) {
            Ok(result) => result.is_allowed(),
            Err(e) => {
                tracing::error!(error = %e, "Ability evaluation failed, denying");
                false
            }
        }
    }

    /// ## Errors
    /// Returns `AccessDenied` if the action is not permitted, or `CasbinError`
    /// if Casbin evaluation fails.
    pub fn authorize(&self, action: Action, target: Target<'_>) -> ServiceResult<()> {
        self.check(action, target)?.require(target, action)
    }
}
