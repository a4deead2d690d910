//! Authorization service for centralized access control.
//!
//! This module provides the main authorization API that handlers use to check
//! permissions. It wraps Casbin enforcement with the user ability rules.

use std::sync::Arc;

use casbin::CoreApi;

use openmensa_db::model::user::User;

use crate::error::{ServiceError, ServiceResult};

use super::{
    action::Action,
    resource::{Relation, Target},
};

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzResult {
    /// Access is allowed.
    Allowed,
    /// Access is denied.
    Denied,
}

impl AuthzResult {
    /// Returns `true` if access is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert to a `Result`, returning `Err(ServiceError::AccessDenied)` if denied.
    ///
    /// ## Errors
    ///
    /// Returns `AccessDenied` if access is denied.
    pub fn require(self, target: Target<'_>, action: Action) -> ServiceResult<()> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied => Err(ServiceError::AccessDenied(format!(
                "{action} on {target}"
            ))),
        }
    }
}

/// Authorization service for checking permissions.
///
/// The Casbin subject is the actor's role, the object is the relation of the
/// target to the actor, and `g` maps policy roles (`viewer`, `keeper`,
/// `manager`) to actions. Roles without policies, like `anonymous`, are
/// denied everything.
///
/// ## Usage
///
/// ```ignore
/// let authz = Authorizer::new(enforcer);
/// let result = authz.check(&actor, Action::Show, Target::User(&other))?;
/// if result.is_allowed() {
///     // proceed
/// }
/// ```
#[derive(Clone)]
pub struct Authorizer {
    enforcer: Arc<casbin::Enforcer>,
}

impl Authorizer {
    /// Create a new authorizer with the given Casbin enforcer.
    #[must_use]
    pub fn new(enforcer: Arc<casbin::Enforcer>) -> Self {
        Self { enforcer }
    }

    /// Check whether `actor` may perform `action` on `target`.
    ///
    /// ## Errors
    ///
    /// Returns `CasbinError` if Casbin evaluation fails.
    pub fn check(
        &self,
        actor: &User,
        action: Action,
        target: Target<'_>,
    ) -> ServiceResult<AuthzResult> {
        let sub = actor.role().as_str();
        let obj = Relation::between(actor, target).as_casbin_object();
        let act = action.as_casbin_action();

        tracing::trace!(
            subject = %sub,
            object = %obj,
            action = %act,
            "Authorization check started"
        );

        let allowed = self
            .enforcer
            .enforce((sub, obj, act))
            .map_err(ServiceError::CasbinError)?;

        tracing::debug!(
            actor = %actor.login,
            subject = %sub,
            object = %obj,
            action = %act,
            allowed = %allowed,
            "Authorization check finished"
        );

        Ok(if allowed {
            AuthzResult::Allowed
        } else {
            AuthzResult::Denied
        })
    }

    /// Check and require permission, returning an error if denied.
    ///
    /// ## Errors
    ///
    /// - Returns `AccessDenied` if access is denied.
    /// - Returns `CasbinError` if Casbin evaluation fails.
    pub fn require(&self, actor: &User, action: Action, target: Target<'_>) -> ServiceResult<()> {
        self.check(actor, action, target)?.require(target, action)
    }
}

/// Create an authorizer from the depot.
///
/// ## Errors
///
/// Returns `InvariantViolation` if the Casbin enforcer is not in the depot.
pub fn authorizer_from_depot(depot: &salvo::Depot) -> ServiceResult<Authorizer> {
    let enforcer = super::casbin::get_enforcer_from_depot(depot)?;
    Ok(Authorizer::new(enforcer))
}
