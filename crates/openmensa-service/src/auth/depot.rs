//! Depot helpers for extracting authorization context from Salvo requests.

use crate::error::{ServiceError, ServiceResult};

use super::{ability::Ability, context::RequestContext, service::authorizer_from_depot};

pub mod depot_keys {
    pub const REQUEST_CONTEXT: &str = "__request_context";
}

/// Get the request context from the depot.
///
/// ## Errors
///
/// Returns `InvariantViolation` if the auth middleware did not run.
pub fn get_context_from_depot(depot: &salvo::Depot) -> ServiceResult<&RequestContext> {
    depot
        .get::<RequestContext>(depot_keys::REQUEST_CONTEXT)
        .map_err(|_e| ServiceError::InvariantViolation("Request context not found in depot"))
}

/// Build the ability of the current request from the depot.
///
/// ## Errors
///
/// Returns `InvariantViolation` if the enforcer or the request context is missing.
pub fn get_ability_from_depot(depot: &salvo::Depot) -> ServiceResult<Ability> {
    let authorizer = authorizer_from_depot(depot)?;
    let context = get_context_from_depot(depot)?;
    Ok(Ability::for_request(authorizer, context))
}
