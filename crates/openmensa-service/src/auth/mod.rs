//! Authentication and authorization flow.
//!
//! ## Module Organization
//!
//! - `ability`: An actor's permissions, narrowed by an optional token scope
//! - `action`: Authorization actions for Casbin enforcement
//! - `authenticate`: Access token resolution into a `RequestContext`
//! - `casbin`: Casbin enforcer initialization and depot integration
//! - `context`: Per-request current user, client and scope
//! - `depot`: Helpers for extracting authorization context from Salvo requests
//! - `resource`: Authorization targets and their relation to the actor
//! - `service`: Centralized authorization service (`Authorizer`)

pub mod ability;
pub mod action;
pub mod authenticate;
pub mod casbin;
pub mod context;
pub mod depot;
pub mod resource;
pub mod service;


// Re-export commonly used types at module level
pub use ability::Ability;
pub use action::Action;
pub use authenticate::{authenticate, find_user};
pub use context::RequestContext;
pub use depot::{get_ability_from_depot, get_context_from_depot};
pub use resource::{Relation, Target};
pub use service::{Authorizer, AuthzResult, authorizer_from_depot};
