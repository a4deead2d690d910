//! User records: validation, mass-assignment rules, CRUD and sign in.

pub mod attributes;
pub mod identity;
pub mod service;
pub mod validation;

pub use attributes::{Attribute, Operation, UserAttributes, safe_attributes};
pub use identity::{AuthInfo, SignIn, identities, sign_in};
pub use service::{create_user, destroy_user, list_users, register_user, show_user, update_user};
