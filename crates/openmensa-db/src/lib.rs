//! Persistence models and stores for users, tokens, identities and meals.

pub mod error;
pub mod model;
pub mod store;
