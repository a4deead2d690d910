//! Identity, authorization and record services for `OpenMensa`.

pub mod auth;
pub mod error;
pub mod meal;
pub mod token;
pub mod user;
pub mod validation;
