//! Shared configuration, constants and error types for the `OpenMensa` workspace.

pub mod config;
pub mod constants;
pub mod error;
