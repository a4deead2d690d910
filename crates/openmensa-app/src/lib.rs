//! `OpenMensa` HTTP server: configuration, middleware and API routes.

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store_handler;
