pub mod api_path;
pub mod auth;
