//! `OpenMensa` server - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `openmensa_test::` paths.

pub mod component {
    pub use openmensa_core::{config, constants};
    pub use openmensa_db::{model, store};
    pub use openmensa_service::{auth, meal, token, user};

    pub mod handler {
        pub use openmensa_app::config::ConfigHandler;
        pub use openmensa_app::store_handler::StoreHandler;
        pub use openmensa_service::auth::casbin::CasbinEnforcerHandler;
    }
}

pub mod app {
    pub use openmensa_app::app::api;
    pub use openmensa_app::{bootstrap, error, middleware};
}
