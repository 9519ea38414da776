//! Vestibule visitor registry - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every
//! layer through one dependency.

pub mod component {
    pub use vestibule_core::{config, constants, types};
    pub use vestibule_service::{auth, error, registry};

    pub mod db {
        pub use vestibule_db::db::*;
        pub use vestibule_db::model;
    }
}

pub mod app {
    pub use vestibule_app::*;
}
