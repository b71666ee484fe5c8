//! Agenda calendar service - integration test support.
//!
//! Re-exports the workspace crates so integration tests resolve everything
//! through `agenda_test::` paths.

pub mod component {
    pub use agenda_core::config;
    pub use agenda_core::util;

    pub mod error {
        pub use agenda_core::error::*;
        pub use agenda_db::error::*;
    }

    pub mod model {
        pub use agenda_db::model::*;
    }

    pub mod store {
        pub use agenda_db::store::*;
    }
}

pub mod app {
    pub use agenda_app::app::api;
    pub use agenda_app::store_handler;
}
