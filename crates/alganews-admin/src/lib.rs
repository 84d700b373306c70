//! Application-state container for the AlgaNews admin.
//!
//! Follows an Elm-style split: events go through the dispatch middleware and
//! the pure reducer in [`update`], which returns [`effects::UiEffect`]s that
//! the [`runtime::AdminRuntime`] executes against the remote SDK.

pub mod actions;
pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod middleware;
pub mod mutations;
pub mod overlays;
pub mod routes;
pub mod runtime;
pub mod state;
pub mod store;
pub mod update;

pub use features::{auth, cash_flow, home, payment, ui, user};
pub use routes::Route;
pub use runtime::{AdminRuntime, RuntimeOptions};
pub use state::{AdminSettings, AdminState};
pub use store::Store;
