//! Session, current user and the startup bootstrap.

mod bootstrap;
mod state;
mod update;

pub use bootstrap::{BootstrapPlan, plan};
pub use state::{AuthPhase, AuthState};
pub use update::{handle_auth_event, handle_bootstrap};
