//! Modal state machines.
//!
//! - `double_confirm.rs`: two-stage confirmation gating irreversible actions

pub mod double_confirm;

pub use double_confirm::{ConfirmOutcome, ConfirmPrompt, ConfirmStage, DoubleConfirm};
