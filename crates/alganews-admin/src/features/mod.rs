//! Feature slices.
//!
//! Each feature owns its state and handles its own events, returning effects
//! for the runtime and mutations for other slices.

pub mod auth;
pub mod cash_flow;
pub mod home;
pub mod payment;
pub mod slice;
pub mod ui;
pub mod user;
