//! Command handlers.

pub mod auth;
pub mod cash_flow;
pub mod config;
pub mod dashboard;
pub mod payments;
pub mod session;
pub mod users;
