//! Core AlgaNews admin library (config, logging, auth, SDK boundary).

pub mod auth;
pub mod config;
pub mod logging;
pub mod sdk;
