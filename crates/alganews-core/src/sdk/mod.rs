//! Remote SDK boundary.
//!
//! All business logic, validation and persistence live in the AlgaNews API.
//! This module only describes its request/response contracts:
//!
//! - `error.rs`: tagged error kinds and HTTP classification
//! - `page.rs`: pagination envelope and sort descriptors
//! - `user.rs`, `payment.rs`, `cash_flow.rs`, `metric.rs`, `post.rs`: models
//! - `api.rs`: the [`AlgaNewsApi`] trait
//! - `http.rs`: reqwest-backed implementation

mod api;
pub mod cash_flow;
mod error;
mod http;
pub mod metric;
pub mod page;
pub mod payment;
pub mod post;
pub mod user;

pub use api::AlgaNewsApi;
pub use error::{ApiError, ApiErrorKind, ApiResult, FieldMessage};
pub use http::HttpApi;
pub use page::{Page, PageMeta, Sort, SortDirection};

/// Identifier of every remote resource.
pub type Id = u64;
