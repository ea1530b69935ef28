//! REST client for the HR backend.
//!
//! [`ApiClient`] owns the HTTP connection pool and the session tokens. The
//! endpoint groups (`users`, `approvals`, `catalog`, `auth`) are `impl`
//! blocks on the client, one file per backend area.

mod approvals;
mod auth;
mod catalog;
mod client;
pub mod dto;
mod error;
mod users;

pub use client::ApiClient;
pub use error::ApiError;
