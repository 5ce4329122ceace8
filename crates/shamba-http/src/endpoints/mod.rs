//! Typed wrappers over [`ApiClient::request`](crate::ApiClient::request).
//!
//! Each submodule adds methods to `ApiClient` for one area of the backend
//! and declares the routes it calls.

pub mod alerts;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod marketplace;
