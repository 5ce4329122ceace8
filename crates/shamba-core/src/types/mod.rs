//! Validated configuration types.
//!
//! These types enforce their invariants at construction time so the
//! request pipeline never sees a malformed origin or route.

mod base_url;
mod route;

pub use base_url::BaseUrl;
pub use route::{AuthOptionalRoutes, Route};
