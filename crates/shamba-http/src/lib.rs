//! shamba-http - Authenticated HTTP client for the Smart Shamba backend.
//!
//! All backend calls pass through [`ApiClient::request`], which attaches the
//! session token, classifies the response, and ends the session when the
//! backend rejects it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shamba_core::{ClientConfig, Credentials, Host, MemoryTokenStore, Role};
//! use shamba_http::ApiClient;
//!
//! # async fn example() -> Result<(), shamba_core::Error> {
//! let host = Host::headless().with_store(Arc::new(MemoryTokenStore::new()));
//! let client = ApiClient::new(ClientConfig::from_env()?, host)?;
//!
//! client
//!     .login(&Credentials::new("+254700000000", "secret"))
//!     .await?;
//! let dashboard = client.dashboard(Role::Farmer).await?;
//! println!("{}", dashboard);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod endpoints;
mod request;
mod session;
mod transport;

pub use client::ApiClient;
pub use endpoints::alerts::Alert;
pub use endpoints::auth::AuthResponse;
pub use endpoints::chat::{ChatMessage, ChatReply, ChatTurn};
pub use endpoints::marketplace::{Listing, ListingQuery, NewListing};
pub use request::ApiRequest;
pub use session::SessionCache;
pub use transport::ReqwestTransport;
