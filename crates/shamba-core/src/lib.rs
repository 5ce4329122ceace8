//! shamba-core - Core types and host-capability traits for the Smart Shamba
//! API client.

pub mod config;
pub mod credentials;
pub mod de;
pub mod envelope;
pub mod error;
pub mod host;
pub mod principal;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::ClientConfig;
pub use credentials::{Credentials, Registration};
pub use envelope::{Envelope, Outcome};
pub use error::{Error, StorageError};
pub use host::Host;
pub use principal::{Principal, Role};
pub use tokens::{SESSION_KEY, SessionToken};
pub use traits::{
    HttpRequest, HttpResponse, MemoryTokenStore, Method, Navigator, TokenStore, Transport,
};
pub use types::{AuthOptionalRoutes, BaseUrl, Route};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
