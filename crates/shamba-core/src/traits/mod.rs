//! Host-capability traits.
//!
//! The request pipeline never touches the filesystem, the network, or the
//! UI directly. Each of those is reached through one of these traits so a
//! host (CLI, tests, embedding application) can supply its own.

mod navigator;
mod token_store;
mod transport;

pub use navigator::Navigator;
pub use token_store::{MemoryTokenStore, TokenStore};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
