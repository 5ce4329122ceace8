//! shamba-file - Filesystem-backed session token storage.

mod store;

pub use store::{FileTokenStore, StoredToken};
