//! The CLI's host capabilities: session file location, terminal
//! navigation, and client construction.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use shamba_core::{BaseUrl, ClientConfig, Host, Navigator};
use shamba_file::FileTokenStore;
use shamba_http::ApiClient;

use crate::cli::ClientArgs;
use crate::output;

/// Whether a rejected session should be reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnRejected {
    /// Tell the user to sign in again.
    Notify,
    /// Stay quiet; used while signing in, where a 401 means bad credentials.
    Silent,
}

/// Stands in for a browser redirect: the terminal equivalent of being sent
/// to the login page.
#[derive(Debug)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) {
        debug!(url, "Session rejected; directing user to sign in");
        output::error("Your session has expired. Run 'shamba login' to sign in again.");
    }
}

/// Get the directory holding the persisted session.
pub fn session_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "smart-shamba")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Get the file-backed token store.
pub fn token_store() -> Result<FileTokenStore> {
    Ok(FileTokenStore::new(session_dir()?))
}

/// Build the client configuration from the environment and CLI flags.
pub fn config(args: &ClientArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;

    if let Some(url) = &args.api_url {
        config.base_url = BaseUrl::new(url).context("Invalid --api-url")?;
    }
    if let Some(secs) = args.timeout {
        anyhow::ensure!(secs > 0, "--timeout must be at least one second");
        config.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

/// Build a client backed by the session file.
pub fn client(args: &ClientArgs, on_rejected: OnRejected) -> Result<ApiClient> {
    let mut host = Host::headless().with_store(Arc::new(token_store()?));
    if on_rejected == OnRejected::Notify {
        host = host.with_navigator(Arc::new(TerminalNavigator));
    }

    ApiClient::new(config(args)?, host).context("Failed to create API client")
}

/// Build a client and require an existing session.
pub fn signed_in_client(args: &ClientArgs) -> Result<ApiClient> {
    let client = client(args, OnRejected::Notify)?;
    anyhow::ensure!(
        client.is_authenticated(),
        "No active session. Run 'shamba login' first."
    );
    Ok(client)
}
