//! Raw request command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use shamba_core::Method;
use shamba_http::ApiRequest;

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Backend-relative path, e.g. /api/farmer/farms
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q')]
    pub query: Vec<String>,
}

pub async fn run(args: RequestArgs, client_args: &ClientArgs) -> Result<()> {
    let method: Method = args.method.parse().context("Invalid method")?;
    anyhow::ensure!(args.path.starts_with('/'), "Path must start with '/'");

    let mut request = ApiRequest::new(method, &args.path);
    for pair in &args.query {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Query parameter '{}' is not key=value", pair))?;
        request = request.query(key, value);
    }
    if let Some(body) = &args.body {
        let body: Value = serde_json::from_str(body).context("Invalid JSON in --body")?;
        request = request.body(body);
    }

    let client = host::client(client_args, OnRejected::Notify)?;
    let response = client.request(request).await.context("Request failed")?;

    output::json_pretty(&response)
}
