use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI with an isolated HOME so the session file lands in a temp dir.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shamba"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("SHAMBA_API_URL", api_url);
    cmd.env_remove("SHAMBA_API_TIMEOUT");
    cmd.env_remove("SHAMBA_LOGIN_URL");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Path of the persisted session under an isolated HOME.
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data")
        .join("smart-shamba")
        .join("smart_shamba_session.json")
}
