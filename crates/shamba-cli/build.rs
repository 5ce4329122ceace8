//! Build script embedding the package version and git revision.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let pkg = env!("CARGO_PKG_VERSION");
    let version = match git_revision() {
        Some(rev) => format!("{} ({})", pkg, rev),
        None => pkg.to_string(),
    };

    println!("cargo:rustc-env=SHAMBA_VERSION={}", version);
}

/// Short commit hash, suffixed with `-dirty` for uncommitted changes.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (!rev.is_empty()).then(|| rev.to_string())
}
