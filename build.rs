// SPDX-License-Identifier: MPL-2.0

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=PHOTO_SHARE_VERSION");

    // Packagers can pin the version without a git checkout
    let version = std::env::var("PHOTO_SHARE_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_version)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// `git describe` output without the leading `v`
///
/// "v0.1.0" stays "0.1.0"; "v0.1.0-5-gabcdef1" becomes "0.1.0+5.abcdef1".
fn git_version() -> Option<String> {
    let described = run_git(&["describe", "--tags", "--match", "v*"])
        .or_else(|| run_git(&["rev-parse", "--short", "HEAD"]).map(|h| format!("0.0.0-{}", h)))?;
    let described = described.strip_prefix('v').unwrap_or(&described);

    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    match parts.as_slice() {
        [hash, commits, base] if hash.starts_with('g') && commits.parse::<u32>().is_ok() => {
            Some(format!("{}+{}.{}", base, commits, &hash[1..]))
        }
        _ => Some(described.to_string()),
    }
}

fn run_git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
