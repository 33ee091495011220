//! Version metadata for `lar-site --version`.
//!
//! `GIT_HASH` is the short commit hash, empty outside a git checkout.
//! `ON_RELEASE_TAG` is `true` only when HEAD carries the tag for this package
//! version (`v0.4.0` or `0.4.0`), so a stray tag on a dev commit still
//! reports `dev@<hash>`.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let on_release_tag = git(&["tag", "--points-at", "HEAD"])
        .map(|tags| {
            tags.lines()
                .any(|tag| tag.strip_prefix('v').unwrap_or(tag) == version)
        })
        .unwrap_or(false);

    println!("cargo:rustc-env=GIT_HASH={hash}");
    println!("cargo:rustc-env=ON_RELEASE_TAG={on_release_tag}");
}
