use anyhow::*;
use std::env;
use std::process::Command;

fn main() -> Result<()> {
    // Rerun when the checked out revision moves so the version string stays in sync.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo::rustc-check-cfg=cfg(dev_build)");

    let version = env::var("CARGO_PKG_VERSION")?;
    let revisions = revision_count().unwrap_or_else(|| "0".to_string());
    println!("cargo:rustc-env=PLAYGROUND_VERSION={}-{}", version, revisions);

    if env::var("PROFILE")? == "debug" {
        println!("cargo:rustc-cfg=dev_build");
    }

    Ok(())
}

fn revision_count() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-list", "--count", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let count = String::from_utf8(output.stdout).ok()?;
    let count = count.trim();
    if count.is_empty() {
        None
    } else {
        Some(count.to_string())
    }
}
