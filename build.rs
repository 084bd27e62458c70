use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let described = Command::new("git")
        .args(["describe", "--tags", "--always"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().trim_start_matches('v').to_string())
        .filter(|s| !s.is_empty());

    // Outside a git checkout the manifest version is used.
    let version = described
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());

    println!("cargo:rustc-env=BLAZEVERIFY_VERSION={}", version);
}
