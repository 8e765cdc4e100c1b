use std::process::Command;

/// Short commit of the workspace, or "unknown" outside a git checkout.
fn git_short_sha(workspace_root: &str) -> String {
    Command::new("git")
        .args(["-C", workspace_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace_root = format!("{manifest_dir}/..");

    println!("cargo:rerun-if-changed={workspace_root}/.git/HEAD");
    println!(
        "cargo:rustc-env=MONEYBOARD_BUILD_SHA={}",
        git_short_sha(&workspace_root)
    );
}
