#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub const SUBMIT_SECRET: &str = "post-box";
pub const EDITOR_SECRET: &str = "red-pen";
pub const ADMIN_SECRET: &str = "master-key";

pub fn bulletin_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bulletin").unwrap();
    cmd.env_remove("BULLETIN_ROOT");
    cmd.env_remove("BULLETIN_SECRET");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command running inside `dir` with the given secret
pub fn bulletin_in(dir: &Path, secret: &str) -> Command {
    let mut cmd = bulletin_cmd();
    cmd.current_dir(dir).env("BULLETIN_SECRET", secret);
    cmd
}

/// Initialize a store in `dir` with all three secrets configured
pub fn init_with_secrets(dir: &Path) {
    bulletin_cmd().arg("init").arg(dir).assert().success();

    for (key, value) in [
        ("secrets.submit", SUBMIT_SECRET),
        ("secrets.editor", EDITOR_SECRET),
        ("secrets.admin", ADMIN_SECRET),
    ] {
        bulletin_cmd()
            .current_dir(dir)
            .args(["config", key, value])
            .assert()
            .success();
    }
}

/// Submit an item and return its id
pub fn submit(dir: &Path, category: &str, content: &str, name: Option<&str>) -> String {
    let mut cmd = bulletin_in(dir, SUBMIT_SECRET);
    cmd.args(["submit", category, content]);
    if let Some(name) = name {
        cmd.args(["--name", name]);
    }
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "submit failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .split_whitespace()
        .nth(1)
        .expect("submission id in output")
        .to_string()
}
