use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tempfile::tempdir;

fn run_wall_display(dir: &Path) -> ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_wall-display"))
        .arg("--dir")
        .arg(dir)
        .arg("--config")
        .arg(dir.join("absent.toml"))
        .arg("--windowed")
        .env("RUST_LOG", "off")
        .status()
        .expect("failed to run wall-display")
}

#[test]
fn test_missing_catalog_exits_with_status_1() {
    let dir = tempdir().unwrap();
    assert_eq!(run_wall_display(dir.path()).code(), Some(1));
}

#[test]
fn test_catalog_without_enabled_rows_exits_with_status_1() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("menu.data"), "1:a:0:Nature:x\n2:b:0:City:y\n").unwrap();
    assert_eq!(run_wall_display(dir.path()).code(), Some(1));
}
