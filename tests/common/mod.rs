//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to get the compiled binary path
pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shortutil"))
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to write a wordlist into a directory and return its path
pub fn create_wordlist(dir: &Path, name: &str, words: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = words.join("\n");
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

/// Helper to create a Command isolated from the caller's log settings
pub fn test_command() -> Command {
    let mut cmd = Command::new(get_binary_path());
    cmd.env_remove("SHORTUTIL_LOG");
    cmd
}

/// Run shortutil with `args` and return its output
pub fn run_shortutil(args: &[&str]) -> Output {
    test_command()
        .args(args)
        .output()
        .expect("Failed to execute command")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
