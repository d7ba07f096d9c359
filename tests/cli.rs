//! CLI flag tests (--version, --help, --format, completion)

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

#[test]
fn test_version_flag() {
    let output = run_shortutil(&["--version"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains(PKG_VERSION));
}

#[test]
fn test_help_lists_subcommands() {
    let output = run_shortutil(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for command in ["wordlist", "checksum", "shortname", "lookup", "completion"] {
        assert!(stdout.contains(command), "help is missing `{command}`");
    }
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let output = run_shortutil(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_format_rejected() {
    let output = run_shortutil(&["--format", "xml", "checksum", "index.html"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_of(&output).contains("xml"));
}

#[test]
fn test_generate_completion_bash() {
    let output = run_shortutil(&["completion", "bash"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("#!/usr/bin/env bash"));
    assert!(stdout.contains("complete -F _shortutil_complete shortutil"));
}

#[test]
fn test_generate_completion_zsh() {
    let output = run_shortutil(&["completion", "zsh"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("#compdef shortutil"));
}

#[test]
fn test_generate_completion_fish() {
    let output = run_shortutil(&["completion", "fish"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("# Fish completion script"));
    assert!(stdout.contains("complete -c shortutil"));
}

#[test]
fn test_generate_completion_pwsh_alias() {
    let output = run_shortutil(&["completion", "pwsh"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Register-ArgumentCompleter"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let temp_dir = create_temp_dir();
    let words = create_wordlist(temp_dir.path(), "words.txt", &["index.html", "index.html"]);

    let output = run_shortutil(&["-vv", "wordlist", words.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stderr_of(&output).contains("wordlist ingested"));
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("wordlist ingested"));
    assert!(stdout.starts_with("#SHORTSCAN#\n"));
}

#[test]
fn test_log_env_overrides_verbosity() {
    let temp_dir = create_temp_dir();
    let words = create_wordlist(temp_dir.path(), "words.txt", &["index.html"]);

    let output = test_command()
        .env("SHORTUTIL_LOG", "off")
        .args(["-vvv", "wordlist", words.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
