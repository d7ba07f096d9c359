//! # shortutil
//!
//! A short filename utility for Windows 8.3 names.
//! Computes the checksums NTFS embeds in short names, shows the short names a long name
//! would receive, and builds rainbow wordlists for short name scanners.
//!
//! ## Usage
//!
//! - Checksum a filename: `shortutil checksum index.html`
//! - Build a rainbow wordlist: `shortutil wordlist words.txt -o rainbow.txt`
//! - Resolve a short name: `shortutil lookup IN2EF5~1.HTM -w rainbow.txt`

/// Entry point for the CLI tool.
fn main() {
    shortutil::run();
}
