//! CLI module containing the argument model and subcommand dispatch.

use crate::checksum::{Algorithm, format_checksum};
use crate::completion::{self, Shell};
use crate::error::{Error, Result};
use crate::lookup::find_candidates;
use crate::parser::parse_short_name;
use crate::shortname::{ShortParts, checksum_name, needs_short_name, tilde_name};
use crate::{logging, wordlist};
use clap::{Parser as ClapParser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI arguments for shortutil.
#[derive(ClapParser)]
#[command(name = "shortutil")]
#[command(version = PKG_VERSION)]
#[command(about = "A short filename utility for Windows 8.3 names", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    format: OutputFormatArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add checksums and 8.3 names to a wordlist for use with short name scanners
    Wordlist {
        /// Wordlist to ingest, one filename per line (`-` for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the rainbow wordlist to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Generate a one-off checksum for the given filename
    Checksum {
        /// Use the original (pre-Windows 7) checksum algorithm
        #[arg(short, long)]
        original: bool,

        /// Long filename to checksum
        #[arg(value_name = "FILENAME")]
        filename: String,
    },

    /// Show the 8.3 short names Windows would generate for a filename
    Shortname {
        /// Long filename
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Number after the tilde
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=999_999))]
        index: u32,
    },

    /// Resolve an 8.3 short name to candidate long names from a wordlist
    Lookup {
        /// Short name as reported by a scanner, e.g. INDEX~1.HTM
        #[arg(value_name = "SHORT_NAME")]
        short_name: String,

        /// Plain or rainbow wordlist to search (`-` for stdin)
        #[arg(short, long, value_name = "PATH")]
        wordlist: PathBuf,
    },

    /// Generate shell completion script
    Completion {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormatArg {
    /// Plain text (default)
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Result of the `checksum` command.
#[derive(Debug, Serialize)]
pub struct ChecksumReport {
    pub filename: String,
    pub algorithm: Algorithm,
    pub checksum: String,
}

impl ChecksumReport {
    #[must_use]
    pub fn new(filename: &str, algorithm: Algorithm) -> Self {
        Self {
            filename: filename.to_string(),
            algorithm,
            checksum: format_checksum(algorithm.checksum(filename)),
        }
    }
}

/// A checksum name produced by one algorithm.
#[derive(Debug, Serialize)]
pub struct ChecksumName {
    pub algorithm: Algorithm,
    pub checksum: String,
    pub short_name: String,
}

/// Result of the `shortname` command.
#[derive(Debug, Serialize)]
pub struct ShortNameReport {
    pub filename: String,
    pub needs_short_name: bool,
    pub short_name: Option<String>,
    pub checksum_names: Vec<ChecksumName>,
}

impl ShortNameReport {
    #[must_use]
    pub fn new(filename: &str, index: u32) -> Self {
        let needs = needs_short_name(filename);
        let parts = ShortParts::from_name(filename);

        if !needs || parts.base.is_empty() {
            return Self {
                filename: filename.to_string(),
                needs_short_name: needs,
                short_name: None,
                checksum_names: Vec::new(),
            };
        }

        let checksum_names = [Algorithm::Modern, Algorithm::Original]
            .into_iter()
            .map(|algorithm| {
                let checksum = algorithm.checksum(filename);
                ChecksumName {
                    algorithm,
                    checksum: format_checksum(checksum),
                    short_name: checksum_name(&parts, checksum, index),
                }
            })
            .collect();

        Self {
            filename: filename.to_string(),
            needs_short_name: needs,
            short_name: Some(tilde_name(&parts, index)),
            checksum_names,
        }
    }

    fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Filename:       {}", self.filename)?;
        match &self.short_name {
            Some(short_name) => writeln!(out, "Short name:     {short_name}")?,
            None if self.needs_short_name => {
                writeln!(out, "Short name:     none (no characters usable in a short name)")?;
            }
            None => writeln!(out, "Short name:     none (already a valid 8.3 name)")?,
        }
        for name in &self.checksum_names {
            writeln!(
                out,
                "Checksum name:  {} ({}, {})",
                name.short_name,
                name.algorithm.name(),
                name.checksum
            )?;
        }
        Ok(())
    }
}

/// Main CLI logic: parse arguments, set up logging and run the selected command.
///
/// Errors are printed to stderr and terminate the process with exit code 1.
pub fn run_cli() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(format = ?cli.format, "shortutil {PKG_VERSION}");

    if let Err(e) = dispatch(cli.command, cli.format) {
        tracing::debug!(error = ?e, "command failed");
        crate::fatal_error(&e.to_string());
    }
}

fn dispatch(command: Command, format: OutputFormatArg) -> Result<()> {
    match command {
        Command::Wordlist { file, output } => run_wordlist(&file, output.as_deref(), format),
        Command::Checksum { original, filename } => run_checksum(&filename, original, format),
        Command::Shortname { filename, index } => run_shortname(&filename, index, format),
        Command::Lookup {
            short_name,
            wordlist,
        } => run_lookup(&short_name, &wordlist, format),
        Command::Completion { shell } => {
            completion::generate_completion_script(shell);
            Ok(())
        }
    }
}

fn run_wordlist(file: &Path, output: Option<&Path>, format: OutputFormatArg) -> Result<()> {
    let reader = wordlist::open_input(file)?;
    let records = wordlist::read_words(reader, file)?;

    let mut out = open_output(output)?;
    match format {
        OutputFormatArg::Text => wordlist::write_rainbow(&records, &mut out)?,
        OutputFormatArg::Json => write_json(&mut out, &records)?,
    }

    if let Some(path) = output {
        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "rainbow wordlist written"
        );
    }
    Ok(())
}

fn run_checksum(filename: &str, original: bool, format: OutputFormatArg) -> Result<()> {
    let algorithm = if original {
        Algorithm::Original
    } else {
        Algorithm::Modern
    };
    let report = ChecksumReport::new(filename, algorithm);

    let mut out = open_output(None)?;
    match format {
        OutputFormatArg::Text => writeln!(out, "{}", report.checksum)?,
        OutputFormatArg::Json => write_json(&mut out, &report)?,
    }
    out.flush()?;
    Ok(())
}

fn run_shortname(filename: &str, index: u32, format: OutputFormatArg) -> Result<()> {
    let report = ShortNameReport::new(filename, index);

    let mut out = open_output(None)?;
    match format {
        OutputFormatArg::Text => report.write_text(&mut out)?,
        OutputFormatArg::Json => write_json(&mut out, &report)?,
    }
    out.flush()?;
    Ok(())
}

fn run_lookup(short_name: &str, wordlist_path: &Path, format: OutputFormatArg) -> Result<()> {
    let short = parse_short_name(short_name)?;
    let reader = wordlist::open_input(wordlist_path)?;
    let records = wordlist::load_records(reader, wordlist_path)?;
    let candidates = find_candidates(&short, &records);

    let mut out = open_output(None)?;
    match format {
        OutputFormatArg::Text => {
            if candidates.is_empty() {
                eprintln!(
                    "No candidates for {short} in '{}'",
                    wordlist_path.display()
                );
            }
            for candidate in &candidates {
                writeln!(out, "{}", candidate.filename)?;
            }
        }
        OutputFormatArg::Json => write_json(&mut out, &candidates)?,
    }
    out.flush()?;
    Ok(())
}

/// Buffered writer for `path`, or stdout when no path is given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::Create {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
