//! Shell completion generation.

use clap::ValueEnum;

// Embed completion scripts at compile time
const BASH_COMPLETION: &str = include_str!("../completions/shortutil.bash");
const ZSH_COMPLETION: &str = include_str!("../completions/shortutil.zsh");
const FISH_COMPLETION: &str = include_str!("../completions/shortutil.fish");
const POWERSHELL_COMPLETION: &str = include_str!("../completions/shortutil.ps1");

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell", alias = "pwsh")]
    PowerShell,
}

impl Shell {
    /// Returns the lowercase name of the shell.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        }
    }

    /// Returns the completion script content for this shell.
    #[must_use]
    pub fn completion_script(self) -> &'static str {
        match self {
            Shell::Bash => BASH_COMPLETION,
            Shell::Zsh => ZSH_COMPLETION,
            Shell::Fish => FISH_COMPLETION,
            Shell::PowerShell => POWERSHELL_COMPLETION,
        }
    }
}

/// Print the completion script for `shell` to stdout.
pub fn generate_completion_script(shell: Shell) {
    tracing::debug!(shell = shell.name(), "generating completion script");
    print!("{}", shell.completion_script());
}
