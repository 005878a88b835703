use crate::cli::{Cli, Shell};
use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};
use std::io::{self, Write};

const BIN_NAME: &str = "jekin";

impl From<Shell> for ClapShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => ClapShell::Bash,
            Shell::Zsh => ClapShell::Zsh,
            Shell::Fish => ClapShell::Fish,
            Shell::PowerShell => ClapShell::PowerShell,
            Shell::Elvish => ClapShell::Elvish,
        }
    }
}

/// One-line install instruction, same as `jekin completions --help`
fn install_hint(shell: &Shell) -> &'static str {
    match shell {
        Shell::Bash => "eval \"$(jekin completions bash)\"    # Add to ~/.bashrc",
        Shell::Zsh => "eval \"$(jekin completions zsh)\"     # Add to ~/.zshrc",
        Shell::Fish => "jekin completions fish > ~/.config/fish/completions/jekin.fish",
        Shell::PowerShell => "jekin completions powershell | Out-String | Invoke-Expression",
        Shell::Elvish => "eval (jekin completions elvish | slurp)",
    }
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    generate(ClapShell::from(shell), &mut Cli::command(), BIN_NAME, out);
}

pub fn execute(shell: Shell) {
    eprintln!("# Install with: {}", install_hint(&shell));
    write_completions(shell, &mut io::stdout());
}
