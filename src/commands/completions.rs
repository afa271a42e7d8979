//! `mti completions` - generate shell completion scripts

use crate::cli::Cli;
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

pub fn completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "mti", &mut std::io::stdout());
    Ok(())
}
