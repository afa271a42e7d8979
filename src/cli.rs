//! Command-line interface definition

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mti")]
#[command(author, version, about = "Installer for the Mobile Test command-line tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install a formula from a source checkout
    Install {
        /// Formula name
        formula: String,

        /// Source checkout to stage files from
        #[arg(long, default_value = ".")]
        source: PathBuf,

        /// Installation prefix (default: MTI_PREFIX or the platform prefix)
        #[arg(long)]
        prefix: Option<PathBuf>,

        /// Stage files only, skip the post-install step
        #[arg(long)]
        skip_postinstall: bool,
    },

    /// Re-run the post-install step for an installed formula
    Postinstall {
        /// Formula name
        formula: String,

        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// Uninstall a formula
    Uninstall {
        /// Formula name
        formula: String,

        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// List installed tools
    List {
        /// Show all installed versions
        #[arg(long)]
        versions: bool,

        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// Show information about a formula
    Info {
        /// Formula name
        formula: String,

        #[arg(long)]
        prefix: Option<PathBuf>,
    },

    /// Opt-in shell profile and environment configuration
    Env(EnvArgs),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Every setup step is off unless its flag is given; repeated runs are
/// no-ops thanks to marker guards in the profile edits.
#[derive(clap::Args)]
pub struct EnvArgs {
    /// Export ANDROID_HOME in the shell profile
    #[arg(long)]
    pub android_home: bool,

    /// Install Android platform-tools via the SDK manager
    #[arg(long)]
    pub platform_tools: bool,

    /// Source bash-completion from the shell profile
    #[arg(long)]
    pub bash_completion: bool,

    /// Set COLOREDLOGS_LOG_FORMAT in the shell profile
    #[arg(long)]
    pub coloredlogs: bool,

    /// Allow the prefix bash in /etc/shells and make it the login shell
    #[arg(long)]
    pub updated_bash: bool,

    /// Shell profile to edit (default: ~/.bash_profile)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Allowed-shells file (default: /etc/shells)
    #[arg(long)]
    pub shells_file: Option<PathBuf>,

    /// Android SDK root (default: <prefix>/Cellar/android-sdk)
    #[arg(long)]
    pub sdk_root: Option<PathBuf>,

    #[arg(long)]
    pub prefix: Option<PathBuf>,
}
