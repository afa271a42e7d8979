use crate::cli::EnvArgs;
use crate::error::Result;
use crate::{layout, profile};
use anyhow::Context;
use colored::Colorize;
use std::path::PathBuf;

/// Apply the opt-in environment setups selected by flags.
///
/// Nothing here runs during `mti install`; every step must be asked for
/// explicitly, and every profile edit is marker-guarded so re-running is
/// harmless.
pub fn env(args: &EnvArgs) -> Result<()> {
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(layout::detect_prefix);

    let any_selected = args.android_home
        || args.platform_tools
        || args.bash_completion
        || args.coloredlogs
        || args.updated_bash;
    if !any_selected {
        println!("Nothing selected. Available setups:");
        for flag in [
            "--android-home      export ANDROID_HOME in the shell profile",
            "--platform-tools    install Android platform-tools",
            "--bash-completion   source bash-completion from the profile",
            "--coloredlogs       set COLOREDLOGS_LOG_FORMAT",
            "--updated-bash      allow and switch to the prefix bash",
        ] {
            println!("  {}", flag.dimmed());
        }
        return Ok(());
    }

    let profile_path = match &args.profile {
        Some(path) => path.clone(),
        None => default_profile()?,
    };

    if args.android_home {
        let sdk_root = args
            .sdk_root
            .clone()
            .unwrap_or_else(|| prefix.join("Cellar").join("android-sdk"));
        report("ANDROID_HOME", profile::set_android_home(&profile_path, &sdk_root)?);
    }

    if args.platform_tools {
        println!("Installing Android platform-tools...");
        profile::install_platform_tools()?;
        println!("  {} platform-tools installed", "✓".green());
    }

    if args.bash_completion {
        report(
            "bash-completion",
            profile::enable_bash_completion(&profile_path, &prefix)?,
        );
    }

    if args.coloredlogs {
        report(
            "COLOREDLOGS_LOG_FORMAT",
            profile::set_coloredlogs_format(&profile_path)?,
        );
    }

    if args.updated_bash {
        let shells_file = args
            .shells_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("/etc/shells"));
        let bash = layout::bin_dir(&prefix).join("bash");
        report("allowed shells", profile::allow_shell(&shells_file, &bash)?);
        profile::change_login_shell(&bash)?;
        println!("  {} login shell changed to {}", "✓".green(), bash.display());
    }

    Ok(())
}

fn report(what: &str, changed: bool) {
    if changed {
        println!("  {} {} configured", "✓".green(), what);
    } else {
        println!("  {} {} already configured", "•".dimmed(), what);
    }
}

fn default_profile() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; pass --profile explicitly")?;
    Ok(PathBuf::from(home).join(".bash_profile"))
}
