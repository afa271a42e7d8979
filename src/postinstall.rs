//! Post-install - the fixed sequence run once after staging
//!
//! Installs the product's Python dependencies from the staged requirements
//! manifest, optionally registers global argcomplete, then prints the green
//! success banner. A pip failure aborts the sequence; the staged files stay
//! in place and `mti postinstall <name>` re-runs it.

use crate::colors::show_colorized;
use crate::error::{InstallError, Result};
use crate::formula::Formula;
use crate::receipt::InstallReceipt;
use crate::stage::REQUIREMENTS_FILE;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::Command;

/// Run the post-install sequence for an installed formula
pub fn run(formula: &Formula, share_dir: &Path, prefix: &Path) -> Result<()> {
    show_colorized("Installing Python packages", "green");

    let requirements = share_dir.join(REQUIREMENTS_FILE);
    let pip = pip_program()?;

    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    let spinner = if is_tty {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("static template"),
        );
        pb.set_message(format!("{} install -r {}", pip, requirements.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = install_py_packages_with(pip, &requirements);
    spinner.finish_and_clear();
    result?;

    if formula.argcomplete {
        // Failure here is not fatal; completion is a convenience
        if let Err(e) = activate_argcomplete(prefix) {
            tracing::warn!("argcomplete activation failed: {e}");
        }
    }

    // Record that the dependencies made it in, so list/info can tell a
    // half-finished install from a complete one.
    if let Ok(mut receipt) = InstallReceipt::read(share_dir) {
        receipt.post_install_done = true;
        receipt.write(share_dir)?;
    }

    show_colorized(&formula.success_message(), "green");
    Ok(())
}

/// Pick the pip executable, preferring pip3
fn pip_program() -> Result<&'static str> {
    for candidate in ["pip3", "pip"] {
        let found = Command::new(candidate)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if found {
            return Ok(candidate);
        }
    }
    Err(
        anyhow::anyhow!("pip not found; ensure Python and pip are installed and on PATH").into(),
    )
}

/// Install packages from a requirements file with the given pip executable
///
/// The exit status is the contract: non-zero means the whole post-install
/// step fails and the process exits with code 1.
pub fn install_py_packages_with(pip: &str, requirements: &Path) -> Result<()> {
    tracing::debug!("running {pip} install -r {}", requirements.display());

    let output = Command::new(pip)
        .arg("install")
        .arg("-r")
        .arg(requirements)
        .output()
        .with_context(|| format!("Failed to execute {pip}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            eprintln!("{}", stderr.trim_end());
        }
        return Err(InstallError::PipFailed(output.status.code().unwrap_or(-1)));
    }

    Ok(())
}

/// Register global Python argcomplete for installed CLIs
///
/// Writes completion hooks into `<prefix>/etc/bash_completion.d` using the
/// activation script that ships with the argcomplete package.
pub fn activate_argcomplete(prefix: &Path) -> Result<()> {
    let activate = crate::layout::bin_dir(prefix).join("activate-global-python-argcomplete");
    let dest = prefix.join("etc").join("bash_completion.d");
    std::fs::create_dir_all(&dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let output = Command::new(&activate)
        .arg(format!("--dest={}", dest.display()))
        .output()
        .with_context(|| format!("Failed to execute {}", activate.display()))?;

    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "activate-global-python-argcomplete exited with status {}",
            output.status.code().unwrap_or(-1)
        )
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pip_failure_maps_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let requirements = dir.path().join("requirements.txt");
        std::fs::write(&requirements, "coloredlogs==5.0\n").unwrap();

        // `false` ignores its arguments and exits 1, standing in for a pip
        // run that cannot satisfy the manifest.
        let err = install_py_packages_with("false", &requirements).unwrap_err();
        match err {
            InstallError::PipFailed(code) => assert_eq!(code, 1),
            other => panic!("expected PipFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_pip_success_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let requirements = dir.path().join("requirements.txt");
        std::fs::write(&requirements, "").unwrap();

        assert!(install_py_packages_with("true", &requirements).is_ok());
    }

    #[test]
    fn test_missing_pip_executable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let requirements = dir.path().join("requirements.txt");
        std::fs::write(&requirements, "").unwrap();

        assert!(install_py_packages_with("definitely-not-a-pip", &requirements).is_err());
    }
}
