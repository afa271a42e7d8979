//! Shell-profile and environment configuration helpers
//!
//! None of these run during a normal install; they back the opt-in flags of
//! `mti env`. Every edit is a read-modify-write on an explicit file path
//! guarded by a marker string, so running a helper twice leaves the file
//! unchanged the second time. Each returns whether it modified the file.

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Marker that guards the ANDROID_HOME export
pub const ANDROID_HOME_MARKER: &str = "ANDROID_HOME=";
/// Marker that guards the bash-completion sourcing block
pub const BASH_COMPLETION_MARKER: &str = "/etc/bash_completion";
/// Marker that guards the coloredlogs format export
pub const COLOREDLOGS_MARKER: &str = "COLOREDLOGS_LOG_FORMAT";

/// Append `block` to `path` unless `marker` already occurs in the file.
///
/// Returns true if the file was modified. A missing file counts as empty
/// and is created on append.
pub fn ensure_line(path: &Path, marker: &str, block: &str) -> Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    if existing.contains(marker) {
        tracing::debug!("{} already contains {marker:?}, leaving it alone", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "\n{block}").with_context(|| format!("Failed to append to {}", path.display()))?;

    Ok(true)
}

/// Export ANDROID_HOME in the profile, pointing at the first installed SDK
/// version under `sdk_root` (e.g. the package manager's android-sdk keg).
pub fn set_android_home(profile: &Path, sdk_root: &Path) -> Result<bool> {
    let sdk_version = first_sdk_version(sdk_root)?;
    let line = format!(
        "export ANDROID_HOME={}/",
        sdk_root.join(&sdk_version).display()
    );
    ensure_line(profile, ANDROID_HOME_MARKER, &line)
}

fn first_sdk_version(sdk_root: &Path) -> Result<String> {
    let mut versions: Vec<String> = fs::read_dir(sdk_root)
        .with_context(|| format!("No Android SDK found at {}", sdk_root.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| !name.starts_with('.'))
        .collect();
    versions.sort();
    versions
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No SDK versions under {}", sdk_root.display()))
}

/// Install Android platform-tools through the SDK manager, answering the
/// license prompt affirmatively.
pub fn install_platform_tools() -> Result<()> {
    let mut child = Command::new("android")
        .args(["update", "sdk", "--no-ui", "--filter", "platform-tools"])
        .stdin(Stdio::piped())
        .spawn()
        .context("Failed to execute the android SDK manager")?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(b"y\n").context("Failed to answer the license prompt")?;
    }

    let status = child.wait().context("SDK manager did not exit")?;
    if !status.success() {
        return Err(anyhow!(
            "android update sdk exited with status {}",
            status.code().unwrap_or(-1)
        ));
    }
    Ok(())
}

/// Source the package manager's bash-completion file from the profile
pub fn enable_bash_completion(profile: &Path, prefix: &Path) -> Result<bool> {
    let completion = prefix.join("etc").join("bash_completion");
    let block = format!(
        "if [ -f {} ]; then\n\t. {}\nfi",
        completion.display(),
        completion.display()
    );
    ensure_line(profile, BASH_COMPLETION_MARKER, &block)
}

/// Set the log format used by the tools' coloredlogs output
pub fn set_coloredlogs_format(profile: &Path) -> Result<bool> {
    ensure_line(
        profile,
        COLOREDLOGS_MARKER,
        "export COLOREDLOGS_LOG_FORMAT='%(message)s'",
    )
}

/// Register a newer bash in the allowed-shells file
///
/// The marker is the shell path itself; `change_login_shell` is a separate
/// step so the file edit stays testable.
pub fn allow_shell(shells_file: &Path, bash_path: &Path) -> Result<bool> {
    let line = bash_path.display().to_string();
    ensure_line(shells_file, &line, &line)
}

/// Switch the login shell via chsh
pub fn change_login_shell(bash_path: &Path) -> Result<()> {
    let status = Command::new("chsh")
        .arg("-s")
        .arg(bash_path)
        .status()
        .context("Failed to execute chsh")?;
    if !status.success() {
        return Err(anyhow!("chsh exited with status {}", status.code().unwrap_or(-1)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_line_appends_once() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".bash_profile");

        assert!(ensure_line(&profile, "MARKER=", "export MARKER=1").unwrap());
        assert!(!ensure_line(&profile, "MARKER=", "export MARKER=1").unwrap());

        let contents = fs::read_to_string(&profile).unwrap();
        assert_eq!(contents.matches("MARKER=").count(), 1);
    }

    #[test]
    fn test_ensure_line_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("missing").join(".bash_profile");

        assert!(ensure_line(&profile, "X=", "export X=1").unwrap());
        assert!(profile.exists());
    }

    #[test]
    fn test_ensure_line_respects_existing_marker() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join(".bash_profile");
        fs::write(&profile, "export ANDROID_HOME=/sdk\n").unwrap();

        let changed = ensure_line(&profile, ANDROID_HOME_MARKER, "export ANDROID_HOME=/other")
            .unwrap();
        assert!(!changed);
        assert!(!fs::read_to_string(&profile).unwrap().contains("/other"));
    }
}
