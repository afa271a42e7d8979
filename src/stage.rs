//! Staging - placing a product's files into the installation layout
//!
//! The source checkout ships its entry-point script with a
//! `${UTILS_SHARE_PREFIX}` token instead of a hard-coded asset path. Staging
//! replaces the token with the absolute versioned share directory (exactly
//! once, at install time), installs the script into bin/, and copies the
//! asset trees verbatim. Reinstalling a version removes the old share
//! directory first, so installs are wholesale overwrites.

use crate::error::{InstallError, Result};
use crate::formula::Formula;
use crate::layout;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Token baked into the shipped script, resolved at install time
pub const SHARE_PREFIX_TOKEN: &str = "${UTILS_SHARE_PREFIX}";

/// Relative path of the requirements manifest inside a share directory
pub const REQUIREMENTS_FILE: &str = "framework/requirements.txt";

/// What staging produced, for the receipt and progress output
#[derive(Debug)]
pub struct StagedInstall {
    pub bin_path: PathBuf,
    pub share_dir: PathBuf,
    pub staged_files: usize,
}

/// Replace every occurrence of the share-prefix token with the resolved path
pub fn substitute_share_prefix(script: &str, share_dir: &Path) -> String {
    script.replace(SHARE_PREFIX_TOKEN, &share_dir.to_string_lossy())
}

/// Stage a formula from a source checkout into the prefix
pub fn stage(formula: &Formula, source: &Path, prefix: &Path) -> Result<StagedInstall> {
    let script_src = source.join(formula.script);
    let action_src = source.join("action");
    let framework_src = source.join("framework");
    let requirements_src = source.join("install").join("requirements.txt");

    for (path, label) in [
        (&script_src, formula.script),
        (&action_src, "action/"),
        (&framework_src, "framework/"),
        (&requirements_src, "install/requirements.txt"),
    ] {
        if !path.exists() {
            return Err(InstallError::MissingSource(label.to_string()));
        }
    }

    let share_dir = layout::share_dir(prefix, formula.name, formula.version);

    // Wholesale overwrite on reinstall
    if share_dir.exists() {
        fs::remove_dir_all(&share_dir)
            .with_context(|| format!("Failed to clear {}", share_dir.display()))?;
    }
    fs::create_dir_all(&share_dir)
        .with_context(|| format!("Failed to create {}", share_dir.display()))?;

    let mut staged_files = 0;
    staged_files += copy_tree(&action_src, &share_dir.join("action"))?;
    staged_files += copy_tree(&framework_src, &share_dir.join("framework"))?;

    let requirements_dst = share_dir.join(REQUIREMENTS_FILE);
    fs::copy(&requirements_src, &requirements_dst)
        .with_context(|| format!("Failed to copy {}", requirements_src.display()))?;
    staged_files += 1;

    let bin_path = install_script(formula, &script_src, &share_dir, prefix)?;
    staged_files += 1;

    Ok(StagedInstall {
        bin_path,
        share_dir,
        staged_files,
    })
}

/// Substitute the share-prefix token and install the script into bin/
fn install_script(
    formula: &Formula,
    script_src: &Path,
    share_dir: &Path,
    prefix: &Path,
) -> Result<PathBuf> {
    let text = fs::read_to_string(script_src)
        .with_context(|| format!("Failed to read {}", script_src.display()))?;
    tracing::debug!(
        "resolving {} occurrence(s) of {SHARE_PREFIX_TOKEN} to {}",
        text.matches(SHARE_PREFIX_TOKEN).count(),
        share_dir.display()
    );
    let substituted = substitute_share_prefix(&text, share_dir);

    let bin = layout::bin_dir(prefix);
    fs::create_dir_all(&bin).with_context(|| format!("Failed to create {}", bin.display()))?;

    let bin_path = bin.join(formula.name);
    fs::write(&bin_path, substituted)
        .with_context(|| format!("Failed to write {}", bin_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&bin_path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to set permissions on {}", bin_path.display()))?;
    }

    Ok(bin_path)
}

/// Copy a directory tree verbatim, returning the number of files copied
fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| anyhow::anyhow!("Failed to walk {}: {e}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} escaped the copy root", entry.path().display()))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} -> {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_share_prefix() {
        let script = "#!/bin/bash\nFRAMEWORK=${UTILS_SHARE_PREFIX}/framework\n";
        let out = substitute_share_prefix(script, Path::new("/usr/local/share/mth/1.0.0"));
        assert_eq!(
            out,
            "#!/bin/bash\nFRAMEWORK=/usr/local/share/mth/1.0.0/framework\n"
        );
        assert!(!out.contains(SHARE_PREFIX_TOKEN));
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let script = "${UTILS_SHARE_PREFIX}/a\n${UTILS_SHARE_PREFIX}/b\n";
        let out = substitute_share_prefix(script, Path::new("/opt/share/mth/1.0.0"));
        assert!(!out.contains(SHARE_PREFIX_TOKEN));
        assert_eq!(out.matches("/opt/share/mth/1.0.0").count(), 2);
    }

    #[test]
    fn test_substitute_leaves_other_variables_alone() {
        let script = "echo ${HOME} ${UTILS_SHARE_PREFIX}";
        let out = substitute_share_prefix(script, Path::new("/p"));
        assert!(out.contains("${HOME}"));
    }
}
