//! Installation layout - prefix detection and the versioned share tree
//!
//! Installed products live under `<prefix>/share/<name>/<version>/` with the
//! entry-point script at `<prefix>/bin/<name>`. The share directory for a
//! version holds the staged assets plus a `receipt.json` describing the
//! install.

use crate::receipt::InstallReceipt;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Detect the installation prefix on this system
pub fn detect_prefix() -> PathBuf {
    // First check environment variable
    if let Ok(prefix) = std::env::var("MTI_PREFIX") {
        return PathBuf::from(prefix);
    }

    // Detect by architecture, matching where Homebrew puts things
    #[cfg(target_arch = "aarch64")]
    {
        PathBuf::from("/opt/homebrew")
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        PathBuf::from("/usr/local")
    }
}

/// Directory for installed executables
pub fn bin_dir(prefix: &Path) -> PathBuf {
    prefix.join("bin")
}

/// Root of the share tree
pub fn share_root(prefix: &Path) -> PathBuf {
    prefix.join("share")
}

/// Versioned share directory for one product version
pub fn share_dir(prefix: &Path, name: &str, version: &str) -> PathBuf {
    share_root(prefix).join(name).join(version)
}

/// An installed product version found under the share tree
#[derive(Debug, Clone)]
pub struct InstalledTool {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
    pub receipt: Option<InstallReceipt>,
}

impl InstalledTool {
    /// Create from a versioned share directory
    pub fn from_path(name: String, version: String, path: PathBuf) -> Self {
        let receipt = InstallReceipt::read(&path).ok();
        Self {
            name,
            version,
            path,
            receipt,
        }
    }
}

/// Read all installed products from the share tree
pub fn list_installed(prefix: &Path) -> Result<Vec<InstalledTool>> {
    let share = share_root(prefix);

    if !share.exists() {
        return Ok(vec![]);
    }

    let mut tools = Vec::new();

    for entry in
        fs::read_dir(&share).with_context(|| format!("Failed to read {}", share.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if name.starts_with('.') || !entry.path().is_dir() {
            continue;
        }

        // Only directories written by this installer carry receipts; other
        // packages share the same share/ root, so skip anything without one.
        let mut versions = installed_versions(prefix, &name)?;
        versions.retain(|tool| tool.receipt.is_some());
        tools.extend(versions);
    }

    tools.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tools)
}

/// Get all installed versions of one product, newest first
pub fn installed_versions(prefix: &Path, name: &str) -> Result<Vec<InstalledTool>> {
    let product_dir = share_root(prefix).join(name);

    if !product_dir.exists() {
        return Ok(vec![]);
    }

    let mut tools = Vec::new();

    for entry in fs::read_dir(&product_dir)? {
        let entry = entry?;
        let version = entry.file_name().to_string_lossy().to_string();

        if version.starts_with('.') || !entry.path().is_dir() {
            continue;
        }

        tools.push(InstalledTool::from_path(
            name.to_string(),
            version,
            entry.path(),
        ));
    }

    // Sort by version - newest first, so [0] is always the newest
    tools.sort_by(|a, b| compare_versions(&a.version, &b.version));
    tools.reverse();

    Ok(tools)
}

/// Compare two version strings semantically
fn compare_versions(a: &str, b: &str) -> std::cmp::Ordering {
    let a_parts: Vec<u32> = a.split('.').filter_map(|s| s.parse::<u32>().ok()).collect();
    let b_parts: Vec<u32> = b.split('.').filter_map(|s| s.parse::<u32>().ok()).collect();

    for i in 0..a_parts.len().max(b_parts.len()) {
        let a_part = a_parts.get(i).unwrap_or(&0);
        let b_part = b_parts.get(i).unwrap_or(&0);
        match a_part.cmp(b_part) {
            std::cmp::Ordering::Equal => continue,
            other => return other,
        }
    }

    // Fall back to lexicographic
    a.cmp(b)
}
