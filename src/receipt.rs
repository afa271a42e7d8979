//! Install receipt generation and metadata.
//!
//! Each installed version carries a `receipt.json` in its share directory
//! recording what was installed, when, and by which installer version. The
//! receipt is what distinguishes directories this tool owns from anything
//! else living under the same share/ root, and it is what `list`, `info`
//! and `uninstall` read back.

use crate::formula::Formula;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const RECEIPT_FILE: &str = "receipt.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallReceipt {
    pub installer_version: String,
    pub name: String,
    pub version: String,
    pub time: DateTime<Utc>,
    pub dependencies: Vec<String>,
    /// Number of files staged into the share directory
    pub staged_files: usize,
    /// Whether post-install completed; false means the Python dependencies
    /// may be missing and `mti postinstall` should be re-run.
    #[serde(default)]
    pub post_install_done: bool,
}

impl InstallReceipt {
    /// Create a new receipt for a fresh install
    pub fn new(formula: &Formula, staged_files: usize) -> Self {
        Self {
            installer_version: format!("mti/{}", env!("CARGO_PKG_VERSION")),
            name: formula.name.to_string(),
            version: formula.version.to_string(),
            time: Utc::now(),
            dependencies: formula.dependencies.iter().map(|d| d.to_string()).collect(),
            staged_files,
            post_install_done: false,
        }
    }

    /// Read an existing receipt from a versioned share directory
    pub fn read(share_dir: &Path) -> Result<Self> {
        let receipt_path = share_dir.join(RECEIPT_FILE);
        let contents = fs::read_to_string(&receipt_path)
            .with_context(|| format!("Failed to read receipt: {}", receipt_path.display()))?;
        let receipt: Self =
            serde_json::from_str(&contents).context("Failed to parse receipt.json")?;
        Ok(receipt)
    }

    /// Write the receipt into a versioned share directory
    pub fn write(&self, share_dir: &Path) -> Result<()> {
        let receipt_path = share_dir.join(RECEIPT_FILE);
        let json = serde_json::to_string_pretty(self).context("Failed to serialize receipt")?;
        fs::write(&receipt_path, json)
            .with_context(|| format!("Failed to write receipt: {}", receipt_path.display()))?;
        Ok(())
    }
}
