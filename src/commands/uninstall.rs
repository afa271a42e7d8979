use crate::error::{InstallError, Result};
use crate::{formula, layout};
use colored::Colorize;
use std::fs;
use std::path::Path;

pub fn uninstall(name: &str, prefix: &Path) -> Result<()> {
    let formula = formula::find(name)?;

    let versions = layout::installed_versions(prefix, formula.name)?;
    if versions.is_empty() {
        return Err(InstallError::NotInstalled(name.to_string()));
    }

    for installed in &versions {
        println!(
            "  Uninstalling {} {}",
            installed.name.cyan(),
            installed.version.dimmed()
        );
        fs::remove_dir_all(&installed.path)?;
    }

    // Drop the now-empty product directory from the share tree
    let product_dir = layout::share_root(prefix).join(formula.name);
    if product_dir.exists() && product_dir.read_dir()?.next().is_none() {
        fs::remove_dir(&product_dir)?;
    }

    let bin_path = layout::bin_dir(prefix).join(formula.name);
    if bin_path.exists() {
        fs::remove_file(&bin_path)?;
    }

    println!(
        "  {} Uninstalled {}",
        "✓".green(),
        formula.name.bold().green()
    );

    Ok(())
}
