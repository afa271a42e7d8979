use crate::error::Result;
use crate::receipt::InstallReceipt;
use crate::{formula, postinstall, stage};
use colored::Colorize;
use std::path::Path;

pub fn install(name: &str, source: &Path, prefix: &Path, skip_postinstall: bool) -> Result<()> {
    let formula = match formula::find(name) {
        Ok(f) => f,
        Err(e) => {
            println!(
                "Available formulae: {}",
                formula::CATALOG
                    .iter()
                    .map(|f| f.name)
                    .collect::<Vec<_>>()
                    .join(", ")
                    .cyan()
            );
            return Err(e);
        }
    };

    println!(
        "Installing {} {}",
        formula.name.cyan(),
        formula.version.dimmed()
    );
    println!(
        "  Requires (via your package manager): {}",
        formula.dependencies.join(", ").dimmed()
    );

    let staged = stage::stage(formula, source, prefix)?;
    println!(
        "    ├ {} Staged {} files into {}",
        "✓".green(),
        staged.staged_files.to_string().dimmed(),
        staged.share_dir.display()
    );

    InstallReceipt::new(formula, staged.staged_files).write(&staged.share_dir)?;

    println!(
        "    ├ {} Installed {}",
        "✓".green(),
        staged.bin_path.display()
    );

    if skip_postinstall {
        println!(
            "    └ Skipped post-install; run {} to finish setup",
            format!("mti postinstall {}", formula.name).cyan()
        );
        return Ok(());
    }

    postinstall::run(formula, &staged.share_dir, prefix)?;

    println!(
        "    └ {} Installed {} {}",
        "✓".green(),
        formula.name.bold().green(),
        formula.version.dimmed()
    );

    Ok(())
}
