use crate::error::Result;
use crate::layout;
use colored::Colorize;
use std::path::Path;

pub fn list(prefix: &Path, show_versions: bool) -> Result<()> {
    let mut installed = layout::list_installed(prefix)?;

    if installed.is_empty() {
        println!("No tools installed");
        return Ok(());
    }

    if !show_versions {
        // installed_versions sorts newest first within a product
        installed.dedup_by(|a, b| a.name == b.name);
    }

    for tool in installed {
        let pending = tool
            .receipt
            .as_ref()
            .map(|r| !r.post_install_done)
            .unwrap_or(false);
        if pending {
            println!(
                "{} {} {}",
                tool.name,
                tool.version.dimmed(),
                "(post-install pending)".yellow()
            );
        } else {
            println!("{} {}", tool.name, tool.version.dimmed());
        }
    }

    Ok(())
}
