use crate::error::Result;
use crate::{formula, layout};
use colored::Colorize;
use std::path::Path;

pub fn info(name: &str, prefix: &Path) -> Result<()> {
    let formula = formula::find(name)?;

    println!(
        "{}",
        format!("==> {} {}", formula.name, formula.version)
            .bold()
            .green()
    );
    println!("{}", formula.description);
    println!("{}: {}", "Homepage".bold(), formula.homepage);
    println!("{}: {}", "Source".bold(), formula.url);
    println!(
        "{}: {}",
        "Dependencies".bold(),
        formula.dependencies.join(", ")
    );
    if formula.argcomplete {
        println!("{}: registers global Python argcomplete", "Post-install".bold());
    }

    let versions = layout::installed_versions(prefix, formula.name)?;
    match versions.first() {
        Some(installed) => {
            println!(
                "{}: {} ({})",
                "Installed".bold(),
                installed.version.green(),
                installed.path.display()
            );
            if let Some(receipt) = &installed.receipt {
                println!(
                    "{}: {}",
                    "Installed on".bold(),
                    receipt.time.format("%Y-%m-%d %H:%M UTC")
                );
                if !receipt.post_install_done {
                    println!(
                        "{}",
                        format!("Post-install pending; run 'mti postinstall {}'", formula.name)
                            .yellow()
                    );
                }
            }
        }
        None => println!("{}: not installed", "Installed".bold()),
    }

    Ok(())
}
