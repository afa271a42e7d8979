use crate::error::{InstallError, Result};
use crate::{formula, layout, postinstall as post};
use std::path::Path;

pub fn postinstall(name: &str, prefix: &Path) -> Result<()> {
    let formula = formula::find(name)?;

    let versions = layout::installed_versions(prefix, formula.name)?;
    let Some(installed) = versions.first() else {
        return Err(InstallError::NotInstalled(name.to_string()));
    };

    post::run(formula, &installed.path, prefix)
}
