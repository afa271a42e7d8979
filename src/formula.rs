//! Built-in formula catalog for the Mobile Test command-line tools
//!
//! The two products share one source tree and install the same way; a
//! formula is static metadata naming the product plus the switches that
//! differ between them. Nothing here is mutated after authoring time.

use crate::error::{InstallError, Result};

/// Installation recipe for one product
#[derive(Debug, Clone, Copy)]
pub struct Formula {
    pub name: &'static str,
    pub description: &'static str,
    pub homepage: &'static str,
    /// Upstream source repository (metadata only; installs stage from a
    /// local checkout)
    pub url: &'static str,
    pub version: &'static str,
    /// External packages the host package manager must provide first
    pub dependencies: &'static [&'static str],
    /// Name of the entry-point script at the source root
    pub script: &'static str,
    /// Register global Python argcomplete during post-install
    pub argcomplete: bool,
}

const MOBILE_TEST_DEPS: &[&str] = &[
    "bash",
    "python",
    "ffmpeg",
    "tiff2png",
    "ideviceinstaller",
    "libimobiledevice",
];

pub const MTH: Formula = Formula {
    name: "mth",
    description: "Mobile Test Helper - device automation for Android and iOS",
    homepage: "https://github.com/maxim-filkov/mobile-test-helper",
    url: "https://github.com/maxim-filkov/mobile-test-helper.git",
    version: "1.0.0",
    dependencies: MOBILE_TEST_DEPS,
    script: "mth",
    argcomplete: false,
};

pub const MTU: Formula = Formula {
    name: "mtu",
    description: "Mobile Test Utilities - companion tooling for mth",
    homepage: "https://github.com/maxim-filkov/mobile-test-helper",
    url: "https://github.com/maxim-filkov/mobile-test-helper.git",
    version: "1.0.0",
    dependencies: MOBILE_TEST_DEPS,
    script: "mtu",
    argcomplete: true,
};

/// All formulae this installer knows how to install
pub const CATALOG: &[Formula] = &[MTH, MTU];

/// Look up a formula by name
pub fn find(name: &str) -> Result<&'static Formula> {
    CATALOG
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| InstallError::UnknownFormula(name.to_string()))
}

impl Formula {
    /// Message printed (in green) once install and post-install succeed
    pub fn success_message(&self) -> String {
        format!(
            "{} has been installed successfully! Use the command '{}' to start",
            self.name.to_uppercase(),
            self.name
        )
    }
}
