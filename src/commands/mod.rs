//! Command implementations for the mti CLI
//!
//! One module per subcommand:
//!
//! - **install**: stage a formula and run its post-install
//! - **postinstall**: re-run the post-install step
//! - **uninstall**: remove an installed formula
//! - **list**: installed tools and versions
//! - **info**: formula metadata and install status
//! - **env**: opt-in shell profile and environment setup
//! - **completions**: shell completion generation

pub mod completions;
pub mod env;
pub mod info;
pub mod install;
pub mod list;
pub mod postinstall;
pub mod uninstall;

pub use completions::completions;
pub use env::env;
pub use info::info;
pub use install::install;
pub use list::list;
pub use postinstall::postinstall;
pub use uninstall::uninstall;
