#[cfg(feature = "cli")]
pub mod cli;
pub mod site;

#[cfg(feature = "cli")]
pub use cli::{Cli, Command};
pub use site::{ContentBase, SiteConfig};
