#[cfg(feature = "cli")]
pub mod cli;
pub mod layout;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use layout::{LayoutConfig, LayoutPaths};
