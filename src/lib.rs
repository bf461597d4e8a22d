pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{DryRunStore, LocalStore};
pub use config::LayoutConfig;
pub use crate::core::{b2_export::export_b2, engine::MirrorEngine, stages::MirrorPaths};
pub use domain::model::{RunReport, Stage};
pub use utils::error::{MirrorError, Result};
