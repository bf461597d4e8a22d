pub mod b2_export;
pub mod discovery;
pub mod engine;
pub mod safe_copy;
pub mod stages;

pub use crate::domain::model::{CopyOutcome, RunReport, Stage, StageReport};
pub use crate::domain::ports::AssetStore;
pub use crate::utils::error::Result;
