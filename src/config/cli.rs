use crate::domain::model::{parse_stage_list, Stage};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "asset-mirror")]
#[command(about = "Copy A.1-B.4 pipeline results into the website assets tree")]
pub struct CliConfig {
    /// Path to the project repo holding `submission/`
    #[arg(long)]
    pub src: PathBuf,

    /// Path to the website repo; assets land under `<dst>/assets`
    #[arg(long)]
    pub dst: PathBuf,

    /// TOML file overriding pair tags, rectification batch or roots
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run only these stages (comma-separated, e.g. `a1,b2`)
    #[arg(long)]
    pub only: Option<String>,

    /// Skip these stages (comma-separated)
    #[arg(long)]
    pub skip: Option<String>,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Stages to run, always in pipeline order.
    pub fn selected_stages(&self) -> Result<Vec<Stage>> {
        let only = match &self.only {
            Some(list) => parse_stage_list(list)?,
            None => Stage::ALL.to_vec(),
        };
        let skip = match &self.skip {
            Some(list) => parse_stage_list(list)?,
            None => Vec::new(),
        };

        Ok(Stage::ALL
            .into_iter()
            .filter(|s| only.contains(s) && !skip.contains(s))
            .collect())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("src", &self.src.to_string_lossy())?;
        validate_path("dst", &self.dst.to_string_lossy())?;
        self.selected_stages()?;
        Ok(())
    }
}
