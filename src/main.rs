use anyhow::Context;
use asset_mirror::adapters::PlannedAction;
use asset_mirror::utils::{logger, validation::Validate};
use asset_mirror::{CliConfig, DryRunStore, LayoutConfig, LocalStore, MirrorEngine, RunReport};
use clap::Parser;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting asset-mirror");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let layout = match &config.config {
        Some(path) => {
            tracing::info!("Loading layout from: {}", path.display());
            LayoutConfig::from_file(path)
                .with_context(|| format!("failed to load layout file '{}'", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    if let Err(e) = layout.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let stages = config.selected_stages()?;
    let src_root = std::path::absolute(&config.src)
        .with_context(|| format!("cannot resolve --src '{}'", config.src.display()))?;
    let dst_root = std::path::absolute(&config.dst)
        .with_context(|| format!("cannot resolve --dst '{}'", config.dst.display()))?;

    let report = if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let engine =
            MirrorEngine::new(DryRunStore::new(), layout, &src_root, &dst_root).with_dry_run(true);
        let report = engine.run(&stages)?;
        display_plan(&engine.store().planned());
        report
    } else {
        MirrorEngine::new(LocalStore::new(), layout, &src_root, &dst_root).run(&stages)?
    };

    if let Some(path) = &config.report {
        write_report(path, &report)
            .with_context(|| format!("failed to write report '{}'", path.display()))?;
        tracing::info!("📁 Report saved to: {}", path.display());
    }

    println!();
    println!(
        "[done] Assets copied into {} ({} copied, {} skipped)",
        report.assets_root.display(),
        report.total_copied(),
        report.total_skipped()
    );

    Ok(())
}

fn display_plan(planned: &[PlannedAction]) {
    println!("🔍 Planned actions:");
    for action in planned {
        match action {
            PlannedAction::CreateDir(dir) => println!("  mkdir {}", dir.display()),
            PlannedAction::Copy { src, dst } => {
                println!("  copy  {} -> {}", src.display(), dst.display())
            }
        }
    }
}

fn write_report(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, report.to_json_pretty()?)?;
    Ok(())
}
