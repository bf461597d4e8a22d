use anyhow::Context;
use asset_mirror::utils::{logger, validation::Validate};
use asset_mirror::{export_b2, LayoutConfig, LocalStore, MirrorPaths};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "copy-b2")]
#[command(about = "Copy B.2 results into website assets folder.")]
struct Args {
    /// Path to the project repo holding `submission/`
    #[arg(long)]
    src: PathBuf,

    /// Path to the website repo (default: current directory)
    #[arg(long, default_value = ".")]
    dst: PathBuf,

    /// TOML file overriding pair tags or roots
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_enum, default_value_t = logger::LogFormat::Compact)]
    log_format: logger::LogFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose, args.log_format);

    let layout = match &args.config {
        Some(path) => LayoutConfig::from_file(path)
            .with_context(|| format!("failed to load layout file '{}'", path.display()))?,
        None => LayoutConfig::default(),
    };
    layout.validate()?;

    let src_root = std::path::absolute(&args.src)?;
    let dst_root = std::path::absolute(&args.dst)?;
    let paths = MirrorPaths::new(&src_root, &dst_root, &layout.layout);

    let report = export_b2(&LocalStore::new(), &paths, &layout.pairs)?;
    tracing::debug!("{} files copied, {} directories missing", report.copied, report.skipped);

    println!();
    println!("✅ All B.2 results copied to {}/b2/", layout.layout.assets_dir);

    Ok(())
}
