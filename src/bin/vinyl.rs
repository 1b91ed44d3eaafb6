use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use vinyl_thumb::config::{FONT_ENV, TEMPLATE_ENV};

#[derive(Parser, Debug)]
#[command(name = "vinyl", version, about = "Vinyl-record style video thumbnails")]
struct Cli {
    /// Log more (`-v` debug, `-vv` trace). A non-empty `RUST_LOG` replaces this level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    assets: AssetArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct AssetArgs {
    /// Background template image.
    #[arg(long, global = true, env = TEMPLATE_ENV, default_value = vinyl_thumb::config::DEFAULT_TEMPLATE_PATH)]
    template: PathBuf,

    /// Title font (TTF/OTF).
    #[arg(long, global = true, env = FONT_ENV, default_value = vinyl_thumb::config::DEFAULT_FONT_PATH)]
    font: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one thumbnail to a PNG.
    Render(RenderArgs),
    /// Render every job of a JSON manifest in parallel.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Video title drawn under the badge.
    #[arg(long)]
    title: String,

    /// Thumbnail image (JPEG/PNG).
    #[arg(long)]
    thumbnail: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Video id, used for log context.
    #[arg(long, default_value = "local")]
    video_id: String,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Manifest: `[{"video_id": .., "title": .., "thumbnail": ..}]`, thumbnails relative to it.
    #[arg(long)]
    manifest: PathBuf,

    /// Directory receiving `<video_id>.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Worker threads (defaults to rayon's choice).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = vinyl_thumb::AssetPaths {
        template: cli.assets.template,
        font: cli.assets.font,
    };
    let compositor = vinyl_thumb::Compositor::from_paths(&paths).context("load startup assets")?;

    match cli.cmd {
        Command::Render(args) => cmd_render(&compositor, args),
        Command::Batch(args) => cmd_batch(&compositor, args),
    }
}

fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, &rust_log))
        .with_writer(std::io::stderr)
        .init();
}

/// `-v` only sets the fallback level; any directive in `rust_log` replaces it.
fn env_filter(verbose: u8, rust_log: &str) -> tracing_subscriber::EnvFilter {
    let level = match verbose {
        0 => tracing::level_filters::LevelFilter::INFO,
        1 => tracing::level_filters::LevelFilter::DEBUG,
        _ => tracing::level_filters::LevelFilter::TRACE,
    };
    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log)
}

fn cmd_render(compositor: &vinyl_thumb::Compositor, args: RenderArgs) -> anyhow::Result<()> {
    let thumbnail = std::fs::read(&args.thumbnail)
        .with_context(|| format!("read thumbnail '{}'", args.thumbnail.display()))?;
    let req = vinyl_thumb::RequestContext::new(args.video_id, args.title, thumbnail)?;
    let png = compositor.render_request(&req)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(compositor: &vinyl_thumb::Compositor, args: BatchArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.manifest)
        .with_context(|| format!("read manifest '{}'", args.manifest.display()))?;
    let entries = vinyl_thumb::parse_manifest(&json)?;
    let base_dir = args.manifest.parent().unwrap_or_else(|| Path::new("."));

    let summary =
        vinyl_thumb::run_manifest(compositor, &entries, base_dir, &args.out_dir, args.threads)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize batch summary")?
    );
    if !summary.failed.is_empty() {
        anyhow::bail!("{} of {} jobs failed", summary.failed.len(), entries.len());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/bin/vinyl.rs"]
mod tests;
