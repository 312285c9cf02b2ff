use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mosaic_core::{parse_dimension, parse_ratio};
use photomosaic::models::{ImageSource, MosaicConfig, RenderOverrides};
use photomosaic::services::{ImageLoader, InspectReport, MosaicPipeline};

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(about = "Rebuild a picture from a pool of tile images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a mosaic to a PNG file
    Render {
        /// YAML config file (defaults to $MOSAIC_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Picture to reproduce (path or http(s) URL)
        #[arg(short, long)]
        target: Option<String>,

        /// Tile image (path or http(s) URL), repeatable; replaces configured tiles
        #[arg(long = "tile")]
        tiles: Vec<String>,

        /// Output PNG file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output width in pixels
        #[arg(long, value_parser = parse_dimension)]
        width: Option<u32>,

        /// Output height in pixels
        #[arg(long, value_parser = parse_dimension)]
        height: Option<u32>,

        /// Number of grid columns
        #[arg(long, value_parser = parse_dimension)]
        columns: Option<u32>,

        /// Number of grid rows
        #[arg(long, value_parser = parse_dimension)]
        rows: Option<u32>,

        /// Color overlay opacity between 0 and 1
        #[arg(short, long)]
        blending: Option<f64>,

        /// Re-compress the PNG with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// Show how an image is cropped and which average color it gets
    Inspect {
        /// Image path or http(s) URL
        source: String,

        /// Sampled width in pixels
        #[arg(long, default_value = "30", value_parser = parse_dimension)]
        width: u32,

        /// Sampled height in pixels
        #[arg(long, default_value = "30", value_parser = parse_dimension)]
        height: u32,

        /// Pixel aspect ratio, e.g. "1.5" or "16/9"
        #[arg(long, default_value = "1", value_parser = parse_ratio)]
        aspect_ratio: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            config,
            target,
            tiles,
            output,
            width,
            height,
            columns,
            rows,
            blending,
            optimize,
        }) => {
            let overrides = RenderOverrides {
                width,
                height,
                columns,
                rows,
                color_blending: blending,
                target: target.map(ImageSource::from),
                tiles: tiles.into_iter().map(ImageSource::from).collect(),
                output,
            };
            run_render_command(config, overrides, optimize).await
        }
        Some(Commands::Inspect {
            source,
            width,
            height,
            aspect_ratio,
        }) => run_inspect_command(&source, width, height, aspect_ratio).await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photomosaic=info,mosaic_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load all images, compose and write the PNG
async fn run_render_command(
    config_path: Option<PathBuf>,
    overrides: RenderOverrides,
    optimize: bool,
) -> anyhow::Result<()> {
    init_tracing();

    let config_path = config_path.or_else(|| std::env::var("MOSAIC_CONFIG").ok().map(PathBuf::from));
    let mut config = MosaicConfig::load_or_default(config_path.as_deref())?;
    config.apply(overrides);
    config.validate()?;

    if config.target.is_none() {
        anyhow::bail!("No target image: set `target` in the config or pass --target");
    }
    if config.tiles.is_empty() && config.color_blending < 1.0 {
        tracing::warn!("No tile images configured, composition will fail unless blending is 1");
    }

    let pipeline = MosaicPipeline::new(ImageLoader::new()?);
    let (png_bytes, report) = pipeline
        .render_png(&config, optimize)
        .await
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&config.output, &png_bytes).await?;
    println!(
        "Rendered {} ({} bytes, {} tiles, {} failed loads)",
        config.output.display(),
        png_bytes.len(),
        report.pool_size,
        report.failed
    );

    Ok(())
}

/// Print crop and average color of one image as JSON
async fn run_inspect_command(
    source: &str,
    width: u32,
    height: u32,
    aspect_ratio: f64,
) -> anyhow::Result<()> {
    init_tracing();

    let source = ImageSource::from(source);
    let loader = ImageLoader::new()?;
    let image = loader.load(&source).await?;
    let report = InspectReport::new(&source, image, width, height, aspect_ratio)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Display version, environment and commands
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("MOSAIC_CONFIG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Photomosaic v{VERSION}");
    println!("Rebuild a picture from a pool of tile images\n");

    println!("Environment Variables:");
    println!(
        "  MOSAIC_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG      = {}",
        rust_log
            .as_deref()
            .unwrap_or("photomosaic=info,mosaic_core=info (default)")
    );

    if let Some(path) = config_file {
        println!("\nConfig:");
        match MosaicConfig::load(&PathBuf::from(&path)) {
            Ok(config) => {
                println!(
                    "  {}x{} pixels, {}x{} cells, blending {}",
                    config.width, config.height, config.columns, config.rows, config.color_blending
                );
                println!(
                    "  target: {}",
                    config
                        .target
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "(not set)".to_string())
                );
                println!("  tiles:  {}", config.tiles.len());
                println!("  output: {}", config.output.display());
            }
            Err(e) => println!("  {path}: {e}"),
        }
    }

    println!("\nCommands:");
    println!("  photomosaic render    Render a mosaic to a PNG file");
    println!("  photomosaic inspect   Show crop and average color of one image");
    println!("\nRun 'photomosaic --help' for more details.");
}
