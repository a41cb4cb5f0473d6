//! lenticular CLI - build lenticular panel layouts and slice face images

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use lenticular::commands::{self, SUMMARY_FILE};
use lenticular::init_logging;
use lenticular_core::{Color, VerticalAlignment};
use lenticular_settings::{default_config_path, load_or_default, SceneConfig};
use lenticular_shapes::AxesPlane;
use lenticular_slicer::SliceParams;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "lenticular")]
#[command(about = "Geometry and texture slicing for lenticular facet panels", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default scene configuration
    Init {
        /// Destination (.toml or .json); defaults to the user config directory
        path: Option<PathBuf>,
    },
    /// Print the facet layout of every panel as JSON
    Layout {
        /// Scene configuration; defaults to the user config directory
        config: Option<PathBuf>,
    },
    /// Letterbox and slice a single image
    Slice {
        /// Source image
        image: PathBuf,
        /// Width over height of the padded canvas
        #[arg(short, long)]
        aspect: f64,
        /// Number of strips
        #[arg(short, long, default_value_t = 9)]
        slices: usize,
        /// Padding colour, a CSS name or #rrggbb[aa]
        #[arg(short, long, default_value = "blue")]
        border: Color,
        /// Vertical placement, 0 = top, 1 = bottom
        #[arg(long, default_value = "0.5", value_parser = parse_alignment)]
        align: VerticalAlignment,
        /// Output image for the padded canvas
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Load every configured image, slice it and write the canvases
    Build {
        /// Scene configuration; defaults to the user config directory
        config: Option<PathBuf>,
        /// Directory for canvases and the summary
        #[arg(short, long, default_value = "lenticular-out")]
        out_dir: PathBuf,
    },
    /// Print a fan-triangulated regular polygon as JSON
    Polygon {
        #[arg(long, default_value_t = 24)]
        sides: usize,
        /// Radii cycled around the outline
        #[arg(long, value_delimiter = ',', default_values_t = [1.0, 1.1, 1.0, 0.4])]
        radii: Vec<f64>,
        /// xy, xz or yz
        #[arg(long, default_value = "xy")]
        plane: AxesPlane,
    },
}

fn parse_alignment(value: &str) -> Result<VerticalAlignment, String> {
    let value: f64 = value.parse().map_err(|e| format!("{}", e))?;
    VerticalAlignment::new(value).map_err(|e| e.to_string())
}

fn config_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(default_config_path()?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            let path = config_path(path)?;
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            SceneConfig::default().save_to_file(&path)?;
            println!("Wrote {}", path.display());
        }
        Commands::Layout { config } => {
            let config = load_or_default(&config_path(config)?)?;
            let layouts = commands::layout_scene(&config)?;
            println!("{}", serde_json::to_string_pretty(&layouts)?);
        }
        Commands::Slice {
            image,
            aspect,
            slices,
            border,
            align,
            out,
        } => {
            let params = SliceParams {
                target_aspect_ratio: aspect,
                slice_count: slices,
                border_color: border,
                vertical_alignment: align,
            };
            let summary = commands::slice_file(&image, &out, &params)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Build { config, out_dir } => {
            let config = config_path(config)?;
            let summary = commands::build_scene(&config, &out_dir).await?;
            info!(path = %out_dir.join(SUMMARY_FILE).display(), "Summary written");
            let errors = summary.error_count();
            if errors > 0 {
                bail!("{} face image(s) could not be applied", errors);
            }
        }
        Commands::Polygon {
            sides,
            radii,
            plane,
        } => {
            let mesh = commands::polygon(sides, &radii, plane)?;
            println!("{}", serde_json::to_string_pretty(&mesh)?);
        }
    }

    Ok(())
}
