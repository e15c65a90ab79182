use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logo_sheet::{CircleCrop, CyclePolicy, Mirror, SheetConfig, TileShape, parse_color_spec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lsheet", about = "Logo sheet compositor", version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile logos across a printable page
    Tile(TileArgs),
}

#[derive(Args)]
struct TileArgs {
    /// Comma-separated list of input logo files
    #[arg(short = 'I', long, required = true, value_delimiter = ',', num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output file (.pdf for a PDF page, otherwise an image format)
    #[arg(short, long)]
    output: PathBuf,

    /// Load settings from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logo shape [default: circle]
    #[arg(long, value_enum)]
    shape: Option<ShapeArg>,

    /// Circle diameter in centimeters [default: 3.2]
    #[arg(long)]
    diameter_cm: Option<f64>,

    /// Rectangle width in centimeters [default: 4.0]
    #[arg(long)]
    rect_width_cm: Option<f64>,

    /// Rectangle height in centimeters [default: 2.0]
    #[arg(long)]
    rect_height_cm: Option<f64>,

    /// Gap between logos in millimeters [default: 8]
    #[arg(long)]
    gap_mm: Option<f64>,

    /// Margin around the page in millimeters [default: 2]
    #[arg(long)]
    margin_mm: Option<f64>,

    /// Output resolution [default: 300]
    #[arg(long)]
    dpi: Option<u32>,

    /// Output paper size [default: a4]
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Output orientation [default: portrait]
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Page background: white, black, transparent, none, #RRGGBB or #AARRGGBB
    #[arg(long)]
    page_background: Option<String>,

    /// Flatten every logo onto this color before scaling (none keeps alpha)
    #[arg(long)]
    logo_background: Option<String>,

    /// Bleed edge colors into transparent pixels to avoid dark fringes
    #[arg(long)]
    alpha_bleed: bool,

    /// Number of alpha-bleed passes [default: 2]
    #[arg(long)]
    alpha_bleed_iters: Option<u32>,

    /// Saturation factor (1.0 = unchanged, 1.5 suits pastel logos)
    #[arg(long)]
    boost_colors: Option<f64>,

    /// How to pick the logo for each tile: row, tile or random [default: row]
    #[arg(long)]
    cycle_mode: Option<String>,

    /// Seed for --cycle-mode random [default: 0]
    #[arg(long)]
    random_seed: Option<u64>,

    /// Row count when there are fewer logos than rows [default: repeat]
    #[arg(long, value_enum)]
    row_fill: Option<RowFillArg>,

    /// Crop a circle from each source first: cx,cy,r in px or % of min dimension
    #[arg(long)]
    src_circle: Option<String>,

    /// Draw the full tile square even in circle mode
    #[arg(long)]
    no_mask: bool,

    /// Mirror sources left-right
    #[arg(long)]
    mirror_horizontal: bool,

    /// Mirror sources top-bottom
    #[arg(long)]
    mirror_vertical: bool,

    /// Draw faint crop marks at tile corners
    #[arg(long)]
    crop_marks: bool,

    /// Show the grid statistics only, don't render
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Circle,
    Rect,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum RowFillArg {
    Repeat,
    OnePerSource,
}

impl From<PaperArg> for logo_sheet::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<OrientationArg> for logo_sheet::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<RowFillArg> for logo_sheet::RowFill {
    fn from(arg: RowFillArg) -> Self {
        match arg {
            RowFillArg::Repeat => Self::Repeat,
            RowFillArg::OnePerSource => Self::OnePerSource,
        }
    }
}

impl TileArgs {
    /// Overlay the flags that were given on top of `config`
    fn apply(&self, config: &mut SheetConfig) -> Result<()> {
        config.shape = self.resolve_shape(config.shape);

        if let Some(gap) = self.gap_mm {
            config.gap_mm = gap;
        }
        if let Some(margin) = self.margin_mm {
            config.margin_mm = margin;
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(paper) = self.paper {
            config.paper_size = paper.into();
        }
        if let Some(orientation) = self.orientation {
            config.orientation = orientation.into();
        }

        config.page_background =
            parse_color_spec(self.page_background.as_deref(), config.page_background)?;
        config.logo_background =
            parse_color_spec(self.logo_background.as_deref(), config.logo_background)?;

        if self.alpha_bleed {
            config.alpha_bleed = true;
        }
        if let Some(iters) = self.alpha_bleed_iters {
            config.alpha_bleed_iterations = iters;
        }
        if let Some(boost) = self.boost_colors {
            config.saturation_boost = boost;
        }

        config.cycle = match (&self.cycle_mode, self.random_seed) {
            (Some(mode), seed) => {
                CyclePolicy::parse(mode, seed.unwrap_or_else(|| seed_of(config.cycle)))?
            }
            (None, Some(seed)) => match config.cycle {
                CyclePolicy::Random { .. } => CyclePolicy::Random { seed },
                other => other,
            },
            (None, None) => config.cycle,
        };
        if let Some(row_fill) = self.row_fill {
            config.row_fill = row_fill.into();
        }

        if let Some(spec) = &self.src_circle {
            config.source_circle = Some(spec.parse::<CircleCrop>()?);
        }
        if self.no_mask {
            config.mask_circle = false;
        }
        config.mirror = Mirror {
            horizontal: config.mirror.horizontal || self.mirror_horizontal,
            vertical: config.mirror.vertical || self.mirror_vertical,
        };
        if self.crop_marks {
            config.crop_marks = true;
        }

        Ok(())
    }

    fn resolve_shape(&self, current: TileShape) -> TileShape {
        let circle = match self.shape {
            Some(ShapeArg::Circle) => true,
            Some(ShapeArg::Rect) => false,
            None => current.is_circle(),
        };

        if circle {
            let default = match current {
                TileShape::Circle { diameter_cm } => diameter_cm,
                TileShape::Rect { .. } => 3.2,
            };
            TileShape::Circle {
                diameter_cm: self.diameter_cm.unwrap_or(default),
            }
        } else {
            let (width, height) = match current {
                TileShape::Rect {
                    width_cm,
                    height_cm,
                } => (width_cm, height_cm),
                TileShape::Circle { .. } => (4.0, 2.0),
            };
            TileShape::Rect {
                width_cm: self.rect_width_cm.unwrap_or(width),
                height_cm: self.rect_height_cm.unwrap_or(height),
            }
        }
    }
}

fn seed_of(policy: CyclePolicy) -> u64 {
    match policy {
        CyclePolicy::Random { seed } => seed,
        CyclePolicy::ByRow | CyclePolicy::ByTile => 0,
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tile(args) => {
            let mut config = match &args.config {
                Some(path) => SheetConfig::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => SheetConfig::default(),
            };
            args.apply(&mut config)?;
            config.validate()?;
            log::debug!("Effective configuration: {:?}", config);

            // Calculate and show statistics
            let stats = logo_sheet::calculate_statistics(&config, args.inputs.len())?;
            println!("Sheet Statistics:");
            println!("  Page: {}x{} px", stats.page_px.0, stats.page_px.1);
            println!("  Tile: {}x{} px", stats.tile_px.0, stats.tile_px.1);
            println!(
                "  Grid: {} cols x {} rows = {} tiles",
                stats.cols, stats.rows, stats.tiles
            );
            println!("  Cycle: {}", config.cycle.name());
            for (path, count) in args.inputs.iter().zip(&stats.tiles_per_source) {
                println!("  {}: {} tiles", path.display(), count);
            }

            if args.stats_only {
                return Ok(());
            }

            let sources = logo_sheet::load_images(&args.inputs).await?;
            let canvas = logo_sheet::compose(sources, config.clone()).await?;
            let kind = logo_sheet::save_sheet(canvas, &args.output, &config).await?;

            let what = match kind {
                logo_sheet::OutputKind::Pdf => "PDF",
                logo_sheet::OutputKind::Raster => "Image",
            };
            println!(
                "{} generated → {}. Print at 100% scale.",
                what,
                args.output.display()
            );
        }
    }

    Ok(())
}
