use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid color spec: '{0}'. Use white|black|transparent|none|#RRGGBB|#AARRGGBB")]
    InvalidColorSpec(String),
    #[error("Invalid source circle: '{0}'. Expected cx,cy,r (px or % of min dimension)")]
    InvalidCropSpec(String),
    #[error("Invalid cycle mode: '{0}'. Use row|tile|random")]
    InvalidCycleMode(String),
    #[error(
        "Nothing fits on the page ({tile_width_px}x{tile_height_px}px tile in {usable_width_px}x{usable_height_px}px usable area). Reduce logo size or margins/gaps"
    )]
    NothingFits {
        tile_width_px: u32,
        tile_height_px: u32,
        usable_width_px: i64,
        usable_height_px: i64,
    },
    #[error("No input images provided")]
    EmptySourceSet,
    #[error("Cannot decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Cannot encode image {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("PDF error: {0}")]
    Embed(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Shape of every tile on the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TileShape {
    /// Round tile; the source is scaled to fill the circle
    Circle { diameter_cm: f64 },
    /// Rectangular tile; the source is letterboxed inside it
    Rect { width_cm: f64, height_cm: f64 },
}

impl Default for TileShape {
    fn default() -> Self {
        TileShape::Circle { diameter_cm: 3.2 }
    }
}

impl TileShape {
    /// Tile dimensions in centimeters (width, height)
    pub fn dimensions_cm(self) -> (f64, f64) {
        match self {
            TileShape::Circle { diameter_cm } => (diameter_cm, diameter_cm),
            TileShape::Rect {
                width_cm,
                height_cm,
            } => (width_cm, height_cm),
        }
    }

    pub fn is_circle(self) -> bool {
        matches!(self, TileShape::Circle { .. })
    }
}

/// Which source image each tile shows when several are supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CyclePolicy {
    /// Every tile of a row shows source `row % n`
    #[default]
    ByRow,
    /// Tiles cycle through the sources in row-major order
    ByTile,
    /// Seeded pseudo-random pick per tile, drawn in row-major order
    Random { seed: u64 },
}

/// How many rows are laid out when fewer sources than rows exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RowFill {
    /// Fill every row that fits, sources repeat
    #[default]
    Repeat,
    /// At most one row per source; extra sources beyond the rows that fit are ignored
    OnePerSource,
}

/// Mirroring applied to each source before tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mirror {
    /// Left-right flip
    pub horizontal: bool,
    /// Top-bottom flip
    pub vertical: bool,
}

impl Mirror {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Statistics about a planned sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Page size in pixels (width, height)
    pub page_px: (u32, u32),
    /// Tile size in pixels (width, height)
    pub tile_px: (u32, u32),
    pub cols: u32,
    pub rows: u32,
    /// Total number of tiles drawn
    pub tiles: usize,
    /// Number of source images supplied
    pub sources: usize,
    /// Tiles assigned to each source, indexed by source
    pub tiles_per_source: Vec<usize>,
}
