//! Layout data types
//!
//! These types carry the computed grid between planning and rendering.

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
}

impl GridPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A pixel rectangle on the canvas (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Computed grid for one sheet
///
/// Derived once from the configuration, read by the renderer, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlan {
    pub page_width_px: u32,
    pub page_height_px: u32,
    pub tile_width_px: u32,
    pub tile_height_px: u32,
    pub cols: u32,
    pub rows: u32,
    /// Left edge of the first column
    pub start_x: u32,
    /// Top edge of the first row
    pub start_y: u32,
    pub gap_px: u32,
    pub margin_px: u32,
}

impl GridPlan {
    /// Total number of tiles
    pub fn tile_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Width of the whole tile block including inner gaps
    pub fn block_width(&self) -> u32 {
        self.cols * self.tile_width_px + self.cols.saturating_sub(1) * self.gap_px
    }

    /// Height of the whole tile block including inner gaps
    pub fn block_height(&self) -> u32 {
        self.rows * self.tile_height_px + self.rows.saturating_sub(1) * self.gap_px
    }

    /// Page width minus both margins
    pub fn usable_width(&self) -> u32 {
        self.page_width_px.saturating_sub(2 * self.margin_px)
    }

    /// Page height minus both margins
    pub fn usable_height(&self) -> u32 {
        self.page_height_px.saturating_sub(2 * self.margin_px)
    }

    /// Top-left corner of the tile at `pos`
    pub fn tile_origin(&self, pos: GridPosition) -> (u32, u32) {
        (
            self.start_x + pos.col * (self.tile_width_px + self.gap_px),
            self.start_y + pos.row * (self.tile_height_px + self.gap_px),
        )
    }

    /// Bounds of the tile at `pos`
    pub fn tile_rect(&self, pos: GridPosition) -> PixelRect {
        let (x, y) = self.tile_origin(pos);
        PixelRect::new(x, y, self.tile_width_px, self.tile_height_px)
    }

    /// All grid positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| GridPosition::new(row, col)))
    }
}
