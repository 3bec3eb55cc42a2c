use std::collections::VecDeque;

use crate::color::PixelColor;

/// Side length of the sprite grid. Fixed for the lifetime of the process.
pub const GRID_SIZE: u32 = 32;

// ============================================================================
// GRID — 32×32 raster of nullable colors
// ============================================================================

/// The source raster: a flat row-major `GRID_SIZE × GRID_SIZE` array of
/// `Option<PixelColor>`. `None` cells are transparent. Dimensions never
/// change after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Vec<Option<PixelColor>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty (fully transparent) grid.
    pub fn new() -> Self {
        Self {
            cells: vec![None; (GRID_SIZE * GRID_SIZE) as usize],
        }
    }

    #[inline(always)]
    fn index(x: u32, y: u32) -> usize {
        (y * GRID_SIZE + x) as usize
    }

    /// Read a cell. `x` and `y` must be in bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<PixelColor> {
        self.cells[Self::index(x, y)]
    }

    /// Write a cell (`None` erases). `x` and `y` must be in bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Option<PixelColor>) {
        self.cells[Self::index(x, y)] = color;
    }

    /// Signed-coordinate probe: `None` for out-of-bounds as well as empty
    /// cells. This is the neighbor lookup used by the shading pass.
    #[inline]
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<PixelColor> {
        if x < 0 || x >= GRID_SIZE as i32 || y < 0 || y >= GRID_SIZE as i32 {
            return None;
        }
        self.cells[Self::index(x as u32, y as u32)]
    }

    pub fn is_in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && x < GRID_SIZE as i32 && y >= 0 && y < GRID_SIZE as i32
    }

    /// Iterate all cells as `(x, y, color)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, Option<PixelColor>)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| {
            (i as u32 % GRID_SIZE, i as u32 / GRID_SIZE, *c)
        })
    }

    /// Rows view used by the project codec.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<PixelColor>]> {
        self.cells.chunks_exact(GRID_SIZE as usize)
    }

    /// Rebuild a grid from exactly `GRID_SIZE × GRID_SIZE` cells (row-major).
    pub(crate) fn from_cells(cells: Vec<Option<PixelColor>>) -> Self {
        debug_assert_eq!(cells.len(), (GRID_SIZE * GRID_SIZE) as usize);
        Self { cells }
    }
}

// ============================================================================
// GRID HISTORY — snapshot-based undo/redo stacks
// ============================================================================

/// Maximum retained undo snapshots. The original design kept history
/// unbounded; a 32×32 snapshot is 4KB so this cap is generous while keeping
/// memory flat during long sessions.
const MAX_HISTORY: usize = 256;

/// Undo/redo manager over whole-grid snapshots (most-recent-last).
///
/// Callers push a snapshot once per logical user edit, *before* mutating the
/// grid. Any fresh edit invalidates the redo stack.
#[derive(Default)]
pub struct GridHistory {
    undo_stack: VecDeque<Grid>,
    redo_stack: VecDeque<Grid>,
}

impl GridHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pre-mutation state and clear any redo entries.
    /// The snapshot is a deep copy — later grid mutation never touches it.
    pub fn push_snapshot(&mut self, grid: &Grid) {
        self.redo_stack.clear();
        self.undo_stack.push_back(grid.clone());
        while self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.pop_front();
        }
    }

    /// Restore the most recent snapshot into `grid`, moving the current state
    /// onto the redo stack. Returns `false` (no-op) when there is nothing to
    /// undo.
    pub fn undo(&mut self, grid: &mut Grid) -> bool {
        let Some(snapshot) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push_back(std::mem::replace(grid, snapshot));
        true
    }

    /// Symmetric to `undo`. Returns `false` when the redo stack is empty.
    pub fn redo(&mut self, grid: &mut Grid) -> bool {
        let Some(snapshot) = self.redo_stack.pop_back() else {
            return false;
        };
        self.undo_stack.push_back(std::mem::replace(grid, snapshot));
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
