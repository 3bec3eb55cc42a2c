use crate::canvas::{GRID_SIZE, Grid};
use crate::color::PixelColor;

// ============================================================================
// FLOOD FILL — 4-connected region recolor from a seed cell
// ============================================================================

/// Recolor the maximal 4-connected region of cells sharing the seed cell's
/// color with `replacement`. `replacement` may be `None` to fill with eraser.
///
/// Uses a DFS Vec-stack of packed flat indices over a flat visited mask. The
/// fill criterion is the seed's *original* color, captured before any
/// mutation, so freshly-filled cells never re-match. Traversal order is not
/// observable in the result; each cell is visited at most once.
///
/// Out-of-bounds seeds are a no-op.
pub fn flood_fill(grid: &mut Grid, x: u32, y: u32, replacement: Option<PixelColor>) {
    if x >= GRID_SIZE || y >= GRID_SIZE {
        return;
    }

    let target = grid.get(x, y);
    // Filling a region with its own color would re-match every cell it
    // writes; bail out before touching anything.
    if target == replacement {
        return;
    }

    let w = GRID_SIZE as usize;
    let mut visited = vec![false; w * w];

    // Flat index = y * GRID_SIZE + x; fits comfortably in u32.
    let mut stack: Vec<u32> = Vec::with_capacity(64);
    stack.push(y * GRID_SIZE + x);

    while let Some(idx) = stack.pop() {
        let iu = idx as usize;
        if visited[iu] {
            continue;
        }
        visited[iu] = true;

        let cx = idx % GRID_SIZE;
        let cy = idx / GRID_SIZE;

        if grid.get(cx, cy) != target {
            continue;
        }
        grid.set(cx, cy, replacement);

        if cx + 1 < GRID_SIZE {
            stack.push(idx + 1);
        }
        if cx > 0 {
            stack.push(idx - 1);
        }
        if cy + 1 < GRID_SIZE {
            stack.push(idx + GRID_SIZE);
        }
        if cy > 0 {
            stack.push(idx - GRID_SIZE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> Option<PixelColor> {
        Some(PixelColor::parse_hex(hex).expect("valid test color"))
    }

    #[test]
    fn fills_entire_uniform_grid_from_any_seed() {
        let a = color("#112233");
        let r = color("#ff004d");
        for seed in [(0u32, 0u32), (31, 31), (13, 7)] {
            let mut grid = Grid::new();
            for x in 0..GRID_SIZE {
                for y in 0..GRID_SIZE {
                    grid.set(x, y, a);
                }
            }
            flood_fill(&mut grid, seed.0, seed.1, r);
            assert!(grid.iter_cells().all(|(_, _, c)| c == r));
        }
    }

    #[test]
    fn filling_with_identical_color_is_a_noop() {
        let mut grid = Grid::new();
        let a = color("#8bac0f");
        grid.set(4, 4, a);
        grid.set(5, 4, a);
        let before = grid.clone();
        flood_fill(&mut grid, 4, 4, a);
        assert_eq!(grid, before);
    }

    #[test]
    fn fills_empty_region_without_touching_painted_cells() {
        let mut grid = Grid::new();
        let wall = color("#000000");
        let fill = color("#29adff");
        // Vertical wall splitting the grid in two.
        for y in 0..GRID_SIZE {
            grid.set(10, y, wall);
        }
        flood_fill(&mut grid, 0, 0, fill);
        for y in 0..GRID_SIZE {
            assert_eq!(grid.get(10, y), wall);
            assert_eq!(grid.get(0, y), fill);
            assert_eq!(grid.get(11, y), None, "right side must stay empty");
        }
    }

    #[test]
    fn respects_four_connectivity_not_diagonals() {
        let a = color("#ffa300");
        let b = color("#1d2b53");
        let r = color("#00e436");
        let mut grid = Grid::new();
        // Background of B everywhere.
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                grid.set(x, y, b);
            }
        }
        // L-shaped region of A: vertical arm (5,5)-(5,8), horizontal arm (5,8)-(8,8).
        let arm: Vec<(u32, u32)> = (5..=8)
            .map(|y| (5u32, y))
            .chain((6..=8).map(|x| (x, 8u32)))
            .collect();
        for &(x, y) in &arm {
            grid.set(x, y, a);
        }
        // Diagonally-touching decoy of A at (9,9): shares only a corner.
        grid.set(9, 9, a);

        flood_fill(&mut grid, 5, 5, r);

        for &(x, y) in &arm {
            assert_eq!(grid.get(x, y), r, "arm cell ({x},{y})");
        }
        assert_eq!(grid.get(9, 9), a, "diagonal decoy must be untouched");
        assert_eq!(grid.get(4, 5), b);
        assert_eq!(grid.get(6, 7), b);
    }

    #[test]
    fn can_fill_with_eraser() {
        let a = color("#5f574f");
        let mut grid = Grid::new();
        for x in 0..4 {
            grid.set(x, 0, a);
        }
        flood_fill(&mut grid, 0, 0, None);
        for x in 0..4 {
            assert_eq!(grid.get(x, 0), None);
        }
    }
}
