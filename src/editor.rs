use crate::canvas::Grid;
use crate::color::PixelColor;
use crate::ops::fill::flood_fill;
use crate::project::Project;

// ============================================================================
// TOOLS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Eyedropper,
}

impl Tool {
    /// All tools, in toolbar order.
    pub fn all() -> &'static [Tool] {
        &[Tool::Pencil, Tool::Eraser, Tool::Fill, Tool::Eyedropper]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
            Tool::Eyedropper => "Eyedropper",
        }
    }

    /// True for tools that keep painting while the pointer drags.
    pub fn drags(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }
}

/// Which pointer button drove the edit. Primary paints with the primary
/// color, secondary with the secondary color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintButton {
    Primary,
    Secondary,
}

// ============================================================================
// EDITOR STATE — the explicit state struct driving all core algorithms
// ============================================================================

/// All mutable editor state, owned by the app shell and passed explicitly.
/// The core algorithms never touch ambient globals, so everything here is
/// unit-testable without a UI.
pub struct EditorState {
    pub project: Project,
    pub tool: Tool,
    pub primary_color: PixelColor,
    pub secondary_color: PixelColor,
    pub show_grid: bool,
    /// True between `begin_stroke` and `end_stroke`; the snapshot for the
    /// whole stroke is pushed once at the start.
    stroke_active: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            project: Project::new_untitled(),
            tool: Tool::Pencil,
            primary_color: PixelColor::new(255, 0, 255),
            secondary_color: PixelColor::new(0, 255, 255),
            show_grid: true,
            stroke_active: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.project.grid
    }

    fn active_color(&self, button: PaintButton) -> PixelColor {
        match button {
            PaintButton::Primary => self.primary_color,
            PaintButton::Secondary => self.secondary_color,
        }
    }

    /// Pointer pressed on cell `(x, y)`. Pushes one snapshot for the whole
    /// stroke (mutating tools only), then applies the tool. Out-of-bounds
    /// coordinates are the caller's responsibility and ignored here.
    pub fn begin_stroke(&mut self, x: u32, y: u32, button: PaintButton) {
        if !Grid::is_in_bounds(x as i32, y as i32) {
            return;
        }
        self.stroke_active = true;

        match self.tool {
            Tool::Pencil => {
                self.push_stroke_snapshot();
                self.project.grid.set(x, y, Some(self.active_color(button)));
                self.project.mark_dirty();
            }
            Tool::Eraser => {
                self.push_stroke_snapshot();
                self.project.grid.set(x, y, None);
                self.project.mark_dirty();
            }
            Tool::Fill => {
                self.push_stroke_snapshot();
                let color = self.active_color(button);
                flood_fill(&mut self.project.grid, x, y, Some(color));
                self.project.mark_dirty();
            }
            Tool::Eyedropper => {
                // Picks don't mutate the grid, so no snapshot.
                if let Some(picked) = self.project.grid.get(x, y) {
                    match button {
                        PaintButton::Primary => self.primary_color = picked,
                        PaintButton::Secondary => self.secondary_color = picked,
                    }
                }
            }
        }
    }

    /// Pointer dragged onto cell `(x, y)` while the button is held. Only
    /// pencil and eraser continue across cells; the stroke's snapshot was
    /// already pushed by `begin_stroke`.
    pub fn continue_stroke(&mut self, x: u32, y: u32, button: PaintButton) {
        if !self.stroke_active || !Grid::is_in_bounds(x as i32, y as i32) {
            return;
        }
        match self.tool {
            Tool::Pencil => {
                self.project.grid.set(x, y, Some(self.active_color(button)));
                self.project.mark_dirty();
            }
            Tool::Eraser => {
                self.project.grid.set(x, y, None);
                self.project.mark_dirty();
            }
            _ => {}
        }
    }

    pub fn end_stroke(&mut self) {
        self.stroke_active = false;
    }

    fn push_stroke_snapshot(&mut self) {
        self.project.history.push_snapshot(&self.project.grid);
    }

    pub fn undo(&mut self) -> bool {
        self.project.history.undo(&mut self.project.grid)
    }

    pub fn redo(&mut self) -> bool {
        self.project.history.redo(&mut self.project.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(hex: &str) -> PixelColor {
        PixelColor::parse_hex(hex).expect("valid test color")
    }

    #[test]
    fn pencil_paints_with_the_button_color() {
        let mut state = EditorState::new();
        state.begin_stroke(3, 4, PaintButton::Primary);
        state.end_stroke();
        assert_eq!(state.grid().get(3, 4), Some(state.primary_color));

        state.begin_stroke(5, 4, PaintButton::Secondary);
        state.end_stroke();
        assert_eq!(state.grid().get(5, 4), Some(state.secondary_color));
    }

    #[test]
    fn a_drag_stroke_is_one_undo_unit() {
        let mut state = EditorState::new();
        state.begin_stroke(0, 0, PaintButton::Primary);
        state.continue_stroke(1, 0, PaintButton::Primary);
        state.continue_stroke(2, 0, PaintButton::Primary);
        state.end_stroke();

        assert!(state.undo());
        for x in 0..3 {
            assert_eq!(state.grid().get(x, 0), None);
        }
        // Only one snapshot was pushed for the whole stroke.
        assert!(!state.undo());
    }

    #[test]
    fn eraser_clears_cells() {
        let mut state = EditorState::new();
        state.begin_stroke(2, 2, PaintButton::Primary);
        state.end_stroke();

        state.tool = Tool::Eraser;
        state.begin_stroke(2, 2, PaintButton::Primary);
        state.end_stroke();
        assert_eq!(state.grid().get(2, 2), None);
    }

    #[test]
    fn fill_tool_floods_through_the_state() {
        let mut state = EditorState::new();
        state.tool = Tool::Fill;
        state.begin_stroke(0, 0, PaintButton::Primary);
        state.end_stroke();
        // The whole (empty) grid floods to primary.
        assert!(state.grid().iter_cells().all(|(_, _, c)| c == Some(state.primary_color)));

        assert!(state.undo());
        assert!(state.grid().iter_cells().all(|(_, _, c)| c.is_none()));
    }

    #[test]
    fn eyedropper_picks_without_creating_history() {
        let mut state = EditorState::new();
        let painted = color("#8bac0f");
        state.project.grid.set(6, 6, Some(painted));
        state.project.history.clear();

        state.tool = Tool::Eyedropper;
        state.begin_stroke(6, 6, PaintButton::Primary);
        state.end_stroke();
        assert_eq!(state.primary_color, painted);
        assert!(!state.project.history.can_undo());

        state.begin_stroke(6, 6, PaintButton::Secondary);
        state.end_stroke();
        assert_eq!(state.secondary_color, painted);
    }

    #[test]
    fn eyedropper_on_empty_cell_keeps_current_colors() {
        let mut state = EditorState::new();
        let before = (state.primary_color, state.secondary_color);
        state.tool = Tool::Eyedropper;
        state.begin_stroke(0, 0, PaintButton::Primary);
        state.end_stroke();
        assert_eq!((state.primary_color, state.secondary_color), before);
    }

    #[test]
    fn continue_stroke_requires_an_active_stroke() {
        let mut state = EditorState::new();
        state.continue_stroke(1, 1, PaintButton::Primary);
        assert_eq!(state.grid().get(1, 1), None);
    }
}
