use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use rfd::FileDialog;

use crate::canvas::{GRID_SIZE, Grid};
use crate::project::{grid_from_json, grid_to_json};

// ============================================================================
// RASTERIZATION
// ============================================================================

/// Flatten the grid to a native-resolution RGBA image: one pixel per cell,
/// fully transparent where empty.
pub fn grid_to_image(grid: &Grid) -> RgbaImage {
    let mut img = RgbaImage::new(GRID_SIZE, GRID_SIZE);
    for (x, y, cell) in grid.iter_cells() {
        if let Some(color) = cell {
            img.put_pixel(x, y, color.as_rgba());
        }
    }
    img
}

// ============================================================================
// PATH-BASED I/O (shared by the GUI and the headless CLI)
// ============================================================================

pub fn save_project_to(grid: &Grid, path: &Path) -> Result<(), String> {
    let json = grid_to_json(grid);
    let file = File::create(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

pub fn load_project_from(path: &Path) -> Result<Grid, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    grid_from_json(&json).map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let writer = BufWriter::new(file);
    PngEncoder::new(writer)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(|e| format!("Failed to encode {}: {}", path.display(), e))
}

// ============================================================================
// DIALOG-DRIVEN I/O (GUI paths)
// ============================================================================

/// Save the project through a native dialog. `Ok(None)` means the user
/// canceled.
pub fn prompt_save_project(grid: &Grid) -> Result<Option<PathBuf>, String> {
    let Some(path) = FileDialog::new()
        .add_filter("Sprite project", &["json"])
        .set_file_name("pixel-project.json")
        .save_file()
    else {
        return Ok(None);
    };
    save_project_to(grid, &path)?;
    Ok(Some(path))
}

/// Load a project through a native dialog. `Ok(None)` means the user
/// canceled.
pub fn prompt_load_project() -> Result<Option<(Grid, PathBuf)>, String> {
    let Some(path) = FileDialog::new()
        .add_filter("Sprite project", &["json"])
        .pick_file()
    else {
        return Ok(None);
    };
    let grid = load_project_from(&path)?;
    Ok(Some((grid, path)))
}

/// Export a PNG through a native dialog. `Ok(None)` means the user canceled.
pub fn prompt_export_png(
    image: &RgbaImage,
    suggested_name: &str,
) -> Result<Option<PathBuf>, String> {
    let Some(path) = FileDialog::new()
        .add_filter("PNG image", &["png"])
        .set_file_name(suggested_name)
        .save_file()
    else {
        return Ok(None);
    };
    write_png(image, &path)?;
    Ok(Some(path))
}
