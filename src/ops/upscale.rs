use image::RgbaImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::canvas::{GRID_SIZE, Grid};
use crate::color::PixelColor;

// ============================================================================
// UPSCALER — nearest-neighbor magnification with directional auto-shading
// ============================================================================

/// Hard cap on the output edge length. Mirrors the largest canvas most
/// renderers will accept; violating it fails before any allocation.
pub const MAX_OUTPUT_DIM: u32 = 16384;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpscaleError {
    #[error(
        "scale factor too large: {scale}x would create {dim}x{dim} pixels \
         (maximum canvas size is 16384)"
    )]
    SizeLimitExceeded { scale: u32, dim: u32 },
    #[error("scale factor must be at least 1")]
    ZeroScale,
}

/// Result of an upscale: the resolved RGBA buffer plus a human-readable
/// dimension label for the preview panel.
#[derive(Debug)]
pub struct Upscaled {
    pub image: RgbaImage,
    pub label: String,
}

/// Magnify the grid by an integer factor, optionally synthesizing
/// inter-pixel shading.
///
/// Pass 1 expands every non-empty source cell into an opaque `scale × scale`
/// block; empty cells leave their block fully transparent. Pass 2 (when
/// `enable_shading`) recomputes each output pixel by blending the source
/// cell's color toward each differing axis-neighbor, weighted by the pixel's
/// sub-position within its block. The blend order left→right→top→bottom is
/// intentional and non-commutative; swapping it changes output pixels.
pub fn upscale_with_shading(
    grid: &Grid,
    scale: u32,
    enable_shading: bool,
) -> Result<Upscaled, UpscaleError> {
    let dim = output_dim(scale)?;

    let stride = dim as usize * 4;
    let mut data = vec![0u8; stride * dim as usize];

    // Pass 1: nearest-neighbor block expansion.
    for (x, y, cell) in grid.iter_cells() {
        let Some(color) = cell else { continue };
        for sy in 0..scale {
            let row = (y * scale + sy) as usize * stride;
            for sx in 0..scale {
                let off = row + (x * scale + sx) as usize * 4;
                data[off] = color.r;
                data[off + 1] = color.g;
                data[off + 2] = color.b;
                data[off + 3] = 255;
            }
        }
    }

    // Pass 2: directional shading. Every output pixel depends only on the
    // source grid, so rows are independent and safe to shade in parallel.
    if enable_shading {
        data.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(py, row)| {
                shade_row(grid, scale, py as u32, row);
            });
    }

    let image = RgbaImage::from_raw(dim, dim, data)
        .expect("buffer length matches dimensions by construction");
    let label = format!("Upscaled {}x{}", dim, dim);
    Ok(Upscaled { image, label })
}

/// Validate the scale factor and compute the output edge length. The
/// multiply is checked: arbitrary scales arrive from the CLI, and a wrapping
/// product could slip under the cap.
fn output_dim(scale: u32) -> Result<u32, UpscaleError> {
    if scale == 0 {
        return Err(UpscaleError::ZeroScale);
    }
    match GRID_SIZE.checked_mul(scale) {
        Some(dim) if dim <= MAX_OUTPUT_DIM => Ok(dim),
        // Saturate for the error message; the exact product may not fit.
        _ => Err(UpscaleError::SizeLimitExceeded {
            scale,
            dim: GRID_SIZE.saturating_mul(scale),
        }),
    }
}

/// Shade one output row in place. Alpha is never touched: shading only
/// re-mixes the RGB of pixels whose source cell is painted.
fn shade_row(grid: &Grid, scale: u32, py: u32, row: &mut [u8]) {
    let src_y = (py / scale) as i32;
    let sub_y = py % scale;
    let scale_f = scale as f32;

    for px in 0..GRID_SIZE * scale {
        let src_x = (px / scale) as i32;
        let sub_x = px % scale;

        let Some(current) = grid.pixel_at(src_x, src_y) else {
            continue;
        };

        let mut r = current.r as f32;
        let mut g = current.g as f32;
        let mut b = current.b as f32;

        // Sub-position fraction toward the edge facing each neighbor,
        // halved so influence tops out at 50% right at the block border.
        let left_w = (scale_f - sub_x as f32) / scale_f * 0.5;
        let right_w = (sub_x as f32 + 1.0) / scale_f * 0.5;
        let top_w = (scale_f - sub_y as f32) / scale_f * 0.5;
        let bottom_w = (sub_y as f32 + 1.0) / scale_f * 0.5;

        // Order matters: each blend operates on the running value.
        blend_toward(&mut r, &mut g, &mut b, current, grid.pixel_at(src_x - 1, src_y), left_w);
        blend_toward(&mut r, &mut g, &mut b, current, grid.pixel_at(src_x + 1, src_y), right_w);
        blend_toward(&mut r, &mut g, &mut b, current, grid.pixel_at(src_x, src_y - 1), top_w);
        blend_toward(&mut r, &mut g, &mut b, current, grid.pixel_at(src_x, src_y + 1), bottom_w);

        let blended = PixelColor::from_f32_channels(r, g, b);
        let off = px as usize * 4;
        row[off] = blended.r;
        row[off + 1] = blended.g;
        row[off + 2] = blended.b;
    }
}

/// Mix the running channels toward `neighbor` when it exists and differs
/// from the source cell's color.
#[inline]
fn blend_toward(
    r: &mut f32,
    g: &mut f32,
    b: &mut f32,
    current: PixelColor,
    neighbor: Option<PixelColor>,
    weight: f32,
) {
    let Some(n) = neighbor else { return };
    if n == current {
        return;
    }
    *r = *r * (1.0 - weight) + n.r as f32 * weight;
    *g = *g * (1.0 - weight) + n.g as f32 * weight;
    *b = *b * (1.0 - weight) + n.b as f32 * weight;
}
