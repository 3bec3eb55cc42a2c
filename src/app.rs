use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use image::RgbaImage;

use crate::canvas::GRID_SIZE;
use crate::color::PixelColor;
use crate::editor::{EditorState, PaintButton, Tool};
use crate::ops::upscale::upscale_with_shading;
use crate::palette::RetroPalette;
use crate::{io, log_err, log_info};

/// Side length of the on-screen editing canvas.
const DISPLAY_SIZE: f32 = 512.0;
/// Largest edge the upscale preview is displayed at (the buffer itself can
/// be much bigger; display is just scaled down).
const MAX_PREVIEW_EDGE: f32 = 512.0;
/// Unpainted cells render as near-black so the sprite reads against them.
const EMPTY_CELL_COLOR: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

// ============================================================================
// APP SHELL — egui glue around the editor core
// ============================================================================

pub struct SpritedApp {
    state: EditorState,
    active_palette: Option<RetroPalette>,

    // Upscale panel
    upscale_scale: u32,
    enable_shading: bool,
    upscale_texture: Option<egui::TextureHandle>,
    upscale_label: String,
    last_upscaled: Option<RgbaImage>,

    /// Status line: last completed action or recoverable error.
    status: String,
    /// Pointer state from the previous frame, for stroke start/end detection.
    pointer_was_down: bool,
}

impl SpritedApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: EditorState::new(),
            active_palette: None,
            upscale_scale: 4,
            enable_shading: true,
            upscale_texture: None,
            upscale_label: String::new(),
            last_upscaled: None,
            status: String::new(),
            pointer_was_down: false,
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status = msg.into();
    }

    fn report_error(&mut self, msg: String) {
        log_err!("{}", msg);
        self.status = msg;
    }
}

impl eframe::App for SpritedApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.state.project.display_title());
                ui.separator();
                ui.label(&self.status);
            });
        });

        egui::SidePanel::right("side_panel")
            .min_width(260.0)
            .show(ctx, |ui| {
                self.tool_panel(ui);
                ui.separator();
                self.color_panel(ui);
                ui.separator();
                self.palette_panel(ui);
                ui.separator();
                self.upscale_panel(ui, ctx);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui);
        });
    }
}

// ============================================================================
// Input & menus
// ============================================================================

impl SpritedApp {
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let undo = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z));
        let redo = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Y));
        if undo && self.state.undo() {
            self.set_status("Undo");
        }
        if redo && self.state.redo() {
            self.set_status("Redo");
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save Project…").clicked() {
                    ui.close_menu();
                    self.save_project();
                }
                if ui.button("Load Project…").clicked() {
                    ui.close_menu();
                    self.load_project();
                }
                ui.separator();
                if ui.button("Export PNG (32x32)…").clicked() {
                    ui.close_menu();
                    self.export_native_png();
                }
            });
            ui.menu_button("Edit", |ui| {
                let can_undo = self.state.project.history.can_undo();
                let can_redo = self.state.project.history.can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    ui.close_menu();
                    self.state.undo();
                    self.set_status("Undo");
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    ui.close_menu();
                    self.state.redo();
                    self.set_status("Redo");
                }
            });
            ui.separator();
            ui.checkbox(&mut self.state.show_grid, "Grid");
        });
    }

    fn save_project(&mut self) {
        match io::prompt_save_project(self.state.grid()) {
            Ok(Some(path)) => {
                self.state.project.path = Some(path.clone());
                self.state.project.mark_clean();
                log_info!("Saved project to {}", path.display());
                self.set_status(format!("Saved {}", path.display()));
            }
            Ok(None) => {}
            Err(e) => self.report_error(e),
        }
    }

    fn load_project(&mut self) {
        match io::prompt_load_project() {
            Ok(Some((grid, path))) => {
                self.state.project.replace_with_loaded(grid, path.clone());
                log_info!("Loaded project from {}", path.display());
                self.set_status(format!("Loaded {}", path.display()));
            }
            Ok(None) => {}
            Err(e) => self.report_error(e),
        }
    }

    fn export_native_png(&mut self) {
        let image = io::grid_to_image(self.state.grid());
        match io::prompt_export_png(&image, "sprite.png") {
            Ok(Some(path)) => self.set_status(format!("Exported {}", path.display())),
            Ok(None) => {}
            Err(e) => self.report_error(e),
        }
    }
}

// ============================================================================
// Side panels
// ============================================================================

impl SpritedApp {
    fn tool_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        ui.horizontal_wrapped(|ui| {
            for &tool in Tool::all() {
                ui.selectable_value(&mut self.state.tool, tool, tool.name());
            }
        });
    }

    fn color_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Colors");
        ui.horizontal(|ui| {
            let mut rgb = [
                self.state.primary_color.r,
                self.state.primary_color.g,
                self.state.primary_color.b,
            ];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                self.state.primary_color = PixelColor::new(rgb[0], rgb[1], rgb[2]);
            }
            ui.label("Primary (left button)");
        });
        ui.horizontal(|ui| {
            let mut rgb = [
                self.state.secondary_color.r,
                self.state.secondary_color.g,
                self.state.secondary_color.b,
            ];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                self.state.secondary_color = PixelColor::new(rgb[0], rgb[1], rgb[2]);
            }
            ui.label("Secondary (right button)");
        });
    }

    fn palette_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Retro Palette");
        egui::ComboBox::from_id_source("palette_select")
            .selected_text(
                self.active_palette
                    .map(|p| p.name())
                    .unwrap_or("None"),
            )
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.active_palette, None, "None");
                for &palette in RetroPalette::all() {
                    ui.selectable_value(&mut self.active_palette, Some(palette), palette.name());
                }
            });

        if let Some(palette) = self.active_palette {
            ui.horizontal_wrapped(|ui| {
                for color in palette.colors() {
                    let swatch = egui::Button::new("")
                        .fill(color.as_color32())
                        .min_size(Vec2::splat(20.0));
                    let response = ui.add(swatch).on_hover_text(color.to_hex());
                    if response.clicked() {
                        self.state.primary_color = color;
                    }
                    if response.secondary_clicked() {
                        self.state.secondary_color = color;
                    }
                }
            });
        }
    }

    fn upscale_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Upscale");
        ui.horizontal(|ui| {
            ui.label("Scale");
            ui.add(egui::DragValue::new(&mut self.upscale_scale).clamp_range(1..=600));
            ui.checkbox(&mut self.enable_shading, "Auto-shading");
        });

        if ui.button("Upscale").clicked() {
            self.run_upscale(ctx);
        }

        if let Some(texture) = &self.upscale_texture {
            ui.label(&self.upscale_label);
            let actual = texture.size_vec2();
            let display = if actual.max_elem() > MAX_PREVIEW_EDGE {
                actual * (MAX_PREVIEW_EDGE / actual.max_elem())
            } else {
                actual
            };
            let sized = egui::load::SizedTexture::from_handle(texture);
            ui.add(egui::Image::from_texture(sized).fit_to_exact_size(display));

            if ui.button("Export Upscaled PNG…").clicked() {
                self.export_upscaled_png();
            }
        }
    }

    fn run_upscale(&mut self, ctx: &egui::Context) {
        match upscale_with_shading(self.state.grid(), self.upscale_scale, self.enable_shading) {
            Ok(upscaled) => {
                let size = [
                    upscaled.image.width() as usize,
                    upscaled.image.height() as usize,
                ];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, upscaled.image.as_raw());
                self.upscale_texture = Some(ctx.load_texture(
                    "upscale_preview",
                    color_image,
                    egui::TextureOptions::NEAREST,
                ));
                self.set_status(upscaled.label.clone());
                self.upscale_label = upscaled.label.clone();
                self.last_upscaled = Some(upscaled.image);
            }
            // Size cap and friends are recoverable: report, keep the
            // previous preview and the grid untouched.
            Err(e) => self.report_error(format!("Upscaling failed: {}", e)),
        }
    }

    fn export_upscaled_png(&mut self) {
        let Some(image) = self.last_upscaled.clone() else {
            return;
        };
        match io::prompt_export_png(&image, "sprite-upscaled.png") {
            Ok(Some(path)) => self.set_status(format!("Exported {}", path.display())),
            Ok(None) => {}
            Err(e) => self.report_error(e),
        }
    }
}

// ============================================================================
// Canvas
// ============================================================================

impl SpritedApp {
    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(Vec2::splat(DISPLAY_SIZE), egui::Sense::click_and_drag());
        let rect = response.rect;
        let cell = rect.width() / GRID_SIZE as f32;

        // Cells
        for (x, y, color) in self.state.grid().iter_cells() {
            let fill = color.map(PixelColor::as_color32).unwrap_or(EMPTY_CELL_COLOR);
            let min = Pos2::new(rect.min.x + x as f32 * cell, rect.min.y + y as f32 * cell);
            painter.rect_filled(Rect::from_min_size(min, Vec2::splat(cell)), 0.0, fill);
        }

        // Grid overlay
        if self.state.show_grid {
            let stroke = Stroke::new(1.0, Color32::from_white_alpha(26));
            for i in 0..=GRID_SIZE {
                let o = i as f32 * cell;
                painter.line_segment(
                    [
                        Pos2::new(rect.min.x + o, rect.min.y),
                        Pos2::new(rect.min.x + o, rect.max.y),
                    ],
                    stroke,
                );
                painter.line_segment(
                    [
                        Pos2::new(rect.min.x, rect.min.y + o),
                        Pos2::new(rect.max.x, rect.min.y + o),
                    ],
                    stroke,
                );
            }
        }

        self.handle_canvas_pointer(ui, &response, rect, cell);
    }

    fn handle_canvas_pointer(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        rect: Rect,
        cell: f32,
    ) {
        let (primary_down, secondary_down) = ui.input(|i| {
            (i.pointer.primary_down(), i.pointer.secondary_down())
        });
        let any_down = primary_down || secondary_down;

        if any_down {
            if let Some(pos) = response.interact_pointer_pos() {
                let gx = ((pos.x - rect.min.x) / cell).floor() as i32;
                let gy = ((pos.y - rect.min.y) / cell).floor() as i32;
                if crate::canvas::Grid::is_in_bounds(gx, gy) {
                    let button = if secondary_down {
                        PaintButton::Secondary
                    } else {
                        PaintButton::Primary
                    };
                    if !self.pointer_was_down {
                        self.state.begin_stroke(gx as u32, gy as u32, button);
                    } else {
                        self.state.continue_stroke(gx as u32, gy as u32, button);
                    }
                    self.pointer_was_down = true;
                }
            }
        } else if self.pointer_was_down {
            self.state.end_stroke();
            self.pointer_was_down = false;
        }
    }
}
