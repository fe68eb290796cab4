use super::{App, Style};
use eframe::egui::{
    load::SizedTexture, Button, DragValue, Image, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2,
};

impl App {
    fn new_text(text: &str) -> RichText {
        RichText::new(text)
            .color(Style::TEXT_COLOR)
            .size(Style::TEXT_SIZE)
    }

    fn new_button(text: &str) -> Button {
        Button::new(Self::new_text(text))
            .fill(Style::BUTTON_FILL_COLOR)
            .stroke(Stroke::new(
                Style::BUTTON_STROKE_WIDTH,
                Style::BUTTON_STROKE_COLOR,
            ))
    }

    fn draw_run_controls(&mut self, ui: &mut Ui) {
        let (text, fill) = if self.driver.is_running() {
            ("Stop", Style::STOP_FILL_COLOR)
        } else {
            ("Start", Style::START_FILL_COLOR)
        };
        if ui.add(Self::new_button(text).fill(fill)).clicked() {
            self.start_stop();
        }

        ui.horizontal(|ui| {
            if ui.add(Self::new_button("Random")).clicked() {
                self.randomize();
            }
            if ui.add(Self::new_button("Clear")).clicked() {
                self.clear();
            }
        });
    }

    fn draw_dimension_controls(&mut self, ui: &mut Ui) {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label(Self::new_text("Width: "));
            changed |= ui
                .add(DragValue::new(&mut self.width_input).range(1..=Style::MAX_GRID_SIDE))
                .changed();
        });
        ui.horizontal(|ui| {
            ui.label(Self::new_text("Height: "));
            changed |= ui
                .add(DragValue::new(&mut self.height_input).range(1..=Style::MAX_GRID_SIDE))
                .changed();
        });
        if changed {
            self.apply_dimensions();
        }

        let cell_size = self
            .renderer
            .cell_size_for(self.session.width(), self.session.height())
            .unwrap_or_default();
        ui.label(Self::new_text(&format!("Cell size: {cell_size} px")));
    }

    fn draw_stats(&mut self, ui: &mut Ui) {
        ui.label(Self::new_text(&format!(
            "Generation: {}",
            self.session.generation()
        )));
        ui.label(Self::new_text(&format!(
            "Population: {}",
            self.session.current().population()
        )));
        ui.label(Self::new_text(if self.driver.is_offloaded() {
            "Stepping: worker thread"
        } else {
            "Stepping: UI thread"
        }));
        if let Some(duration) = self.last_step_duration {
            ui.label(Self::new_text(&format!(
                "Generation time: {:.2} ms",
                duration.as_secs_f64() * 1e3
            )));
        }
        ui.label(Self::new_text(&format!(
            "FPS: {:3}",
            self.fps_limiter.fps().round() as u32
        )));
        if let Some(status) = &self.status {
            ui.label(RichText::new(status).color(Style::ERROR_COLOR));
        }
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.set_width(Style::CONTROL_PANEL_WIDTH);
            ui.group(|ui| {
                ui.vertical(|ui| {
                    self.draw_run_controls(ui);
                    ui.separator();
                    self.draw_dimension_controls(ui);
                    ui.separator();
                    self.draw_stats(ui);
                });
            });
        });
    }

    /// Maps a pointer position over the field to a cell.
    fn cell_at(&self, rect: Rect, pos: Pos2) -> Option<(usize, usize)> {
        if !rect.contains(pos) {
            return None;
        }
        let p = (pos - rect.left_top()) / rect.size();
        let x = (p.x * self.session.width() as f32) as usize;
        let y = (p.y * self.session.height() as f32) as usize;
        (x < self.session.width() && y < self.session.height()).then_some((x, y))
    }

    fn draw_field(&mut self, ui: &mut Ui) {
        let [w, h] = self.texture.size();
        if w == 0 || h == 0 {
            return;
        }
        // shrink rasters that do not fit, never enlarge
        let raster = Vec2::new(w as f32, h as f32);
        let scale = (ui.available_size() / raster).min_elem().min(1.);
        let source = SizedTexture::new(self.texture.id(), raster * scale);
        let response = ui.add(Image::from_texture(source).sense(Sense::click_and_drag()));

        if response.is_pointer_button_down_on() {
            if let Some(cell) = response
                .interact_pointer_pos()
                .and_then(|pos| self.cell_at(response.rect, pos))
            {
                self.paint_cell(cell);
            }
        } else {
            self.end_stroke();
        }
    }

    pub fn draw(&mut self, ui: &mut Ui) {
        ui.horizontal_top(|ui| {
            self.draw_controls(ui);
            ui.add_space(Style::FRAME_MARGIN);
            self.draw_field(ui);
        });
    }
}
