use super::{FpsLimiter, Style};
use crate::{
    Config, Driver, LifeError, PixelBuffer, RenderConfig, Renderer, Session, StepWorker,
    Surface, TickOutcome,
};
use eframe::egui::{
    CentralPanel, Color32, ColorImage, Context, Frame, Margin, TextureHandle, TextureOptions,
};
use std::time::Duration;

pub struct App {
    pub(super) session: Session,                     // Current and previous generation.
    pub(super) driver: Driver,                       // Run/stop state and step scheduling.
    pub(super) renderer: Renderer,                   // Change-only rasterizer.
    pub(super) raster: PixelBuffer,                  // CPU side of the field texture.
    pub(super) raster_dirty: bool,                   // Raster changed since the last upload.
    pub(super) texture: TextureHandle,               // Texture handle of the field.
    pub(super) config: Config,                       // Settings the viewer was started with.
    pub(super) width_input: usize,                   // Width as edited in the control panel.
    pub(super) height_input: usize,                  // Height as edited in the control panel.
    pub(super) last_step_duration: Option<Duration>, // Duration of the last generation.
    pub(super) last_toggled: Option<(usize, usize)>, // Cell toggled by the current drag.
    pub(super) status: Option<String>,               // Last error shown to the user.
    pub(super) fps_limiter: FpsLimiter,              // Limits the frame rate.
}

impl App {
    pub fn new(ctx: &Context, config: Config) -> Result<Self, LifeError> {
        let session = Session::from_config(&config)?;
        let driver = if config.offload_steps {
            Driver::with_worker(StepWorker::spawn()?)
        } else {
            Driver::new()
        };
        Ok(Self {
            session,
            driver,
            renderer: Renderer::new(RenderConfig::from(&config)),
            raster: PixelBuffer::default(),
            raster_dirty: false,
            texture: ctx.load_texture(
                "Game of Life field",
                ColorImage::default(),
                TextureOptions::NEAREST,
            ),
            width_input: config.width,
            height_input: config.height,
            config,
            last_step_duration: None,
            last_toggled: None,
            status: None,
            fps_limiter: FpsLimiter::default(),
        })
    }

    pub(super) fn start_stop(&mut self) {
        if self.driver.is_running() {
            self.driver.stop();
        } else {
            self.status = None;
            self.driver.start();
        }
    }

    pub(super) fn clear(&mut self) {
        self.session.clear();
    }

    pub(super) fn randomize(&mut self) {
        if let Err(e) = self.session.randomize(self.config.density, None) {
            self.report(e);
        }
    }

    /// Hard reset to the dimensions entered in the control panel.
    pub(super) fn apply_dimensions(&mut self) {
        let requested = (self.width_input, self.height_input);
        if requested == (self.session.width(), self.session.height()) {
            return;
        }
        if let Err(e) = self.session.resize(self.width_input, self.height_input) {
            self.report(e);
        }
        self.last_toggled = None;
    }

    /// Toggle the cell under the pointer once per drag.
    pub(super) fn paint_cell(&mut self, cell: (usize, usize)) {
        if self.last_toggled == Some(cell) {
            return;
        }
        self.last_toggled = Some(cell);
        if let Err(e) = self.session.toggle(cell.0, cell.1) {
            log::debug!("ignoring click: {e}");
        }
    }

    pub(super) fn end_stroke(&mut self) {
        self.last_toggled = None;
    }

    fn report(&mut self, e: LifeError) {
        log::warn!("{e}");
        self.status = Some(e.to_string());
    }

    fn update_field(&mut self) {
        match self
            .driver
            .tick(&mut self.session, &self.renderer, &mut self.raster)
        {
            Ok(TickOutcome::Stepped { step_duration, .. }) => {
                self.last_step_duration = Some(step_duration);
                self.raster_dirty = true;
            }
            Ok(TickOutcome::Idle | TickOutcome::Discarded) => {}
            Err(e) => self.report(e),
        }

        // edits made while stopped, or since the last step
        match self
            .driver
            .present(&mut self.session, &self.renderer, &mut self.raster)
        {
            Ok(0) => {}
            Ok(_) => self.raster_dirty = true,
            Err(e) => self.report(e),
        }

        if self.raster_dirty {
            let (w, h) = self.raster.size();
            let image = ColorImage::from_rgba_unmultiplied([w, h], self.raster.as_rgba());
            self.texture.set(image, TextureOptions::NEAREST);
            self.raster_dirty = false;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.update_field();

        // full-window panel
        CentralPanel::default()
            .frame(
                Frame::default()
                    .inner_margin(Margin::same(Style::FRAME_MARGIN))
                    .fill(Color32::LIGHT_GRAY),
            )
            .show(ctx, |ui| {
                self.draw(ui);
            });

        if self.driver.is_running() {
            ctx.request_repaint();
        }
        self.fps_limiter.sleep(self.config.max_fps);
    }
}
