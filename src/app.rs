use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use directories::UserDirs;
use eframe::egui::{self, RichText};
use eframe::CreationContext;
use log::{debug, warn};

use crate::geometry::{self, WindowRect};
use crate::playback::{PlaybackTimer, ScrubDebounce};
use crate::settings::{self, ViewerSettings};
use crate::slides::{collect_slides, Slideshow};

pub struct ViewerApp {
    settings: ViewerSettings,
    slideshow: Slideshow,
    timer: PlaybackTimer,
    scrub: ScrubDebounce,
    /// Slider position; may run ahead of the slideshow while dragging.
    scrub_index: usize,
    texture: Option<egui::TextureHandle>,
    shown_path: Option<PathBuf>,
    status: Option<String>,
    geometry_applied: bool,
}

impl ViewerApp {
    pub fn new(_cc: &CreationContext<'_>, settings: ViewerSettings) -> Self {
        let mut slideshow = Slideshow::new(settings.current_slide, settings.slide_direction);
        let mut status = None;
        if let Some(folder) = settings.last_folder.as_deref() {
            let folder = Path::new(folder);
            if folder.is_dir() {
                match collect_slides(folder) {
                    Ok(slides) => {
                        debug!("restored {} slides from {}", slides.len(), folder.display());
                        slideshow.set_slides(slides);
                    }
                    Err(err) => {
                        warn!("failed to list {}: {err:#}", folder.display());
                        status = Some(err.to_string());
                    }
                }
            }
        }
        let timer = PlaybackTimer::new(Duration::from_millis(settings.slide_delay_ms));
        let scrub_index = slideshow.current();
        Self {
            settings,
            slideshow,
            timer,
            scrub: ScrubDebounce::new(),
            scrub_index,
            texture: None,
            shown_path: None,
            status,
            geometry_applied: false,
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("info").show(ctx, |ui| {
            ui.heading(RichText::new("Image Slideshow").strong());
            match self.settings.last_folder.as_deref() {
                Some(folder) => ui.label(format!("Current Directory: {folder}")),
                None => ui.label("No directory selected"),
            };
            if let Some(path) = self.slideshow.current_path() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.label(format!("Current Image: {name}"));
                ui.label(format!(
                    "Slide: {}/{}",
                    self.slideshow.current() + 1,
                    self.slideshow.len()
                ));
            } else {
                ui.label("No images loaded");
            }
            ui.label(format!("Direction: {}", self.slideshow.direction().label()));
        });

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            let has_slides = !self.slideshow.is_empty();

            ui.horizontal(|ui| {
                if ui.button("Select Folder").clicked() {
                    self.select_folder();
                }
                if ui
                    .add_enabled(has_slides, egui::Button::new("Previous"))
                    .clicked()
                {
                    self.slideshow.previous();
                    self.scrub_index = self.slideshow.current();
                    self.persist();
                }
                if ui
                    .add_enabled(has_slides, egui::Button::new("Next"))
                    .clicked()
                {
                    self.slideshow.next();
                    self.scrub_index = self.slideshow.current();
                    self.persist();
                }
                if self.timer.is_running() {
                    if ui.button("Stop Slideshow").clicked() {
                        self.timer.stop();
                    }
                } else if ui
                    .add_enabled(has_slides, egui::Button::new("Start Slideshow"))
                    .clicked()
                {
                    self.timer.start(Instant::now());
                }

                let mut delay_secs = (self.settings.slide_delay_ms / 1000).clamp(1, 5);
                let previous_secs = delay_secs;
                egui::ComboBox::from_id_source("delay_combo")
                    .selected_text(delay_label(delay_secs))
                    .show_ui(ui, |ui| {
                        for secs in 1..=5u64 {
                            ui.selectable_value(&mut delay_secs, secs, delay_label(secs));
                        }
                    });
                if delay_secs != previous_secs {
                    self.settings.slide_delay_ms = delay_secs * 1000;
                    // Restarts the period while running; the slide index is untouched.
                    self.timer.set_delay(
                        Duration::from_millis(self.settings.slide_delay_ms),
                        Instant::now(),
                    );
                    self.persist();
                }
            });

            let max_index = self.slideshow.len().saturating_sub(1);
            let response = ui.add_enabled(
                self.slideshow.len() > 1,
                egui::Slider::new(&mut self.scrub_index, 0..=max_index).show_value(false),
            );
            if response.changed() {
                self.scrub.touch(Instant::now());
            }
            if response.drag_stopped() && self.scrub.fire_now() {
                self.apply_scrub();
            }

            if let Some(status) = &self.status {
                ui.label(format!("Status: {status}"));
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                let avail = ui.available_rect_before_wrap();
                let size = texture.size_vec2();
                if size.x > 0.0 && size.y > 0.0 && avail.width() > 0.0 && avail.height() > 0.0 {
                    let scale = (avail.width() / size.x).min(avail.height() / size.y);
                    let rect = egui::Rect::from_center_size(avail.center(), size * scale);
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No images loaded").weak());
                });
            }
        });
    }

    /// Poll the cooperative timers and schedule the next wakeup.
    fn handle_timers(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.timer.tick(now) {
            self.slideshow.advance();
            self.scrub_index = self.slideshow.current();
            self.persist();
        }
        if self.scrub.expired(now) {
            self.apply_scrub();
        }

        let mut wakeup = self.timer.time_until_tick(now);
        if let Some(pending) = self.scrub.time_until_fire(now) {
            wakeup = Some(wakeup.map_or(pending, |w| w.min(pending)));
        }
        if let Some(wakeup) = wakeup {
            ctx.request_repaint_after(wakeup);
        }
    }

    /// Jump to the debounced slider position.
    fn apply_scrub(&mut self) {
        if self.scrub_index != self.slideshow.current() {
            self.slideshow.jump(self.scrub_index);
            self.persist();
        }
    }

    fn select_folder(&mut self) {
        let start_dir = self
            .settings
            .last_folder
            .as_deref()
            .and_then(|f| Path::new(f).parent().map(Path::to_path_buf))
            .or_else(|| UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf()));
        let mut dialog = rfd::FileDialog::new();
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(folder) = dialog.pick_folder() {
            self.load_folder(&folder);
        }
    }

    fn load_folder(&mut self, folder: &Path) {
        match collect_slides(folder) {
            Ok(slides) => {
                debug!("loaded {} slides from {}", slides.len(), folder.display());
                self.slideshow.set_slides(slides);
                self.scrub_index = self.slideshow.current();
                self.settings.last_folder = Some(folder.to_string_lossy().into_owned());
                self.status = None;
                self.persist();
            }
            Err(err) => {
                warn!("failed to list {}: {err:#}", folder.display());
                self.status = Some(err.to_string());
            }
        }
    }

    /// Fit the saved geometry to the active monitor once its size is known.
    fn apply_saved_geometry(&mut self, ctx: &egui::Context) {
        let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else {
            return;
        };
        let rect = match self.settings.window_geometry {
            Some(saved) => geometry::reconcile(saved, monitor.x, monitor.y),
            None => geometry::default_rect(monitor.x, monitor.y),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
            rect.x, rect.y,
        )));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
            rect.width,
            rect.height,
        )));
        self.settings.window_geometry = Some(rect);
        self.geometry_applied = true;
    }

    /// Persist window moves and resizes as they happen.
    fn track_geometry(&mut self, ctx: &egui::Context) {
        let Some(outer) = ctx.input(|i| i.viewport().outer_rect) else {
            return;
        };
        let rect = WindowRect {
            x: outer.min.x,
            y: outer.min.y,
            width: outer.width(),
            height: outer.height(),
        };
        let changed = match self.settings.window_geometry {
            Some(prev) => !roughly_equal(prev, rect),
            None => true,
        };
        if changed {
            self.settings.window_geometry = Some(rect);
            self.persist();
        }
    }

    /// Reload the displayed texture when the current slide changes.
    fn update_texture(&mut self, ctx: &egui::Context) {
        let desired = self.slideshow.current_path().map(Path::to_path_buf);
        if desired == self.shown_path {
            return;
        }
        match &desired {
            Some(path) => match load_texture(ctx, path) {
                Ok(texture) => self.texture = Some(texture),
                Err(err) => {
                    warn!("failed to load {}: {err:#}", path.display());
                    self.texture = None;
                    self.status = Some(err.to_string());
                }
            },
            None => self.texture = None,
        }
        self.shown_path = desired;
    }

    fn persist(&mut self) {
        self.settings.current_slide = self.slideshow.current();
        self.settings.slide_direction = self.slideshow.direction();
        if let Err(err) = settings::save(&self.settings) {
            warn!("failed to save settings: {err:#}");
            self.status = Some(err.to_string());
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.geometry_applied {
            self.track_geometry(ctx);
        } else {
            self.apply_saved_geometry(ctx);
        }
        self.handle_timers(ctx);
        self.update_texture(ctx);
        self.ui(ctx);
    }
}

/// Decode an image and upload it as an egui texture.
fn load_texture(ctx: &egui::Context, path: &Path) -> Result<egui::TextureHandle> {
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(ctx.load_texture(
        path.to_string_lossy(),
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}

fn delay_label(secs: u64) -> String {
    if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}

/// Window managers report fractional point offsets; ignore sub-point jitter.
fn roughly_equal(a: WindowRect, b: WindowRect) -> bool {
    (a.x - b.x).abs() < 0.5
        && (a.y - b.y).abs() < 0.5
        && (a.width - b.width).abs() < 0.5
        && (a.height - b.height).abs() < 0.5
}
