mod app;
mod geometry;
mod playback;
mod settings;
mod slides;

use eframe::egui;
use log::{debug, error};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            error!("failed to load settings: {err:#}");
            return Err(err);
        }
    };
    debug!("loaded settings: {settings:?}");

    // Seed the window from the saved geometry; it is reconciled against the
    // actual monitor on the first frame.
    let mut viewport = egui::ViewportBuilder::default().with_min_inner_size([400.0, 300.0]);
    viewport = match settings.window_geometry {
        Some(rect) => viewport
            .with_position(egui::pos2(rect.x, rect.y))
            .with_inner_size([rect.width, rect.height]),
        None => viewport.with_inner_size([1024.0, 768.0]),
    };
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Image Slideshow",
        native_options,
        Box::new(move |cc| Box::new(app::ViewerApp::new(cc, settings))),
    )?;
    Ok(())
}
