use eframe::NativeOptions;
use egui::ViewportBuilder;
use tracing::{error, info};

use moonphase::app::MoonPhaseApp;
use moonphase::config::Config;
use moonphase::location::ConfiguredLocation;
use moonphase::logging;

fn main() -> Result<(), eframe::Error> {
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!(offline = config.offline, located = config.location.is_some(), "starting");

    let side = config.canvas_size;
    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([side + 220.0, side + 520.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Moon Phase",
        options,
        Box::new(move |_cc| {
            let provider = ConfiguredLocation::new(config.location);
            Box::new(MoonPhaseApp::new(config, &provider))
        }),
    )
}
