use deal_analyzer::config::AppConfig;
use deal_analyzer::ui::{self, DealAnalyzerApp};
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = AppConfig::default_path();
    let config = AppConfig::load_or_default(&config_path);
    tracing::info!(config = %config_path.display(), "starting deal analyzer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Real Estate Deal Analyzer",
        options,
        Box::new(move |cc| {
            ui::set_custom_style(&cc.egui_ctx);
            Ok(Box::new(DealAnalyzerApp::new(&config)))
        }),
    )
}
