//! Crime Dashboard - Monthly crime statistics loader & interactive trend viewer

use anyhow::Context;
use crime_dashboard::gui::DashboardApp;
use crime_dashboard::Arguments;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Use RUST_LOG to set the logging level, e.g. `RUST_LOG=debug`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Arguments::build();
    let options = args
        .load_options()
        .context("invalid command-line arguments")?;
    tracing::debug!("main()\nargs: {args:#?}\noptions: {options:?}");

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Crime Dashboard RJ"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Crime Dashboard RJ",
        native_options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, args.path, options)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the dashboard window: {err}"))
}
