mod assets;
mod settings_dialog;
mod shortcut;
mod state;
mod viewer;
mod viewer_app;

use capture_viewer_core::{CaptureSession, ViewerConfig};
use tracing::{info, warn};

use viewer::Viewer;

fn main() -> eframe::Result<()> {
    // ── Logging ───────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    info!("Capture Viewer v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewerConfig::default();

    // ── Window options ────────────────────────────────────────────────────
    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Capture Viewer")
        .with_inner_size([800.0, 600.0])
        .with_min_inner_size([320.0, 240.0])
        .with_resizable(true);

    let icon_path = assets::resource_path(assets::WINDOW_ICON, config.resource_dir.as_deref());
    match assets::load_icon(&icon_path) {
        Ok(icon) => viewport = viewport.with_icon(icon),
        Err(e) => warn!("Window icon unavailable: {e:#}"),
    }

    let window_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Capture Viewer",
        window_options,
        Box::new(move |cc| {
            // Camera I/O stays on the UI thread; the display tick pulls frames.
            let session = CaptureSession::native(config.format_request());
            let viewer  = Viewer::new(&config, session);
            Ok(Box::new(viewer_app::ViewerApp::new(cc, config, viewer)))
        }),
    )
}
