// LogViewer - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Backend and controller construction
// 4. Headless list/search runs, or the eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can keep using
// `crate::app::...`, `crate::ui::...` etc.
pub use log_viewer::app;
pub use log_viewer::core;
pub use log_viewer::platform;
pub use log_viewer::ui;
pub use log_viewer::util;

use app::controller::QueryController;
use clap::Parser;
use platform::backend::{HttpBackend, LogBackend};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Log Viewer - browse and search log files on a remote log server.
///
/// Without --list or --print the GUI opens, pre-filled with any search
/// options given here.
#[derive(Parser, Debug)]
#[command(name = "log-viewer", version, about)]
struct Cli {
    /// Log server base URL (overrides [backend] base_url).
    #[arg(short = 'u', long = "base-url")]
    base_url: Option<String>,

    /// Log source/version tag to search (e.g. v1).
    #[arg(short = 's', long = "source")]
    source: Option<String>,

    /// File to search.
    #[arg(short = 'f', long = "filename")]
    filename: Option<String>,

    /// Only return lines containing this text.
    #[arg(short = 'k', long = "keyword")]
    keyword: Option<String>,

    /// Return only the latest N matching lines (0 = all).
    #[arg(short = 'n', long = "count")]
    count: Option<u32>,

    /// Use this config file instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the available files and exit.
    #[arg(long = "list", conflicts_with = "print")]
    list: bool,

    /// Run the search, print the matching lines and exit.
    #[arg(long = "print")]
    print: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config first: its [logging] level feeds the subscriber.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let (mut config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Log Viewer starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(ref url) = cli.base_url {
        config.base_url = url.clone();
    }

    let backend = match HttpBackend::new(&config.backend_settings()) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "Cannot configure backend");
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    let base_url = backend.base_url().to_string();
    let backend: Arc<dyn LogBackend> = Arc::new(backend);

    let mut controller =
        QueryController::with_defaults(backend, config.default_source.clone(), config.default_count);

    if let Some(ref tag) = cli.source {
        if let Err(e) = controller.select_source_str(tag) {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
        // The CLI choice is not a click; don't steal focus on the first frame.
        controller.take_focus_request();
    }
    if cli.filename.is_some() {
        controller.set_filename(cli.filename.clone());
    }
    if let Some(ref keyword) = cli.keyword {
        controller.set_keyword(keyword.clone());
    }
    if let Some(count) = cli.count {
        controller.set_count(count);
    }

    if cli.list || cli.print {
        // Allow the transport timeout to fire first so it is reported as such.
        let wait = Duration::from_secs(config.timeout_secs + 5);
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let result = if cli.list {
            app::headless::run_list(&mut controller, &mut stdout.lock(), &mut stderr.lock(), wait)
        } else {
            app::headless::run_search(&mut controller, &mut stdout.lock(), &mut stderr.lock(), wait)
        };
        match result {
            Ok(true) => return,
            Ok(false) => std::process::exit(1),
            Err(e) => {
                tracing::error!(error = %e, "Cannot write output");
                std::process::exit(1);
            }
        }
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 420.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::LogViewerApp::new(
                controller, dark_mode, base_url,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Log Viewer GUI: {e}");
        std::process::exit(1);
    }
}
