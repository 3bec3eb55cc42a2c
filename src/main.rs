use std::process::ExitCode;

use eframe::egui;

use sprited::app::SpritedApp;
use sprited::{cli, logger};

fn main() -> ExitCode {
    // -- CLI / headless mode --------------------------------------------
    if cli::CliArgs::is_cli_mode() {
        use clap::Parser;
        let args = cli::CliArgs::parse();
        return cli::run(args);
    }

    // -- GUI mode -------------------------------------------------------

    // Initialize the session log (overwrites the previous session's log).
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("Sprited"),
        ..Default::default()
    };

    match eframe::run_native(
        "Sprited",
        options,
        Box::new(|cc| Box::new(SpritedApp::new(cc))),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to start window: {}", e);
            ExitCode::FAILURE
        }
    }
}
