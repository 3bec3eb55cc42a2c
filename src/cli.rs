// ============================================================================
// Sprited CLI — headless sprite export via command-line arguments
// ============================================================================
//
// Usage examples:
//   sprited --input sprite.json --output sprite.png --native
//   sprited -i sprite.json -o big.png --scale 8
//   sprited -i sprite.json -o flat.png --scale 8 --no-shading
//
// No window is opened in CLI mode. All processing runs synchronously on the
// current thread.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::io::{grid_to_image, load_project_from, write_png};
use crate::ops::upscale::upscale_with_shading;

/// Sprited headless sprite exporter.
///
/// Render a sprite project JSON to PNG — at native 32x32 resolution or
/// upscaled with auto-shading — without opening the GUI.
#[derive(Parser, Debug)]
#[command(name = "sprited", about = "Sprited headless sprite exporter")]
pub struct CliArgs {
    /// Sprite project file (.json) to render.
    #[arg(short, long, value_name = "PROJECT.json")]
    pub input: PathBuf,

    /// Output PNG path.
    #[arg(short, long, value_name = "FILE.png")]
    pub output: PathBuf,

    /// Integer upscale factor (ignored with --native).
    #[arg(short, long, default_value_t = 4, value_name = "N")]
    pub scale: u32,

    /// Disable the auto-shading pass (plain nearest-neighbor upscale).
    #[arg(long)]
    pub no_shading: bool,

    /// Export at native 32x32 resolution, one pixel per cell.
    #[arg(long)]
    pub native: bool,

    /// Print timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when any CLI-mode flag is present in the real process
    /// arguments. Used by `main()` to route before creating a window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--input" || a == "-i")
    }
}

/// Run the headless export and return an OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    let start = Instant::now();

    let grid = match load_project_from(&args.input) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let image = if args.native {
        grid_to_image(&grid)
    } else {
        match upscale_with_shading(&grid, args.scale, !args.no_shading) {
            Ok(upscaled) => {
                if args.verbose {
                    println!("{}", upscaled.label);
                }
                upscaled.image
            }
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    if let Err(e) = write_png(&image, &args.output) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    if args.verbose {
        println!(
            "wrote {} ({}x{}) in {:.1?}",
            args.output.display(),
            image.width(),
            image.height(),
            start.elapsed()
        );
    }
    ExitCode::SUCCESS
}
