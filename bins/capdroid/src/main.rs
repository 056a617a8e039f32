//! capdroid CLI
//!
//! Packages a web application into an Android APK through the Capacitor
//! bridge: scaffold once with `init`, then `sync` and `build` as the web
//! app changes.

use capdroid_cli::output::Status;
use capdroid_core::error::exit_codes;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "capdroid")]
#[command(about = "Package a web app into an Android APK through the Capacitor bridge")]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the environment and scaffold the Capacitor bridge project
    Init,
    /// Stage web assets and sync them into the native project
    Sync,
    /// Sync, build the debug APK, and copy it to the output directory
    Build,
    /// Remove build outputs and installed bridge dependencies
    Clean,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Sync => commands::sync::run(),
        Commands::Build => commands::build::run(),
        Commands::Clean => commands::clean::run(),
    };

    let exit_code = match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            Status::error(&e.to_string());
            exit_codes::FAILURE
        }
    };

    std::process::exit(exit_code);
}
