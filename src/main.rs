use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lms_cli::cli::{handle_import_command, handle_menu_command};
use lms_cli::config::{LmsPaths, Settings};
use lms_cli::logging::init_logger;

#[derive(Parser)]
#[command(
    name = "lms",
    version,
    about = "Library patron roster with tolerant bulk import",
    long_about = "LMS keeps an in-memory roster of library patrons (ID, name, \
                  address, outstanding fine). Patrons can be added and removed \
                  from an interactive menu or loaded in bulk from a \
                  dash-delimited text file, where bad lines are reported and \
                  skipped."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Menu {
        /// Patron file to load before the menu starts
        #[arg(short, long)]
        load: Option<PathBuf>,
    },

    /// Load a patron file and print the sorted roster
    Import {
        /// Path to the patron file
        file: PathBuf,
        /// Print the roster as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write default settings to the config directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LmsPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_logger(cli.verbose, &settings.log_filter);

    match cli.command {
        None => handle_menu_command(&settings, None)?,
        Some(Commands::Menu { load }) => handle_menu_command(&settings, load)?,
        Some(Commands::Import { file, json }) => {
            handle_import_command(&settings, &file, json)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("LMS Configuration");
            println!("=================");
            println!("Config directory: {}", paths.base_dir().display());
            let saved = if paths.is_initialized() {
                "saved"
            } else {
                "not written, run `lms init`"
            };
            println!(
                "Settings file:    {} ({})",
                paths.settings_file().display(),
                saved
            );
            println!();
            println!("Settings:");
            println!("  List style:   {:?}", settings.list_style);
            match &settings.startup_file {
                Some(path) => println!("  Startup file: {}", path.display()),
                None => println!("  Startup file: (none)"),
            }
            println!("  Log filter:   {}", settings.log_filter);
        }
    }

    Ok(())
}
