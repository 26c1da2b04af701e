//! floating-contacts - floating contact button widget
//!
//! Command-line front end: renders the widget from stored settings, runs the
//! admin save flow, and exposes the color helper.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info, warn};

use floating_contacts_core::color::HOVER_LIGHTEN_PERCENT;
use floating_contacts_core::{
    Config, JsonFileStore, RenderOptions, SettingsStore, adjust_brightness, logging, normalize,
    render_widget,
};

/// floating-contacts - floating contact button widget
#[derive(Parser, Debug)]
#[command(name = "floating-contacts", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print example configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate configuration and exit (returns non-zero on errors)
    #[arg(long)]
    check_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the widget from stored settings
    Render {
        /// Settings file (overrides store.settings_path)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Print the widget description as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },
    /// Print stored settings after normalization
    Normalize {
        /// Settings file (overrides store.settings_path)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
    /// Print the hover color for a background color
    Hover {
        /// Hex color, e.g. #1e88e5
        color: String,

        /// Brightness change in percent (negative darkens)
        #[arg(short, long, default_value_t = HOVER_LIGHTEN_PERCENT, allow_hyphen_values = true)]
        percent: i32,
    },
    /// Normalize submitted settings and persist them
    Save {
        /// JSON file with the submitted settings
        #[arg(long)]
        from: PathBuf,

        /// Settings file (overrides store.settings_path)
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    logging::init(args.verbose);

    // --print-example-config needs no user config at all
    if args.print_example_config {
        print!("{}", floating_contacts_core::config::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }

    // If --config is specified, it must exist and be valid (no fallback)
    let load_result = match Config::find_and_load(args.config.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        warn!("Using default configuration (no config file found)");
    }

    let config = load_result.config;

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    debug!("Configuration validated successfully");

    if args.check_config {
        if let Some(ref source) = load_result.source {
            println!("Configuration valid: {}", source.display());
        } else {
            println!("Configuration valid (using defaults)");
        }
        debug!("\n{}", config.summary());
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command else {
        println!("{}", config.summary());
        return ExitCode::SUCCESS;
    };

    match handle_command(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn handle_command(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Render { settings, json } => {
            handle_render(&open_store(config, settings.as_deref()), config, json)
        }
        Command::Normalize { settings } => {
            handle_normalize(&open_store(config, settings.as_deref()))
        }
        Command::Hover { color, percent } => {
            println!("{}", adjust_brightness(&color, percent));
            Ok(())
        }
        Command::Save { from, settings } => {
            let mut store = open_store(config, settings.as_deref());
            handle_save(&mut store, &from)
        }
    }
}

fn open_store(config: &Config, override_path: Option<&Path>) -> JsonFileStore {
    let path = override_path.unwrap_or(&config.store.settings_path);
    debug!("Using settings file {:?}", path);
    JsonFileStore::new(path)
}

fn handle_render(store: &JsonFileStore, config: &Config, json: bool) -> anyhow::Result<()> {
    let raw = store
        .get()
        .with_context(|| format!("failed to read settings from {:?}", store.path()))?;

    let options = RenderOptions::from_config(config);
    let Some(widget) = render_widget(&raw, &options) else {
        info!("No contact method configured, nothing to render");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&widget)?);
    } else {
        println!("{}", widget.to_html(&options));
    }
    Ok(())
}

fn handle_normalize(store: &JsonFileStore) -> anyhow::Result<()> {
    let raw = store
        .get()
        .with_context(|| format!("failed to read settings from {:?}", store.path()))?;

    println!("{}", serde_json::to_string_pretty(&normalize(&raw))?);
    Ok(())
}

fn handle_save(store: &mut JsonFileStore, from: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(from)
        .with_context(|| format!("failed to read submitted settings from {:?}", from))?;
    let submitted: Value = serde_json::from_str(&content)
        .with_context(|| format!("submitted settings in {:?} are not valid JSON", from))?;

    let settings = normalize(&submitted);
    store
        .save(&settings)
        .with_context(|| format!("failed to save settings to {:?}", store.path()))?;

    println!("Settings saved: {}", store.path().display());
    Ok(())
}
