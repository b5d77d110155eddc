//! Meow CLI - captioned cat cards
//!
//! Usage:
//!   meow init                       Write a default .meow/config.toml
//!   meow serve                      Run the add-on HTTP endpoint
//!   meow homepage -t <tz> -a <app>  Render the homepage card
//!   meow contextual --text <text>   Render a contextual card
//!   meow change-cat --text <text>   Render the "Change cat" response
//!   meow card --caption <text>      Build a card directly
//!   meow truncate <message>         Truncate a caption to fit the image

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use meow_core::{
    truncate, ActionEvent, ActionResponse, CardContext, CatAddOn, ContextualEvent, HomepageEvent,
    MeowConfig, ViewContext, PARAM_IS_HOMEPAGE, PARAM_TEXT,
};
use meow_server::workspace::{self, ActionEndpoints, RenderActions};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "meow")]
#[command(author, version, about = "Captioned cat cards for the sidebar")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory containing .meow/config.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Target directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Run the add-on HTTP endpoint
    Serve {
        /// Port to serve on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Public base URL the host uses to reach this server
        #[arg(long)]
        public_url: Option<String>,
    },

    /// Render the homepage card
    Homepage {
        /// IANA timezone of the user
        #[arg(short, long, default_value = "UTC")]
        timezone: String,

        /// Host application name
        #[arg(short = 'a', long, default_value = "gmail")]
        host_app: String,

        #[arg(short, long, value_enum, default_value = "internal")]
        format: OutputFormat,
    },

    /// Render a contextual card
    Contextual {
        /// Context text, e.g. a message subject
        #[arg(long)]
        text: Option<String>,

        /// Host application name
        #[arg(short = 'a', long, default_value = "gmail")]
        host_app: String,

        #[arg(short, long, value_enum, default_value = "internal")]
        format: OutputFormat,
    },

    /// Render the response to a "Change cat" button press
    ChangeCat {
        /// Caption carried by the button
        #[arg(long)]
        text: String,

        /// Homepage flag exactly as the host sends it ("true" or "false")
        #[arg(long, default_value = "false")]
        is_homepage: String,

        #[arg(short, long, value_enum, default_value = "internal")]
        format: OutputFormat,
    },

    /// Build a card from a caption
    Card {
        /// Caption written on the cat
        #[arg(long)]
        caption: String,

        /// Build a homepage card instead of a contextual one
        #[arg(long)]
        homepage: bool,

        #[arg(short, long, value_enum, default_value = "internal")]
        format: OutputFormat,
    },

    /// Truncate a message to fit the cat image
    Truncate {
        message: String,
    },
}

/// Output representation of a rendered card
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Internal card description
    Internal,
    /// Host platform card JSON
    Workspace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = MeowConfig::load_or_default(&cli.root)
        .with_context(|| format!("Failed to load config from {:?}", cli.root))?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Init { path } => cmd_init(path),
        Commands::Serve { port, public_url } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(public_url) = public_url {
                config.server.public_url = public_url;
            }
            meow_server::run(config).await
        }
        Commands::Homepage {
            timezone,
            host_app,
            format,
        } => {
            let event = HomepageEvent { host_app, timezone };
            let card = CatAddOn::new(&config).on_homepage(&event)?;
            print_response(&ActionResponse::push(card), &config, format, false)
        }
        Commands::Contextual {
            text,
            host_app,
            format,
        } => {
            let event = ContextualEvent {
                host_app,
                context: text,
            };
            let card = CatAddOn::new(&config).on_contextual(&event)?;
            print_response(&ActionResponse::push(card), &config, format, false)
        }
        Commands::ChangeCat {
            text,
            is_homepage,
            format,
        } => {
            let mut event = ActionEvent::default();
            event.parameters.insert(PARAM_TEXT.to_string(), text);
            event.parameters.insert(PARAM_IS_HOMEPAGE.to_string(), is_homepage);

            let response = CatAddOn::new(&config).on_change_cat(&event)?;
            print_response(&response, &config, format, true)
        }
        Commands::Card {
            caption,
            homepage,
            format,
        } => {
            let context = CardContext::new(caption, ViewContext::from(homepage));
            let card = CatAddOn::new(&config)
                .builder()
                .build(&context, Utc::now())?;
            match format {
                OutputFormat::Internal => print_json(&card),
                OutputFormat::Workspace => {
                    let endpoints = ActionEndpoints::new(config.server.public_url.clone());
                    print_json(&workspace::translate(&card, &endpoints))
                }
            }
        }
        Commands::Truncate { message } => {
            println!("{}", truncate(&message));
            Ok(())
        }
    }
}

fn cmd_init(path: PathBuf) -> Result<()> {
    info!("Initializing Meow in {:?}", path);

    MeowConfig::write_default(&path).context("Failed to write default config")?;

    println!("Initialized Meow in {:?}", path);
    println!("Created:");
    println!("  .meow/config.toml");
    Ok(())
}

/// Print a response either as-is or wrapped the way the endpoint returns it
fn print_response(
    response: &ActionResponse,
    config: &MeowConfig,
    format: OutputFormat,
    is_action: bool,
) -> Result<()> {
    match format {
        OutputFormat::Internal => print_json(response),
        OutputFormat::Workspace => {
            let endpoints = ActionEndpoints::new(config.server.public_url.clone());
            let render_action = workspace::translate_response(response, &endpoints);
            if is_action {
                print_json(&RenderActions {
                    render_actions: render_action,
                })
            } else {
                print_json(&render_action)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
