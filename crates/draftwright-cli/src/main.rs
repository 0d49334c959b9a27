//! Draftwright CLI
//!
//! Turns rough notes into a finished email from the terminal, and pastes
//! it into the configured compose file or copies it to the clipboard.

mod presenter;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use draftwright_core::clipboard::SystemClipboard;
use draftwright_core::config::Config;
use draftwright_core::generation::{build_prompt, GenerationClient};
use draftwright_core::host::{create_host, HostBridge};
use draftwright_core::models::{Draft, Tone};
use draftwright_core::workflow::{InsertOutcome, WorkflowController, WorkflowState};

use presenter::TerminalPresenter;

#[derive(Parser)]
#[command(name = "draftwright")]
#[command(about = "Draftwright - turn rough notes into a polished email")]
#[command(long_about = "Draftwright sends your rough notes, a tone, and optionally the email you are \
replying to, to a text-generation service and gives back a ready-to-send email.

QUICK START:
  1. Set your key:     export ANTHROPIC_API_KEY=...
  2. Write an email:   draftwright generate --thoughts \"tell sam the demo moved to friday\"
  3. Pick a tone:      draftwright generate --tone warm < notes.txt
  4. Paste it:         draftwright generate --insert --thoughts \"...\"

OUTPUT:
  The generated email is printed on stdout; progress and status go to stderr.
  Add --json for a machine-readable result.

CONFIG:
  ~/.config/draftwright/config.toml (see `draftwright config show`)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of ~/.config/draftwright/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an email from your notes.
    Generate {
        #[command(flatten)]
        input: DraftArgs,
        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,
        /// Insert the result into the compose body (falls back to the clipboard)
        #[arg(long, conflicts_with = "copy")]
        insert: bool,
        /// Print a JSON result instead of the bare email
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent, without calling the service.
    Prompt {
        #[command(flatten)]
        input: DraftArgs,
    },
    /// List available tones.
    Tones {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct DraftArgs {
    /// Your rough notes. Read from stdin when omitted.
    #[arg(short, long)]
    thoughts: Option<String>,
    /// Tone: formal, warm, concise, persuasive, apologetic, enthusiastic
    #[arg(long)]
    tone: Option<String>,
    /// File containing the email you are replying to
    #[arg(long)]
    original: Option<PathBuf>,
    /// Ignore any original email read from the host and write a new email
    #[arg(long, conflicts_with = "original")]
    new: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the active configuration as TOML.
    Show,
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path.
    Path,
}

/// JSON result of `generate --json`
#[derive(Serialize)]
struct GenerateOutput {
    state: WorkflowState,
    tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<&'static str>,
}

#[derive(Serialize)]
struct ToneInfo {
    id: Tone,
    label: &'static str,
    description: &'static str,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    match cli.command {
        Commands::Config { command } => handle_config_command(command, &config_path),
        Commands::Tones { json } => list_tones(json),
        Commands::Prompt { input } => {
            let config = load_config(&config_path)?;
            print_prompt(&config, input).await
        }
        Commands::Generate {
            input,
            copy,
            insert,
            json,
        } => {
            let config = load_config(&config_path)?;
            init_logging(&config, cli.verbose)?;
            run_generate(&config, input, copy, insert, json).await
        }
    }
}

fn load_config(path: &PathBuf) -> Result<Config> {
    Config::load_from(path).with_context(|| format!("failed to load config from {:?}", path))
}

/// File logging under `<data_dir>/logs`, plus stderr with --verbose
fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "draftwright.log");
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn parse_tone(tone: Option<&str>, config: &Config) -> Result<Tone> {
    match tone {
        Some(tone) => Ok(tone.parse::<Tone>()?),
        None => Ok(config.generation.default_tone),
    }
}

async fn read_thoughts(thoughts: Option<String>) -> Result<String> {
    if let Some(thoughts) = thoughts {
        return Ok(thoughts);
    }

    if std::io::stdin().is_terminal() {
        eprintln!("📝 Type your thoughts, then press Ctrl-D:");
    }
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

async fn read_original(path: Option<&PathBuf>) -> Result<Option<String>> {
    match path {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read original email from {:?}", path))?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

// ============================================================================
// Generate
// ============================================================================

async fn run_generate(
    config: &Config,
    input: DraftArgs,
    copy: bool,
    insert: bool,
    json: bool,
) -> Result<()> {
    let tone = parse_tone(input.tone.as_deref(), config)?;
    let original = read_original(input.original.as_ref()).await?;

    let generator = Arc::new(GenerationClient::new(&config.generation)?);
    let host = HostBridge::new(create_host(config));
    let clipboard = Arc::new(SystemClipboard::new(&config.clipboard));
    let presenter = Arc::new(TerminalPresenter::new(json));

    let controller = WorkflowController::start(generator, host, clipboard, presenter, tone).await;

    if let Some(original) = original {
        controller.set_original_email(original);
    } else if input.new {
        controller.set_original_email("");
    }

    let thoughts = read_thoughts(input.thoughts).await?;
    controller.set_thoughts(thoughts);

    info!("Generating email (tone: {})", tone);
    let generated = controller.generate().await;

    let mut delivery = None;
    if generated.is_ok() && (copy || insert) {
        delivery = if insert {
            match controller.insert().await {
                Ok(InsertOutcome::Inserted) => Some("inserted"),
                Ok(_) => Some("copied"),
                Err(e) => {
                    warn!("Insert fallback failed: {}", e);
                    None
                }
            }
        } else {
            match controller.copy().await {
                Ok(()) => Some("copied"),
                Err(e) => {
                    warn!("Copy failed: {}", e);
                    None
                }
            }
        };
    }

    if json {
        let output = GenerateOutput {
            state: controller.state(),
            tone,
            text: generated.as_ref().ok().cloned(),
            error: generated
                .as_ref()
                .err()
                .map(draftwright_core::models::failure_reason),
            error_code: generated.as_ref().err().map(|e| e.code()),
            delivery,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if let Err(e) = &generated {
        if let Some(hint) = e.action_hint() {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn print_prompt(config: &Config, input: DraftArgs) -> Result<()> {
    let tone = parse_tone(input.tone.as_deref(), config)?;
    let original = read_original(input.original.as_ref()).await?;
    let thoughts = read_thoughts(input.thoughts).await?;

    let draft = Draft::from_input(&thoughts, original.as_deref(), tone)?;
    println!("{}", build_prompt(&draft));
    Ok(())
}

// ============================================================================
// Tones
// ============================================================================

fn list_tones(json: bool) -> Result<()> {
    if json {
        let tones: Vec<ToneInfo> = Tone::ALL
            .iter()
            .map(|tone| ToneInfo {
                id: *tone,
                label: tone.label(),
                description: tone.description(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tones)?);
        return Ok(());
    }

    println!("\n🎚️  Tones");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for tone in Tone::ALL {
        println!("{:<14} {}", tone.as_str(), tone.prompt_phrase());
    }
    Ok(())
}

// ============================================================================
// Config Commands
// ============================================================================

fn handle_config_command(command: ConfigCommands, path: &PathBuf) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = load_config(path)?;
            let contents = toml::to_string_pretty(&config)?;
            println!("# {}", path.display());
            println!("{}", contents);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config already exists at {:?}. Use --force to overwrite.",
                    path
                );
            }
            Config::default().save_to(path)?;
            println!("✅ Wrote default config to {}", path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
