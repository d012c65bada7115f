//! Ember CLI - Talk to a main entity and its children
//!
//! Runs an in-memory session against a remote command interpreter.

mod config;
mod input;
mod presenter;
mod repl;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Select};
use ember::{CommandMode, HttpInterpreter, Interpreter, MatchMode, Session};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::Config;
use input::StdinLines;
use presenter::TerminalPresenter;

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Ember CLI - route commands to child entities", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at info level and show entity movement
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Session {
        /// Command pipeline: route or interpret
        #[arg(short, long)]
        mode: Option<CommandMode>,
        /// Interpreter URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Send a single command with an empty roster
    Send {
        /// Command text
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
        /// Command pipeline: route or interpret
        #[arg(short, long, default_value = "interpret")]
        mode: CommandMode,
        /// Interpreter URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List the functions the interpreter offers
    Functions {
        /// Interpreter URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the interpreter URL
    SetUrl {
        /// Base URL, e.g. http://127.0.0.1:5000
        url: String,
    },
    /// Create the config file interactively
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => cmd_session(None, None, cli.verbose).await,
        Some(Commands::Session { mode, base_url }) => cmd_session(mode, base_url, cli.verbose).await,
        Some(Commands::Send { command, mode, base_url }) => {
            cmd_send(command.join(" "), mode, base_url).await
        }
        Some(Commands::Functions { base_url }) => cmd_functions(base_url).await,
        Some(Commands::Config { action }) => cmd_config(action.unwrap_or(ConfigAction::Show)),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ember=info" } else { "ember=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(base_url: Option<String>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = base_url {
        config.set_base_url(url);
    }
    Ok(config)
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_session(mode: Option<CommandMode>, base_url: Option<String>, verbose: bool) -> Result<()> {
    let config = load_config(base_url)?;
    tracing::info!("Using interpreter at {}", config.base_url);

    let mut session = Session::new(
        config.session_config(mode),
        Arc::new(HttpInterpreter::new(&config.base_url)),
        Arc::new(TerminalPresenter { show_moves: verbose }),
    );
    let mut input = StdinLines::new();

    repl::run(&mut session, &mut input).await
}

async fn cmd_send(command: String, mode: CommandMode, base_url: Option<String>) -> Result<()> {
    let config = load_config(base_url)?;
    let mut session = Session::new(
        config.session_config(Some(mode)),
        Arc::new(HttpInterpreter::new(&config.base_url)),
        Arc::new(TerminalPresenter::default()),
    );

    session
        .handle_command(&command)
        .await
        .context("Failed to handle command")?;
    Ok(())
}

async fn cmd_functions(base_url: Option<String>) -> Result<()> {
    let config = load_config(base_url)?;
    let interpreter = HttpInterpreter::new(&config.base_url);

    let categories = interpreter
        .function_categories()
        .await
        .with_context(|| format!("Failed to reach interpreter at {}", config.base_url))?;

    if categories.is_empty() {
        println!("No functions available.");
        return Ok(());
    }

    println!("{}", "Functions:".bold());
    for (name, category) in categories {
        println!("  {} {}", name.cyan(), format!("[{}]", category).dimmed());
    }

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;

            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url.cyan());
            println!("  Mode: {}", config.mode);
            println!("  Match mode: {}", config.match_mode);
            println!(
                "  History limit: {}",
                if config.history_limit == 0 {
                    "unbounded".to_string()
                } else {
                    format!("{} exchanges", config.history_limit)
                }
            );
            println!("  Listen window: {}s", config.listen_window_secs);
        }

        ConfigAction::SetUrl { url } => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("URL must start with http:// or https://");
            }
            let mut config = Config::load()?;
            config.set_base_url(url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url.cyan());
        }

        ConfigAction::Init => {
            let mut config = Config::load()?;

            let url: String = Input::new()
                .with_prompt("Interpreter URL")
                .default(config.base_url.clone())
                .interact_text()
                .context("Failed to read URL")?;
            config.set_base_url(url);

            let modes = [CommandMode::Route, CommandMode::Interpret];
            let mode = Select::new()
                .with_prompt("Default command mode")
                .items(&modes)
                .default(modes.iter().position(|m| *m == config.mode).unwrap_or(0))
                .interact()
                .context("Failed to read mode")?;
            config.mode = modes[mode];

            let matches = [MatchMode::Substring, MatchMode::Word];
            let match_mode = Select::new()
                .with_prompt("Function matching")
                .items(&matches)
                .default(matches.iter().position(|m| *m == config.match_mode).unwrap_or(0))
                .interact()
                .context("Failed to read match mode")?;
            config.match_mode = matches[match_mode];

            config.save()?;
            println!("{} Config saved to {:?}", "✓".green(), Config::config_path()?);
        }
    }

    Ok(())
}
