//! Lab Control - terminal client for the lab assistant demo
//!
//! With no subcommand, opens the chat TUI. `labctl ask` plays one turn on
//! stdout.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lab_common::config::LabConfig;
use labctl::errors::{EXIT_CONFIG_ERROR, EXIT_GENERAL_ERROR, EXIT_NO_TERMINAL, EXIT_SUCCESS};
use labctl::oneshot::{self, OutputFormat};
use labctl::{logging, tui};
use std::io::IsTerminal;

// Version is embedded at build time
const VERSION: &str = env!("LABCTL_VERSION");

#[derive(Parser)]
#[command(name = "labctl")]
#[command(about = "Lab AI Agent - scripted lab assistant chat", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Dataset directory or http(s) base URL
    #[arg(long, global = true)]
    data: Option<String>,

    /// Multiplier on scripted delays (0 = instant)
    #[arg(long, global = true)]
    pace: Option<f64>,

    /// Skip all scripted delays
    #[arg(long, global = true)]
    fast: bool,

    /// Log filter when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the scripted reply
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Print transcript entries as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match LabConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("labctl: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    let pace = if cli.fast { Some(0.0) } else { cli.pace };
    let config = config.with_overrides(cli.data, pace, cli.log_level);

    let code = match run(cli.command, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("labctl: {:#}", e);
            EXIT_GENERAL_ERROR
        }
    };
    std::process::exit(code);
}

async fn run(command: Option<Commands>, config: LabConfig) -> Result<i32> {
    match command {
        Some(Commands::Ask { question, json }) => {
            logging::init_stderr_logging(&config.log_level);
            let format = if json { OutputFormat::Json } else { OutputFormat::Text };
            oneshot::ask(&config, &question.join(" "), format).await?;
            Ok(EXIT_SUCCESS)
        }
        None => {
            if !std::io::stdout().is_terminal() {
                eprintln!("labctl: the chat UI needs a terminal; use `labctl ask <question>` instead");
                return Ok(EXIT_NO_TERMINAL);
            }
            logging::init_file_logging(&config.log_level);
            tui::run(config).await?;
            Ok(EXIT_SUCCESS)
        }
    }
}
