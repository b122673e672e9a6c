use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use junitgen::commands::{generate_tests, print_generate_report, show_plan, GenerateOptions};
use junitgen::core::CancellationFlag;
use junitgen::models::ConfigOverrides;

/// junitgen - draft JUnit tests from Java sources with an LLM
#[derive(Parser)]
#[command(name = "junitgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a JUnit test class for a Java source file
    Generate {
        /// Path to the Java source file
        input: PathBuf,

        /// Output directory for the generated test class
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the model to use
        #[arg(long)]
        model: Option<String>,

        /// Override the Ollama URL
        #[arg(long)]
        url: Option<String>,

        /// Override the per-call timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Override the minimum delay between backend calls in seconds
        #[arg(long)]
        delay: Option<u64>,

        /// Override the maximum tokens generated per call
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Skip the backend and render every test from templates
        #[arg(long)]
        offline: bool,

        /// Stream backend output to the terminal
        #[arg(long)]
        stream: bool,
    },

    /// Show the methods and test scenarios found in a Java source file
    Plan {
        /// Path to the Java source file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            input,
            output,
            model,
            url,
            timeout,
            delay,
            max_tokens,
            offline,
            stream,
        } => {
            let project_root = std::env::current_dir().context("Cannot determine working directory")?;
            let options = GenerateOptions {
                input: input.clone(),
                overrides: ConfigOverrides {
                    model,
                    url,
                    timeout,
                    delay,
                    max_tokens,
                    output_dir: output,
                    offline,
                    stream,
                },
            };

            let cancel = CancellationFlag::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupt received; finishing the current test and writing partial output");
                    on_interrupt.cancel();
                }
            });

            let report = generate_tests(&project_root, options, &cancel)
                .await
                .with_context(|| format!("Error generating tests for {}", input.display()))?;
            print_generate_report(&report);
            Ok(())
        }

        Commands::Plan { input } => {
            show_plan(&input).with_context(|| format!("Error planning tests for {}", input.display()))
        }
    }
}
