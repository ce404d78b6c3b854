use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sltail::Config;
use tokio::io::{AsyncBufRead, BufReader};

#[derive(Parser)]
#[command(name = "sltail", about = "Render log-table rows as readable log lines")]
struct Cli {
    /// Write debug logs to /tmp/sltail-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/sltail/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read JSON row objects, one per line, and print a log line for each.
    Tail {
        /// Input file; stdin when absent.
        file: Option<PathBuf>,
    },
    /// Render one template with a serialized payload.
    Render {
        template: String,
        #[arg(default_value = "")]
        payload: String,
    },
    /// Print the normalized template; the slot count goes to stderr.
    Normalize { template: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sltail-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sltail debug log started, tail -f /tmp/sltail-debug.log");
    }

    match cli.command {
        Command::Tail { file } => {
            let config = load_config(cli.config.as_deref())?;
            let reader: Box<dyn AsyncBufRead + Unpin + Send> = match file {
                Some(path) => {
                    let f = tokio::fs::File::open(&path)
                        .await
                        .with_context(|| format!("opening {}", path.display()))?;
                    Box::new(BufReader::new(f))
                }
                None => Box::new(BufReader::new(tokio::io::stdin())),
            };
            sltail::tail::run(reader, tokio::io::stdout(), &config).await?;
        }
        Command::Render { template, payload } => {
            match sltail::render(&template, &payload).into_result() {
                Ok(text) => println!("{text}"),
                Err((fallback, err)) => {
                    println!("{fallback}");
                    return Err(err.into());
                }
            }
        }
        Command::Normalize { template } => {
            let normalized = sltail_core::verbs::normalize(&template)?;
            println!("{}", normalized.template);
            eprintln!("{} slot(s)", normalized.slots);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config: falling back to built-in defaults");
            Config::defaults()
        })),
    }
}
