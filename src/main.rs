use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use podlogs::cli::run::RunArgs;
use podlogs::window::Period;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podlogs", version)]
#[command(about = "Fetch CloudWatch container logs for a pod", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "A pod id that matches a subcommand name must follow `--`, e.g. `podlogs -- config 6H`.")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pod id, e.g. 123
    target: Option<String>,

    /// Lookback period: 1H, 6H, 12H or 24H (anything else means 24H)
    #[arg(default_value = "24H")]
    period: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a starter config to ~/.config/podlogs/config.yml
    Init {
        #[arg(long)]
        stdout: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries only log lines, diagnostics go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podlogs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { stdout } => match podlogs::cli::config::init(stdout) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(1)
                }
            },
        },
        None => {
            let Some(target) = cli.target else {
                print_usage();
                return ExitCode::from(1);
            };

            let args = RunArgs {
                target,
                period: Period::from_label(&cli.period),
                config_path: cli.config,
            };

            match podlogs::cli::run::run(&args).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(1)
                }
            }
        }
    }
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_usage());
    eprintln!("  pod id like 123");
    eprintln!("  period like 1H, 6H, 12H, 24H");
    eprintln!("  use `--` before a pod id named like a subcommand: podlogs -- config");
}
