use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adr_advisor::cli::commands;
use adr_advisor::{AdrStatus, ConfigLoader, ReportSourceKind};

/// Parse ADR status from string
fn parse_status(s: &str) -> Result<AdrStatus, String> {
    s.parse()
}

/// Parse report source from string
fn parse_source(s: &str) -> Result<ReportSourceKind, String> {
    s.parse()
}

/// Parse decision date (YYYY-MM-DD)
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}

#[derive(Parser)]
#[command(name = "adr-advisor")]
#[command(
    version,
    about = "Architecture option analysis and ADR drafting backed by an LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis HTTP endpoint
    Serve {
        #[arg(long, help = "Bind address override")]
        host: Option<String>,
        #[arg(long, short, help = "Port override")]
        port: Option<u16>,
    },

    /// Request architecture options for a request form
    Analyze {
        #[arg(help = "Request JSON file ('-' for stdin)")]
        input: PathBuf,
        #[arg(long, short, help = "Server root of a running endpoint")]
        endpoint: Option<String>,
        #[arg(long, short, help = "Result JSON output path")]
        output: Option<PathBuf>,
        #[arg(long, help = "Model override")]
        model: Option<String>,
    },

    /// Print the prompt that would be sent for a request
    Prompt {
        #[arg(help = "Request JSON file ('-' for stdin)")]
        input: PathBuf,
        #[arg(long, help = "Include the system instruction")]
        system: bool,
    },

    /// Compare options of a saved result, or show one in detail
    Inspect {
        #[arg(help = "Result JSON file ('-' for stdin)")]
        input: PathBuf,
        #[arg(long, help = "Option id for the detail view")]
        option: Option<String>,
        #[arg(long, requires = "option", help = "Print only the option's steps")]
        steps: bool,
        #[arg(long, requires = "option", help = "Export the option as <id>.json into this directory")]
        export: Option<PathBuf>,
    },

    /// Assemble an ADR from selected options
    Report {
        #[arg(help = "Result JSON file ('-' for stdin)")]
        input: PathBuf,
        #[arg(long, short = 's', help = "Option id to select (repeatable)")]
        select: Vec<String>,
        #[arg(long, value_parser = parse_status, help = "Status: proposed, approved, deprecated")]
        status: Option<AdrStatus>,
        #[arg(long, value_parser = parse_date, help = "Decision date (YYYY-MM-DD, default: today)")]
        date: Option<NaiveDate>,
        #[arg(long, help = "Owner")]
        owner: Option<String>,
        #[arg(long, value_parser = parse_source, help = "Narrative source: fixture, selection")]
        source: Option<ReportSourceKind>,
        #[arg(long, short, help = "Directory to save ADR-<id>.md into")]
        output: Option<PathBuf>,
    },

    /// Print the result JSON Schema
    Schema,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31madr-advisor encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!("\n\x1b[33mPlease report this issue at:\x1b[0m");
        eprintln!("  https://github.com/junyeong-ai/adr-advisor/issues");
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = ConfigLoader::load()?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let rt = Runtime::new()?;
            rt.block_on(commands::serve::run(&config))?;
        }
        Commands::Analyze {
            input,
            endpoint,
            output,
            model,
        } => {
            let mut config = ConfigLoader::load()?;
            if let Some(model) = model {
                config.llm.model = model;
            }

            let rt = Runtime::new()?;
            rt.block_on(commands::analyze::run(
                &config,
                commands::analyze::AnalyzeOptions {
                    input,
                    endpoint,
                    output,
                },
            ))?;
        }
        Commands::Prompt { input, system } => {
            commands::prompt::run(&input, system)?;
        }
        Commands::Inspect {
            input,
            option,
            steps,
            export,
        } => {
            commands::inspect::run(commands::inspect::InspectOptions {
                input,
                option,
                steps,
                export,
            })?;
        }
        Commands::Report {
            input,
            select,
            status,
            date,
            owner,
            source,
            output,
        } => {
            let config = ConfigLoader::load()?;
            commands::report::run(
                &config,
                commands::report::ReportOptions {
                    input,
                    select,
                    status,
                    date,
                    owner,
                    source,
                    output,
                },
            )?;
        }
        Commands::Schema => {
            commands::schema::run()?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
