use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use gosdk::commands;
use gosdk::config::{CatalogConfig, SourceKind};
use tracing::Level;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gosdk")]
#[command(version, about = "Go SDK version helper")]
struct Cli {
    /// Catalog to read releases from
    #[arg(long, global = true, value_enum, env = "GOSDK_CATALOG_SOURCE", default_value_t)]
    source: SourceKind,

    /// Override the catalog endpoint
    #[arg(long, global = true, env = "GOSDK_CATALOG_URL")]
    catalog_url: Option<String>,

    /// Override the download link prefix of the scraped index
    #[arg(long, global = true, env = "GOSDK_LINK_PREFIX")]
    link_prefix: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print Go version (without 'go' prefix)
    Version,
    /// Print Go SDK path
    SdkPath,
    /// Print GOPATH
    Gopath,
    /// List Go SDK versions
    SdkVersions {
        #[arg(value_name = "LOW_LIMIT_VERSION")]
        low_limit: Option<String>,
    },
    /// Print the latest stable Go SDK version
    LatestSdkVersion,
    /// Resolve semver of Go
    ResolveVersion {
        #[arg(value_name = "VERSION_OR_CONSTRAINT")]
        query: String,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // stdout carries command output only
    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

/// Unknown commands and missing arguments print usage instead of an error
fn falls_back_to_help(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::InvalidSubcommand
            | ErrorKind::MissingSubcommand
            | ErrorKind::MissingRequiredArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn print_help() -> ExitCode {
    let mut stdout = std::io::stdout();
    let written = Cli::command()
        .write_long_help(&mut stdout)
        .and_then(|()| writeln!(stdout));
    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("failed to print usage: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, command: Command) -> anyhow::Result<()> {
    let config = CatalogConfig::new(cli.source, cli.catalog_url).with_link_prefix(cli.link_prefix);
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::Version => commands::print_version(&mut stdout),
        Command::SdkPath => commands::print_sdk_path(&mut stdout),
        Command::Gopath => commands::print_gopath(&mut stdout),
        Command::SdkVersions { low_limit } => {
            let source = config.build_source();
            commands::print_sdk_versions(source.as_ref(), low_limit.as_deref(), &mut stdout).await
        }
        Command::LatestSdkVersion => {
            let source = config.build_source();
            commands::print_latest_sdk_version(source.as_ref(), &mut stdout).await
        }
        Command::ResolveVersion { query } => {
            let source = config.build_source();
            commands::print_resolved_version(source.as_ref(), &query, &mut stdout)
                .await
                .map(|_| ())
        }
    }
}

fn main() -> ExitCode {
    let mut cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if falls_back_to_help(e.kind()) => return print_help(),
        Err(e) => e.exit(),
    };

    let Some(command) = cli.command.take() else {
        return print_help();
    };

    init_tracing(cli.verbose, cli.log_format);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli, command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
