use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use package_sync::config::{DECLARATION_FILE, SyncConfig};
use package_sync::manifest::ManifestStore;
use package_sync::sync::driver::{PersistOutcome, Reconciler, WritePolicy};
use package_sync::sync::prompt::{Confirmer, NonInteractive, TerminalConfirmer, is_interactive};
use package_sync::sync::report::constraint_count;
use package_sync::sync::target::resolve_target;
use package_sync::version::registries::PackagistRegistry;

#[derive(Parser)]
#[command(name = "package-sync")]
#[command(
    version,
    about = "Check installed Composer packages against the latest Packagist versions"
)]
struct Cli {
    /// Project directory, or its composer.json / composer.lock
    target: Option<PathBuf>,

    /// Path to the project directory (defaults to current directory)
    #[arg(long = "path", value_name = "PATH")]
    path: Option<PathBuf>,

    /// Write suggested constraints to composer.json without asking
    #[arg(long)]
    write: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Never prompt for confirmation
    #[arg(short = 'n', long)]
    no_interaction: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the registry base URL
    #[arg(long, value_name = "URL")]
    registry_url: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(run(cli)));

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = match &cli.config {
        Some(path) => SyncConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SyncConfig::default(),
    }
    .with_registry_url(cli.registry_url.clone());

    let root = resolve_target(cli.target.as_deref(), cli.path.as_deref())?;
    let store = ManifestStore::new(root);

    let interactive = !cli.json && !cli.no_interaction && is_interactive();
    let confirmer: Arc<dyn Confirmer> = if interactive {
        Arc::new(TerminalConfirmer)
    } else {
        Arc::new(NonInteractive)
    };
    let registry = Arc::new(PackagistRegistry::new(&config.registry)?);
    let reconciler = Reconciler::new(registry, confirmer, config.registry);

    let workset = reconciler.load(&store)?;
    if !cli.json {
        println!("Checking {} packages...\n", workset.constraints.len());
    }

    let report = reconciler.reconcile(&workset).await;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}\n", report.to_table(std::io::stdout().is_terminal()));
        for line in report.summary() {
            println!("{line}");
        }
    }

    // Write-back problems are reported but do not change the exit code
    match reconciler.persist(&store, &report, WritePolicy::from_flags(cli.write, interactive)) {
        Ok(PersistOutcome::Applied(count)) => {
            eprintln!("Updated {} in {DECLARATION_FILE}.", constraint_count(count))
        }
        Ok(PersistOutcome::NothingToApply | PersistOutcome::Declined) => {}
        Err(e) => eprintln!("Error: {e}"),
    }

    Ok(report.exit_code())
}
