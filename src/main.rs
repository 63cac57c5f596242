mod app;
mod input;
mod render;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use app::{App, AppConfig};
use poi_navigator::{ActionInput, PluginConfig};

/// Default log file name in TUI mode
const LOG_FILE_NAME: &str = "poi.log";

/// poi: Point of Interest navigator
///
/// Runs the point-of-interest plugin against a simulated host. Load a world
/// of JSON-lines entities (or the built-in demo world), then travel between
/// points interactively, or run a single assistant action and exit.
#[derive(Parser, Debug)]
#[command(name = "poi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// World file, one JSON entity per line
    #[arg(short, long, value_name = "FILE")]
    world: Option<PathBuf>,

    /// Use the demo world (written to --world when that file is missing)
    #[arg(long)]
    demo: bool,

    /// Extra unnamed points scattered through the demo world
    #[arg(long, value_name = "N", default_value_t = 0)]
    scatter: usize,

    /// Reload the world file when it changes
    #[arg(long)]
    watch: bool,

    /// Plugin settings as JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run this assistant action and exit, e.g. `goToClosestPointByCategory`
    #[arg(short, long, value_name = "ID")]
    action: Option<String>,

    /// Value passed to --action
    #[arg(long, value_name = "TEXT", requires = "action")]
    value: Option<String>,

    /// Print the assistant knowledge base as JSON and exit
    #[arg(long, conflicts_with = "action")]
    knowledge: bool,

    /// Let the current user edit the world
    #[arg(long)]
    can_edit: bool,

    /// Seed for the random number generator
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Log file for the interactive mode
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    if !cli.demo && cli.world.is_none() {
        eprintln!("Error: Either --world or --demo must be specified");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  poi --world world.jsonl                 Travel around a world file");
        eprintln!("  poi --demo                              Travel around the demo world");
        eprintln!("  poi --demo --action goToRandomPoint     Run one assistant action");
        eprintln!();
        eprintln!("Run 'poi --help' for more options");
        std::process::exit(1);
    }

    let mut plugin_config = match &cli.config {
        Some(path) => match PluginConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: cannot read config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => PluginConfig::default(),
    };
    if cli.can_edit {
        plugin_config.can_edit = true;
    }

    let config = AppConfig {
        world_path: cli.world.clone(),
        demo_mode: cli.demo,
        watch: cli.watch,
        scatter: cli.scatter,
        seed: cli.seed,
        plugin: plugin_config,
    };

    if cli.action.is_some() || cli.knowledge {
        init_stderr_logging();
        std::process::exit(run_once(&cli, &config));
    }

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME));
    let _guard = init_file_logging(&log_path)?;

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Run one action (or dump the knowledge base) and return the exit code
fn run_once(cli: &Cli, config: &AppConfig) -> i32 {
    let mut plugin = match config.build_plugin(None) {
        Ok(plugin) => plugin,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if cli.knowledge {
        let dumped = plugin
            .knowledge_base()
            .map_err(|e| e.to_string())
            .and_then(|entries| serde_json::to_string_pretty(&entries).map_err(|e| e.to_string()));
        return match dumped {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
    }

    let Some(action) = cli.action.as_deref() else {
        return 0;
    };
    let input = ActionInput {
        value: cli.value.clone(),
    };

    match plugin.invoke_action_by_id(action, &input) {
        Ok(confirmation) => {
            println!("{}", confirmation);
            for event in &plugin.host().events {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => tracing::warn!(error = %e, "cannot serialise event"),
                }
            }
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// One-shot mode logs to stderr so stdout stays machine-readable
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Interactive mode logs to a file so the terminal UI stays intact
fn init_file_logging(path: &Path) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .init();

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(guard)
}
