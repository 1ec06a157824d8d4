//! Command-line interface for SensorHTM.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sensorhtm_core::config::{self, defaults::DATE_FORMAT};
use sensorhtm_core::{
    normalize_timestamp, DynSensorModelClient, ModelParams, SensorKey, SensorModel,
    SensorModelClient,
};
use sensorhtm_storage::{MemoryModelStore, ModelStore};

/// SensorHTM - Inspect HTM sensor models and their stored results.
#[derive(Parser, Debug)]
#[command(name = "sensorhtm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Model store path (defaults to $SENSORHTM_DB or ./data/sensorhtm.redb).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Describe a model definition file.
    Describe {
        /// Path to a JSON model definition.
        path: PathBuf,
    },
    /// Normalize point timestamps.
    Timestamp {
        /// Timestamps as returned by the time-series store.
        #[arg(required = true)]
        timestamps: Vec<String>,
    },
    /// Validate a model parameter file.
    Params {
        /// Path to the parameter file.
        path: PathBuf,
    },
    /// Model registry commands.
    Models {
        #[command(subcommand)]
        models_cmd: ModelsCommand,
    },
    /// Print the stored results of a model as JSON lines.
    Results {
        /// Stored model name, e.g. power_local_mini_fridge.
        model: String,
    },
}

/// Model registry subcommands.
#[derive(Subcommand, Debug)]
enum ModelsCommand {
    /// List models, optionally for one sensor.
    List {
        #[arg(short, long, requires = "component")]
        measurement: Option<String>,
        #[arg(short, long, requires = "measurement")]
        component: Option<String>,
    },
    /// Create an empty model storage space for a sensor.
    Create {
        #[arg(short, long)]
        measurement: String,
        #[arg(short, long)]
        component: String,
        /// Name suffix; the model is stored as <measurement>_<suffix>.
        #[arg(short, long)]
        suffix: String,
    },
    /// Delete every model of a sensor, with its results.
    Delete {
        #[arg(short, long)]
        measurement: String,
        #[arg(short, long)]
        component: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let db = args
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::db_path()));

    match args.command {
        Command::Describe { path } => describe(&path),
        Command::Timestamp { timestamps } => normalize(&timestamps),
        Command::Params { path } => check_params(&path),
        Command::Models { models_cmd } => run_models_cmd(&db, models_cmd),
        Command::Results { model } => print_results(&db, &model),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "sensorhtm=debug" } else { "sensorhtm=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
        .add_directive(tracing::Level::WARN.into());

    if config::json_logging() {
        // JSON format for production/container environments
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the derived identity of a model definition.
fn describe(path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let def: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    // Describing needs no storage; any client satisfies the descriptor.
    let client: DynSensorModelClient = Arc::new(MemoryModelStore::new());
    let model = SensorModel::from_value(&def, client)?;

    println!("{}", model);
    println!("  key:         {}", model.key());
    println!("  measurement: {}", model.measurement());
    println!("  component:   {}", model.component());
    for (key, value) in model.tags() {
        println!("  tag {}={}", key, value);
    }
    Ok(())
}

fn normalize(timestamps: &[String]) -> Result<()> {
    for raw in timestamps {
        let parsed = normalize_timestamp(raw)?;
        println!("{} -> {}", raw, parsed.format(DATE_FORMAT));
    }
    Ok(())
}

fn check_params(path: &Path) -> Result<()> {
    let params = ModelParams::load(path)
        .with_context(|| format!("Invalid parameter file {}", path.display()))?;
    println!("Parameter file OK: {}", path.display());
    println!("  predicted field: {}", params.predicted_field());
    for key in params.model_params().keys() {
        println!("  modelParams.{}", key);
    }
    Ok(())
}

fn open_store(db: &Path) -> Result<ModelStore> {
    ModelStore::open(db).with_context(|| format!("Failed to open model store {}", db.display()))
}

fn run_models_cmd(db: &Path, cmd: ModelsCommand) -> Result<()> {
    let store = open_store(db)?;

    match cmd {
        ModelsCommand::List {
            measurement: Some(measurement),
            component: Some(component),
        } => {
            let client: DynSensorModelClient = Arc::new(store);
            let sensor = SensorKey::new(measurement, component);
            for model in SensorModel::load_all(&client, &sensor)? {
                println!("{}\t{}", model.key(), model);
            }
        }
        ModelsCommand::List { .. } => {
            let definitions = store.list_all_models()?;
            let client: DynSensorModelClient = Arc::new(store);
            for definition in definitions {
                match SensorModel::new(definition.clone(), client.clone()) {
                    Ok(model) => println!("{}\t{}", model.key(), model),
                    Err(e) => tracing::warn!(model = %definition.name, "Invalid definition: {}", e),
                }
            }
        }
        ModelsCommand::Create {
            measurement,
            component,
            suffix,
        } => {
            let sensor = SensorKey::new(measurement, component);
            let definition = store.create_model(&sensor, &suffix)?;
            println!("Created {}", definition.name);
        }
        ModelsCommand::Delete {
            measurement,
            component,
        } => {
            let sensor = SensorKey::new(measurement, component);
            let removed = store.delete_models(&sensor)?;
            println!("Deleted {} model(s) for {}", removed, sensor);
        }
    }
    Ok(())
}

fn print_results(db: &Path, model: &str) -> Result<()> {
    let store = open_store(db)?;
    if store.load_model(model)?.is_none() {
        anyhow::bail!("Model not found: {}", model);
    }
    for row in store.read_results(model)? {
        println!("{}", serde_json::to_string(&row)?);
    }
    Ok(())
}
