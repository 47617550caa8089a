use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use microfeature::config::ToolConfig;
use microfeature::graph::FeatureGraph;
use microfeature::loader::load_workspace;
use microfeature::models::{Module, Target};
use microfeature::{render, ModuleResolver};

#[derive(Parser)]
#[command(name = "microfeature")]
#[command(about = "Expand micro-feature declarations into Xcode project targets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every feature and print the project as JSON
    Resolve {
        /// Workspace declaration file
        workspace: PathBuf,

        /// Write the project to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Validate a workspace and report every configuration error
    Check {
        /// Workspace declaration file
        workspace: PathBuf,
    },
    /// Render the feature dependency tree
    Tree {
        /// Workspace declaration file
        workspace: PathBuf,
    },
    /// Show the resolved targets of one feature
    Targets {
        /// Workspace declaration file
        workspace: PathBuf,

        /// Feature name
        feature: String,

        /// Only this module (interface, source, testing, unit-tests, ui-tests, example)
        #[arg(short, long, value_parser = parse_module)]
        module: Option<Module>,
    },
}

fn parse_module(s: &str) -> Result<Module, String> {
    Module::from_str(s).ok_or_else(|| format!("unknown module: {}", s))
}

/// Initialize tracing on stderr so stdout stays clean for JSON output
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(path: &Path, config: &ToolConfig) -> Result<(String, FeatureGraph)> {
    load_workspace(path, config.default_base_bundle_id.as_deref())
        .with_context(|| format!("Failed to load workspace {}", path.display()))
}

fn print_target(target: &Target) {
    println!("{} ({})", target.name, target.product);
    println!("  bundle id: {}", target.bundle_id);
    println!("  sources:   {}", target.sources);
    for dependency in &target.dependencies {
        println!("  -> {}", dependency.name());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match ToolConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (ToolConfig::default(), Some(e)),
    };
    init_tracing(&config.log_filter);
    if let Some(e) = config_error {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
    }

    match cli.command {
        Commands::Resolve {
            workspace,
            output,
            compact,
        } => {
            let (name, graph) = load(&workspace, &config)?;
            let resolver = ModuleResolver::new(&graph)?;
            let project = resolver.project(name)?;

            let json = if compact || !config.pretty {
                serde_json::to_string(&project)?
            } else {
                serde_json::to_string_pretty(&project)?
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(
                        "Wrote {} targets to {}",
                        project.targets.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }
        Commands::Check { workspace } => {
            let (name, graph) = load(&workspace, &config)?;
            match graph.validate() {
                Ok(()) => println!("{}: {} features, no errors", name, graph.len()),
                Err(errors) => {
                    for error in errors.errors() {
                        println!("error: {}", error);
                    }
                    anyhow::bail!("{} configuration error(s) in {}", errors.len(), name);
                }
            }
        }
        Commands::Tree { workspace } => {
            let (_, graph) = load(&workspace, &config)?;
            print!("{}", render::render_tree(&graph));
        }
        Commands::Targets {
            workspace,
            feature,
            module,
        } => {
            let (_, graph) = load(&workspace, &config)?;
            let resolver = ModuleResolver::new(&graph)?;
            let id = graph
                .find(&feature)
                .ok_or_else(|| anyhow::anyhow!("No feature named {}", feature))?;

            let targets = match module {
                Some(module) => vec![resolver.target(id, module)?],
                None => resolver.resolve_modules(id)?,
            };
            for target in &targets {
                print_target(target);
            }
        }
    }

    Ok(())
}
