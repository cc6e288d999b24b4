//! oas-compare: structural diff of OpenAPI/Swagger specifications
//!
//! Compares two releases of an API description and reports new, changed and
//! deprecated operations and models.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use oas_compare::{
    cli,
    config::{AppConfig, ConfigError, DiffConfig, DiffLabels, DiffPaths, Validatable},
    diff::Severity,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported Specification Formats:",
        "\n  OpenAPI:  3.x (JSON, YAML)",
        "\n  Swagger:  2.0 (JSON, YAML)",
        "\n\nOutput Formats:",
        "\n  summary, json, markdown"
    )
}

#[derive(Parser)]
#[command(name = "oas-compare")]
#[command(version, long_version = build_long_version())]
#[command(about = "Structural diff of OpenAPI/Swagger specifications", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no failure flag set)
    1  Changes detected (--fail-on-change) / invalid input
    2  Change at or above --fail-on-severity
    3  Error occurred

EXAMPLES:
    # Quick diff with a human-readable summary
    oas-compare diff v1/openapi.yaml v2/openapi.yaml

    # Compare two checkouts, discovering the OpenAPI file in each
    oas-compare diff release-1.0/ release-1.1/ --base-label 1.0 --target-label 1.1

    # CI/CD gate on breaking-looking changes
    oas-compare diff old.json new.json --fail-on-severity high

    # Export a changelog section
    oas-compare diff old.yaml new.yaml -o markdown -O CHANGES.md")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "OAS_COMPARE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Base (older) specification file, or a directory to search
    base: PathBuf,

    /// Target (newer) specification file, or a directory to search
    target: PathBuf,

    /// Output format (auto resolves to summary)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Version label for the base side (defaults to the file name)
    #[arg(long)]
    base_label: Option<String>,

    /// Version label for the target side (defaults to the file name)
    #[arg(long)]
    target_label: Option<String>,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 2 if any change is at or above this severity
    #[arg(long, value_enum)]
    fail_on_severity: Option<Severity>,

    /// Report per-method changes of a path as separate entries
    #[arg(long)]
    report_method_changes: bool,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Specification files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format (json for machine-readable results)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `discover` subcommand
#[derive(Parser)]
struct DiscoverArgs {
    /// Directory to search
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Additional relative path to probe. Can be specified multiple times.
    #[arg(long = "path", value_name = "PATH")]
    paths: Vec<String>,

    /// Ignore the default and configured search paths
    #[arg(long)]
    no_defaults: bool,

    /// Output format (json for machine-readable results)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two specifications
    Diff(DiffArgs),

    /// Check that files parse as OpenAPI/Swagger documents
    Validate(ValidateArgs),

    /// List specification files found under a directory
    Discover(DiscoverArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .oas-compare.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let overrides = AppConfig::builder()
                .output_format(args.output)
                .output_file(args.output_file)
                .no_color(cli.no_color)
                .fail_on_change(args.fail_on_change)
                .fail_on_severity(args.fail_on_severity)
                .quiet(cli.quiet)
                .report_method_changes(args.report_method_changes)
                .build();
            let app = effective_config(cli.config.as_deref(), &overrides)?;

            let config = DiffConfig::from_app(
                DiffPaths {
                    base: args.base,
                    target: args.target,
                },
                app,
            )
            .with_labels(DiffLabels {
                base: args.base_label,
                target: args.target_label,
            });
            ensure_valid(&config)?;

            cli::run_diff(config)
        }

        Commands::Validate(args) => cli::run_validate(args.files, args.output, args.output_file, cli.quiet),

        Commands::Discover(args) => {
            let overrides = AppConfig::builder().quiet(cli.quiet).build();
            let app = effective_config(cli.config.as_deref(), &overrides)?;
            let discovery = cli::discovery_for(&app.discovery, &args.paths, args.no_defaults);
            ensure_valid(&discovery)?;

            cli::run_discover(&args.dir, &discovery, args.output, args.output_file, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "oas-compare", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = oas_compare::config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = oas_compare::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir().ok().map(|p| p.display().to_string()),
                    oas_compare::config::user_config_dir().map(|p| p.display().to_string()),
                    ::dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in oas_compare::config::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match oas_compare::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".oas-compare.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = oas_compare::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}

/// File config (discovered or explicit) with CLI values layered on top.
fn effective_config(config_path: Option<&std::path::Path>, overrides: &AppConfig) -> Result<AppConfig> {
    if let Some(path) = config_path {
        // An explicit path must load; discovery failures only warn.
        oas_compare::config::load_config_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
    }
    let (config, loaded_from) = AppConfig::from_file_with_overrides(config_path, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    ensure_valid(&config)?;
    Ok(config)
}

fn ensure_valid(config: &dyn Validatable) -> Result<()> {
    let errors: Vec<ConfigError> = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    anyhow::bail!("invalid configuration: {joined}")
}
