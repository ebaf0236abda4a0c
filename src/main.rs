// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitelingo::app_config::{ApplyPolicy, Config, LogLevel};
use sitelingo::errors::AppError;
use sitelingo::translation::{ContentKind, SiteTranslator, TranslationBackend, TranslationService};
use sitelingo::MemoryStore;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for ApplyPolicy to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliApplyPolicy {
    AtomicPerNode,
    BestEffort,
}

impl From<CliApplyPolicy> for ApplyPolicy {
    fn from(cli_policy: CliApplyPolicy) -> Self {
        match cli_policy {
            CliApplyPolicy::AtomicPerNode => ApplyPolicy::AtomicPerNode,
            CliApplyPolicy::BestEffort => ApplyPolicy::BestEffort,
        }
    }
}

#[derive(Subcommand, Debug)]
enum JobCommands {
    /// Open a translation job
    Create {
        /// Job name
        #[arg(short, long)]
        name: String,

        /// Page path to include (repeatable)
        #[arg(long = "page")]
        pages: Vec<String>,

        /// Asset path to include (repeatable)
        #[arg(long = "asset")]
        assets: Vec<String>,

        /// Source language code
        #[arg(short, long)]
        source_language: Option<String>,

        /// Target language code
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Show the status of a job
    Status {
        /// Job identifier
        job_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a page, its components and its tags
    Page {
        /// Content store document (JSON)
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// Page path, e.g. /content/site/en/home
        #[arg(short, long)]
        page: String,

        /// Target language code
        #[arg(short, long)]
        target_language: Option<String>,

        /// Content category passed to the backend
        #[arg(long)]
        category: Option<String>,

        /// Write-back policy for partially translated components
        #[arg(long, value_enum)]
        policy: Option<CliApplyPolicy>,

        /// Print the report without saving the store
        #[arg(long)]
        dry_run: bool,
    },

    /// Translate the metadata of an asset
    Asset {
        /// Content store document (JSON)
        #[arg(value_name = "STORE")]
        store: PathBuf,

        /// Asset path, e.g. /content/dam/site/logo.png
        #[arg(short, long)]
        asset: String,

        /// Source language code
        #[arg(short, long)]
        source_language: Option<String>,

        /// Target language code
        #[arg(short, long)]
        target_language: Option<String>,

        /// Content category passed to the backend
        #[arg(long)]
        category: Option<String>,

        /// Print the report without saving the store
        #[arg(long)]
        dry_run: bool,
    },

    /// Detect the language of a text
    Detect {
        /// Text to inspect
        text: String,
    },

    /// List supported languages
    Languages,

    /// Translation job operations
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Generate shell completions for sitelingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// sitelingo - content tree translation with language models
#[derive(Parser, Debug)]
#[command(name = "sitelingo")]
#[command(version)]
#[command(about = "Translate CMS pages, assets and tags with a language model")]
#[command(long_about = "sitelingo walks a content tree, sends every translatable fragment to a
language model and writes the translations back.

EXAMPLES:
    sitelingo page site.json --page /content/site/en/home -t es
    sitelingo page site.json --page /content/site/en/home -t de --policy best-effort --dry-run
    sitelingo asset site.json --asset /content/dam/site/logo.png -s en -t fr
    sitelingo detect \"Bonjour tout le monde\"
    sitelingo job create --name spring --page /content/site/en/home -t es
    sitelingo completions bash > sitelingo.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Info until the configuration says otherwise
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();
    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "sitelingo", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(Path::new(&cli.config_path))?;
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Page {
            store,
            page,
            target_language,
            category,
            policy,
            dry_run,
        } => {
            if let Some(target) = target_language {
                config.target_language = target;
            }
            validate(&config)?;

            let content = Arc::new(load_store(&store)?);
            let mut translator = site_translator(&config, content.clone())?;
            if let Some(policy) = policy {
                translator = translator.with_apply_policy(policy.into());
            }

            let result = translator
                .translate_page(&page, &config.target_language, category.as_deref())
                .await?;
            print_json(&result)?;

            if !dry_run {
                content.save(&store)?;
            }
        }

        Commands::Asset {
            store,
            asset,
            source_language,
            target_language,
            category,
            dry_run,
        } => {
            if let Some(source) = source_language {
                config.source_language = source;
            }
            if let Some(target) = target_language {
                config.target_language = target;
            }
            validate(&config)?;

            let content = Arc::new(load_store(&store)?);
            let translator = site_translator(&config, content.clone())?;
            let result = translator
                .translate_asset_metadata(
                    &asset,
                    &config.source_language,
                    &config.target_language,
                    category.as_deref(),
                )
                .await;
            print_json(&result)?;

            if !result.success() {
                warn!("Asset {} was not fully translated", asset);
            }
            if !dry_run {
                content.save(&store)?;
            }
        }

        Commands::Detect { text } => {
            let service = TranslationService::new(&config)?;
            let code = service.detect_language(&text, ContentKind::Plain).await?;
            println!("{}", code);
        }

        Commands::Languages => {
            let service = TranslationService::new(&config)?;
            print_json(&service.supported_languages())?;
        }

        Commands::Job { command } => {
            let translator = site_translator(&config, Arc::new(MemoryStore::new()))?;
            match command {
                JobCommands::Create {
                    name,
                    pages,
                    assets,
                    source_language,
                    target_language,
                } => {
                    let source = source_language.unwrap_or(config.source_language.clone());
                    let target = target_language.unwrap_or(config.target_language.clone());
                    let ticket =
                        translator.create_translation_job(&pages, &assets, &source, &target, &name)?;
                    print_json(&ticket)?;
                }
                JobCommands::Status { job_id } => {
                    print_json(&translator.get_job_status(&job_id)?)?;
                }
            }
        }

        Commands::Completions { .. } => {}
    }

    Ok(())
}

/// Load the configuration, creating a default file when none exists
fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return Config::from_file(path);
    }

    warn!("Config file not found at '{}', creating default config.", path.display());
    let config = Config::default();
    config.save(path)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), AppError> {
    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))
}

fn load_store(path: &Path) -> Result<MemoryStore, AppError> {
    MemoryStore::from_file(path).map_err(|e| AppError::File(format!("{:#}", e)))
}

fn site_translator(config: &Config, store: Arc<MemoryStore>) -> Result<SiteTranslator> {
    let service = TranslationService::new(config).context("Failed to create translation service")?;
    info!("Using {}", service.service_info().label);
    Ok(SiteTranslator::new(Arc::new(service), store, config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}
