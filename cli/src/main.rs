//! CLI entrypoint for Parallel Scout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scout_application::{
    BrowserAutomation, ChatService, ChatSession, ExplorationProgressNotifier, PlanningService,
    Planner, RunExplorationInput, RunExplorationUseCase, SynthesisService, Synthesizer,
};
use scout_domain::{ChatContext, Exploration, ExplorationStatus, OutputFormat};
use scout_infrastructure::{
    BackendServices, ChatCompletionsClient, ConfigLoader, FileConfig, HttpBrowserAutomation,
    JsonlExplorationLogger, OpenAiServices,
};
use scout_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Planning, synthesis and chat, backed by one adapter.
struct Services {
    planning: Arc<dyn PlanningService>,
    synthesis: Arc<dyn SynthesisService>,
    chat: Arc<dyn ChatService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env.local wins because dotenvy never overrides a variable already set
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Parallel Scout");

    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    apply_overrides(&cli, &mut config);

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", toml::to_string_pretty(&redacted(&config))?);
        return Ok(());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let list: Vec<String> = issues.iter().map(|issue| format!("  - {}", issue)).collect();
        bail!("Invalid configuration:\n{}", list.join("\n"));
    }

    let topics = cli.topic_list();
    if topics.is_empty() {
        bail!("At least one topic is required, e.g. parallel-scout \"rust async runtimes\"");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let browser: Arc<dyn BrowserAutomation> = Arc::new(HttpBrowserAutomation::new(
        &config.browser.base_url,
        config.browser.api_key.clone().unwrap_or_default(),
    )?);
    let services = build_services(&config)?;

    let params = config.exploration_params();
    let mut use_case = RunExplorationUseCase::new(
        Planner::new(services.planning.clone()).with_limits(params.task_limits),
        Synthesizer::new(services.synthesis.clone()),
        browser,
    )
    .with_params(params);

    if let Some(path) = &config.output.event_log {
        match JsonlExplorationLogger::create(path) {
            Ok(logger) => use_case = use_case.with_logger(Arc::new(logger)),
            Err(e) => warn!("Event log disabled: cannot write {}: {}", path.display(), e),
        }
    }

    let exploration_config = config
        .exploration
        .to_exploration_config()
        .context("Invalid exploration settings")?;
    let input = RunExplorationInput::new(topics, exploration_config);

    let exploration = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress: Box<dyn ExplorationProgressNotifier> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case.execute_with_progress(input, progress.as_ref()).await?
    };

    println!("{}", ConsoleFormatter::render(&exploration, config.output.format()));
    if let Some((path, format)) = config.output.save_format() {
        save_output(&exploration, path, format, config.output.color)?;
        info!("Saved {:?} output to {}", format, path.display());
    }

    if exploration.status() == ExplorationStatus::Failed {
        match exploration.failure() {
            Some(failure) => bail!("Exploration {}", failure),
            None => bail!("Exploration failed"),
        }
    }

    if cli.chat {
        match ChatContext::from_exploration(&exploration) {
            Some(context) => {
                let session =
                    ChatSession::new(services.chat).with_max_history(config.chat.max_history);
                ChatRepl::new(session, context).run().await?;
            }
            None => warn!("No brief to chat about"),
        }
    }

    Ok(())
}

/// Install the tracing subscriber; the guard must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Command-line flags take priority over every configuration source.
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(depth) = cli.depth {
        config.exploration.depth = depth;
    }
    if let Some(minutes) = cli.time_budget {
        config.exploration.time_budget_minutes = minutes;
    }
    if let Some(n) = cli.max_concurrent {
        config.exploration.max_concurrent_tasks = n;
    }
    if let Some(seconds) = cli.inactivity_timeout {
        config.exploration.inactivity_timeout_seconds = seconds;
    }
    if let Some(profile) = cli.browser_profile {
        config.browser.browser_profile = profile;
    }
    if let Some(country) = &cli.proxy_country {
        config.browser.proxy_country = Some(country.clone());
    }
    if let Some(format) = cli.output {
        config.output.format = Some(OutputFormat::from(format));
    }
    if let Some(path) = &cli.event_log {
        config.output.event_log = Some(path.clone());
    }
    if let Some(path) = &cli.save {
        config.output.save_to = Some(path.clone());
    }
}

/// Write the rendered exploration to `path` without color codes.
fn save_output(exploration: &Exploration, path: &Path, format: OutputFormat, color: bool) -> Result<()> {
    colored::control::set_override(false);
    let rendered = ConsoleFormatter::render(exploration, format);
    if color {
        colored::control::unset_override();
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    std::fs::write(path, rendered + "\n").with_context(|| format!("Cannot write {}", path.display()))
}

fn build_services(config: &FileConfig) -> Result<Services> {
    let timeout = Duration::from_secs(config.llm.request_timeout_seconds);

    if let Some(url) = config.backend_url() {
        info!(%url, "Using backend for planning, synthesis and chat");
        let backend = Arc::new(BackendServices::new(url, timeout)?);
        return Ok(Services {
            planning: backend.clone(),
            synthesis: backend.clone(),
            chat: backend,
        });
    }

    info!(model = %config.llm.model, "Using language model directly");
    let client = ChatCompletionsClient::new(
        &config.llm.base_url,
        config.llm.api_key.clone().unwrap_or_default(),
        config.llm.model.clone(),
        timeout,
    )?;
    let openai = Arc::new(OpenAiServices::new(client));
    Ok(Services {
        planning: openai.clone(),
        synthesis: openai.clone(),
        chat: openai,
    })
}

/// Copy of the configuration that is safe to print.
fn redacted(config: &FileConfig) -> FileConfig {
    let mut config = config.clone();
    for key in [&mut config.llm.api_key, &mut config.browser.api_key] {
        if key.is_some() {
            *key = Some("<redacted>".to_string());
        }
    }
    config
}
