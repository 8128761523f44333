//! CLI entrypoint for raimon
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use raimon_application::{
    ChatSelection, ConversationController, SessionStore, TurnObserver,
};
use raimon_domain::{Focus, Model};
use raimon_infrastructure::{
    ConfigLoader, FileConfig, FileTranscriptRepository, JsonlConversationLogger, OpenAiGateway,
};
use raimon_presentation::{ChatRepl, Cli, PlainPrinter, ReplConfig, StreamPrinter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // The API key may live in a .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", FileConfig::default().to_toml()?);
        return Ok(());
    }

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    let _log_guard = logging::init(cli.verbose, config.log_file_path().as_deref())?;
    info!("Starting raimon");

    // === Dependency Injection ===
    let storage_dir = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.storage.resolve_dir());
    let repository = Arc::new(FileTranscriptRepository::new(&storage_dir)?);
    info!("Chats stored in {}", storage_dir.display());
    let store = SessionStore::new(repository);

    if cli.list {
        for (i, title) in store.chat_titles()?.iter().enumerate() {
            println!("{:>2}. {}", i + 1, title);
        }
        return Ok(());
    }

    if let Some(title) = &cli.delete {
        println!("{}", delete_chat_by_title(&store, title)?);
        return Ok(());
    }

    let gateway = Arc::new(OpenAiGateway::new(
        config.openai.base_url.clone(),
        config.openai.api_key_env.clone(),
        Duration::from_secs(config.openai.timeout_seconds),
    )?);
    if !gateway.has_api_key() {
        warn!(
            "{} is not set; requests will fail until it is",
            config.openai.api_key_env
        );
    }

    let mut controller = ConversationController::new(gateway, store, config.conversation_params());
    if let Some(path) = config.conversation_log_path()
        && let Some(logger) = JsonlConversationLogger::new(&path)
    {
        info!("Conversation log: {}", logger.path().display());
        controller = controller.with_conversation_logger(Arc::new(logger));
    }

    let mut session = controller.new_session();
    if let Some(name) = &cli.model {
        session.set_model(Model::from(name.as_str()));
    }
    let focus = match &cli.focus {
        Some(name) => name.parse::<Focus>()?,
        None => config.initial_focus(),
    };
    session.set_focus(focus);

    if let Some(title) = &cli.open
        && controller.select_chat(&mut session, title)? == ChatSelection::NotFound
    {
        bail!("No chat titled \"{}\"", title);
    }

    // Single prompt mode
    if let Some(prompt) = &cli.prompt {
        let observer: Box<dyn TurnObserver> = if cli.quiet {
            Box::new(PlainPrinter)
        } else {
            Box::new(StreamPrinter::new())
        };
        controller
            .submit_prompt(&mut session, prompt, observer.as_ref())
            .await?;
        return Ok(());
    }

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress && !cli.quiet,
        history_file: config.history_path(),
    };
    let mut repl = ChatRepl::new(controller, session).with_config(repl_config);
    repl.run().await?;

    Ok(())
}

/// Run `--delete` and describe what happened. An unknown title is not an error.
fn delete_chat_by_title(store: &SessionStore, title: &str) -> Result<String> {
    if let Some(file_name) = store.delete_by_title(title) {
        return Ok(format!("Deleted \"{}\" ({})", title, file_name));
    }
    if store.load_by_title(title)?.is_some() {
        return Ok(format!(
            "Could not delete \"{}\"; rerun with -v for details",
            title
        ));
    }
    Ok(format!("No chat titled \"{}\"; nothing deleted", title))
}
