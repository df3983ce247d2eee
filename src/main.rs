use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use trello_bot::domain::traits::Bot;
use trello_bot::infrastructure::adapters::{ConsoleAdapter, WebhookAdapter};
use trello_bot::infrastructure::config::Config;
use trello_bot::{BotError, MessageDispatcher, PluginManager, TrelloPlugin};

#[derive(Parser)]
#[command(name = "trello-bot")]
#[command(about = "Manage Trello cards from chat", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Channel to post replies to (overrides config)
    #[arg(long)]
    channel: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read messages from stdin and answer them
    Run,
    /// Handle a single message and exit
    Say {
        /// Message text, e.g. `trello show bob`
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.channel).await,
        Commands::Say { text } => say(&cli.config, cli.channel, text.join(" ")).await,
        Commands::Version => {
            println!("trello-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig { force } => init_config(&cli.config, force),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &str, channel: Option<String>) -> Config {
    let mut config = if Path::new(path).exists() {
        let mut config = Config::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        });
        config.apply_env();
        config
    } else {
        Config::load_env()
    };

    if let Some(channel) = channel {
        config.bot.channel = channel;
    }
    config
}

async fn build_dispatcher(config: &Config) -> Result<MessageDispatcher, BotError> {
    let trello = TrelloPlugin::new(&config.trello)?;
    trello.warm_up().await;

    let mut plugins = PluginManager::new();
    plugins.register(trello).map_err(BotError::Plugin)?;
    tracing::info!("Plugin system initialized with {} plugins", plugins.list_plugins().len());

    let bot: Arc<dyn Bot> = match config.webhook_url() {
        Some(url) => Arc::new(WebhookAdapter::new(url, &config.bot.name)?),
        None => Arc::new(ConsoleAdapter::new(&config.bot.name)),
    };
    bot.start().await?;

    Ok(MessageDispatcher::new(Arc::new(plugins), bot, &config.bot.name))
}

async fn run_bot(config_path: &str, channel: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, channel);
    tracing::info!("Starting trello-bot: {}", config.bot.name);

    let dispatcher = build_dispatcher(&config).await?;
    println!("Type `trello help` for commands, `quit` to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        match text {
            "" => continue,
            "quit" | "exit" => break,
            _ => {}
        }

        let outcome = dispatcher.process(config.bot.channel.as_str(), text).await;
        if !outcome.handled {
            println!("{}", dispatcher.plugins().help());
        }
    }

    tracing::info!("Bye");
    Ok(())
}

async fn say(config_path: &str, channel: Option<String>, text: String) -> Result<(), BotError> {
    let config = load_config(config_path, channel);
    let dispatcher = build_dispatcher(&config).await?;

    let outcome = dispatcher.process(config.bot.channel.as_str(), text).await;
    if !outcome.handled {
        return Err(BotError::Plugin("No plugin understood that message".to_string()));
    }
    Ok(())
}

fn init_config(path: &str, force: bool) -> Result<(), BotError> {
    if Path::new(path).exists() && !force {
        println!("{} already exists, use --force to overwrite", path);
        return Ok(());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)?;
    println!("Wrote default config to {}", path);
    println!("Fill in trello.key, trello.token, trello.board and trello.list before running.");
    Ok(())
}
