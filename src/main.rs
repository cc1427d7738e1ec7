use clap::{Parser, Subcommand};

use haven_bot::application::messaging::MessageDispatcher;
use haven_bot::infrastructure::adapters::discord;
use haven_bot::infrastructure::adapters::ConsoleAdapter;
use haven_bot::domain::traits::Bot;
use haven_bot::infrastructure::config::Config;
use haven_bot::infrastructure::storage::MemoryRoleRegistry;

#[derive(Parser)]
#[command(name = "haven-bot")]
#[command(about = "Community moderation bot: anonymous venting, pronoun and colour roles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Discord token (overrides config and environment)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token),
        Commands::Version => {
            println!("haven-bot v{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::InitConfig => init_config(&cli.config),
    };
    std::process::exit(code);
}

fn load_config(config_path: &str, token_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(config_path).exists() {
        match Config::load(config_path) {
            Ok(mut config) => {
                config.apply_env();
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.discord.token = Some(token);
    }
    config
}

fn run_bot(config_path: &str, token_override: Option<String>) -> i32 {
    let config = load_config(config_path, token_override);

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return 1;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return 1;
        }
    };

    if config.discord.token.is_some() {
        rt.block_on(async {
            match discord::start_bot(&config).await {
                Ok(()) => 0,
                Err(e) => {
                    tracing::error!("Discord client stopped: {}", e);
                    1
                }
            }
        })
    } else {
        // Run console bot (dev mode)
        tracing::info!("No Discord token configured, starting console mode");
        rt.block_on(run_console_bot(config));
        0
    }
}

async fn run_console_bot(config: Config) {
    let dispatcher = MessageDispatcher::from_config(&config);
    let bot = ConsoleAdapter::new(config.discord.relay_channel_id.clone());
    let registry = MemoryRoleRegistry::new();

    tracing::info!("Starting console bot (dev mode): {}", bot.bot_info().name);
    println!(
        "haven-bot console. Commands start with `{}`, `/dm <text>` sends a direct message, Ctrl-D quits.",
        config.bot.prefix
    );

    let mut seq = 0u64;
    while let Some(line) = bot.read_line("> ").await {
        if line.is_empty() {
            continue;
        }
        seq += 1;
        let message = ConsoleAdapter::message_from_line(&line, seq);
        let dispatch = dispatcher.process(&bot, &registry, &message).await;
        tracing::debug!("{:?}", dispatch);
    }
}

fn init_config(path: &str) -> i32 {
    if std::path::Path::new(path).exists() {
        eprintln!("{} already exists, not overwriting", path);
        return 1;
    }

    let yaml = match Config::default().to_yaml() {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match std::fs::write(path, yaml) {
        Ok(()) => {
            println!("Wrote default config to {}", path);
            0
        }
        Err(e) => {
            eprintln!("Failed to write {}: {}", path, e);
            1
        }
    }
}
