use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linebot")]
#[command(about = "LINE product search bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a default config file. Credentials are read from the environment (LINE_BOT_CHANNEL_SECRET, LINE_BOT_CHANNEL_TOKEN, RAKUTEN_APPID, RAKUTEN_AFID) or the config file.
    Init {
        /// Config file path (default: LINEBOT_CONFIG_PATH or ~/.linebot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Run the webhook server. LINE must be configured to POST to /callback.
    Serve {
        /// Config file path (default: LINEBOT_CONFIG_PATH or ~/.linebot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// HTTP port (default from config or 3000)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Search Rakuten for a keyword and print the Flex message the bot would reply with. Does not contact LINE.
    Search {
        /// Keyword, as a user would type it
        keyword: String,

        /// Config file path (default: LINEBOT_CONFIG_PATH or ~/.linebot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("linebot {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve { config, port }) => {
            if let Err(e) = run_serve(config, port).await {
                log::error!("serve failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Search { keyword, config }) => {
            if let Err(e) = run_search(config, &keyword).await {
                log::error!("search failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(linebot::config::default_config_path);
    let dir = linebot::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

async fn run_serve(
    config_path: Option<std::path::PathBuf>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let (mut config, path) = linebot::config::load_config(config_path)?;
    if let Some(p) = port {
        config.server.port = p;
    }
    log::info!(
        "starting gateway on {}:{} (config: {})",
        config.server.bind,
        config.server.port,
        path.display()
    );
    linebot::gateway::run_gateway(config).await
}

async fn run_search(config_path: Option<std::path::PathBuf>, keyword: &str) -> anyhow::Result<()> {
    let (config, _) = linebot::config::load_config(config_path)?;
    let application_id = linebot::config::resolve_rakuten_application_id(&config).ok_or_else(|| {
        anyhow::anyhow!(
            "Rakuten application id not configured (set {} or rakuten.applicationId)",
            linebot::config::ENV_RAKUTEN_APP_ID
        )
    })?;
    let client = linebot::rakuten::RakutenClient::new(
        application_id,
        linebot::config::resolve_rakuten_affiliate_id(&config),
        config.rakuten.api_base_url.clone(),
    );
    let message = linebot::webhook::search_and_create_message(&client, keyword).await?;
    println!("{}", serde_json::to_string_pretty(&message)?);
    Ok(())
}
