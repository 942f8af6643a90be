use anyhow::Context;
use clap::Parser;
use std::io;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wiki_navigator::clients::openai::models::OpenAIModel;
use wiki_navigator::clients::{ClientType, FlexibleClient, OpenAIConfig};
use wiki_navigator::config::AppConfig;
use wiki_navigator::console::Console;
use wiki_navigator::encyclopedia::WikipediaClient;
use wiki_navigator::Navigator;

#[derive(Parser)]
#[command(author, version, about = "Look up Wikipedia articles, get an AI summary and quiz yourself", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    OPENAI_API_KEY   API key for the summary and quiz service (also read from .env / openai_key.env)
    WIKI_LANG        Wikipedia language edition [default: de]
    QUIZ_LANGUAGE    Language of summaries and quiz questions [default: Deutsch]
    OPENAI_MODEL     Chat model id [default: gpt-5-nano]
    RUST_LOG         Log filter for diagnostics on stderr [default: warn]")]
struct Args {
    /// Wikipedia language edition, e.g. de or en
    #[arg(long)]
    lang: Option<String>,

    /// Language summaries and quiz questions are written in
    #[arg(long)]
    quiz_language: Option<String>,

    /// Chat model id
    #[arg(long)]
    model: Option<String>,

    /// Generative backend: openai or mock (offline, every summary fails) [default: openai]
    #[arg(long)]
    client: Option<String>,

    /// Request timeout for both services, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Output width in columns
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    // Loads .env and openai_key.env before any variable is read
    let mut config = AppConfig::from_env().with_terminal_width(args.width);
    config.request_timeout = Duration::from_secs(args.timeout_secs.max(1));
    if let Some(lang) = args.lang {
        config = config.with_wiki_language(lang);
    }
    if let Some(lang) = args.quiz_language {
        config.quiz_language = lang;
    }
    if let Some(model) = args.model {
        config = config.with_model(model);
    }

    let client_type = match args.client.as_deref() {
        Some(name) => name.parse::<ClientType>().map_err(anyhow::Error::msg)?,
        None => ClientType::default(),
    };
    info!(client = %client_type, model = %config.model, "starting");

    let client = match client_type {
        ClientType::OpenAI => FlexibleClient::openai(OpenAIConfig {
            model: OpenAIModel::from_id(&config.model),
            timeout: config.request_timeout,
            ..OpenAIConfig::default()
        })
        .context("creating OpenAI client")?,
        ClientType::Mock => {
            warn!("mock backend selected: summaries will show the apology text");
            FlexibleClient::mock().0
        }
    };
    let encyclopedia = WikipediaClient::new(&config.wiki_language, config.request_timeout)
        .context("creating Wikipedia client")?;

    let navigator = Navigator::new(encyclopedia, client, &config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config.terminal_width);
    if args.no_color {
        console = console.without_color();
    }
    console.run(&navigator).await.context("console I/O failed")?;
    Ok(())
}
