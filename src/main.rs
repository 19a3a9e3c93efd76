use clap::{Args, Parser, Subcommand};
use rvidgen::{
    generation::GenerationState,
    logger::{self, LogLevel, LoggerConfig},
    models::{
        available_models, clamp_duration, random_seed, GenerationParameters, MediaKind,
        ModelChoice, Quality, Style, VideoSize,
    },
    storage, AppConfig, SettingsStore, SubmitRejection, ValidationError, VideoGenerator,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "rvidgen", version, about = "Generate videos from text prompts")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one generation request and print the result.
    Generate(GenerateArgs),
    /// Save the API base URL and key.
    Configure {
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        api_key: String,
    },
    /// List the selectable models, sizes, qualities and styles.
    Catalog,
    /// Show where settings live and whether an API key is configured.
    Status,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(short, long)]
    prompt: String,
    #[arg(short, long, default_value_t = ModelChoice::default())]
    model: ModelChoice,
    /// Model id used when `--model custom` is selected.
    #[arg(long, default_value = "")]
    custom_model: String,
    #[arg(long, default_value_t = VideoSize::default())]
    size: VideoSize,
    #[arg(long, default_value_t = Quality::default())]
    quality: Quality,
    #[arg(short, long, default_value_t = rvidgen::models::DEFAULT_DURATION_SECONDS)]
    duration: u32,
    #[arg(long, default_value_t = Style::default())]
    style: Style,
    #[arg(long, conflicts_with = "random_seed")]
    seed: Option<u64>,
    #[arg(long)]
    random_seed: bool,
    /// Save the generated media into this directory.
    #[arg(long)]
    download: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level.unwrap_or(LogLevel::Warn)
    };
    logger::init_with_config(LoggerConfig::default().with_level(level))?;

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    let store = storage::open_store(&config)?;

    match cli.command {
        Command::Generate(args) => generate(args, &config, store.as_ref()).await,
        Command::Configure { base_url, api_key } => {
            let base_url = base_url.unwrap_or_else(|| store.load().base_url);
            let settings = storage::save_settings(store.as_ref(), &base_url, &api_key)?;
            println!("Saved settings for {} to {}", settings.base_url, store.describe());
            Ok(())
        }
        Command::Catalog => {
            print_catalog();
            Ok(())
        }
        Command::Status => {
            let settings = config.apply_to(store.load());
            println!("Settings: {}", store.describe());
            println!("Base URL: {}", settings.base_url);
            if settings.is_configured() {
                println!("API key:  {} (configured)", settings.masked_api_key());
            } else {
                println!("API key:  not configured");
            }
            Ok(())
        }
    }
}

async fn generate(
    args: GenerateArgs,
    config: &AppConfig,
    store: &dyn SettingsStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config.apply_to(store.load());

    let duration = clamp_duration(args.duration);
    if duration != args.duration {
        log::warn!(
            "⚠️  Duration {}s is out of range, using {}s",
            args.duration,
            duration
        );
    }

    let mut params = GenerationParameters {
        prompt: args.prompt,
        model: args.model,
        custom_model: args.custom_model,
        size: args.size,
        quality: args.quality,
        duration,
        style: args.style,
        seed: args.seed,
    };
    if args.random_seed {
        params.seed = Some(random_seed());
    }

    let mut generator = VideoGenerator::new();
    println!("Generating...");

    let state = match generator.submit(&settings, &params).await {
        Ok(state) => state.clone(),
        Err(SubmitRejection::Invalid(ValidationError::MissingCredential)) => {
            eprintln!("No API key configured. Run `rvidgen configure --api-key <KEY>` first.");
            process::exit(2);
        }
        Err(SubmitRejection::Invalid(ValidationError::EmptyPrompt)) => {
            eprintln!("{}", ValidationError::EmptyPrompt);
            process::exit(2);
        }
        Err(SubmitRejection::Busy) => {
            eprintln!("A generation is already in progress.");
            process::exit(1);
        }
    };

    match &state {
        GenerationState::Success(media) => {
            let kind = match media.kind {
                MediaKind::Video => "Video",
                MediaKind::Image => "Image",
            };
            println!("{}: {}", kind, media.url);
            if let Some(revised) = media.display_revised_prompt(params.prompt.trim()) {
                println!("Revised prompt: {}", revised);
            }
            if let Some(seed) = params.seed {
                println!("Seed: {}", seed);
            }

            if let Some(dir) = args.download.or_else(|| config.download_dir.clone()) {
                let path = generator.download_latest(&dir).await?;
                println!("Saved to {}", path.display());
            }
            Ok(())
        }
        GenerationState::Error { message } => {
            eprintln!("Generation failed: {}", message);
            process::exit(1);
        }
        GenerationState::Idle | GenerationState::Loading => {
            log::error!("❌ Generation ended in unexpected state: {}", state.label());
            process::exit(1);
        }
    }
}

fn print_catalog() {
    println!("Models:");
    for model in available_models() {
        println!("  {:<16} {}", model.id, model.label);
    }
    println!("Sizes:");
    for size in VideoSize::all() {
        println!("  {:<16} {}", size.as_str(), size.label());
    }
    println!("Qualities:");
    for quality in Quality::all() {
        println!("  {:<16} {}", quality.as_str(), quality.label());
    }
    println!("Styles:");
    for style in Style::all() {
        println!("  {:<16} {}", style.as_str(), style.label());
    }
}
