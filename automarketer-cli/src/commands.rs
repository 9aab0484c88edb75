//! Subcommand implementations.

use automarketer_core::{BusinessContext, ConfigError, GenerationRequest, Platform};
use automarketer_http::{AppState, HttpConfig, HttpConfigBuilder, ServerError, config::parse_addr};
use automarketer_publish::{PeakHours, PublishConfig};
use automarketer_router::{ContentRouter, RouterError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CONFIG_ERROR",
            CliError::Router(err) => err.error_code(),
            CliError::Server(_) => "SERVER_ERROR",
            CliError::Output(_) => "OUTPUT_ERROR",
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct GenerateArgs {
    pub platform: String,
    pub name: String,
    pub industry: String,
    pub description: Option<String>,
    pub topic: Option<String>,
    pub language: String,
    pub json: bool,
}

impl GenerateArgs {
    fn request(&self) -> GenerationRequest {
        let mut business = BusinessContext::new(self.name.as_str(), self.industry.as_str());
        if let Some(description) = &self.description {
            business = business.with_description(description.as_str());
        }
        let mut request = GenerationRequest::new(Platform::parse(&self.platform), business)
            .with_language(self.language.as_str());
        if let Some(topic) = &self.topic {
            request = request.with_topic(topic.as_str());
        }
        request
    }
}

pub async fn run_generate(args: GenerateArgs) -> CliResult<()> {
    let router = ContentRouter::from_env()?;
    let outcome = router.generate_best(&args.request()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("{}", outcome.best_content);
    println!();
    println!(
        "best: {} (score {:.1})",
        outcome.best_model.id(),
        outcome.best_score
    );
    for entry in &outcome.comparison {
        println!("  {:<12} {:>5.1}", entry.model.id(), entry.score);
    }
    Ok(())
}

pub async fn run_serve(bind: Option<&str>) -> CliResult<()> {
    let mut builder = HttpConfigBuilder::from_env()?;
    if let Some(bind) = bind {
        builder = builder.bind_addr(parse_addr("--bind", bind)?);
    }
    let config: HttpConfig = builder.build()?;

    let state = AppState::from_env()?;
    tracing::info!(
        providers = state.providers.len(),
        bind = %config.bind_addr,
        "Starting AutoMarketer API"
    );
    automarketer_http::serve(config, state).await?;
    Ok(())
}

pub fn run_peak_hours(platform: Option<&str>) -> CliResult<()> {
    let config = PublishConfig::from_env()?;
    let peaks = PeakHours::load(&config.peak_hours_path);

    match platform {
        Some(name) => {
            let platform = Platform::parse(name);
            let next = peaks.next_peak_time(&platform, chrono::Utc::now());
            println!("{}: {:?}", platform.id(), peaks.hours(&platform));
            println!("next peak: {}", next.to_rfc3339());
        }
        None => println!("{}", serde_json::to_string_pretty(peaks.as_map())?),
    }
    Ok(())
}
