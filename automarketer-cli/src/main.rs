use clap::{Parser, Subcommand};

mod commands;

use commands::{run_generate, run_peak_hours, run_serve};

#[derive(Parser, Debug)]
#[command(name = "automarketer", version)]
#[command(about = "AutoMarketer - multi-provider marketing content generation and scheduling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the best post for a platform
    Generate {
        /// Target platform (twitter, linkedin, instagram, facebook, tiktok, blog, email)
        #[arg(long)]
        platform: String,
        /// Business name
        #[arg(long)]
        name: String,
        /// Business industry
        #[arg(long)]
        industry: String,
        /// Short business description
        #[arg(long)]
        description: Option<String>,
        /// Topic to write about
        #[arg(long)]
        topic: Option<String>,
        /// Output language
        #[arg(long, default_value = "English")]
        language: String,
        /// Print the full ranked outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Listen address, overrides AUTOMARKETER_BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Show the peak posting hours
    PeakHours {
        /// Only this platform, with its next peak time
        #[arg(long)]
        platform: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            platform,
            name,
            industry,
            description,
            topic,
            language,
            json,
        } => {
            let args = commands::GenerateArgs {
                platform,
                name,
                industry,
                description,
                topic,
                language,
                json,
            };
            run_generate(args).await
        }
        Commands::Serve { bind } => run_serve(bind.as_deref()).await,
        Commands::PeakHours { platform } => run_peak_hours(platform.as_deref()),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, code = e.error_code(), "Command failed");
        std::process::exit(1);
    }
}
