mod preview;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "oppozite-cli")]
#[command(about = "Inspect social-preview metadata for Oppozite Wears pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Product and/or collection to resolve; the collection wins when both are set.
#[derive(Debug, Clone, Args, PartialEq, Eq)]
struct TargetArgs {
    /// Product handle (e.g., classic-hoodie)
    #[arg(long)]
    handle: Option<String>,
    /// Collection handle (e.g., winter)
    #[arg(long)]
    collection: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the resolved title, description and image as JSON
    Lookup {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Rewrite a base document and print the result
    Preview {
        #[command(flatten)]
        target: TargetArgs,
        /// Base HTML: a local file path or an http(s) URL
        #[arg(long, default_value = "dist/index.html")]
        base: String,
        /// Leave out the diagnostic comment
        #[arg(long)]
        no_trace: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = oppozite_core::load_app_config_from_env()?;
    // Logs go to stderr so preview output can be piped.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lookup { target } => preview::run_lookup(&config, &target.into()).await,
        Commands::Preview {
            target,
            base,
            no_trace,
        } => preview::run_preview(&config, &target.into(), &base, !no_trace).await,
    }
}

impl From<TargetArgs> for oppozite_core::MetaRequest {
    fn from(args: TargetArgs) -> Self {
        Self {
            handle: args.handle,
            collection_handle: args.collection,
        }
    }
}
