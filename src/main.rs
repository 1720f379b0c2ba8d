//! Operator CLI for the guide content client.
//!
//! ```text
//! guide-content [--config guide.toml] target
//! guide-content fetch restaurants --featured
//! guide-content fetch transportation --active --type bus
//! guide-content warm / /tours
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use guide_content::observability::logging;
use guide_content::{
    load_config, ContentClient, Envelope, ListFilter, PrefetchScheduler, RequestClient, Resource,
    TtlCache,
};

#[derive(Parser)]
#[command(name = "guide-content")]
#[command(about = "Inspect and warm the travel guide content backend", long_about = None)]
struct Cli {
    /// TOML config file, overlaid by GUIDE_* environment variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which backend deployment is targeted
    Target,
    /// Fetch a listing and print canonical records as JSON
    Fetch {
        /// tours, cultural-events, local-experiences, restaurants,
        /// transportation, support-locals or photo-challenges
        resource: Resource,
        #[arg(long)]
        active: bool,
        #[arg(long)]
        featured: bool,
        /// Type discriminator (transportation)
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Prefetch the listings behind routes (all routes when none given)
    Warm { routes: Vec<String> },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init_tracing(&config.observability.log_level);

    let client = RequestClient::new(&config)?;
    let cache = TtlCache::from_config(&config.cache);

    match cli.command {
        Commands::Target => {
            let target = client.target();
            println!("{} {}", target.name(), target.base_url());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fetch {
            resource,
            active,
            featured,
            kind,
        } => {
            let filter = ListFilter {
                active: active.then_some(true),
                featured: featured.then_some(true),
                kind,
            };
            let content = ContentClient::new(client, cache);
            match resource {
                Resource::Tours => print_envelope(content.tours(&filter).await),
                Resource::CulturalEvents => print_envelope(content.cultural_events(&filter).await),
                Resource::LocalExperiences => {
                    print_envelope(content.local_experiences(&filter).await)
                }
                Resource::Restaurants => print_envelope(content.restaurants(&filter).await),
                Resource::Transportation => print_envelope(content.transportation(&filter).await),
                Resource::SupportLocals => print_envelope(content.support_locals(&filter).await),
                Resource::PhotoChallenges => {
                    print_envelope(content.photo_challenges(&filter).await)
                }
            }
        }
        Commands::Warm { routes } => {
            let scheduler = PrefetchScheduler::new(client, cache, &config.prefetch);
            let routes: Vec<String> = if routes.is_empty() {
                scheduler.routes().paths().map(str::to_string).collect()
            } else {
                routes
            };

            for route in &routes {
                let statuses = scheduler.prefetch_route(route);
                tracing::info!(route = %route, ?statuses, "Prefetch requested");
            }
            scheduler.settle().await;

            println!(
                "warmed {} route(s), {} cache entries",
                routes.len(),
                scheduler.cache().len()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_envelope<T: Serialize>(
    envelope: Envelope<Vec<T>>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    if envelope.success {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "Error: {}",
            envelope.error.as_deref().unwrap_or("request failed")
        );
        Ok(ExitCode::FAILURE)
    }
}
