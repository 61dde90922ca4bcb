use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pressclip_core::AppConfig;
use pressclip_fetch::{FetchConfig, HttpExpander, Pipeline, QueryExpander};
use pressclip_store::{ArticleStore, PgStore, PoolConfig};

#[derive(Debug, Parser)]
#[command(name = "pressclip")]
#[command(about = "News clipping: fetch, dedupe, and enrich articles per client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch news from all sources for every configured client.
    Fetch {
        /// Restrict the run to one client, by slug.
        #[arg(long)]
        client: Option<String>,
    },
    /// List the configured clients and their slugs.
    Clients,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pressclip_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch { client } => fetch(&config, client.as_deref()).await,
        Commands::Clients => list_clients(&config),
    }
}

async fn fetch(config: &AppConfig, filter: Option<&str>) -> anyhow::Result<()> {
    let clients = pressclip_core::load_clients(&config.clients_path)?.clients;

    let pool = pressclip_store::connect_pool(&config.database_url, PoolConfig::default()).await?;
    pressclip_store::run_migrations(&pool).await?;
    let store: Arc<dyn ArticleStore> = Arc::new(PgStore::new(pool));

    let expander: Option<Arc<dyn QueryExpander>> = match config.expander_url.as_deref() {
        Some(url) => Some(Arc::new(HttpExpander::new(
            url,
            config.request_timeout_secs,
        )?)),
        None => None,
    };

    let pipeline = Pipeline::new(FetchConfig::from_app(config), store, expander)?;
    let report = pipeline.run(&clients, filter).await;

    for client_report in &report.clients {
        for source in &client_report.sources {
            match &source.outcome {
                Ok(count) => {
                    println!(
                        "{} • {}: {count} novas",
                        client_report.client, source.source
                    );
                }
                Err(e) => {
                    println!("{} • {} erro: {e}", client_report.client, source.source);
                }
            }
        }
        println!(
            "{}: total inseridas {} notícias",
            client_report.client, client_report.total
        );
    }
    println!("Geral: {} notícias inseridas", report.total);

    Ok(())
}

fn list_clients(config: &AppConfig) -> anyhow::Result<()> {
    let clients = pressclip_core::load_clients(&config.clients_path)?.clients;
    for client in &clients {
        println!("{}  ({})", client.name, client.slug());
    }
    Ok(())
}
