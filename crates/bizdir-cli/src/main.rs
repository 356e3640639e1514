mod ingest;
mod search;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::ingest::IngestArgs;

#[derive(Debug, Parser)]
#[command(name = "bizdir-cli")]
#[command(about = "Business directory command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import places from the Google Places API into the directory
    Ingest(IngestArgs),
    /// Search stored businesses, newest first
    Search {
        /// Substring of the business name
        #[arg(long)]
        name: Option<String>,

        /// Substring of the city
        #[arg(long)]
        city: Option<String>,

        /// Substring of the category label
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of rows to print
        #[arg(long, default_value_t = 6)]
        limit: i64,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("bizdir-cli: run with --help to list commands");
        return Ok(());
    };

    let config = bizdir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Ingest(args) => ingest::run_ingest(&config, &args).await?,
        Commands::Search {
            name,
            city,
            category,
            limit,
        } => {
            let pool = connect(&config).await?;
            search::run_search(
                &pool,
                bizdir_db::BusinessSearch {
                    name,
                    city,
                    category,
                    limit: limit.clamp(1, 200),
                },
            )
            .await?;
        }
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    bizdir_db::ping(&pool).await.context("database ping failed")?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = bizdir_db::run_migrations(&pool)
                        .await
                        .context("failed to apply migrations")?;
                    println!("migrations applied: {applied}");
                }
            }
        }
    }

    Ok(())
}

pub(crate) async fn connect(config: &bizdir_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = bizdir_db::PoolConfig::from_app_config(config);
    bizdir_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("failed to connect to database")
}

#[cfg(test)]
mod tests;
