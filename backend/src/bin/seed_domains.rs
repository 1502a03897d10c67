//! Seed the domain attribute table from the fixed reference catalog.
//!
//! Safe to run repeatedly: every record is a natural-key upsert and rows
//! outside the catalog are never touched. The run aborts on the first
//! failure with exit code 1; records applied before the failure stay
//! applied, and a rerun after the fix converges on the same final state.

use std::env;
use std::io;
use std::sync::Arc;

use backend::domain::DomainSeeder;
use backend::outbound::persistence::{DbPool, DieselAttributeRepository, PoolSettings};
use clap::Parser;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

/// `seed-domains` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-domains",
    about = "Idempotently seed the eyewear attribute lookup table",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::connect(PoolSettings::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let repository = Arc::new(DieselAttributeRepository::new(pool));
    let seeder = DomainSeeder::new(repository);
    let records = attribute_catalog::reference_attributes();

    let report = seeder
        .seed(records)
        .await
        .map_err(|error| io::Error::other(format!("seeding failed: {error}")))?;

    println!("applied={}", report.applied);
    println!("total={}", report.total);
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
