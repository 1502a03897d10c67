//! One-shot fix-up: point one category at a new hero image.
//!
//! Addressed by slug; an unknown slug is an error and exits 1. No other
//! field is touched.

use std::env;
use std::io;

use backend::domain::ports::CategoryRepository;
use backend::outbound::persistence::{DbPool, DieselCategoryRepository, PoolSettings};
use clap::Parser;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

/// `patch-category-image` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "patch-category-image",
    about = "Replace one category's image URL, addressed by slug",
    version
)]
struct CliArgs {
    /// Slug of the category to patch.
    #[arg(long, value_name = "slug")]
    slug: String,
    /// New image URL.
    #[arg(long = "image-url", value_name = "url", value_parser = parse_image_url)]
    image_url: Url,
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

    let repository = DieselCategoryRepository::new(pool);
    repository
        .update_image(&args.slug, args.image_url.as_str())
        .await
        .map_err(|error| io::Error::other(format!("patch failed: {error}")))?;

    println!("category={}", args.slug);
    println!("image_url={}", args.image_url);
    Ok(())
}

fn parse_image_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|error| format!("invalid image URL: {error}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err("image URL must use http or https".to_owned());
    }
    Ok(url)
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

#[cfg(test)]
mod tests {
    //! Unit tests for CLI helpers.

    use rstest::rstest;

    use super::parse_image_url;

    #[rstest]
    fn https_urls_are_accepted() {
        let url = parse_image_url("https://cdn.montura.example/cat.jpg").expect("valid url");
        assert_eq!(url.as_str(), "https://cdn.montura.example/cat.jpg");
    }

    #[rstest]
    #[case("not a url")]
    #[case("ftp://cdn.montura.example/cat.jpg")]
    fn other_schemes_and_garbage_are_rejected(#[case] raw: &str) {
        parse_image_url(raw).expect_err("must be rejected");
    }
}
