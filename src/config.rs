use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bucket: String,
    pub region: String,
    /// Custom S3-compatible endpoint; `None` uses AWS.
    pub endpoint_url: Option<String>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "S3-backed image gallery")]
pub struct Args {
    /// Host to bind to (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Bucket holding the gallery images (overrides S3_BUCKET_NAME)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Bucket region (overrides AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// S3-compatible endpoint such as a MinIO server (overrides AWS_ENDPOINT_URL)
    #[arg(long)]
    pub endpoint_url: Option<String>,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BUCKET: &str = "testing1-bucket01";
const DEFAULT_REGION: &str = "eu-north-1";

impl AppConfig {
    /// Parse process environment + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        Self::resolve(Args::parse(), |name| env::var(name).ok())
    }

    /// Merge CLI args over `lookup`'d environment values over defaults.
    pub fn resolve(args: Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // --- Environment fallback ---
        let env_host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let env_port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing PORT value `{}`", value))?,
            None => DEFAULT_PORT,
        };
        let env_bucket = lookup("S3_BUCKET_NAME").unwrap_or_else(|| DEFAULT_BUCKET.into());
        let env_region = lookup("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.into());
        let env_endpoint = lookup("AWS_ENDPOINT_URL").filter(|v| !v.is_empty());

        // --- Merge ---
        Ok(Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            bucket: args.bucket.unwrap_or(env_bucket),
            region: args.region.unwrap_or(env_region),
            endpoint_url: args.endpoint_url.or(env_endpoint),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
