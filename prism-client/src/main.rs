use anyhow::{Context, Result};
use clap::Parser;
use prism_client::{Client, ClientConfig, MultiSearchParams, SearchOptions, SearchRequestList};
use std::io::Read;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "prism-msearch")]
#[command(about = "Run a multi-search against a Typesense-compatible server")]
#[command(version)]
struct Cli {
    /// JSON file with `{"searches": [...]}` (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Client config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server URL (overrides PRISM_CLIENT_URL)
    #[arg(long)]
    url: Option<String>,

    /// API key (overrides PRISM_CLIENT_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Merge all searches into one result set
    #[arg(long, conflicts_with = "content_type")]
    union: bool,

    /// Send the body with this content type and print the raw response
    #[arg(long)]
    content_type: Option<String>,

    /// Fields to search, applied to every search
    #[arg(long)]
    query_by: Option<String>,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    per_page: Option<u32>,

    /// Let the server cache results
    #[arg(long)]
    use_cache: bool,
}

impl Cli {
    /// Config file, then environment, then flags
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        }
        .apply_env();
        if let Some(url) = &self.url {
            config.server_url = url.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = key.clone();
        }
        Ok(config)
    }

    fn common_params(&self) -> MultiSearchParams {
        MultiSearchParams {
            options: SearchOptions {
                query_by: self.query_by.clone(),
                page: self.page,
                per_page: self.per_page,
                use_cache: self.use_cache.then_some(true),
                ..Default::default()
            },
            x_typesense_api_key: None,
        }
    }

    fn read_searches(&self) -> Result<SearchRequestList> {
        let raw = match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        serde_json::from_str(&raw).context("Invalid search request list")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = Client::new(cli.client_config()?)?;
    let searches = cli.read_searches()?;
    let common = cli.common_params();

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling request");
            on_signal.cancel();
        }
    });

    tracing::info!("Running {} searches", searches.searches.len());
    let multi_search = client.multi_search();

    let output = if let Some(content_type) = &cli.content_type {
        let response = multi_search
            .perform_with_content_type(&cancel, &common, &searches, content_type)
            .await?;
        tracing::info!("Server responded with {}", response.status);
        let body = response.body.unwrap_or_default();
        String::from_utf8_lossy(&body).into_owned()
    } else if cli.union {
        let result = multi_search.perform_union(&cancel, &common, &searches).await?;
        serde_json::to_string_pretty(&result)?
    } else {
        let result = multi_search.perform(&cancel, &common, &searches).await?;
        serde_json::to_string_pretty(&result)?
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_common_params_from_flags() {
        let cli = Cli::try_parse_from([
            "prism-msearch",
            "--query-by",
            "name,brand",
            "--page",
            "2",
            "--per-page",
            "25",
            "--use-cache",
        ])
        .unwrap();

        let params = cli.common_params();
        assert_eq!(params.options.query_by.as_deref(), Some("name,brand"));
        assert_eq!(params.options.page, Some(2));
        assert_eq!(params.options.per_page, Some(25));
        assert_eq!(params.options.use_cache, Some(true));
        assert_eq!(params.x_typesense_api_key, None);
    }

    #[test]
    fn test_common_params_default_to_unset() {
        let cli = Cli::try_parse_from(["prism-msearch", "searches.json"]).unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("searches.json")));
        assert_eq!(cli.common_params(), MultiSearchParams::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("client.toml");
        let toml = concat!(
            "server_url = \"http://from-file:8108\"\n",
            "api_key = \"file-key\"\n",
            "request_timeout_ms = 750\n",
        );
        std::fs::write(&path, toml).unwrap();

        let cli = Cli::try_parse_from([
            "prism-msearch",
            "--config",
            path.to_str().unwrap(),
            "--url",
            "http://from-flag:8108",
            "--api-key",
            "flag-key",
        ])
        .unwrap();

        let config = cli.client_config().unwrap();
        assert_eq!(config.server_url, "http://from-flag:8108");
        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.request_timeout(), Duration::from_millis(750));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.toml");
        let args = ["prism-msearch", "--config", path.to_str().unwrap()];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.client_config().is_err());
    }

    #[test]
    fn test_union_conflicts_with_content_type() {
        let args = ["prism-msearch", "--union", "--content-type", "text/plain"];
        let err = Cli::try_parse_from(args).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
