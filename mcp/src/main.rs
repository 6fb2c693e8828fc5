use clap::Parser;
use tracing_subscriber::EnvFilter;

use aegis_client::VALID_REGIONS;
use aegis_mcp_runtime::{McpServer, ServerConfig};

#[derive(Parser)]
#[command(
    name = "aegis-mcp",
    version,
    about = "Aegis One MCP server — platform API tools over stdio"
)]
struct Cli {
    /// Platform region the business is provisioned in (au, eu, in, jp, sg, us, mea)
    #[arg(long, env = "AEGIS_REGION")]
    region: Option<String>,

    /// API host override, mutually exclusive with --region
    #[arg(long, env = "AEGIS_HOST")]
    host: Option<String>,

    /// Register write tools in addition to the read-only surface
    #[arg(long, env = "AEGIS_MCP_ALLOW_WRITE")]
    allow_write: bool,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // stdout is reserved for protocol traffic.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let api_key = match std::env::var("AEGIS_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            tracing::error!("AEGIS_API_KEY must be set");
            std::process::exit(2);
        }
    };

    if let Some(region) = cli.region.as_deref() {
        if !VALID_REGIONS.contains(&region) {
            tracing::error!(region, valid = %VALID_REGIONS.join(", "), "unknown region");
            std::process::exit(2);
        }
    }

    let server = match McpServer::new(ServerConfig {
        api_key,
        region: cli.region,
        host: cli.host,
        allow_write: cli.allow_write,
    }) {
        Ok(server) => server,
        Err(err) => {
            tracing::error!(error = %err, "failed to start MCP server");
            std::process::exit(2);
        }
    };

    if let Err(message) = server.serve_stdio().await {
        tracing::error!(%message, "MCP server terminated");
        std::process::exit(1);
    }
}
