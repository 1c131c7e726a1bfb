//! userapi: HTTP CRUD service for users backed by SQLite

mod tracing_setup;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use userapi_server::config::{DEFAULT_DATABASE_PATH, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use userapi_server::{DatabaseConfig, ServerConfig};

use crate::tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(name = "userapi", version, about = "HTTP CRUD service for users")]
struct Cli {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "USERAPI_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "USERAPI_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Path to the SQLite database holding the users table
    #[arg(long, env = "USERAPI_DB_PATH", default_value = DEFAULT_DATABASE_PATH)]
    db_path: PathBuf,

    /// Maximum pooled database connections
    #[arg(long, env = "USERAPI_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    /// Allow any CORS origin instead of localhost only
    #[arg(long, env = "USERAPI_CORS_PERMISSIVE")]
    cors_permissive: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
            database: DatabaseConfig {
                max_connections: self.max_connections,
                ..DatabaseConfig::new(&self.db_path)
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config = cli.server_config();
    tracing::info!(
        addr = %config.bind_addr,
        db = %config.database.path.display(),
        "starting userapi"
    );

    userapi_server::serve(config)
        .await
        .context("userapi server failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_server_config() {
        let cli = Cli::try_parse_from([
            "userapi",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--db-path",
            "/tmp/u.db",
            "--max-connections",
            "2",
            "--cors-permissive",
        ])
        .unwrap();

        let config = cli.server_config();
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.database.path, PathBuf::from("/tmp/u.db"));
        assert_eq!(config.database.max_connections, 2);
        assert!(config.cors_permissive);
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
