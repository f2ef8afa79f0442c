//! Command-line and environment configuration.
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// How log events are written to stdout.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Serves an in-memory catalogue of books and authors over GraphQL.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub(crate) struct Config {
    /// IP address to listen on.
    #[arg(long, env = "BOOKSHELF_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub(crate) host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "BOOKSHELF_PORT", default_value_t = 4000)]
    pub(crate) port: u16,

    /// Do not serve the GraphiQL explorer on `GET /graphql`.
    #[arg(long, env = "BOOKSHELF_NO_GRAPHIQL")]
    pub(crate) no_graphiql: bool,

    /// Log output format. The filter itself is read from `RUST_LOG`.
    #[arg(long, env = "BOOKSHELF_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub(crate) log_format: LogFormat,
}

impl Config {
    /// The socket address to bind.
    pub(crate) const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether `GET /graphql` serves the explorer.
    pub(crate) const fn graphiql(&self) -> bool {
        !self.no_graphiql
    }
}
