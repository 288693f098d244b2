use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Command line and environment configuration of the relay.
#[derive(Debug, Clone, Parser)]
#[command(name = "rendezvous-server", version, about = "WebRTC signaling rendezvous relay")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origins. Any origin when unset or `*`.
    #[arg(long, env = "ALLOW_ORIGIN", value_delimiter = ',')]
    pub allow_origin: Vec<String>,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            allow_origin: Vec::new(),
        }
    }
}
