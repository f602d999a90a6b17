//! Relay server configuration
//!
//! All settings come from environment variables and are read once at startup:
//!
//! | Variable                 | Default                 |
//! |--------------------------|-------------------------|
//! | `SOCKET_PORT`            | `4000`                  |
//! | `SOCKET_HOST`            | `0.0.0.0`               |
//! | `SOCKET_ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `SOCKET_CLIENT_BUFFER`   | `256`                   |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::{RelayError, RelayResult};

pub const DEFAULT_PORT: u16 = 4000;

/// Origins allowed to reach the relay from a browser
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000"];

/// Outbound frames buffered per connection before frames start dropping
pub const DEFAULT_CLIENT_BUFFER: usize = 256;

/// Runtime configuration for the relay server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub client_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            client_buffer: DEFAULT_CLIENT_BUFFER,
        }
    }
}

impl RelayConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> RelayResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("SOCKET_PORT") {
            config.port = port.trim().parse().map_err(|e| RelayError::Config {
                key: "SOCKET_PORT",
                reason: format!("{:?} is not a port number ({})", port, e),
            })?;
        }

        if let Some(host) = lookup("SOCKET_HOST") {
            config.host = host.trim().parse().map_err(|e| RelayError::Config {
                key: "SOCKET_HOST",
                reason: format!("{:?} is not an IP address ({})", host, e),
            })?;
        }

        if let Some(origins) = lookup("SOCKET_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if origins.is_empty() {
                return Err(RelayError::Config {
                    key: "SOCKET_ALLOWED_ORIGINS",
                    reason: "at least one origin is required".to_string(),
                });
            }
            config.allowed_origins = origins;
        }

        if let Some(buffer) = lookup("SOCKET_CLIENT_BUFFER") {
            config.client_buffer = match buffer.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(RelayError::Config {
                        key: "SOCKET_CLIENT_BUFFER",
                        reason: format!("{:?} is not a positive integer", buffer),
                    })
                }
            };
        }

        Ok(config)
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether a browser origin is on the allow-list
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.allowed_origins.iter().any(|o| o == origin)
    }
}
