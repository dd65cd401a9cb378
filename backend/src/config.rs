use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

/// Server settings, read from `MARKETPLACE_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Origin the frontend dev server runs on, allowed through CORS
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable lookup; unset variables keep
    /// their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("MARKETPLACE_HOST") {
            config.host = host
                .parse()
                .with_context(|| format!("invalid MARKETPLACE_HOST: {}", host))?;
        }
        if let Some(port) = lookup("MARKETPLACE_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid MARKETPLACE_PORT: {}", port))?;
        }
        if let Some(origin) = lookup("MARKETPLACE_ALLOWED_ORIGIN") {
            config.allowed_origin = origin;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(|name| match name {
            "MARKETPLACE_HOST" => Some("0.0.0.0".to_string()),
            "MARKETPLACE_PORT" => Some("8081".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8081");
        assert_eq!(config.allowed_origin, "http://localhost:8080");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = ServerConfig::from_lookup(|name| {
            (name == "MARKETPLACE_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }
}
