//! Server configuration.
//!
//! Loaded from a TOML file (default `fhirgraph.toml`), with every section
//! optional. The binary applies CLI/environment overrides on top.

use std::path::Path;

use anyhow::Context;
use fhirgraph_graphql::GraphQLConfig;
use fhirgraph_model::FhirRelease;
use serde::{Deserialize, Serialize};

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// FHIR settings.
    #[serde(default)]
    pub fhir: FhirConfig,

    /// GraphQL layer settings.
    #[serde(default)]
    pub graphql: GraphQLConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpConfig {
    /// The bind address as `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// FHIR settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FhirConfig {
    /// The FHIR release served by this process.
    #[serde(default)]
    pub release: FhirRelease,
}

impl ServerConfig {
    /// Loads configuration from a TOML file. A missing file yields the
    /// defaults; a malformed file is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.graphql
            .validate()
            .map_err(|message| anyhow::anyhow!(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.fhir.release, FhirRelease::R4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 4000

            [fhir]
            release = "1.0.2"

            [graphql]
            max_depth = 10
            introspection = false
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:4000");
        assert_eq!(config.fhir.release, FhirRelease::Dstu2);
        assert_eq!(config.graphql.max_depth, 10);
        assert!(!config.graphql.introspection);
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let config = ServerConfig::load(Path::new("/nonexistent/fhirgraph.toml")).unwrap();
        assert_eq!(config.fhir.release, FhirRelease::R4);
    }
}
