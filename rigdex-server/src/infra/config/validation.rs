use axum::http::HeaderValue;
use thiserror::Error;

use super::models::{Config, CorsConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS origin '{origin}'")]
    InvalidCorsOrigin { origin: String },
    #[error("database min_connections ({min}) exceeds max_connections ({max})")]
    PoolBounds { min: u32, max: u32 },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if !config.dev_mode && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::DangerousCorsWildcard);
    }
    validate_cors(&config.cors)?;
    if !config.dev_mode && config.cors.allowed_origins.is_empty() {
        warnings.push_with_hint(
            "No CORS origins configured; cross-origin requests will be refused",
            "Set CORS_ALLOWED_ORIGINS or [cors].allowed_origins",
        );
    }

    if let (Some(min), Some(max)) = (
        config.database.min_connections,
        config.database.max_connections,
    ) && min > max
    {
        return Err(ConfigGuardRailError::PoolBounds { min, max });
    }

    if config.database.primary_url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; only the in-memory store is available",
            "Set DATABASE_URL or [database].url, or start with --in-memory",
        );
    }

    Ok(warnings)
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    for origin in &cors.allowed_origins {
        let trimmed = origin.trim();
        if trimmed == "*" {
            continue;
        }
        let invalid = || ConfigGuardRailError::InvalidCorsOrigin {
            origin: origin.clone(),
        };
        let parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
        // An origin is a bare scheme://host[:port]
        if !matches!(parsed.scheme(), "http" | "https")
            || parsed.host_str().is_none()
            || parsed.path() != "/"
            || parsed.query().is_some()
            || parsed.fragment().is_some()
            || trimmed.ends_with('/')
        {
            return Err(invalid());
        }
        HeaderValue::from_str(trimmed).map_err(|_| invalid())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::models::{
        ConfigMetadata, DatabaseConfig, ServerConfig,
    };

    fn config(dev_mode: bool, origins: &[&str]) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8080,
            },
            database: DatabaseConfig::default(),
            cors: CorsConfig {
                allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            },
            dev_mode,
            metadata: ConfigMetadata::default(),
        }
    }

    #[test]
    fn well_formed_origins_pass() {
        let config =
            config(false, &["http://localhost:5173", "https://rigdex.example:8443"]);
        assert!(apply_guard_rails(&config).is_ok());
    }

    #[test]
    fn origins_that_cannot_match_are_rejected() {
        for origin in [
            "localhost:5173",
            "ftp://files.example",
            "http://rigdex.example/app",
            "http://rigdex.example/",
            "http://rigdex.example?x=1",
            "not an origin",
        ] {
            let err = apply_guard_rails(&config(false, &[origin])).unwrap_err();
            assert!(
                matches!(err, ConfigGuardRailError::InvalidCorsOrigin { .. }),
                "{origin}"
            );
        }
    }

    #[test]
    fn empty_origin_list_warns_outside_dev_mode() {
        let warnings = apply_guard_rails(&config(false, &[])).unwrap();
        assert!(
            warnings
                .items
                .iter()
                .any(|warning| warning.message.contains("CORS"))
        );

        let dev = apply_guard_rails(&config(true, &[])).unwrap();
        assert!(!dev.items.iter().any(|warning| warning.message.contains("CORS")));
    }
}
