use base64::{engine::general_purpose, Engine as _};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Identity provider project id; overrides the credentials blob when set
    pub project_id: Option<String>,
    /// Base64-encoded JSON service credentials from the identity provider
    pub credentials_b64: Option<String>,
    /// Endpoint serving the provider's current token-signing keys (JWK set)
    pub jwk_url: String,
    /// How long fetched signing keys stay valid before a refetch
    pub key_ttl_secs: u64,
}

/// Service credentials blob issued by the identity provider, delivered to the
/// process as base64-encoded JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    pub project_id: String,
    pub client_email: Option<String>,
}

const DEFAULT_JWK_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // API overrides
        if let Ok(v) = env::var("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }

        // Identity overrides
        if let Ok(v) = env::var("IDENTITY_PROJECT_ID") {
            self.identity.project_id = Some(v);
        }
        if let Ok(v) = env::var("IDENTITY_CREDENTIALS_B64") {
            self.identity.credentials_b64 = Some(v);
        }
        if let Ok(v) = env::var("IDENTITY_JWK_URL") {
            self.identity.jwk_url = v;
        }
        if let Ok(v) = env::var("IDENTITY_KEY_TTL_SECS") {
            self.identity.key_ttl_secs = v.parse().unwrap_or(self.identity.key_ttl_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            api: ApiConfig { port: 5000 },
            identity: IdentityConfig {
                project_id: None,
                credentials_b64: None,
                jwk_url: DEFAULT_JWK_URL.to_string(),
                key_ttl_secs: 3600,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            api: ApiConfig { port: 5000 },
            identity: IdentityConfig {
                project_id: None,
                credentials_b64: None,
                jwk_url: DEFAULT_JWK_URL.to_string(),
                key_ttl_secs: 3600,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            api: ApiConfig { port: 5000 },
            identity: IdentityConfig {
                project_id: None,
                credentials_b64: None,
                jwk_url: DEFAULT_JWK_URL.to_string(),
                key_ttl_secs: 3600,
            },
        }
    }
}

impl IdentityConfig {
    /// Resolve the provider project id: an explicit override wins, otherwise
    /// it is read out of the base64 credentials blob
    pub fn resolve_project_id(&self) -> Option<String> {
        if let Some(id) = &self.project_id {
            return Some(id.clone());
        }
        self.credentials_b64
            .as_deref()
            .and_then(|blob| decode_service_credentials(blob).ok())
            .map(|creds| creds.project_id)
    }
}

/// Decode the provider's base64-encoded JSON service credentials
pub fn decode_service_credentials(blob: &str) -> Result<ServiceCredentials, String> {
    let bytes = general_purpose::STANDARD
        .decode(blob.trim())
        .map_err(|e| format!("invalid base64 in service credentials: {}", e))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| format!("invalid JSON in service credentials: {}", e))
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.identity.project_id.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.database.connect_timeout_secs, 5);
    }

    #[test]
    fn test_decode_service_credentials() {
        let blob = general_purpose::STANDARD
            .encode(r#"{"project_id":"educircle-prod","client_email":"svc@educircle-prod.iam.gserviceaccount.com"}"#);
        let creds = decode_service_credentials(&blob).unwrap();
        assert_eq!(creds.project_id, "educircle-prod");
        assert_eq!(
            creds.client_email.as_deref(),
            Some("svc@educircle-prod.iam.gserviceaccount.com")
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_service_credentials("not-base64!!!").is_err());

        let blob = general_purpose::STANDARD.encode("not json");
        assert!(decode_service_credentials(&blob).is_err());
    }

    #[test]
    fn test_resolve_project_id_prefers_override() {
        let mut identity = AppConfig::development().identity;
        identity.credentials_b64 =
            Some(general_purpose::STANDARD.encode(r#"{"project_id":"from-blob"}"#));
        assert_eq!(identity.resolve_project_id().as_deref(), Some("from-blob"));

        identity.project_id = Some("explicit".to_string());
        assert_eq!(identity.resolve_project_id().as_deref(), Some("explicit"));
    }
}
