use crate::auth::JwtIdentityProvider;
use access_guard::{AccessGuard, IdentityProvider};
use document_store::StoreClient;
use records_dal::RecordsDal;
use std::sync::Arc;

/// Main MediTrack server state, cloned into every handler
#[derive(Clone)]
pub struct MediTrackServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Document store client
    pub store: StoreClient,
    /// Typed data access layer over the store
    pub dal: RecordsDal,
    /// Role policy guard consulted before every DAL call
    pub guard: AccessGuard,
    /// Identity provider resolving bearer tokens to profiles
    pub identity: Arc<dyn IdentityProvider>,
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Service name reported by the health endpoint
    pub service_name: String,
    /// HMAC secret for bearer token verification
    pub jwt_secret: String,
}

impl ServerConfig {
    /// Reads configuration from the environment, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development default");
            default_jwt_secret()
        });
        let service_name = std::env::var("MEDITRACK_SERVICE_NAME")
            .unwrap_or_else(|_| "MediTrack".to_string());

        Self {
            service_name,
            jwt_secret,
        }
    }

    /// Override the reported service name
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Override the token verification secret
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service_name: "MediTrack".to_string(),
            jwt_secret: default_jwt_secret(),
        }
    }
}

// Secrets stay out of Debug output
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("service_name", &self.service_name)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

fn default_jwt_secret() -> String {
    "meditrack-dev-secret-change-in-production".to_string()
}

impl MediTrackServer {
    /// Create a server backed by the in-memory document store
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, StoreClient::in_memory())
    }

    /// Create a server over an explicit store client.
    ///
    /// Tests inject instrumented backends through this constructor.
    pub fn with_store(config: ServerConfig, store: StoreClient) -> Self {
        let dal = RecordsDal::new(store.clone());
        let identity: Arc<dyn IdentityProvider> = Arc::new(JwtIdentityProvider::new(
            config.jwt_secret.as_bytes(),
            dal.clone(),
        ));

        Self {
            config,
            store,
            dal,
            guard: AccessGuard::new(),
            identity,
        }
    }

    /// Swap the identity provider, keeping the store and guard
    pub fn with_identity_provider(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_secret() {
        let config = ServerConfig {
            service_name: "MediTrack".into(),
            jwt_secret: "super-secret".into(),
        };
        let printed = format!("{config:?}");
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn server_wires_the_dal_to_the_same_store() {
        let server = MediTrackServer::new(ServerConfig::default());
        assert_eq!(server.config.service_name, "MediTrack");
    }

    #[test]
    fn builders_override_the_defaults() {
        let config = ServerConfig::default()
            .with_service_name("MediTrack QA")
            .with_jwt_secret("qa-secret");
        assert_eq!(config.service_name, "MediTrack QA");
        assert_eq!(config.jwt_secret, "qa-secret");
    }
}
