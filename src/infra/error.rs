use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("failed to connect to the link store: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to apply link store migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to bind GraphQL listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("`{key}` must be configured to {purpose}")]
    MissingSetting {
        key: &'static str,
        purpose: &'static str,
    },
}

impl InfraError {
    pub fn missing_setting(key: &'static str, purpose: &'static str) -> Self {
        Self::MissingSetting { key, purpose }
    }

    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
