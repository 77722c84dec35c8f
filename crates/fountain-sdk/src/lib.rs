//! Fountain SDK - HTTP status provider for the Fountain stablecoin API
//!
//! This crate implements exactly one capability of the Fountain API client:
//! reading the temporary-wallet status of a mint operation. It plugs into
//! [`fountain_monitor::DepositMonitor`] as a [`StatusProvider`].
//!
//! Authentication is the caller's business: pass a JWT obtained elsewhere
//! with [`FountainClient::with_token`]. The client neither stores nor
//! refreshes it.
//!
//! # Quick Start
//!
//! ```ignore
//! use fountain_sdk::FountainClient;
//! use fountain_types::OperationId;
//!
//! let client = FountainClient::connect("http://localhost:3000")?.with_token(jwt);
//! let status = client.temp_wallet_status(&OperationId::parse(&op_id)?).await?;
//! println!("{}% deposited into {}", status.progress_percent, status.address);
//! ```

pub mod wire;

pub use fountain_types::*;

use async_trait::async_trait;
use fountain_monitor::StatusProvider;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;
use wire::{ErrorBody, TempWalletResponse};

// ============================================================================
// Error Types
// ============================================================================

/// SDK-specific errors
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Fountain error: {0}")]
    Fountain(#[from] FountainError),
}

/// SDK Result type
pub type SdkResult<T> = std::result::Result<T, SdkError>;

impl From<SdkError> for FountainError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::ConnectionFailed(message) => FountainError::network(message),
            SdkError::ApiError { status, message } => FountainError::from_status(status, message),
            SdkError::NetworkError(e) if e.is_decode() => FountainError::decode(e.to_string()),
            SdkError::NetworkError(e) => FountainError::network(e.to_string()),
            SdkError::SerializationError(e) => FountainError::decode(e.to_string()),
            SdkError::ConfigError(reason) => FountainError::invalid_input("config", reason),
            SdkError::Fountain(e) => e,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// SDK configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API endpoint
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the Fountain operations API
#[derive(Clone)]
pub struct FountainClient {
    config: Arc<Config>,
    base: Url,
    client: Client,
}

impl FountainClient {
    /// Connect to a local Fountain API
    pub fn local() -> SdkResult<Self> {
        Self::connect(DEFAULT_ENDPOINT)
    }

    /// Connect to a specific endpoint
    pub fn connect(endpoint: &str) -> SdkResult<Self> {
        let config = Config {
            endpoint: endpoint.to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: Config) -> SdkResult<Self> {
        let base = Url::parse(config.endpoint.trim_end_matches('/'))
            .map_err(|e| SdkError::ConfigError(format!("endpoint {:?}: {}", config.endpoint, e)))?;
        if base.cannot_be_a_base() {
            return Err(SdkError::ConfigError(format!(
                "endpoint {:?} cannot be used as a base URL",
                config.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SdkError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            base,
            client,
        })
    }

    /// Attach a bearer token
    pub fn with_token(self, token: impl Into<String>) -> Self {
        let mut config = (*self.config).clone();
        config.token = Some(token.into());
        Self {
            config: Arc::new(config),
            ..self
        }
    }

    /// Get the endpoint
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a token is attached
    pub fn is_authenticated(&self) -> bool {
        self.config.token.is_some()
    }

    /// URL of an operation's temp-wallet endpoint
    pub fn temp_wallet_url(&self, operation_id: &OperationId) -> SdkResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::ConfigError("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", "operations", operation_id.as_str(), "temp-wallet"]);
        Ok(url)
    }

    /// Get the temporary wallet status of an operation
    pub async fn temp_wallet_status(&self, operation_id: &OperationId) -> SdkResult<WalletStatus> {
        let url = self.temp_wallet_url(operation_id)?;
        tracing::debug!(operation_id = %operation_id, %url, "Fetching temp wallet status");

        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let resp = request.send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SdkError::ApiError {
                status: status.as_u16(),
                message: ErrorBody::message_from(&body),
            });
        }

        let parsed: TempWalletResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_wallet_status(operation_id)?)
    }
}

#[async_trait]
impl StatusProvider for FountainClient {
    async fn get_status(&self, operation_id: &OperationId) -> fountain_types::Result<WalletStatus> {
        self.temp_wallet_status(operation_id)
            .await
            .map_err(FountainError::from)
    }
}

// ============================================================================
// Tests
// ============================================================================
