//! Environment-driven configuration.
//!
//! The provider credential is optional at load time: a missing key does not
//! stop the server from starting, it makes every fetch fail fast with
//! [`crate::error::GatewayError::Configuration`].

use std::time::Duration;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default chat-completion base URL (OpenRouter).
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model slug.
pub const DEFAULT_MODEL: &str = "allenai/molmo-2-8b:free";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 120.0;

/// Settings for [`crate::gateway::RecommendationGateway`].
#[derive(Clone)]
pub struct GatewayConfig {
    /// Bearer credential for the provider.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent in the request body.
    pub model: String,
    /// Transport timeout.
    pub timeout: Duration,
    /// Sampling temperature, left to the provider default when unset.
    pub temperature: Option<f64>,
    /// Sent as `HTTP-Referer` for provider attribution.
    pub referer: Option<String>,
    /// Sent as `X-Title` for provider attribution.
    pub app_title: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("referer", &self.referer)
            .field("app_title", &self.app_title)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            temperature: None,
            referer: None,
            app_title: None,
        }
    }
}

impl GatewayConfig {
    /// Load from environment variables.
    ///
    /// - `OPENROUTER_API_KEY` — provider credential
    /// - `GIFTWISE_BASE_URL` — default `https://openrouter.ai/api/v1`
    /// - `GIFTWISE_MODEL` — default `allenai/molmo-2-8b:free`
    /// - `GIFTWISE_TIMEOUT_SECS` — default 120
    /// - `GIFTWISE_TEMPERATURE` — optional
    /// - `GIFTWISE_REFERER`, `GIFTWISE_TITLE` — optional attribution headers
    pub fn from_env() -> Self {
        let timeout_secs = env_parse::<f64>("GIFTWISE_TIMEOUT_SECS")
            .filter(|secs| secs.is_finite() && *secs > 0.0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key: env_non_empty(API_KEY_ENV),
            base_url: env_non_empty("GIFTWISE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            model: env_non_empty("GIFTWISE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            timeout: Duration::from_secs_f64(timeout_secs),
            temperature: env_parse::<f64>("GIFTWISE_TEMPERATURE"),
            referer: env_non_empty("GIFTWISE_REFERER"),
            app_title: env_non_empty("GIFTWISE_TITLE"),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The credential, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Full chat-completion endpoint URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Settings for the HTTP server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load `GIFTWISE_BIND` (default `0.0.0.0`) and `PORT` (default 8080).
    pub fn from_env() -> Self {
        Self {
            bind: env_non_empty("GIFTWISE_BIND").unwrap_or_else(|| "0.0.0.0".into()),
            port: env_parse("PORT").unwrap_or(8080),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_non_empty(name).and_then(|v| v.parse().ok())
}
