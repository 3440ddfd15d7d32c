use std::time::Duration;

use log::*;
use secrecy::{ExposeSecret, SecretString};

/// The realtime WhatsApp lookup endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.checknumber.ai/v1/realtime/whatsapp";
/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "WHATSAPP_RT_API_KEY";
/// Used when no API key has been configured. The API will reject it, but it lets the client be constructed.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiConfig {
	pub api_key: SecretString,
	pub base_url: String,
	pub timeout: Duration,
}

impl ApiConfig {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			api_key: SecretString::new(api_key.into()),
			base_url: DEFAULT_BASE_URL.into(),
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Reads the API key from [`API_KEY_ENV`]. An unset or empty variable falls back to [`PLACEHOLDER_API_KEY`].
	pub fn from_env() -> Self {
		let api_key = match std::env::var(API_KEY_ENV) {
			Ok(key) if !key.is_empty() => key,
			_ => {
				debug!("{} is not set, using placeholder API key", API_KEY_ENV);
				PLACEHOLDER_API_KEY.into()
			}
		};
		Self::new(api_key)
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn has_placeholder_key(&self) -> bool {
		self.api_key.expose_secret() == PLACEHOLDER_API_KEY
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new(PLACEHOLDER_API_KEY)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = ApiConfig::default();
		assert_eq!(config.base_url, DEFAULT_BASE_URL);
		assert_eq!(config.timeout, Duration::from_secs(30));
		assert!(config.has_placeholder_key());
	}

	#[test]
	fn test_builder_overrides() {
		let config = ApiConfig::new("abc")
			.with_base_url("http://localhost:1234/lookup")
			.with_timeout(Duration::from_secs(5));
		assert_eq!(config.api_key.expose_secret(), "abc");
		assert_eq!(config.base_url, "http://localhost:1234/lookup");
		assert_eq!(config.timeout, Duration::from_secs(5));
		assert!(!config.has_placeholder_key());
	}

	#[test]
	fn test_from_env() {
		std::env::set_var(API_KEY_ENV, "");
		assert!(ApiConfig::from_env().has_placeholder_key());
		std::env::set_var(API_KEY_ENV, "env-key");
		assert_eq!(ApiConfig::from_env().api_key.expose_secret(), "env-key");
		std::env::remove_var(API_KEY_ENV);
		assert!(ApiConfig::from_env().has_placeholder_key());
	}

	#[test]
	fn test_debug_does_not_leak_key() {
		let config = ApiConfig::new("super-secret-key");
		assert!(!format!("{:?}", config).contains("super-secret-key"));
	}
}
