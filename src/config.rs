use std::time::Duration;

use snafu::ResultExt;

use crate::{error, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Everything a resource manager needs to talk to GitHub.
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub access_token: String,
	pub github_api_url: String,
	/// Recorded as the last error text when a failure carries no body.
	pub default_error_message: Option<String>,
	pub timeout: Option<Duration>,
}

impl ClientConfig {
	pub fn new<T: Into<String>>(access_token: T) -> Self {
		Self {
			access_token: access_token.into(),
			github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
			default_error_message: None,
			timeout: None,
		}
	}

	pub fn with_api_url<U: Into<String>>(mut self, url: U) -> Self {
		self.github_api_url = url.into();
		self
	}

	pub fn with_default_error_message<M: Into<String>>(
		mut self,
		message: M,
	) -> Self {
		self.default_error_message = Some(message.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Reads the configuration from the environment, loading `.env` first
	/// if there is one.
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let access_token =
			dotenv::var("GITHUB_TOKEN").context(error::EnvVar {
				name: "GITHUB_TOKEN",
			})?;
		let mut config = Self::new(access_token);

		if let Ok(url) = dotenv::var("GITHUB_API_URL") {
			config.github_api_url = url;
		}
		if let Ok(message) = dotenv::var("GITHUB_DEFAULT_ERROR_MESSAGE") {
			config.default_error_message = Some(message);
		}
		if let Ok(secs) = dotenv::var("GITHUB_REQUEST_TIMEOUT_SECS") {
			let secs = secs.parse::<u64>().map_err(|e| error::Error::Config {
				msg: format!("failed parsing GITHUB_REQUEST_TIMEOUT_SECS: {}", e),
			})?;
			config.timeout = Some(Duration::from_secs(secs));
		}

		config.validate()?;
		Ok(config)
	}

	/// Checks the token is present and the API url is absolute.
	pub fn validate(&self) -> Result<()> {
		if self.access_token.trim().is_empty() {
			return error::Config {
				msg: "access token is empty",
			}
			.fail();
		}
		let url = url::Url::parse(&self.github_api_url).context(error::InvalidUrl)?;
		if url.cannot_be_a_base() {
			return error::Config {
				msg: format!("{} cannot be used as an API root", url),
			}
			.fail();
		}
		Ok(())
	}

	/// The API root without a trailing slash.
	pub fn api_root(&self) -> &str {
		self.github_api_url.trim_end_matches('/')
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = ClientConfig::new("token");
		assert_eq!(config.api_root(), "https://api.github.com");
		assert!(config.timeout.is_none());
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_api_root_trims_slash() {
		let config =
			ClientConfig::new("token").with_api_url("http://127.0.0.1:4567/");
		assert_eq!(config.api_root(), "http://127.0.0.1:4567");
	}

	#[test]
	fn test_validate_rejects_bad_values() {
		assert!(matches!(
			ClientConfig::new(" ").validate(),
			Err(error::Error::Config { .. })
		));
		assert!(matches!(
			ClientConfig::new("token").with_api_url("not a url").validate(),
			Err(error::Error::InvalidUrl { .. })
		));
		assert!(matches!(
			ClientConfig::new("token")
				.with_api_url("mailto:someone@example.com")
				.validate(),
			Err(error::Error::Config { .. })
		));
	}
}
