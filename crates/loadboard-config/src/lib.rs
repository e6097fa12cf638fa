//! Configuration loading for the loadboard service.
//!
//! Configuration is TOML with `${VAR}` environment substitution, followed
//! by a small set of environment-variable overrides and validation.

use std::env;
use std::path::Path;
use thiserror::Error;

pub mod types;

pub use types::{Config, EngineConfig, ServiceConfig, StorageBackend, StorageConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "LOADBOARD_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<Config, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<Config, ConfigError> {
		let content = match tokio::fs::read_to_string(file_path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ConfigError::FileNotFound(file_path.to_string()))
			}
			Err(e) => return Err(e.into()),
		};

		let substituted = substitute_env_vars(&content)?;

		let config: Config =
			toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn apply_env_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
		if let Ok(log_level) = env::var(format!("{}LOG_LEVEL", self.env_prefix)) {
			config.service.log_level = log_level;
		}

		if let Ok(port) = env::var(format!("{}PORT", self.env_prefix)) {
			config.service.port = port
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid port: {}", e)))?;
		}

		Ok(())
	}
}

/// Replaces `${VAR_NAME}` placeholders with environment variable values.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static pattern");
	let mut result = content.to_string();

	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let env_value =
			env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

		result = result.replace(full_match, &env_value);
	}

	Ok(result)
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
	if config.service.port == 0 {
		return Err(ConfigError::ValidationError(
			"service.port must be non-zero".to_string(),
		));
	}

	if config.engine.lock_timeout_ms == 0 {
		return Err(ConfigError::ValidationError(
			"engine.lock_timeout_ms must be non-zero".to_string(),
		));
	}

	if config.engine.event_capacity == 0 {
		return Err(ConfigError::ValidationError(
			"engine.event_capacity must be non-zero".to_string(),
		));
	}

	if config.storage.backend == StorageBackend::File
		&& config.storage.path.as_os_str().is_empty()
	{
		return Err(ConfigError::ValidationError(
			"storage.path must be set for the file backend".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_config(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[tokio::test]
	async fn loads_full_config() {
		let file = write_config(
			r#"
[service]
host = "0.0.0.0"
port = 9090
log_level = "debug"

[storage]
backend = "file"
path = "/tmp/loadboard-test"

[engine]
lock_timeout_ms = 500
event_capacity = 64
"#,
		);

		let config = ConfigLoader::new().with_file(file.path()).load().await.unwrap();
		assert_eq!(config.service.port, 9090);
		assert_eq!(config.storage.backend, StorageBackend::File);
		assert_eq!(config.engine.lock_timeout_ms, 500);
	}

	#[tokio::test]
	async fn empty_file_yields_defaults() {
		let file = write_config("");
		let config = ConfigLoader::new().with_file(file.path()).load().await.unwrap();
		assert_eq!(config.service.port, 8080);
		assert_eq!(config.storage.backend, StorageBackend::Memory);
		assert_eq!(config.engine.lock_timeout_ms, 2000);
	}

	#[tokio::test]
	async fn rejects_zero_lock_timeout() {
		let file = write_config("[engine]\nlock_timeout_ms = 0\n");
		let result = ConfigLoader::new().with_file(file.path()).load().await;
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}

	#[tokio::test]
	async fn missing_file_is_reported() {
		let result = ConfigLoader::new()
			.with_file("/definitely/not/here.toml")
			.load()
			.await;
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
	}

	#[test]
	fn substitutes_env_vars() {
		env::set_var("LOADBOARD_TEST_CITY", "Ibadan");
		let out = substitute_env_vars("city = \"${LOADBOARD_TEST_CITY}\"").unwrap();
		assert_eq!(out, "city = \"Ibadan\"");

		let missing = substitute_env_vars("x = \"${LOADBOARD_TEST_MISSING_VAR}\"");
		assert!(matches!(missing, Err(ConfigError::EnvVarNotFound(_))));
	}
}
