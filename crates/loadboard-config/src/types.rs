//! Configuration types for the loadboard service.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: ServiceConfig,
	#[serde(default)]
	pub storage: StorageConfig,
	#[serde(default)]
	pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
	#[serde(default = "default_host")]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			host: default_host(),
			port: default_port(),
			log_level: default_log_level(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
	Memory,
	File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
	#[serde(default = "default_backend")]
	pub backend: StorageBackend,
	#[serde(default = "default_storage_path")]
	pub path: PathBuf,
}

impl Default for StorageConfig {
	fn default() -> Self {
		Self {
			backend: default_backend(),
			path: default_storage_path(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
	/// How long a caller may wait on a contended shipment or truck before
	/// the engine fails with `Contention`.
	#[serde(default = "default_lock_timeout_ms")]
	pub lock_timeout_ms: u64,
	/// Capacity of the broadcast event bus.
	#[serde(default = "default_event_capacity")]
	pub event_capacity: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			lock_timeout_ms: default_lock_timeout_ms(),
			event_capacity: default_event_capacity(),
		}
	}
}

fn default_host() -> String {
	"127.0.0.1".to_string()
}

fn default_port() -> u16 {
	8080
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_backend() -> StorageBackend {
	StorageBackend::Memory
}

fn default_storage_path() -> PathBuf {
	PathBuf::from("./data/loadboard")
}

fn default_lock_timeout_ms() -> u64 {
	2000
}

fn default_event_capacity() -> usize {
	1024
}
