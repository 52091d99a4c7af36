//! Router settings and their sources.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Prefix shared by every environment variable read by [`RouterSettings::apply_env`].
pub const ENV_PREFIX: &str = "SENTIER_";

/// Error type for settings sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid value for {key}: {value:?}")]
	Env { key: String, value: String },
}

/// Settings consumed by the router.
///
/// Every field has a default, so a settings file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Path routed to when nothing matches and no not-found handler is registered.
	pub root_path: String,
	/// Leading character that marks a pattern segment as a named parameter.
	pub param_sigil: char,
	/// Whether captured parameter values are percent-decoded.
	pub decode_params: bool,
	/// Nested not-found fallbacks tolerated before routing reports a loop.
	///
	/// `0` disables the check.
	pub max_fallback_depth: usize,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			root_path: "/".to_string(),
			param_sigil: ':',
			decode_params: true,
			max_fallback_depth: 8,
		}
	}
}

impl RouterSettings {
	/// Parse settings from a TOML document. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(content)?)
	}

	/// Read settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), "loaded router settings file");
		Ok(settings)
	}

	/// Resolve settings from every source.
	///
	/// A missing file is not an error; the defaults are used in its place.
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		let mut settings = match path {
			Some(path) if path.exists() => Self::from_file(path)?,
			Some(path) => {
				tracing::debug!(path = %path.display(), "settings file not found, using defaults");
				Self::default()
			}
			None => Self::default(),
		};
		settings.apply_env()?;
		Ok(settings)
	}

	/// Override fields from `SENTIER_*` process environment variables.
	pub fn apply_env(&mut self) -> Result<(), SettingsError> {
		self.apply_env_from(std::env::vars())
	}

	/// Override fields from `SENTIER_*` pairs.
	///
	/// Unknown keys and keys without the prefix are ignored.
	pub fn apply_env_from<I, K, V>(&mut self, vars: I) -> Result<(), SettingsError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		for (key, value) in vars {
			let key = key.as_ref();
			let value = value.as_ref().trim();
			let Some(name) = key.strip_prefix(ENV_PREFIX) else {
				continue;
			};

			let invalid = || SettingsError::Env {
				key: key.to_string(),
				value: value.to_string(),
			};

			match name {
				"ROOT_PATH" => self.root_path = value.to_string(),
				"PARAM_SIGIL" => {
					let mut chars = value.chars();
					match (chars.next(), chars.next()) {
						(Some(c), None) if c != '/' => self.param_sigil = c,
						_ => return Err(invalid()),
					}
				}
				"DECODE_PARAMS" => {
					self.decode_params = match value.to_lowercase().as_str() {
						"true" | "1" | "yes" | "on" => true,
						"false" | "0" | "no" | "off" => false,
						_ => return Err(invalid()),
					}
				}
				"MAX_FALLBACK_DEPTH" => {
					self.max_fallback_depth = value.parse().map_err(|_| invalid())?;
				}
				_ => continue,
			}
			tracing::debug!(key, "router setting overridden from environment");
		}
		Ok(())
	}
}
