//! Configuration for the sentier router.
//!
//! Settings are resolved in priority order:
//! environment variables > TOML file > built-in defaults.
//!
//! ```
//! use sentier_conf::RouterSettings;
//!
//! let settings = RouterSettings::from_toml_str("max_fallback_depth = 4").unwrap();
//! assert_eq!(settings.max_fallback_depth, 4);
//! assert_eq!(settings.root_path, "/");
//! ```

pub mod settings;

pub use settings::{ENV_PREFIX, RouterSettings, SettingsError};
