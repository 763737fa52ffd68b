use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for structured overrides (`CHUB__VISION__URL`).
pub const ENV_PREFIX: &str = "CHUB";

/// Flat variables understood by older deployments, mapped onto config keys.
pub const LEGACY_OVERRIDES: [(&str, &str); 2] = [("VISION_URL", "vision.url"), ("DB_URI", "database.url")];

const DEFAULT_FILE: &str = "server";

#[chub_derive::chub_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader.
///
/// Layers, lowest precedence first:
/// 1. **Base File**: the configured path (must exist), otherwise an optional
///    `server.{toml,json,yaml}` in the working directory.
/// 2. **Environment**: variables prefixed with `CHUB__`, nested with double underscores
///    (`CHUB__DATABASE__URL` maps to `database.url`).
/// 3. **Legacy variables**: `VISION_URL` and `DB_URI`, see [`LEGACY_OVERRIDES`].
///
/// The process environment is read unless a snapshot is supplied with
/// [`env`](Self::env).
#[derive(Debug, Default)]
#[must_use = "loaders do nothing unless you call .load()"]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Uses `vars` instead of the process environment.
    pub fn env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.env {
            Some(vars) => vars.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    /// # Errors
    /// * An explicitly configured file is missing or unreadable.
    /// * A value cannot be deserialized into `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let (effective_path, required) = self
            .path
            .clone()
            .map_or_else(|| (PathBuf::from(DEFAULT_FILE), false), |p| (p, true));

        let mut builder = Config::builder()
            .add_source(File::from(effective_path.as_path()).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(self.env.clone()),
            );

        for (var, key) in LEGACY_OVERRIDES {
            let value = self.var(var).filter(|v| !v.trim().is_empty());
            if value.is_some() {
                info!(variable = var, key, "Applying legacy environment override");
            }
            builder = builder.set_override_option(key, value).context("Applying legacy override")?;
        }

        info!(path = %effective_path.display(), required, "Loading config");

        let config = builder
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }
}

/// Loads configuration from `path` (or the optional default file) and the process environment.
///
/// Missing keys fall back to the `Default` impls of `T`'s sections.
///
/// # Errors
/// See [`ConfigLoader::load`].
///
/// # Example
/// ```rust
/// use chub_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    match path {
        Some(path) => ConfigLoader::new().path(path).load(),
        None => ConfigLoader::new().load(),
    }
}
