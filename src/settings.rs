//! Configuration and logging bootstrap.
//!
//! Settings are layered: built-in defaults, then an optional TOML/JSON/YAML
//! file, then `RDFKEEPER_*` environment variables.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{KeeperError, Result};
use crate::term::{is_absolute_iri, Context};

/// Context used when nothing else names one.
pub const DEFAULT_CONTEXT: &str = "urn:rdfkeeper:default";

const DEFAULT_FILE: &str = "rdfkeeper";
const ENV_PREFIX: &str = "RDFKEEPER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Context for triples stored without one, and the label of new graphs.
    pub default_context: String,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Initial capacity of statement dictionaries.
    pub index_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_context: DEFAULT_CONTEXT.to_string(),
            log_filter: "info".to_string(),
            index_capacity: 0,
        }
    }
}

impl Settings {
    /// Loads `rdfkeeper.{toml,json,yaml}` from the working directory if
    /// present, then applies environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_FILE)
    }
    /// Like [`Settings::load`] with an explicit file name (extension optional).
    pub fn load_from(path: &str) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
    pub fn validate(&self) -> Result<()> {
        if !is_absolute_iri(&self.default_context) {
            return Err(KeeperError::Config(format!(
                "default_context must be an absolute IRI: {}",
                self.default_context
            )));
        }
        EnvFilter::try_new(&self.log_filter)
            .map_err(|e| KeeperError::Config(format!("log_filter: {e}")))?;
        Ok(())
    }
    pub fn default_context(&self) -> Result<Context> {
        Context::new(&self.default_context)
    }
}

/// Installs a formatting subscriber filtered by `RUST_LOG`, falling back to
/// the configured filter. Does nothing if a global subscriber already exists.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
