//! Application configuration management.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Checklist generation settings.
    #[serde(default)]
    pub checklist: ChecklistConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How generic catalog requirements report their category on checklist items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMode {
    /// Generic entity, risk and party items are labelled `Other`.
    /// Bank forms, account forms and the source-of-wealth item keep theirs.
    #[default]
    LegacyOther,
    /// Every item keeps the category its catalog requirement declares.
    Preserve,
}

/// Checklist generation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecklistConfig {
    /// Category labelling mode for generated items.
    #[serde(default)]
    pub category_mode: CategoryMode,
    /// Optional JSON catalog replacing the built-in requirement tables.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "kyc=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `KYC__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_with(None)
    }

    /// Like [`AppConfig::load`], with an extra explicit file layered after
    /// the run-mode file and before the environment.
    pub fn load_with(extra_file: Option<&str>) -> Result<Self, ::config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(::config::File::with_name(path).required(true));
        }

        builder
            .add_source(::config::Environment::with_prefix("KYC").separator("__"))
            .build()?
            .try_deserialize()
    }
}
