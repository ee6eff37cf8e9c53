//! Client settings.
//!
//! Figment merges built-in defaults, an optional `copilot.toml` in the
//! working directory, `COPILOT_*` environment variables (a `.env` file is
//! loaded into the environment first), and finally command-line overrides.

use crate::api::DEFAULT_API_BASE;
use crate::state::DEFAULT_PROJECT_ID;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "copilot.toml";
pub const ENV_PREFIX: &str = "COPILOT_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub project_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
        }
    }
}

/// Values given on the command line; unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
    #[error("api_base must start with http:// or https://, got {0:?}")]
    InvalidBase(String),
    #[error("project_id must not be empty")]
    EmptyProject,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&Overrides::default())
    }

    /// Like [`Settings::load`], with `overrides` merged last and validated
    /// together with everything else.
    pub fn load_with(overrides: &Overrides) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_figment(Self::figment().merge(Serialized::defaults(overrides)))
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidBase(self.api_base.clone()));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::EmptyProject);
        }
        Ok(())
    }
}
