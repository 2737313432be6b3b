//! Maker selection from configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{
    JwtEdDsaMaker, JwtMaker, Maker, MakerError, PasetoV2Local, PasetoV2Public, PasetoV3Local,
    PasetoV3Public, Scheme,
};

/// One maker and its key material, as read from a JSON config file.
///
/// ```json
/// { "scheme": "paseto-v2-local", "symmetric_key": "bc11fa..." }
/// ```
#[derive(Clone, Deserialize)]
#[serde(tag = "scheme", rename_all = "kebab-case")]
pub enum MakerConfig {
    JwtHs256 {
        secret: String,
    },
    #[serde(rename = "jwt-eddsa")]
    JwtEdDsa {
        private_key_pem: String,
        public_key_pem: String,
    },
    PasetoV2Local {
        symmetric_key: String,
    },
    PasetoV3Local {
        symmetric_key: String,
    },
    PasetoV2Public {
        private_key: String,
        public_key: String,
    },
    PasetoV3Public {
        private_key: String,
        public_key: String,
    },
}

/// Errors loading a [`MakerConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not a valid maker config
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl MakerConfig {
    /// Read a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::Parse)
    }

    /// The scheme the configured maker will be pinned to.
    pub fn scheme(&self) -> Scheme {
        match self {
            MakerConfig::JwtHs256 { .. } => Scheme::JwtHs256,
            MakerConfig::JwtEdDsa { .. } => Scheme::JwtEdDsa,
            MakerConfig::PasetoV2Local { .. } => Scheme::PasetoV2Local,
            MakerConfig::PasetoV3Local { .. } => Scheme::PasetoV3Local,
            MakerConfig::PasetoV2Public { .. } => Scheme::PasetoV2Public,
            MakerConfig::PasetoV3Public { .. } => Scheme::PasetoV3Public,
        }
    }

    /// Construct the configured maker.
    pub fn build(&self) -> Result<Box<dyn Maker>, MakerError> {
        let maker: Box<dyn Maker> = match self {
            MakerConfig::JwtHs256 { secret } => Box::new(JwtMaker::new(secret)?),
            MakerConfig::JwtEdDsa {
                private_key_pem,
                public_key_pem,
            } => Box::new(JwtEdDsaMaker::new(
                private_key_pem.as_bytes(),
                public_key_pem.as_bytes(),
            )?),
            MakerConfig::PasetoV2Local { symmetric_key } => {
                Box::new(PasetoV2Local::new(symmetric_key)?)
            }
            MakerConfig::PasetoV3Local { symmetric_key } => {
                Box::new(PasetoV3Local::new(symmetric_key)?)
            }
            MakerConfig::PasetoV2Public {
                private_key,
                public_key,
            } => Box::new(PasetoV2Public::new(private_key, public_key)?),
            MakerConfig::PasetoV3Public {
                private_key,
                public_key,
            } => Box::new(PasetoV3Public::new(private_key, public_key)?),
        };

        info!(scheme = %maker.scheme(), "Token maker ready");
        Ok(maker)
    }
}
