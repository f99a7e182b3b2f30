use thiserror::Error;

use crate::dom::Theme;
use crate::navbar::{self, ConfigError, NavbarConfig};

/// Failure loading a navbar configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse RON {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parse navbar configuration from RON text and validate it.
pub fn parse_navbar_config(path: &str, content: &str) -> Result<NavbarConfig, LoadError> {
    let value: ron::Value = ron::from_str(content).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(navbar::validate(&value)?)
}

/// Load navbar configuration from a RON file. The file is untyped input:
/// every field goes through validation before a config is produced.
pub fn load_navbar_config(path: &str) -> Result<NavbarConfig, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_navbar_config(path, &content)
}

/// Load the theme from a RON file. Logs a warning and returns the default
/// theme on failure.
pub fn load_theme(path: &str) -> Theme {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default theme", path, e);
            return Theme::default();
        }
    };
    match ron::from_str::<Theme>(&content) {
        Ok(theme) => theme,
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default theme", path, e);
            Theme::default()
        }
    }
}
