use std::path::{Path, PathBuf};

use lasso_shared::{LassoConfig, LassoError};
use thiserror::Error;

#[derive(Clone)]
pub struct AppState {
    pub config: LassoConfig,
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Invalid { path: PathBuf, source: LassoError },
}

/// Reads the lasso options served to the demo page; defaults when no file is
/// given.
pub async fn load_config(path: Option<&Path>) -> Result<LassoConfig, ConfigLoadError> {
    let Some(path) = path else {
        return Ok(LassoConfig::default());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    LassoConfig::from_json(&json).map_err(|source| ConfigLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_path_uses_defaults() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config, LassoConfig::default());
    }

    #[tokio::test]
    async fn reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"closePathDistance": 30, "closePathSelect": false}}"#).unwrap();
        let config = load_config(Some(file.path())).await.unwrap();
        assert_eq!(config.close_path_distance, 30.0);
        assert!(!config.close_path_select);
    }

    #[tokio::test]
    async fn rejects_invalid_options() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"closePathDistance": -5}}"#).unwrap();
        let err = load_config(Some(file.path())).await.unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Invalid {
                source: LassoError::InvalidCloseDistance(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io { .. }));
    }
}
