use serde::{Deserialize, Serialize};

use crate::error::{LassoError, Result};
use crate::geometry::ViewTransform;

pub const DEFAULT_CLOSE_PATH_DISTANCE: f64 = 75.0;

/// Options recognised by the lasso. Missing JSON fields fall back to defaults.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LassoConfig {
    /// Screen distance from the origin at which the path counts as a loop.
    pub close_path_distance: f64,
    /// Whether a closed loop selects what it encloses.
    pub close_path_select: bool,
    /// Whether items the pointer passes over are selected.
    pub hover_select: bool,
    pub enabled: bool,
    pub zoom_transform: ViewTransform,
}

impl Default for LassoConfig {
    fn default() -> Self {
        Self {
            close_path_distance: DEFAULT_CLOSE_PATH_DISTANCE,
            close_path_select: true,
            hover_select: true,
            enabled: true,
            zoom_transform: ViewTransform::IDENTITY,
        }
    }
}

impl LassoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_close_distance(self.close_path_distance)?;
        validate_transform(&self.zoom_transform)
    }
}

pub(crate) fn validate_close_distance(distance: f64) -> Result<()> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(LassoError::InvalidCloseDistance(distance))
    }
}

pub(crate) fn validate_transform(transform: &ViewTransform) -> Result<()> {
    if transform.is_invertible() {
        Ok(())
    } else {
        Err(LassoError::InvalidTransform { k: transform.k })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_defaults() {
        let config = LassoConfig::default();
        assert_eq!(config.close_path_distance, 75.0);
        assert!(config.close_path_select);
        assert!(config.hover_select);
        assert!(config.enabled);
        assert_eq!(config.zoom_transform, ViewTransform::IDENTITY);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LassoConfig::from_json(r#"{"closePathDistance": 40, "hoverSelect": false}"#)
            .unwrap();
        assert_eq!(config.close_path_distance, 40.0);
        assert!(!config.hover_select);
        assert!(config.close_path_select);
    }

    #[test]
    fn zoom_transform_is_read_from_json() {
        let config =
            LassoConfig::from_json(r#"{"zoomTransform": {"k": 2, "x": 10, "y": 5}}"#).unwrap();
        assert_eq!(config.zoom_transform, ViewTransform::new(2.0, 10.0, 5.0));
    }

    #[test]
    fn rejects_non_positive_distance() {
        let err = LassoConfig::from_json(r#"{"closePathDistance": 0}"#).unwrap_err();
        assert!(matches!(err, LassoError::InvalidCloseDistance(d) if d == 0.0));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = LassoConfig::from_json("{closePathDistance").unwrap_err();
        assert!(matches!(err, LassoError::Config(_)));
    }

    #[test]
    fn serialises_camel_case() {
        let json = LassoConfig::default().to_json().unwrap();
        assert!(json.contains("\"closePathDistance\":75.0"));
        assert!(json.contains("\"zoomTransform\""));
    }
}
