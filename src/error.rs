//! Error types
//!
//! Setup faults abort initialization; the simulation itself has no error paths.

use thiserror::Error;

/// Faults detected while wiring the game to its host page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The drawing surface is absent or unusable.
    #[error("rendering surface not found: {0}")]
    SurfaceMissing(String),

    /// A required page element is absent.
    #[error("page element not found: {0}")]
    ElementMissing(String),

    /// Adapter, device or surface creation failed.
    #[error("GPU setup failed: {0}")]
    Gpu(String),
}

impl SetupError {
    /// Text shown in place of the game when setup fails
    pub fn placeholder_text(&self) -> &'static str {
        match self {
            SetupError::SurfaceMissing(_) => "Error: Game canvas not found.",
            SetupError::ElementMissing(_) => "Page setup error. Contact admin.",
            SetupError::Gpu(_) => "Error: Graphics device unavailable.",
        }
    }
}

/// Errors loading a [`GameConfig`](crate::GameConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_text() {
        let err = SetupError::SurfaceMissing("gameCanvas".into());
        assert_eq!(err.placeholder_text(), "Error: Game canvas not found.");
        assert_eq!(err.to_string(), "rendering surface not found: gameCanvas");
    }
}
