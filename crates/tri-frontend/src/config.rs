// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Front-end options.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options controlling a front-end run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendOptions {
    /// Run every stage even when an earlier one reported errors.
    #[serde(default = "default_true")]
    pub continue_after_errors: bool,

    /// Colour rendered diagnostics.
    #[serde(default)]
    pub color: bool,

    /// Name shown in rendered diagnostics.
    #[serde(default)]
    pub file_name: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for FrontendOptions {
    fn default() -> Self {
        Self {
            continue_after_errors: true,
            color: false,
            file_name: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid front-end options: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrontendOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Display name for the source file.
    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<source>")
    }
}
