use crate::error::{Result, SvgError};
use crate::primitive::PropValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// When the default fill replaces an element's own fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillPolicy {
    /// Replace a missing fill and any fill other than `none`.
    #[default]
    ReplaceUnlessNone,
    /// Only fill elements whose fill is missing or `none`.
    FillUnset,
}

/// Caller-supplied rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub width: Option<PropValue>,
    pub height: Option<PropValue>,
    pub fill: Option<String>,
    pub fill_policy: FillPolicy,
    /// Container style for the enclosing view.
    pub style: BTreeMap<String, String>,
    pub allowed_attributes: Option<Vec<String>>,
}

impl RenderOptions {
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_size(mut self, width: Option<PropValue>, height: Option<PropValue>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Parses options from JSON, accepting JSON5 when strict parsing fails.
    pub fn from_json(input: &str) -> Result<Self> {
        match serde_json::from_str::<RenderOptions>(input) {
            Ok(options) => Ok(options),
            Err(strict_err) => json5::from_str::<RenderOptions>(input)
                .map_err(|_| SvgError::Config(strict_err.to_string())),
        }
    }
}

/// Reads options from a JSON or JSON5 file. Fields the file omits keep
/// their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RenderOptions> {
    let Some(path) = path else {
        return Ok(RenderOptions::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = RenderOptions::from_json(&contents)?;
    Ok(config)
}
