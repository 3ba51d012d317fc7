//! YAML run configuration.
//!
//! ```yaml
//! grid:
//!   convention: atmosphere
//!   west_seam_overlap: 0
//! variables:
//!   corner_lon: XLONG_U
//!   mask: LANDMASK
//! attributes:
//!   institution: ${INSTITUTION:-unknown}
//! ```
//!
//! Supports environment variable substitution using ${VAR} syntax.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use netcdf_io::{GlobalAttributes, VariableNames};
use scrip_grid::ScripConfig;
use serde::{Deserialize, Serialize};

/// Contents of a `--config` file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakerConfig {
    pub grid: ScripConfig,
    pub variables: VariableOverrides,
    pub attributes: GlobalAttributes,
}

/// Variable names replacing the convention defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableOverrides {
    pub center_lon: Option<String>,
    pub center_lat: Option<String>,
    pub corner_lon: Option<String>,
    pub corner_lat: Option<String>,
    pub e1: Option<String>,
    pub e2: Option<String>,
    pub mask: Option<String>,
}

impl VariableOverrides {
    /// Apply the overrides on top of `names`.
    pub fn apply(&self, mut names: VariableNames) -> VariableNames {
        let replace = |slot: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                *slot = value.clone();
            }
        };
        replace(&mut names.center_lon, &self.center_lon);
        replace(&mut names.center_lat, &self.center_lat);
        replace(&mut names.corner_lon, &self.corner_lon);
        replace(&mut names.corner_lat, &self.corner_lat);
        replace(&mut names.mask, &self.mask);
        if self.e1.is_some() {
            names.e1 = self.e1.clone();
        }
        if self.e2.is_some() {
            names.e2 = self.e2.clone();
        }
        names
    }
}

/// Load and parse a run configuration with environment variable substitution.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MakerConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;

    let expanded = expand_env_vars(&content)?;

    serde_yaml::from_str(&expanded)
        .with_context(|| format!("Failed to parse config YAML from {:?}", path.as_ref()))
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("Unclosed variable substitution: ${{{}", after))?;
        result.push_str(&resolve_var_expr(&after[..end])?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}
