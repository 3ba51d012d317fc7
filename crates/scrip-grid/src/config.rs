//! Configuration for a conversion run.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::types::GridConvention;

/// Default number of duplicated columns at the east edge of a periodic grid.
///
/// ORCA-family ocean grids repeat their two westernmost columns at the east
/// edge, so the true cyclic neighbour of column 0 is the third from last.
pub const DEFAULT_WEST_SEAM_OVERLAP: usize = 2;

/// Options that select and tune the corner derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScripConfig {
    /// Staggering convention of the source grid.
    pub convention: GridConvention,

    /// Duplicated east-edge columns skipped when wrapping latitudes at the
    /// west seam. Longitudes always wrap to the last column.
    pub west_seam_overlap: usize,

    /// Derive cell areas from the staggered spacing when no metrics exist.
    pub uniform_area_fallback: bool,
}

impl Default for ScripConfig {
    fn default() -> Self {
        Self {
            convention: GridConvention::Ocean,
            west_seam_overlap: DEFAULT_WEST_SEAM_OVERLAP,
            uniform_area_fallback: true,
        }
    }
}

impl ScripConfig {
    /// Configuration for the given convention with default options.
    pub fn for_convention(convention: GridConvention) -> Self {
        Self {
            convention,
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults; malformed values are errors.
    pub fn from_env() -> GridResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `SCRIP_*` environment variables.
    pub fn apply_env(&mut self) -> GridResult<()> {
        if let Ok(val) = std::env::var("SCRIP_CONVENTION") {
            self.convention = val.parse()?;
        }

        if let Ok(val) = std::env::var("SCRIP_WEST_SEAM_OVERLAP") {
            self.west_seam_overlap = val.parse().map_err(|_| {
                GridError::config_error(format!("SCRIP_WEST_SEAM_OVERLAP is not a count: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("SCRIP_UNIFORM_AREA_FALLBACK") {
            self.uniform_area_fallback = parse_flag(&val).ok_or_else(|| {
                GridError::config_error(format!(
                    "SCRIP_UNIFORM_AREA_FALLBACK is not a boolean: {val}"
                ))
            })?;
        }

        Ok(())
    }
}

/// `true`/`false`, `1`/`0`, `yes`/`no` or `on`/`off`, case-insensitive.
fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScripConfig::default();
        assert_eq!(config.convention, GridConvention::Ocean);
        assert_eq!(config.west_seam_overlap, 2);
        assert!(config.uniform_area_fallback);
    }

    #[test]
    fn test_for_convention() {
        let config = ScripConfig::for_convention(GridConvention::Atmosphere);
        assert_eq!(config.convention, GridConvention::Atmosphere);
        assert_eq!(config.west_seam_overlap, DEFAULT_WEST_SEAM_OVERLAP);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("ture"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_malformed_area_fallback_rejected() {
        std::env::set_var("SCRIP_UNIFORM_AREA_FALLBACK", "maybe");
        let result = ScripConfig::default().apply_env();
        std::env::remove_var("SCRIP_UNIFORM_AREA_FALLBACK");
        assert!(matches!(result, Err(GridError::ConfigError(_))));
    }
}
