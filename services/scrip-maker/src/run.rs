//! One conversion: read, convert, write.

use std::path::PathBuf;
use std::time::Instant;

use netcdf_io::{read_grid, read_mask, write_scrip, GlobalAttributes, VariableNames};
use scrip_grid::{GridSummary, ScripConfig, ScripPipeline};
use tracing::info;

use crate::error::MakerError;

/// Fully resolved inputs of a run.
#[derive(Debug, Clone)]
pub struct MakerRequest {
    pub grid: PathBuf,
    pub mask: Option<PathBuf>,
    pub output: PathBuf,
    pub config: ScripConfig,
    pub variables: VariableNames,
    pub attributes: GlobalAttributes,
}

impl MakerRequest {
    /// Request with the default variable names of the configured convention.
    pub fn new(grid: PathBuf, mask: Option<PathBuf>, output: PathBuf, config: ScripConfig) -> Self {
        Self {
            variables: VariableNames::for_convention(config.convention),
            attributes: GlobalAttributes::default(),
            grid,
            mask,
            output,
            config,
        }
    }

    /// Value of the `source` attribute: the input paths unless configured.
    fn source(&self) -> String {
        match &self.mask {
            Some(mask) => format!("{} {}", self.grid.display(), mask.display()),
            None => self.grid.display().to_string(),
        }
    }
}

/// Convert the grid described by `request` and write the SCRIP file.
pub fn make_scrip(request: &MakerRequest) -> Result<GridSummary, MakerError> {
    let start = Instant::now();
    let convention = request.config.convention;

    let mut inputs = read_grid(&request.grid, &request.variables, convention).map_err(|source| {
        MakerError::GridSource {
            path: request.grid.clone(),
            source,
        }
    })?;

    if let Some(mask_path) = &request.mask {
        let mask = read_mask(mask_path, &request.variables).map_err(|source| {
            MakerError::MaskSource {
                path: mask_path.clone(),
                source,
            }
        })?;
        inputs = inputs.with_mask(mask);
    }

    let record = ScripPipeline::new(request.config.clone()).run(&inputs)?;

    let mut attributes = request.attributes.clone();
    if attributes.source.is_none() {
        attributes.source = Some(request.source());
    }
    write_scrip(&request.output, &record, &attributes).map_err(|source| {
        MakerError::Destination {
            path: request.output.clone(),
            source,
        }
    })?;

    let summary = record.summary();
    info!(
        grid = %request.grid.display(),
        output = %request.output.display(),
        convention = %convention,
        grid_size = summary.grid_size,
        sea_cells = summary.sea_cells,
        duration_ms = start.elapsed().as_millis() as u64,
        "SCRIP grid complete"
    );

    Ok(summary)
}
