//! SCRIP grid maker.
//!
//! Converts a NEMO mesh mask or a WRF geo file, plus an optional land-sea
//! mask, into a SCRIP grid description file.

pub mod config;
pub mod error;
pub mod run;

pub use config::{load_config, MakerConfig, VariableOverrides};
pub use error::MakerError;
pub use run::{make_scrip, MakerRequest};
