pub mod error;
pub mod loader;
pub mod math;
pub mod output;
#[cfg(feature = "python")]
pub(crate) mod python;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;

pub use error::{EntropyError, Result};
pub use loader::{load_baseline, load_buffer, InputBuffer, SymbolMode};
pub use math::{
    probability_of, EntropyResult, FrequencyMapping, ProbabilityMapping, SymbolCounts,
};

/// Calculates Shannon entropy of a buffer
pub fn compute_shannon_entropy(buffer: &InputBuffer) -> Result<EntropyResult> {
    math::shannon_entropy(buffer)
}

/// Calculates relative entropy of a buffer against a baseline distribution
pub fn compute_relative_entropy(
    buffer: &InputBuffer,
    baseline: &FrequencyMapping,
) -> Result<EntropyResult> {
    math::relative_entropy(buffer, baseline)
}

/// Settings applied to every analyzed file
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    pub symbols: SymbolMode,
}

/// Which engine produced an [`Analysis`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Shannon,
    Relative,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shannon => f.write_str("Shannon Entropy"),
            Self::Relative => f.write_str("Relative Entropy"),
        }
    }
}

/// Entropy of one file together with its symbol probabilities
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub file: PathBuf,
    pub measure: Measure,
    #[serde(flatten)]
    pub result: EntropyResult,
}

/// Loads `path` and runs the relative entropy engine when a baseline is
/// given, the Shannon engine otherwise.
pub fn analyze(
    path: &Path,
    baseline: Option<&FrequencyMapping>,
    config: &Config,
) -> Result<Analysis> {
    info!("Analyzing {}", path.display());

    let buffer = load_buffer(path, config.symbols)?;
    let (measure, result) = match baseline {
        Some(baseline) => (
            Measure::Relative,
            compute_relative_entropy(&buffer, baseline)?,
        ),
        None => (Measure::Shannon, compute_shannon_entropy(&buffer)?),
    };

    Ok(Analysis {
        file: path.to_path_buf(),
        measure,
        result,
    })
}
