use std::{io, path::PathBuf, str::Utf8Error};
use thiserror::Error;

/// Process exit codes, one per failure kind.
///
/// | Code | Meaning                       |
/// |------|-------------------------------|
/// | 0    | Success                       |
/// | 2    | Command-line usage error      |
/// | 3    | Input file unreadable         |
/// | 4    | Baseline file unreadable      |
/// | 5    | Input file empty              |
/// | 6    | Zero baseline value           |
/// | 7    | Probability mapping not saved |
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const USAGE: u8 = 2;
    pub const INPUT: u8 = 3;
    pub const BASELINE: u8 = 4;
    pub const EMPTY_INPUT: u8 = 5;
    pub const BASELINE_ZERO_VALUE: u8 = 6;
    pub const OUTPUT: u8 = 7;
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EntropyError {
    #[error("could not read input file {}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input file {} is not valid UTF-8 text", .path.display())]
    InputDecode {
        path: PathBuf,
        #[source]
        source: Utf8Error,
    },
    #[error("could not read baseline file {}", .path.display())]
    BaselineRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("baseline file {} is not a flat JSON mapping of symbol to number", .path.display())]
    BaselineParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("baseline file {} has negative value {value} for symbol {symbol:?}", .path.display())]
    BaselineValue {
        path: PathBuf,
        symbol: char,
        value: f64,
    },
    #[error("input is empty")]
    EmptyInput,
    #[error("baseline value for symbol {symbol:?} is zero but it occurs {count} times in the input")]
    BaselineZeroValue { symbol: char, count: usize },
    #[error("could not write probability mapping to {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EntropyError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputRead { .. } | Self::InputDecode { .. } => exit_code::INPUT,
            Self::BaselineRead { .. }
            | Self::BaselineParse { .. }
            | Self::BaselineValue { .. } => exit_code::BASELINE,
            Self::EmptyInput => exit_code::EMPTY_INPUT,
            Self::BaselineZeroValue { .. } => exit_code::BASELINE_ZERO_VALUE,
            Self::OutputWrite { .. } => exit_code::OUTPUT,
        }
    }
}

pub type Result<T, E = EntropyError> = std::result::Result<T, E>;
