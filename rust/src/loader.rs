use std::{
    collections::BTreeMap,
    fs,
    path::Path,
    str::{self, Utf8Error},
};

use log::{info, warn};

use crate::error::{EntropyError, Result};
use crate::math::FrequencyMapping;

/// How raw file content is split into symbols.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolMode {
    /// UTF-8 text, one symbol per character.
    #[default]
    Text,
    /// One symbol per byte. Byte `n` becomes the character `U+00nn`.
    Bytes,
}

/// Immutable sequence of symbols read from a file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputBuffer {
    symbols: Vec<char>,
}

impl InputBuffer {
    pub fn decode(data: &[u8], mode: SymbolMode) -> Result<Self, Utf8Error> {
        let symbols = match mode {
            SymbolMode::Text => text_symbols(str::from_utf8(data)?),
            SymbolMode::Bytes => data.iter().copied().map(char::from).collect(),
        };

        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<&str> for InputBuffer {
    fn from(text: &str) -> Self {
        Self {
            symbols: text_symbols(text),
        }
    }
}

/// Characters of `text` with universal newlines: `\r\n` and a lone `\r`
/// both become `\n`.
fn text_symbols(text: &str) -> Vec<char> {
    let mut symbols = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(symbol) = chars.next() {
        if symbol == '\r' {
            chars.next_if_eq(&'\n');
            symbols.push('\n');
        } else {
            symbols.push(symbol);
        }
    }

    symbols
}

/// Reads a whole file into memory. An empty file yields an empty buffer.
pub fn load_buffer(path: &Path, mode: SymbolMode) -> Result<InputBuffer> {
    let data = fs::read(path).map_err(|source| EntropyError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    let buffer = InputBuffer::decode(&data, mode).map_err(|source| EntropyError::InputDecode {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Read {} symbols from {}", buffer.len(), path.display());
    Ok(buffer)
}

/// Reads a flat JSON object mapping symbols to non-negative numbers.
/// Values are not required to sum to one. Keys longer than one symbol
/// never occur in a buffer, so they are dropped with a warning.
pub fn load_baseline(path: &Path) -> Result<FrequencyMapping> {
    let data = fs::read(path).map_err(|source| EntropyError::BaselineRead {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: BTreeMap<String, f64> =
        serde_json::from_slice(&data).map_err(|source| EntropyError::BaselineParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut baseline = FrequencyMapping::new();
    for (key, value) in raw {
        if let Some((symbol, value)) = baseline_entry(path, &key, value)? {
            baseline.insert(symbol, value);
        }
    }

    info!(
        "Read baseline of {} symbols from {}",
        baseline.len(),
        path.display()
    );
    Ok(baseline)
}

fn baseline_entry(path: &Path, key: &str, value: f64) -> Result<Option<(char, f64)>> {
    let mut chars = key.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(symbol), None) => symbol,
        _ => {
            warn!(
                "Ignoring baseline key {key:?} in {}: not a single symbol, contributes nothing",
                path.display()
            );
            return Ok(None);
        }
    };

    if value < 0.0 {
        return Err(EntropyError::BaselineValue {
            path: path.to_path_buf(),
            symbol,
            value,
        });
    }

    Ok(Some((symbol, value)))
}
