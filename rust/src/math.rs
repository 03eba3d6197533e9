use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{EntropyError, Result};
use crate::loader::InputBuffer;

/// Baseline distribution: symbol to raw count or probability.
pub type FrequencyMapping = BTreeMap<char, f64>;

/// Empirical probability of each symbol considered by an engine.
pub type ProbabilityMapping = BTreeMap<char, f64>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntropyResult {
    pub entropy: f64,
    pub probabilities: ProbabilityMapping,
}

/// Exact occurrence count of every distinct symbol in a buffer.
#[derive(Clone, Debug, Default)]
pub struct SymbolCounts {
    counts: BTreeMap<char, usize>,
    total: usize,
}

impl SymbolCounts {
    pub fn tally(buffer: &InputBuffer) -> Self {
        let mut counts = BTreeMap::new();

        for &symbol in buffer.symbols() {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        Self {
            counts,
            total: buffer.len(),
        }
    }

    pub fn count(&self, symbol: char) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Distinct symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// `count(symbol) / total`, failing with [`EntropyError::EmptyInput`]
    /// when there is nothing to divide by.
    pub fn probability_of(&self, symbol: char) -> Result<f64> {
        if self.total == 0 {
            return Err(EntropyError::EmptyInput);
        }

        Ok(self.count(symbol) as f64 / self.total as f64)
    }
}

pub fn probability_of(symbol: char, buffer: &InputBuffer) -> Result<f64> {
    SymbolCounts::tally(buffer).probability_of(symbol)
}

pub fn shannon_entropy(buffer: &InputBuffer) -> Result<EntropyResult> {
    info!("Calculating Shannon entropy over {} symbols", buffer.len());

    let counts = SymbolCounts::tally(buffer);
    if counts.total() == 0 {
        return Err(EntropyError::EmptyInput);
    }

    let mut entropy = 0.0;
    let mut probabilities = ProbabilityMapping::new();

    for symbol in counts.symbols() {
        let p = counts.probability_of(symbol)?;

        if p > 0.0 {
            entropy -= p * p.log2();
        }

        probabilities.insert(symbol, p);
    }

    info!("Shannon entropy: {entropy}");

    Ok(EntropyResult {
        entropy,
        probabilities,
    })
}

pub fn relative_entropy(
    buffer: &InputBuffer,
    baseline: &FrequencyMapping,
) -> Result<EntropyResult> {
    info!(
        "Calculating relative entropy over {} symbols against {} baseline symbols",
        buffer.len(),
        baseline.len()
    );

    let counts = SymbolCounts::tally(buffer);
    if counts.total() == 0 {
        return Err(EntropyError::EmptyInput);
    }

    let mut entropy = 0.0;
    let mut probabilities = ProbabilityMapping::new();

    for (&symbol, &weight) in baseline {
        let count = counts.count(symbol);
        let p = counts.probability_of(symbol)?;

        // Raw count over the baseline value, not p / q.
        let ratio = count_ratio(symbol, count, weight)?;

        if ratio != 0.0 {
            let term = p * (p / weight).log2();
            debug!("{symbol:?}: count={count} p={p} baseline={weight} term={term}");
            entropy += term;
        } else {
            debug!("{symbol:?}: absent from input");
        }

        probabilities.insert(symbol, p);
    }

    if entropy < 0.0 {
        warn!(
            "Relative entropy is negative ({entropy}); baseline values are compared against raw counts"
        );
    }
    info!("Relative entropy: {entropy}");

    Ok(EntropyResult {
        entropy,
        probabilities,
    })
}

fn count_ratio(symbol: char, count: usize, weight: f64) -> Result<f64> {
    // A zero numerator yields zero for every baseline value, zero included.
    if count == 0 {
        return Ok(0.0);
    }

    if weight == 0.0 {
        return Err(EntropyError::BaselineZeroValue { symbol, count });
    }

    Ok(count as f64 / weight)
}
