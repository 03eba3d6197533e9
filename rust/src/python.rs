//! # Python bindings
//!
//! Exposes both entropy engines to Python through [PyO3](https://pyo3.rs).
//! Input arrives as `bytes` and is split into symbols the same way the
//! CLI does, so results agree between the two surfaces. Log records are
//! forwarded to Python's `logging` module by `pyo3-log`.

use pyo3::{create_exception, exceptions::PyValueError, prelude::*};

use crate::{
    error::EntropyError, math, EntropyResult, FrequencyMapping, InputBuffer, ProbabilityMapping,
    SymbolMode,
};

create_exception!(entropy_calc, PyEntropyError, PyValueError);

impl From<EntropyError> for PyErr {
    fn from(err: EntropyError) -> Self {
        PyEntropyError::new_err(err.to_string())
    }
}

fn decode(data: &[u8], binary: bool) -> PyResult<InputBuffer> {
    let mode = if binary {
        SymbolMode::Bytes
    } else {
        SymbolMode::Text
    };

    InputBuffer::decode(data, mode).map_err(|err| PyEntropyError::new_err(err.to_string()))
}

fn into_tuple(result: EntropyResult) -> (f64, ProbabilityMapping) {
    (result.entropy, result.probabilities)
}

/// Calculates Shannon entropy of data
#[pyfunction(name = "shannon_entropy", signature = (data, binary = false))]
fn py_shannon_entropy(
    py: Python<'_>,
    data: &[u8],
    binary: bool,
) -> PyResult<(f64, ProbabilityMapping)> {
    let buffer = decode(data, binary)?;
    let result = py.allow_threads(|| math::shannon_entropy(&buffer))?;

    Ok(into_tuple(result))
}

/// Calculates relative entropy of data against a baseline distribution
#[pyfunction(name = "relative_entropy", signature = (data, baseline, binary = false))]
fn py_relative_entropy(
    py: Python<'_>,
    data: &[u8],
    baseline: FrequencyMapping,
    binary: bool,
) -> PyResult<(f64, ProbabilityMapping)> {
    let buffer = decode(data, binary)?;
    let result = py.allow_threads(|| math::relative_entropy(&buffer, &baseline))?;

    Ok(into_tuple(result))
}

/// Entropy measures over file content
#[pymodule]
#[pyo3(name = "entropy_calc")]
fn init_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_shannon_entropy, m)?)?;
    m.add_function(wrap_pyfunction!(py_relative_entropy, m)?)?;
    m.add("EntropyError", m.py().get_type::<PyEntropyError>())?;

    pyo3_log::init();

    Ok(())
}
