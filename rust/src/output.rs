//! Persists a [`ProbabilityMapping`] next to the analysis.
//!
//! The written file is a flat JSON object with sorted keys, the same
//! format [`crate::load_baseline`] reads, so one analysis can serve as
//! the baseline of the next.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::error::{EntropyError, Result};
use crate::math::ProbabilityMapping;

/// Replaces the input file's extension.
pub const OUTPUT_EXTENSION: &str = "dist.json";

/// Destination for the mapping of `input`: its file name with
/// [`OUTPUT_EXTENSION`], relative to the working directory unless
/// `output_dir` is given.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map_or_else(|| PathBuf::from("input"), PathBuf::from)
        .with_extension(OUTPUT_EXTENSION);

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => file_name,
    }
}

/// Writes `probabilities` to `path`, creating missing parent directories.
pub fn write_probabilities(path: &Path, probabilities: &ProbabilityMapping) -> Result<()> {
    write_json(path, probabilities).map_err(|source| EntropyError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Wrote {} symbol probabilities to {}",
        probabilities.len(),
        path.display()
    );
    Ok(())
}

fn write_json(path: &Path, probabilities: &ProbabilityMapping) -> io::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, probabilities)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::{load_baseline, math::shannon_entropy, InputBuffer};

    #[test]
    fn test_output_path_in_working_directory() {
        assert_eq!(
            output_path(Path::new("/data/samples/firmware.bin"), None),
            PathBuf::from("firmware.dist.json")
        );
        assert_eq!(
            output_path(Path::new("README"), None),
            PathBuf::from("README.dist.json")
        );
    }

    #[test]
    fn test_output_path_in_output_directory() {
        assert_eq!(
            output_path(Path::new("samples/a.txt"), Some(Path::new("out"))),
            PathBuf::from("out/a.dist.json")
        );
    }

    #[test]
    fn test_written_mapping_reads_back_as_baseline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.dist.json");
        let probabilities = shannon_entropy(&InputBuffer::from("hello, world"))
            .unwrap()
            .probabilities;

        write_probabilities(&path, &probabilities).unwrap();

        assert_eq!(load_baseline(&path).unwrap(), probabilities);
    }

    #[test]
    fn test_keys_are_sorted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sorted.dist.json");
        let probabilities = ProbabilityMapping::from([('b', 0.5), ('a', 0.25), ('c', 0.25)]);

        write_probabilities(&path, &probabilities).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let a = written.find("\"a\"").unwrap();
        let b = written.find("\"b\"").unwrap();
        let c = written.find("\"c\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let result = write_probabilities(&blocker.join("a.dist.json"), &ProbabilityMapping::new());

        assert!(matches!(result, Err(EntropyError::OutputWrite { .. })));
    }
}
