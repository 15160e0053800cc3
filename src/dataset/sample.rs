use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;

/// One training example: an input vector and the expected output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub data: Vec<f64>,
    pub label: Vec<f64>,
}

impl Sample {
    pub fn new(data: Vec<f64>, label: Vec<f64>) -> Sample {
        Sample { data, label }
    }
}

/// Reads a JSON array of samples, order preserved.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes `samples` as a JSON array.
pub fn save_dataset<P: AsRef<Path>>(path: P, samples: &[Sample]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, samples)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::NamedTempFile;

    #[test]
    fn dataset_file_keeps_order() {
        let samples: Vec<Sample> = (0..10)
            .map(|i| Sample::new(vec![i as f64 / 10.0], vec![(i % 2) as f64]))
            .collect();
        let file = NamedTempFile::new().unwrap();
        save_dataset(file.path(), &samples).unwrap();
        assert_eq!(load_dataset(file.path()).unwrap(), samples);
    }

    #[test]
    fn reads_hand_written_json() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"[{"data": [0.5, 1.0], "label": [1.0]}]"#).unwrap();
        let samples = load_dataset(file.path()).unwrap();
        assert_eq!(samples, vec![Sample::new(vec![0.5, 1.0], vec![1.0])]);
    }

    #[test]
    fn not_a_list_is_parse_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"data": [0.5]}"#).unwrap();
        assert!(matches!(load_dataset(file.path()), Err(Error::Parse(_))));
    }
}
