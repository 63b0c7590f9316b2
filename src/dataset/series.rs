//! File size / processing time series.
//!
//! The built-in series are fixed synthetic measurements: the time in seconds it
//! took to process a file of a given size in MB. [`Series::train`] is used for
//! fitting and [`Series::test`] is held out for evaluation.

use crate::dataset::InMemoryDataset;
use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

const TRAIN_SIZE_MB: [f64; 20] = [
    0.080, 9.000, 0.001, 0.100, 8.000, 5.000, 0.100, 6.000, 0.050, 0.500, 0.002, 2.000, 0.005,
    10.00, 0.010, 7.000, 6.000, 5.000, 1.000, 1.000,
];
const TRAIN_TIME_SEC: [f64; 20] = [
    0.135, 0.739, 0.067, 0.126, 0.646, 0.435, 0.069, 0.497, 0.068, 0.116, 0.070, 0.289, 0.076,
    0.744, 0.083, 0.560, 0.480, 0.399, 0.153, 0.149,
];

const TEST_SIZE_MB: [f64; 20] = [
    5.000, 0.200, 0.001, 9.000, 0.002, 0.020, 0.008, 4.000, 0.001, 1.000, 0.005, 0.080, 0.800,
    0.200, 0.050, 7.000, 0.005, 0.002, 8.000, 0.008,
];
const TEST_TIME_SEC: [f64; 20] = [
    0.425, 0.098, 0.052, 0.686, 0.066, 0.078, 0.070, 0.375, 0.058, 0.136, 0.052, 0.063, 0.183,
    0.087, 0.066, 0.558, 0.066, 0.068, 0.610, 0.057,
];

/// One measurement: file size and the time it took to process.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub size_mb: f64,
    pub time_sec: f64,
}

/// An immutable, ordered series of samples.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    name: String,
    samples: Vec<Sample>,
}

impl Series {
    /// Builds a series from parallel size/time slices.
    pub fn from_columns(
        name: impl Into<String>,
        size_mb: &[f64],
        time_sec: &[f64],
    ) -> Result<Self, DatasetError> {
        if size_mb.len() != time_sec.len() {
            return Err(DatasetError::LengthMismatch {
                x: size_mb.len(),
                y: time_sec.len(),
            });
        }
        let samples = size_mb
            .iter()
            .zip(time_sec)
            .map(|(&size_mb, &time_sec)| Sample { size_mb, time_sec })
            .collect();
        Self::from_samples(name, samples)
    }

    pub fn from_samples(name: impl Into<String>, samples: Vec<Sample>) -> Result<Self, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        if let Some(row) = samples
            .iter()
            .position(|s| !s.size_mb.is_finite() || !s.time_sec.is_finite())
        {
            return Err(DatasetError::NonFinite { row });
        }
        Ok(Self {
            name: name.into(),
            samples,
        })
    }

    /// Built-in training series (20 samples).
    pub fn train() -> Self {
        Self::builtin("trainData", &TRAIN_SIZE_MB, &TRAIN_TIME_SEC)
    }

    /// Built-in held-out series (20 samples).
    pub fn test() -> Self {
        Self::builtin("testData", &TEST_SIZE_MB, &TEST_TIME_SEC)
    }

    fn builtin(name: &str, size_mb: &[f64; 20], time_sec: &[f64; 20]) -> Self {
        let samples = size_mb
            .iter()
            .zip(time_sec)
            .map(|(&size_mb, &time_sec)| Sample { size_mb, time_sec })
            .collect();
        Self {
            name: name.to_string(),
            samples,
        }
    }

    /// Reads a series from CSV with `size_mb,time_sec` headers.
    pub fn from_csv_reader<R: io::Read>(name: impl Into<String>, reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let samples = rdr
            .deserialize::<Sample>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_samples(name, samples)
    }

    /// Reads a series from a CSV file, named after the file stem.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "series".to_string());
        let mut rdr = csv::Reader::from_path(path)?;
        let samples = rdr
            .deserialize::<Sample>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_samples(name, samples)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sizes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.size_mb).collect()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time_sec).collect()
    }

    /// Converts to a single-feature `(n, 1)` dataset.
    pub fn to_dataset(&self) -> Result<InMemoryDataset, DatasetError> {
        let x = self.samples.iter().map(|s| vec![s.size_mb]).collect();
        InMemoryDataset::new(x, self.times())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_builtin_series_have_twenty_points() {
        assert_eq!(Series::train().len(), 20);
        assert_eq!(Series::test().len(), 20);
        assert_eq!(Series::train().name(), "trainData");
        assert_eq!(Series::test().name(), "testData");
    }

    #[test]
    fn test_builtin_series_are_positive() {
        for series in [Series::train(), Series::test()] {
            assert!(series.samples().iter().all(|s| s.size_mb > 0.0 && s.time_sec > 0.0));
        }
    }

    #[test]
    fn test_from_columns_rejects_mismatch() {
        let err = Series::from_columns("s", &[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, DatasetError::LengthMismatch { x: 2, y: 1 }));
    }

    #[test]
    fn test_from_samples_rejects_nan() {
        let samples = vec![
            Sample { size_mb: 1.0, time_sec: 0.1 },
            Sample { size_mb: f64::NAN, time_sec: 0.2 },
        ];
        let err = Series::from_samples("s", samples).unwrap_err();
        assert!(matches!(err, DatasetError::NonFinite { row: 1 }));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "size_mb,time_sec\n1.0,0.15\n2.5,0.3\n";
        let series = Series::from_csv_reader("custom", csv.as_bytes()).unwrap();

        assert_eq!(series.sizes(), vec![1.0, 2.5]);
        assert_eq!(series.times(), vec![0.15, 0.3]);
    }

    #[test]
    fn test_from_csv_reader_empty_is_error() {
        let err = Series::from_csv_reader("custom", "size_mb,time_sec\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_from_csv_path() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("bench_runs.csv");
        std::fs::write(&path, "size_mb,time_sec\n4.0,0.4\n")?;

        let series = Series::from_csv_path(&path)?;
        assert_eq!(series.name(), "bench_runs");
        assert_eq!(series.samples(), &[Sample { size_mb: 4.0, time_sec: 0.4 }]);
        Ok(())
    }

    #[test]
    fn test_to_dataset_is_single_feature() {
        let dataset = Series::train().to_dataset().unwrap();
        assert_eq!(dataset.len(), Some(20));
        assert_eq!(dataset.n_features(), 1);
    }
}
