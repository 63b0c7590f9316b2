//! Error types shared across the crate.
//!
//! Each stage of the pipeline has its own error enum; [`DemoError`] wraps all of them
//! so the end-to-end runner can propagate with `?`.

use thiserror::Error;

/// Errors raised while building or loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Feature rows and targets have different lengths.
    #[error("x and y must have same length (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },
    /// No samples were provided.
    #[error("dataset is empty")]
    Empty,
    /// Feature rows do not all have the same width.
    #[error("all rows must have the same number of features")]
    RaggedRows,
    /// A value is NaN or infinite.
    #[error("non-finite value at row {row}")]
    NonFinite { row: usize },
    /// CSV parsing failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised by the model container.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The slope/intercept view only exists for single-feature models.
    #[error("expected a single-feature model, got {0} features")]
    NotSingleFeature(usize),
}

/// Errors raised by the training driver.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("dataset length unknown")]
    UnknownLength,
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("batch size must be positive")]
    ZeroBatchSize,
    /// A batch failed to load.
    #[error("data error: {0}")]
    Data(String),
}

/// Errors raised by the checkpoint recorder.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// Snapshots must arrive exactly once per epoch, in order.
    #[error("epoch {got} observed out of order (expected {expected})")]
    OutOfOrder { expected: usize, got: usize },
}

/// Errors raised by the chart presenter.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no plot created for {0}")]
    UnknownFigure(String),
    #[error("trace index {index} out of range ({len} traces)")]
    UnknownTrace { index: usize, len: usize },
    #[error("render error: {0}")]
    Render(String),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while saving or loading model parameters.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Top-level error of the demo pipeline.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Train(#[from] TrainError),
    #[error(transparent)]
    Recorder(#[from] RecorderError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
