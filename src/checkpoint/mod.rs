//! Checkpoint recording.
//!
//! A [`CheckpointRecorder`] is fed the parameters of every epoch in order. It keeps
//! the full `(k, b)` trajectory and, at the epochs named by a [`CheckpointSchedule`],
//! captures a [`Checkpoint`] holding the fit line of the model at that point.

use crate::error::{ConfigError, RecorderError};
use crate::model::Parameters;
use serde::{Deserialize, Serialize};

/// Epoch counts after which a checkpoint is taken.
///
/// Counts are 1-based ("after 10 epochs"), so the checkpoint for `10` fires on the
/// snapshot with 0-based epoch index `9`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct CheckpointSchedule {
    epochs: Vec<usize>,
}

impl CheckpointSchedule {
    /// Builds a schedule from strictly ascending, non-zero epoch counts.
    pub fn new(epochs: Vec<usize>) -> Result<Self, ConfigError> {
        if epochs.first() == Some(&0) {
            return Err(ConfigError::Invalid(
                "checkpoint epochs must be at least 1".into(),
            ));
        }
        if epochs.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(format!(
                "checkpoint epochs must be strictly ascending, got {epochs:?}"
            )));
        }
        Ok(Self { epochs })
    }

    /// Epoch counts in ascending order.
    pub fn epochs(&self) -> &[usize] {
        &self.epochs
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Last scheduled epoch count, if any.
    pub fn last(&self) -> Option<usize> {
        self.epochs.last().copied()
    }

    /// Position in the schedule of the checkpoint firing at `epoch_index`.
    pub fn ordinal_at(&self, epoch_index: usize) -> Option<usize> {
        self.epochs.binary_search(&(epoch_index + 1)).ok()
    }
}

impl Default for CheckpointSchedule {
    fn default() -> Self {
        Self {
            epochs: vec![10, 20, 100, 200],
        }
    }
}

impl TryFrom<Vec<usize>> for CheckpointSchedule {
    type Error = ConfigError;

    fn try_from(epochs: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(epochs)
    }
}

impl From<CheckpointSchedule> for Vec<usize> {
    fn from(schedule: CheckpointSchedule) -> Self {
        schedule.epochs
    }
}

/// Two-point line segment drawn for a model: `(0, b)` to `(x_max, b + x_max * k)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitSegment {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl FitSegment {
    pub fn from_parameters(params: Parameters, x_max: f64) -> Self {
        Self {
            x: [0.0, x_max],
            y: [params.b, params.b + params.k * x_max],
        }
    }
}

/// Model state captured at a scheduled epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// 0-based index of the epoch the snapshot was taken after.
    pub epoch_index: usize,
    /// Number of completed epochs (`epoch_index + 1`).
    pub epochs: usize,
    /// Position in the schedule.
    pub ordinal: usize,
    pub params: Parameters,
    pub segment: FitSegment,
}

impl Checkpoint {
    /// Legend label, e.g. `model after 10 epochs`.
    pub fn label(&self) -> String {
        format!("model after {} epochs", self.epochs)
    }
}

/// `(k, b)` after every epoch, indexed by 0-based epoch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LossTrajectory {
    pub k: Vec<f64>,
    pub b: Vec<f64>,
}

impl LossTrajectory {
    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }

    /// Parameters recorded for `epoch_index`.
    pub fn get(&self, epoch_index: usize) -> Option<Parameters> {
        Some(Parameters::new(
            *self.k.get(epoch_index)?,
            *self.b.get(epoch_index)?,
        ))
    }

    fn push(&mut self, params: Parameters) {
        self.k.push(params.k);
        self.b.push(params.b);
    }
}

/// Everything a finished recorder captured.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub trajectory: LossTrajectory,
    pub checkpoints: Vec<Checkpoint>,
}

/// Accumulates per-epoch parameters and emits checkpoints on schedule.
#[derive(Debug)]
pub struct CheckpointRecorder {
    schedule: CheckpointSchedule,
    x_max: f64,
    trajectory: LossTrajectory,
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointRecorder {
    /// `x_max` is the right end of every fit segment.
    pub fn new(schedule: CheckpointSchedule, x_max: f64) -> Self {
        Self {
            schedule,
            x_max,
            trajectory: LossTrajectory::default(),
            checkpoints: Vec::new(),
        }
    }

    pub fn schedule(&self) -> &CheckpointSchedule {
        &self.schedule
    }

    pub fn trajectory(&self) -> &LossTrajectory {
        &self.trajectory
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Records the parameters after `epoch_index`.
    ///
    /// Returns the checkpoint if one is scheduled for this epoch. Epochs must be
    /// observed exactly once each, starting at 0.
    pub fn observe(
        &mut self,
        epoch_index: usize,
        params: Parameters,
    ) -> Result<Option<Checkpoint>, RecorderError> {
        let expected = self.trajectory.len();
        if epoch_index != expected {
            return Err(RecorderError::OutOfOrder {
                expected,
                got: epoch_index,
            });
        }
        self.trajectory.push(params);

        let Some(ordinal) = self.schedule.ordinal_at(epoch_index) else {
            return Ok(None);
        };
        let checkpoint = Checkpoint {
            epoch_index,
            epochs: epoch_index + 1,
            ordinal,
            params,
            segment: FitSegment::from_parameters(params, self.x_max),
        };
        self.checkpoints.push(checkpoint.clone());
        Ok(Some(checkpoint))
    }

    /// Freezes the recording.
    pub fn finish(self) -> Recording {
        Recording {
            trajectory: self.trajectory,
            checkpoints: self.checkpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = CheckpointSchedule::default();
        assert_eq!(schedule.epochs(), &[10, 20, 100, 200]);
        assert_eq!(schedule.last(), Some(200));
    }

    #[test]
    fn test_ordinal_at_uses_zero_based_index() {
        let schedule = CheckpointSchedule::default();

        assert_eq!(schedule.ordinal_at(9), Some(0));
        assert_eq!(schedule.ordinal_at(19), Some(1));
        assert_eq!(schedule.ordinal_at(99), Some(2));
        assert_eq!(schedule.ordinal_at(199), Some(3));
        assert_eq!(schedule.ordinal_at(10), None);
        assert_eq!(schedule.ordinal_at(0), None);
    }

    #[test]
    fn test_schedule_rejects_zero_and_unsorted() {
        assert!(CheckpointSchedule::new(vec![0, 10]).is_err());
        assert!(CheckpointSchedule::new(vec![20, 10]).is_err());
        assert!(CheckpointSchedule::new(vec![10, 10]).is_err());
        assert!(CheckpointSchedule::new(vec![]).is_ok());
    }

    #[test]
    fn test_schedule_deserialize_validates() {
        let ok: CheckpointSchedule = serde_json::from_str("[5, 50]").unwrap();
        assert_eq!(ok.epochs(), &[5, 50]);

        let err = serde_json::from_str::<CheckpointSchedule>("[50, 5]");
        assert!(err.is_err());
    }

    #[test]
    fn test_fit_segment_from_parameters() {
        let segment = FitSegment::from_parameters(Parameters::new(0.07, 0.02), 10.0);

        assert_eq!(segment.x, [0.0, 10.0]);
        assert_eq!(segment.y[0], 0.02);
        assert!((segment.y[1] - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_fit_segment_zero_parameters_is_flat() {
        let segment = FitSegment::from_parameters(Parameters::default(), 10.0);
        assert_eq!(segment.y, [0.0, 0.0]);
    }

    #[test]
    fn test_recorder_fires_on_schedule() {
        let mut recorder = CheckpointRecorder::new(CheckpointSchedule::default(), 10.0);
        let mut fired = Vec::new();

        for epoch in 0..200 {
            let params = Parameters::new(epoch as f64 * 0.001, epoch as f64 * 0.0005);
            if let Some(cp) = recorder.observe(epoch, params).unwrap() {
                fired.push(cp.epoch_index);
            }
        }

        assert_eq!(fired, vec![9, 19, 99, 199]);
        let recording = recorder.finish();
        assert_eq!(recording.trajectory.len(), 200);
        assert_eq!(recording.checkpoints.len(), 4);
    }

    #[test]
    fn test_checkpoint_contents() {
        let mut recorder = CheckpointRecorder::new(CheckpointSchedule::new(vec![2]).unwrap(), 10.0);
        assert!(recorder.observe(0, Parameters::new(0.01, 0.001)).unwrap().is_none());

        let cp = recorder
            .observe(1, Parameters::new(0.02, 0.002))
            .unwrap()
            .unwrap();

        assert_eq!(cp.epochs, 2);
        assert_eq!(cp.ordinal, 0);
        assert_eq!(cp.label(), "model after 2 epochs");
        assert_eq!(cp.params, Parameters::new(0.02, 0.002));
        assert_eq!(cp.segment.y, [0.002, 0.002 + 0.02 * 10.0]);
    }

    #[test]
    fn test_recorder_rejects_out_of_order() {
        let mut recorder = CheckpointRecorder::new(CheckpointSchedule::default(), 10.0);
        recorder.observe(0, Parameters::default()).unwrap();

        let err = recorder.observe(2, Parameters::default()).unwrap_err();
        assert!(matches!(err, RecorderError::OutOfOrder { expected: 1, got: 2 }));

        let err = recorder.observe(0, Parameters::default()).unwrap_err();
        assert!(matches!(err, RecorderError::OutOfOrder { expected: 1, got: 0 }));
        assert_eq!(recorder.trajectory().len(), 1);
    }

    #[test]
    fn test_trajectory_get() {
        let mut recorder = CheckpointRecorder::new(CheckpointSchedule::default(), 10.0);
        recorder.observe(0, Parameters::new(1.0, 2.0)).unwrap();

        assert_eq!(recorder.trajectory().get(0), Some(Parameters::new(1.0, 2.0)));
        assert_eq!(recorder.trajectory().get(1), None);
    }
}
