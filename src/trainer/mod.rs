// trainer/mod.rs
use crate::{
    backend::{Backend, Scalar, Tensor1D, Tensor2D},
    dataset::Dataset,
    error::TrainError,
    loss::Loss,
    model::TrainableModel,
    optimizer::Optimizer,
};
use log::Level;
use std::marker::PhantomData;

/// Orchestrates the training loop for a `TrainableModel`.
///
/// Combines a loss function and an optimizer to fit a model on a dataset.
/// Once built via `TrainerBuilder`, it is immutable and can be reused across multiple models
/// (as long as types match).
///
/// Training is exposed two ways: [`Trainer::run`] returns a [`TrainingRun`] that yields one
/// [`EpochSnapshot`] per epoch, and [`Trainer::fit`] drains such a run and returns the fitted
/// model.
pub struct Trainer<B, L, O, M, P>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
{
    pub(crate) batch_size: usize,
    pub(crate) max_epochs: usize,
    pub(crate) verbose: bool,
    pub(crate) loss_fn: L,
    pub(crate) optimizer: O,
    _phantom_backend: PhantomData<B>,
    _phantom_model: PhantomData<M>,
}

/// Fluent builder for constructing a `Trainer` with custom hyperparameters.
///
/// Defaults:
/// - `batch_size`: 32
/// - `max_epochs`: 1000
/// - `verbose`: true
pub struct TrainerBuilder<B, L, O, M, P>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
{
    batch_size: usize,
    max_epochs: usize,
    verbose: bool,
    loss_fn: L,
    optimizer: O,
    _phantom_backend: PhantomData<B>,
    _phantom_model: PhantomData<M>,
}

impl<B, L, O, M, P> TrainerBuilder<B, L, O, M, P>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
{
    /// Creates a new `TrainerBuilder` with the given components.
    ///
    /// # Arguments
    /// * `loss_fn` — differentiable loss (e.g., `MAELoss`)
    /// * `optimizer` — parameter updater (e.g., `SGD`)
    pub fn new(loss_fn: L, optimizer: O) -> Self {
        Self {
            batch_size: 32,
            max_epochs: 1000,
            verbose: true,
            loss_fn,
            optimizer,
            _phantom_backend: PhantomData,
            _phantom_model: PhantomData,
        }
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = epochs;
        self
    }

    /// Sets verbosity for training output.
    ///
    /// When `true`, the per-epoch loss is logged at `debug` level, otherwise at `trace`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Trainer<B, L, O, M, P> {
        Trainer {
            batch_size: self.batch_size,
            max_epochs: self.max_epochs,
            verbose: self.verbose,
            loss_fn: self.loss_fn,
            optimizer: self.optimizer,
            _phantom_backend: PhantomData,
            _phantom_model: PhantomData,
        }
    }
}

/// State of the model after one completed epoch.
#[derive(Clone, Debug)]
pub struct EpochSnapshot<P> {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Mean training loss over the epoch, weighted by batch size.
    pub loss: f64,
    /// Parameters after the epoch's last update.
    pub params: P,
}

/// An in-progress training run.
///
/// Each call to `next()` trains one full epoch and yields its [`EpochSnapshot`], so the
/// caller observes every epoch exactly once and in order. The iterator ends after
/// `max_epochs` epochs, or right after yielding a batch loading error.
pub struct TrainingRun<'a, B, L, O, M, P, D>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
{
    trainer: &'a Trainer<B, L, O, M, P>,
    dataset: &'a D,
    model: M,
    n_total: usize,
    next_epoch: usize,
    failed: bool,
}

impl<B, L, O, M, P, D> TrainingRun<'_, B, L, O, M, P, D>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
{
    /// Number of epochs trained so far.
    pub fn epochs_completed(&self) -> usize {
        self.next_epoch
    }

    /// The model in its current state.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Stops the run and converts the model as trained so far.
    pub fn into_fitted(self) -> M::Output {
        self.model.into_fitted()
    }
}

impl<B, L, O, M, P, D> Iterator for TrainingRun<'_, B, L, O, M, P, D>
where
    B: Backend,
    L: Loss<B, Target = Tensor1D<B>, Prediction = Tensor1D<B>>,
    M: TrainableModel<B, Input = Tensor2D<B>, Prediction = Tensor1D<B>, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    P: Clone,
    D: Dataset,
{
    type Item = Result<EpochSnapshot<P>, TrainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_epoch >= self.trainer.max_epochs {
            return None;
        }
        let epoch = self.next_epoch;

        let mut total_loss = Scalar::<B>::new(0.);
        for batch_result in self.dataset.batches::<B>(self.trainer.batch_size) {
            let (batch_x, batch_y) = match batch_result {
                Ok(batch) => batch,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(TrainError::Data(format!("{e:?}"))));
                }
            };
            let preds = self.model.forward(&batch_x);
            let batch_weight = Scalar::<B>::new(batch_y.len() as f64);
            total_loss = total_loss + self.trainer.loss_fn.loss(&preds, &batch_y) * batch_weight;

            let grad_preds = self.trainer.loss_fn.grad_wrt_prediction(&preds, &batch_y);
            let grads = self.model.backward(&batch_x, &grad_preds);
            let new_params = self.trainer.optimizer.step(self.model.params(), &grads);
            self.model.update_params(&new_params);
        }

        let avg_loss = (total_loss / Scalar::<B>::new(self.n_total as f64)).to_f64();
        let level = if self.trainer.verbose {
            Level::Debug
        } else {
            Level::Trace
        };
        log::log!(level, "Epoch {}: loss = {}", epoch, avg_loss);

        self.next_epoch += 1;
        Some(Ok(EpochSnapshot {
            epoch,
            loss: avg_loss,
            params: self.model.params().clone(),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.trainer.max_epochs.saturating_sub(self.next_epoch);
        (0, Some(remaining))
    }
}

impl<B, L, O, M, P> Trainer<B, L, O, M, P>
where
    B: Backend,
    L: Loss<B, Target = Tensor1D<B>, Prediction = Tensor1D<B>>,
    M: TrainableModel<B, Input = Tensor2D<B>, Prediction = Tensor1D<B>, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    P: Clone,
{
    /// Starts a training run over `dataset`.
    ///
    /// # Errors
    /// - The dataset length is unknown (required for loss averaging)
    /// - The dataset is empty
    /// - The batch size is zero
    ///
    /// Batch loading errors surface from the returned iterator instead.
    pub fn run<'a, D>(
        &'a self,
        model: M,
        dataset: &'a D,
    ) -> Result<TrainingRun<'a, B, L, O, M, P, D>, TrainError>
    where
        D: Dataset,
    {
        let n_total = dataset.len().ok_or(TrainError::UnknownLength)?;
        if n_total == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if self.batch_size == 0 {
            return Err(TrainError::ZeroBatchSize);
        }

        Ok(TrainingRun {
            trainer: self,
            dataset,
            model,
            n_total,
            next_epoch: 0,
            failed: false,
        })
    }

    /// Trains the model for `max_epochs` and returns the fitted model.
    ///
    /// # Notes
    /// - Loss is averaged over the entire dataset per epoch.
    /// - Gradients are averaged per batch.
    pub fn fit<D>(&self, model: M, dataset: &D) -> Result<M::Output, TrainError>
    where
        D: Dataset,
    {
        let mut run = self.run(model, dataset)?;
        for snapshot in run.by_ref() {
            snapshot?;
        }
        Ok(run.into_fitted())
    }
}

impl<B, L, O, M, P> Trainer<B, L, O, M, P>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
{
    /// Convenience constructor that starts the builder pattern.
    ///
    /// Equivalent to `TrainerBuilder::new(...)`.
    pub fn builder(loss_fn: L, optimizer: O) -> TrainerBuilder<B, L, O, M, P> {
        TrainerBuilder::new(loss_fn, optimizer)
    }

    pub fn max_epochs(&self) -> usize {
        self.max_epochs
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::CpuBackend,
        dataset::{InMemoryDataset, Series},
        loss::MAELoss,
        model::{InferenceModel, LinearParams, LinearRegression, Parameters},
        optimizer::SGD,
    };

    type LinearTrainer = Trainer<
        CpuBackend,
        MAELoss,
        SGD<CpuBackend>,
        LinearRegression<CpuBackend>,
        LinearParams<CpuBackend>,
    >;

    fn builder(lr: f64) -> TrainerBuilder<
        CpuBackend,
        MAELoss,
        SGD<CpuBackend>,
        LinearRegression<CpuBackend>,
        LinearParams<CpuBackend>,
    > {
        TrainerBuilder::new(MAELoss, SGD::<CpuBackend>::new(lr))
    }

    // === TrainerBuilder Tests ===

    #[test]
    fn test_trainer_builder_default_values() {
        let builder = builder(0.01);

        assert_eq!(builder.batch_size, 32);
        assert_eq!(builder.max_epochs, 1000);
        assert!(builder.verbose);
    }

    #[test]
    fn test_trainer_builder_chaining() {
        let builder = builder(0.01).batch_size(128).max_epochs(250).verbose(false);

        assert_eq!(builder.batch_size, 128);
        assert_eq!(builder.max_epochs, 250);
        assert!(!builder.verbose);
    }

    #[test]
    fn test_trainer_builder_chaining_order_independent() {
        let builder1 = builder(0.01).batch_size(16).max_epochs(100);
        let builder2 = builder(0.01).max_epochs(100).batch_size(16);

        assert_eq!(builder1.batch_size, builder2.batch_size);
        assert_eq!(builder1.max_epochs, builder2.max_epochs);
    }

    #[test]
    fn test_trainer_builder_creates_valid_trainer() {
        let trainer: LinearTrainer = builder(0.01)
            .batch_size(64)
            .max_epochs(200)
            .verbose(false)
            .build();

        assert_eq!(trainer.batch_size(), 64);
        assert_eq!(trainer.max_epochs(), 200);
        assert!(!trainer.verbose);
    }

    #[test]
    fn test_trainer_builder_clone_components() {
        let builder1 = builder(0.01).batch_size(32).max_epochs(100);

        // SGD implements Clone, so the same optimizer can seed another builder
        let builder2: TrainerBuilder<
            CpuBackend,
            MAELoss,
            SGD<CpuBackend>,
            LinearRegression<CpuBackend>,
            LinearParams<CpuBackend>,
        > = TrainerBuilder::new(MAELoss, builder1.optimizer.clone());
        assert_eq!(builder2.optimizer.learning_rate(), 0.01);
    }

    // === Run Tests ===

    #[test]
    fn test_run_yields_one_snapshot_per_epoch_in_order() {
        let dataset = Series::train().to_dataset().unwrap();
        let trainer: LinearTrainer = builder(0.0005).max_epochs(25).verbose(false).build();

        let run = trainer
            .run(LinearRegression::<CpuBackend>::new(1), &dataset)
            .unwrap();
        let epochs: Vec<usize> = run.map(|s| s.unwrap().epoch).collect();

        assert_eq!(epochs, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_first_epoch_matches_hand_computed_step() {
        let dataset = Series::train().to_dataset().unwrap();
        let trainer: LinearTrainer = builder(0.0005).max_epochs(1).build();

        let mut run = trainer
            .run(LinearRegression::<CpuBackend>::new(1), &dataset)
            .unwrap();
        let snapshot = run.next().unwrap().unwrap();

        // All predictions start at 0 and every target is positive, so the MAE
        // gradient is -mean(x) for k and -1 for b.
        let sizes = Series::train().sizes();
        let mean_size = sizes.iter().sum::<f64>() / sizes.len() as f64;
        let mean_time = Series::train().times().iter().sum::<f64>() / 20.0;
        let params = Parameters::try_from(&snapshot.params).unwrap();

        assert!((params.k - 0.0005 * mean_size).abs() < 1e-12);
        assert!((params.b - 0.0005).abs() < 1e-12);
        assert!((snapshot.loss - mean_time).abs() < 1e-12);
        assert!(run.next().is_none());
    }

    #[test]
    fn test_run_loss_decreases_over_training() {
        let dataset = Series::train().to_dataset().unwrap();
        let trainer: LinearTrainer = builder(0.0005).max_epochs(200).verbose(false).build();

        let losses: Vec<f64> = trainer
            .run(LinearRegression::<CpuBackend>::new(1), &dataset)
            .unwrap()
            .map(|s| s.unwrap().loss)
            .collect();

        assert_eq!(losses.len(), 200);
        assert!(losses[199] < losses[0]);
    }

    #[test]
    fn test_run_into_fitted_after_partial_iteration() {
        let dataset = Series::train().to_dataset().unwrap();
        let trainer: LinearTrainer = builder(0.0005).max_epochs(50).build();

        let mut run = trainer
            .run(LinearRegression::<CpuBackend>::new(1), &dataset)
            .unwrap();
        let tenth = run.nth(9).unwrap().unwrap();
        assert_eq!(run.epochs_completed(), 10);

        let fitted = run.into_fitted();
        assert_eq!(
            fitted.parameters().unwrap(),
            Parameters::try_from(&tenth.params).unwrap()
        );
    }

    #[test]
    fn test_run_rejects_zero_batch_size() {
        let dataset = Series::train().to_dataset().unwrap();
        let trainer: LinearTrainer = builder(0.01).batch_size(0).build();

        let result = trainer.run(LinearRegression::<CpuBackend>::new(1), &dataset);
        assert!(matches!(result, Err(TrainError::ZeroBatchSize)));
    }

    // === Fit Tests ===

    #[test]
    fn test_trainer_fit_linear_regression() {
        // y = 2x + 1
        let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let y = vec![3.0, 5.0, 7.0, 9.0];
        let dataset = InMemoryDataset::new(x, y).unwrap();

        let trainer = Trainer::builder(MAELoss, SGD::<CpuBackend>::new(0.01))
            .batch_size(4)
            .max_epochs(5000)
            .verbose(false)
            .build();

        let fitted_model = trainer
            .fit(LinearRegression::<CpuBackend>::new(1), &dataset)
            .unwrap();

        let test_input = Tensor2D::<CpuBackend>::column(&[0.0, 2.0]);
        let pred_vec = fitted_model.predict_batch(&test_input).to_vec();

        assert!((pred_vec[0] - 1.0).abs() < 0.5);
        assert!((pred_vec[1] - 5.0).abs() < 0.5);
    }

    #[test]
    fn test_fit_zero_epochs_returns_initial_model() {
        let dataset = Series::train().to_dataset().unwrap();
        let trainer: LinearTrainer = builder(0.01).max_epochs(0).build();

        let start = Parameters::new(0.3, -0.2);
        let fitted = trainer
            .fit(LinearRegression::<CpuBackend>::with_parameters(start), &dataset)
            .unwrap();

        assert_eq!(fitted.parameters().unwrap(), start);
    }

    #[test]
    fn test_trainer_unknown_dataset_length() {
        struct MockDatasetWithoutLen;

        impl Dataset for MockDatasetWithoutLen {
            type Error = String;

            fn len(&self) -> Option<usize> {
                None
            }

            fn get_batch<B: Backend>(
                &self,
                _range: std::ops::Range<usize>,
            ) -> Result<(Tensor2D<B>, Tensor1D<B>), Self::Error> {
                Err("unreachable".into())
            }
        }

        let trainer: LinearTrainer = builder(0.1).batch_size(1).max_epochs(1).build();

        let result = trainer.fit(LinearRegression::<CpuBackend>::new(1), &MockDatasetWithoutLen);
        assert!(matches!(result, Err(TrainError::UnknownLength)));
    }

    #[test]
    fn test_batch_error_ends_the_run() {
        struct FailingDataset;

        impl Dataset for FailingDataset {
            type Error = &'static str;

            fn len(&self) -> Option<usize> {
                Some(4)
            }

            fn get_batch<B: Backend>(
                &self,
                _range: std::ops::Range<usize>,
            ) -> Result<(Tensor2D<B>, Tensor1D<B>), Self::Error> {
                Err("disk on fire")
            }
        }

        let trainer: LinearTrainer = builder(0.1).max_epochs(5).build();
        let mut run = trainer
            .run(LinearRegression::<CpuBackend>::new(1), &FailingDataset)
            .unwrap();

        match run.next() {
            Some(Err(TrainError::Data(msg))) => assert!(msg.contains("disk on fire")),
            other => panic!("expected data error, got {other:?}"),
        }
        assert!(run.next().is_none());
    }
}
