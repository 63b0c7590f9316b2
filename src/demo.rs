//! End-to-end pipeline: train with checkpoints, chart, evaluate, predict.

use crate::{
    backend::Backend,
    chart::{
        figures::{self, FIRST_FIT_TRACE},
        ChartPresenter, FigureId, TraceUpdate,
    },
    checkpoint::{Checkpoint, CheckpointRecorder, LossTrajectory},
    config::DemoConfig,
    dataset::Series,
    error::DemoError,
    evaluation::{self, SizePrediction},
    loss::MAELoss,
    model::{Fitted, LinearModel, LinearRegression, Parameters},
    optimizer::SGD,
    trainer::Trainer,
};
use serde::Serialize;

/// Serializable summary of a demo run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemoReport {
    pub config: DemoConfig,
    pub train_series: String,
    pub test_series: String,
    /// Mean training loss of every epoch.
    pub epoch_losses: Vec<f64>,
    pub checkpoints: Vec<Checkpoint>,
    pub trajectory: LossTrajectory,
    pub final_parameters: Parameters,
    pub test_loss: f64,
    pub predictions: Vec<SizePrediction>,
}

/// Result of [`run`]: the report and the trained model.
#[derive(Debug)]
pub struct DemoOutcome<B: Backend> {
    pub report: DemoReport,
    pub model: LinearModel<B, Fitted>,
}

/// Runs the whole demo on backend `B`, drawing into `presenter`.
///
/// Creates the model-fit and loss-surface plots, trains for `config.epochs` epochs,
/// restyles the matching fit line and the trajectory at every checkpoint, then
/// evaluates on `test` and predicts `config.prediction_sizes_mb`.
pub fn run<B, P>(
    config: &DemoConfig,
    train: &Series,
    test: &Series,
    presenter: &mut P,
) -> Result<DemoOutcome<B>, DemoError>
where
    B: Backend,
    P: ChartPresenter + ?Sized,
{
    config.validate()?;

    presenter.new_plot(
        FigureId::ModelFit,
        figures::model_fit(train, test, &config.checkpoints),
    )?;
    presenter.new_plot(FigureId::LossSurface, figures::loss_surface())?;

    let train_set = train.to_dataset()?;
    let test_set = test.to_dataset()?;

    let trainer = Trainer::builder(MAELoss, SGD::<B>::new(config.learning_rate))
        .batch_size(config.batch_size)
        .max_epochs(config.epochs)
        .build();
    let model = LinearRegression::<B>::with_parameters(config.initial);

    log::info!(
        "training on {} ({} samples) for {} epochs, lr={}",
        train.name(),
        train.len(),
        config.epochs,
        config.learning_rate
    );

    let mut recorder = CheckpointRecorder::new(config.checkpoints.clone(), config.fit_line_x_max);
    let mut epoch_losses = Vec::with_capacity(config.epochs);
    let mut run = trainer.run(model, &train_set)?;

    for snapshot in run.by_ref() {
        let snapshot = snapshot?;
        epoch_losses.push(snapshot.loss);

        let params = Parameters::try_from(&snapshot.params)?;
        if let Some(checkpoint) = recorder.observe(snapshot.epoch, params)? {
            let update = TraceUpdate::new()
                .x(checkpoint.segment.x.to_vec())
                .y(checkpoint.segment.y.to_vec())
                .name(checkpoint.label());
            presenter.restyle(
                FigureId::ModelFit,
                &update,
                Some(FIRST_FIT_TRACE + checkpoint.ordinal),
            )?;

            let trajectory = recorder.trajectory();
            let update = TraceUpdate::new()
                .x(trajectory.k.clone())
                .y(trajectory.b.clone());
            presenter.restyle(FigureId::LossSurface, &update, None)?;

            log::info!("wrote model {}", checkpoint.epochs);
            log::info!(
                "{} epochs,k={},b={}",
                checkpoint.epochs,
                checkpoint.params.k,
                checkpoint.params.b
            );
            if recorder.schedule().last() == Some(checkpoint.epochs) {
                log::debug!("loss surface trajectory: {:?}", trajectory);
            }
        }
    }

    let model = run.into_fitted();
    let recording = recorder.finish();

    let test_loss = evaluation::evaluate(&model, &test_set, &MAELoss)?;
    log::info!("{} loss (MAE): {}", test.name(), test_loss);

    let predictions = evaluation::predict_sizes(&model, &config.prediction_sizes_mb);
    for p in &predictions {
        log::info!("predicted {} MB -> {} sec", p.size_mb, p.time_sec);
    }

    let report = DemoReport {
        config: config.clone(),
        train_series: train.name().to_string(),
        test_series: test.name().to_string(),
        epoch_losses,
        checkpoints: recording.checkpoints,
        trajectory: recording.trajectory,
        final_parameters: model.parameters()?,
        test_loss,
        predictions,
    };

    Ok(DemoOutcome { report, model })
}
