/// Marker for a model that is still being trained.
///
/// `LinearModel<B, Unfitted>` implements [`TrainableModel`](super::TrainableModel)
/// and has no `predict`; the trainer converts it to [`Fitted`] when the run ends.
#[derive(Clone, Copy, Debug)]
pub struct Unfitted;

/// Marker for a trained model.
///
/// A fitted model carries only its parameters, no optimizer or loss state, and
/// implements [`InferenceModel`](super::InferenceModel).
#[derive(Clone, Copy, Debug)]
pub struct Fitted;
