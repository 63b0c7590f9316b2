//! # sizetime
//!
//! Fits processing time (seconds) as a linear function of file size (MB) and charts
//! how the fit evolves during training.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Models carry their training state in the type system
//!   (`Unfitted` vs `Fitted`), preventing invalid operations at compile time.
//! - **Training/Inference Separation**: Trained models contain only prediction parameters;
//!   training logic lives in separate components (losses, optimizers, trainers).
//! - **Observable Training**: a training run is an iterator of per-epoch snapshots, so
//!   callers react to progress without callbacks or shared mutable state.
//! - **Backend Agnosticism**: Abstract `Backend` trait; the `ndarray` feature adds a
//!   second implementation without changing model code.
//!
//! ## Quick Start
//!
//! ```rust
//! use sizetime::backend::CpuBackend;
//! use sizetime::chart::{FigureId, FigurePresenter};
//! use sizetime::config::DemoConfig;
//! use sizetime::dataset::Series;
//!
//! let mut presenter = FigurePresenter::new();
//! let outcome = sizetime::demo::run::<CpuBackend, _>(
//!     &DemoConfig::default(),
//!     &Series::train(),
//!     &Series::test(),
//!     &mut presenter,
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.report.trajectory.len(), 200);
//! assert_eq!(presenter.figure(FigureId::ModelFit).unwrap().traces.len(), 6);
//! ```
//!
//! ## Module Structure
//!
//! - `backend` — Tensor abstractions and computation primitives (`Tensor1D`, `Tensor2D`)
//! - `dataset` — Batch iteration and the size/time series
//! - `model` — Linear model with stateful type parameters
//! - `loss` — Mean absolute error
//! - `optimizer` — Stochastic gradient descent
//! - `trainer` — Training loop as an iterator of epoch snapshots
//! - `checkpoint` — Parameter trajectory and scheduled fit-line snapshots
//! - `chart` — Figures, the presenter interface and SVG rendering
//! - `evaluation` — Held-out loss and predictions
//! - `demo` — The end-to-end pipeline
//! - `serialization` — Model persistence

pub mod backend;

/// Scheduled snapshots of the fit during training.
pub mod checkpoint;

/// Plot figures, the presenter trait and rendering.
pub mod chart;

/// Demo configuration.
pub mod config;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// End-to-end training and charting pipeline.
pub mod demo;

/// Crate error types.
pub mod error;

/// Held-out evaluation and point predictions.
pub mod evaluation;

/// Differentiable loss functions for model training.
pub mod loss;

/// Machine learning models with compile-time state safety.
pub mod model;

/// Optimization algorithms for parameter updates.
pub mod optimizer;

/// Model persistence.
pub mod serialization;

/// Training loop orchestration.
pub mod trainer;

pub use backend::{Backend, CpuBackend, ScalarOps};
pub use model::{Fitted, Parameters, Unfitted};
