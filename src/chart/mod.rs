//! Chart figures and the presenter interface.
//!
//! A [`Figure`] is a layout plus an ordered list of [`Trace`]s, serialized in the
//! same shape Plotly uses (`data` / `layout`, `type`, `mode`, `marker`, `line`), so
//! `figures.json` can be fed to a browser plot unchanged.
//!
//! A [`ChartPresenter`] owns figures by [`FigureId`]. Figures are created once with
//! [`ChartPresenter::new_plot`] and then updated in place with
//! [`ChartPresenter::restyle`], addressing traces by index.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod figures;
pub mod render;

/// The figures the demo draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FigureId {
    #[serde(rename = "modelFitResult")]
    ModelFit,
    #[serde(rename = "lossSurface")]
    LossSurface,
}

impl FigureId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FigureId::ModelFit => "modelFitResult",
            FigureId::LossSurface => "lossSurface",
        }
    }

    /// File name used when the figure is rendered to SVG.
    pub fn file_name(&self) -> &'static str {
        match self {
            FigureId::ModelFit => "model_fit.svg",
            FigureId::LossSurface => "loss_surface.svg",
        }
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl Layout {
    pub fn new(title: &str, x_title: &str, y_title: &str) -> Self {
        Self {
            title: title.to_string(),
            xaxis: Axis {
                title: x_title.to_string(),
            },
            yaxis: Axis {
                title: y_title.to_string(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    /// Parameter-space chart; the x/y arrays hold the `(k, b)` trajectory.
    Contour,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Markers,
    Lines,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    Circle,
    TriangleUp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub symbol: MarkerSymbol,
    pub size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Dot,
    Dash,
    Longdash,
    Solid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: u32,
    pub dash: Dash,
}

/// A named data series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl Trace {
    /// Scatter trace drawn as markers.
    pub fn markers(name: &str, x: Vec<f64>, y: Vec<f64>, symbol: MarkerSymbol, size: u32) -> Self {
        Self {
            name: Some(name.to_string()),
            x,
            y,
            kind: TraceKind::Scatter,
            mode: Some(Mode::Markers),
            marker: Some(Marker { symbol, size }),
            line: None,
        }
    }

    /// Scatter trace drawn as a polyline.
    pub fn line(name: &str, x: Vec<f64>, y: Vec<f64>, style: LineStyle) -> Self {
        Self {
            name: Some(name.to_string()),
            x,
            y,
            kind: TraceKind::Scatter,
            mode: Some(Mode::Lines),
            marker: None,
            line: Some(style),
        }
    }

    /// `(x, y)` pairs, truncated to the shorter array.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A plot: layout and traces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(rename = "data")]
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

/// Partial update of a trace; unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TraceUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(mut self, x: Vec<f64>) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: Vec<f64>) -> Self {
        self.y = Some(y);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn apply(&self, trace: &mut Trace) {
        if let Some(x) = &self.x {
            trace.x = x.clone();
        }
        if let Some(y) = &self.y {
            trace.y = y.clone();
        }
        if let Some(name) = &self.name {
            trace.name = Some(name.clone());
        }
    }
}

/// Creates plots and updates them incrementally.
pub trait ChartPresenter {
    /// Creates (or replaces) the figure `id`.
    fn new_plot(&mut self, id: FigureId, figure: Figure) -> Result<(), ChartError>;

    /// Applies `update` to trace `trace` of figure `id`, or to every trace when `None`.
    ///
    /// # Errors
    /// - No plot was created for `id`
    /// - `trace` is out of range
    fn restyle(
        &mut self,
        id: FigureId,
        update: &TraceUpdate,
        trace: Option<usize>,
    ) -> Result<(), ChartError>;
}

/// Presenter keeping figures in memory, for serialization and SVG rendering.
#[derive(Clone, Debug, Default)]
pub struct FigurePresenter {
    figures: BTreeMap<FigureId, Figure>,
    restyles: usize,
}

impl FigurePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure(&self, id: FigureId) -> Option<&Figure> {
        self.figures.get(&id)
    }

    pub fn figures(&self) -> &BTreeMap<FigureId, Figure> {
        &self.figures
    }

    /// Number of successful restyle calls.
    pub fn restyle_count(&self) -> usize {
        self.restyles
    }

    /// All figures as a JSON object keyed by figure id.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.figures)
    }

    /// Renders every figure to `<dir>/<file_name>` and returns the written paths.
    pub fn render_all(&self, dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
        self.figures
            .iter()
            .map(|(id, figure)| {
                let path = dir.join(id.file_name());
                render::render_svg(figure, &path)?;
                Ok(path)
            })
            .collect()
    }
}

impl ChartPresenter for FigurePresenter {
    fn new_plot(&mut self, id: FigureId, figure: Figure) -> Result<(), ChartError> {
        self.figures.insert(id, figure);
        Ok(())
    }

    fn restyle(
        &mut self,
        id: FigureId,
        update: &TraceUpdate,
        trace: Option<usize>,
    ) -> Result<(), ChartError> {
        let figure = self
            .figures
            .get_mut(&id)
            .ok_or_else(|| ChartError::UnknownFigure(id.to_string()))?;

        match trace {
            Some(index) => {
                let len = figure.traces.len();
                let target = figure
                    .traces
                    .get_mut(index)
                    .ok_or(ChartError::UnknownTrace { index, len })?;
                update.apply(target);
            }
            None => figure.traces.iter_mut().for_each(|t| update.apply(t)),
        }
        self.restyles += 1;
        Ok(())
    }
}
