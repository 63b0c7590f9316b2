//! The two figures of the demo and their initial contents.

use super::{Dash, Figure, Layout, LineStyle, MarkerSymbol, Trace, TraceKind};
use crate::checkpoint::CheckpointSchedule;
use crate::dataset::Series;

/// Index of the first checkpoint line in [`model_fit`]; trace `FIRST_FIT_TRACE + i` belongs
/// to the `i`-th scheduled checkpoint.
pub const FIRST_FIT_TRACE: usize = 2;

const FIT_LINE_STYLES: [(&str, u32, Dash); 4] = [
    ("blue", 1, Dash::Dot),
    ("green", 2, Dash::Dash),
    ("red", 3, Dash::Longdash),
    ("black", 4, Dash::Solid),
];

/// Line style of the `ordinal`-th checkpoint; wraps around past the fourth.
pub fn fit_line_style(ordinal: usize) -> LineStyle {
    let (color, width, dash) = FIT_LINE_STYLES[ordinal % FIT_LINE_STYLES.len()];
    LineStyle {
        color: color.to_string(),
        width,
        dash,
    }
}

/// Train/test scatter plus one placeholder line per checkpoint.
///
/// The placeholder lines start at `x = [0, 2]`, `y = [0, 0.01]` and are labelled
/// `model after N epochs` until restyled.
pub fn model_fit(train: &Series, test: &Series, schedule: &CheckpointSchedule) -> Figure {
    let mut traces = vec![
        Trace::markers(
            train.name(),
            train.sizes(),
            train.times(),
            MarkerSymbol::Circle,
            8,
        ),
        Trace::markers(
            test.name(),
            test.sizes(),
            test.times(),
            MarkerSymbol::TriangleUp,
            10,
        ),
    ];
    traces.extend((0..schedule.len()).map(|ordinal| {
        Trace::line(
            "model after N epochs",
            vec![0.0, 2.0],
            vec![0.0, 0.01],
            fit_line_style(ordinal),
        )
    }));

    Figure {
        traces,
        layout: Layout::new("Model fit result", "size (MB)", "time (sec)"),
    }
}

/// Empty `(k, b)` trajectory chart.
pub fn loss_surface() -> Figure {
    Figure {
        traces: vec![Trace {
            name: None,
            x: Vec::new(),
            y: Vec::new(),
            kind: TraceKind::Contour,
            mode: None,
            marker: None,
            line: None,
        }],
        layout: Layout::new("loss surface", "k (kernel)", "b (bias)"),
    }
}
