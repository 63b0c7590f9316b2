//! SVG rendering of [`Figure`]s with `plotters`.

use super::{Dash, Figure, MarkerSymbol, Mode, Trace, TraceKind};
use crate::error::ChartError;
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

const SIZE: (u32, u32) = (900, 600);

/// Renders `figure` to an SVG file at `path`.
pub fn render_svg(figure: &Figure, path: &Path) -> Result<(), ChartError> {
    draw(figure, path).map_err(|e| ChartError::Render(e.to_string()))?;
    log::debug!("rendered {} to {}", figure.layout.title, path.display());
    Ok(())
}

fn draw(figure: &Figure, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = bounds(&figure.traces);
    let mut ctx = ChartBuilder::on(&root)
        .caption(&figure.layout.title, ("sans-serif", 24))
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(x_range, y_range)?;

    ctx.configure_mesh()
        .x_desc(figure.layout.xaxis.title.as_str())
        .y_desc(figure.layout.yaxis.title.as_str())
        .draw()?;

    let mut labelled = false;
    for (index, trace) in figure.traces.iter().enumerate() {
        let color = trace_color(trace, index);
        let points: Vec<(f64, f64)> = trace.points().collect();

        let annotation = match (trace.kind, trace.mode) {
            (TraceKind::Contour, _) => {
                // trajectory through parameter space, start to end
                ctx.draw_series(std::iter::once(PathElement::new(
                    points.clone(),
                    color.stroke_width(1),
                )))?;
                ctx.draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, 2, color.filled())),
                )?
            }
            (TraceKind::Scatter, Some(Mode::Lines)) => {
                let width = trace.line.as_ref().map_or(1, |l| l.width);
                let style = color.stroke_width(width);
                match trace.line.as_ref().map_or(Dash::Solid, |l| l.dash) {
                    Dash::Solid => {
                        ctx.draw_series(std::iter::once(PathElement::new(points, style)))?
                    }
                    Dash::Dot => ctx.draw_series(std::iter::once(DashedPathElement::new(
                        points, 2, 4, style,
                    )))?,
                    Dash::Dash => ctx.draw_series(std::iter::once(DashedPathElement::new(
                        points, 8, 5, style,
                    )))?,
                    Dash::Longdash => ctx.draw_series(std::iter::once(
                        DashedPathElement::new(points, 16, 6, style),
                    ))?,
                }
            }
            (TraceKind::Scatter, _) => {
                let marker = trace.marker.as_ref();
                let size = marker.map_or(6, |m| m.size) as i32 / 2;
                match marker.map_or(MarkerSymbol::Circle, |m| m.symbol) {
                    MarkerSymbol::Circle => ctx.draw_series(
                        points
                            .iter()
                            .map(|&p| Circle::new(p, size, color.filled())),
                    )?,
                    MarkerSymbol::TriangleUp => ctx.draw_series(
                        points
                            .iter()
                            .map(|&p| TriangleMarker::new(p, size, color.filled())),
                    )?,
                }
            }
        };

        if let Some(name) = &trace.name {
            labelled = true;
            annotation
                .label(name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }

    if labelled {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn trace_color(trace: &Trace, index: usize) -> RGBColor {
    match trace.line.as_ref().map(|l| l.color.as_str()) {
        Some("blue") => BLUE,
        Some("green") => GREEN,
        Some("red") => RED,
        Some("black") => BLACK,
        _ => {
            let c = Palette99::pick(index).to_rgba();
            RGBColor(c.0, c.1, c.2)
        }
    }
}

/// Axis ranges covering every point of every trace, padded by 5%.
fn bounds(traces: &[Trace]) -> (Range<f64>, Range<f64>) {
    let xs = traces.iter().flat_map(|t| t.points().map(|(x, _)| x));
    let ys = traces.iter().flat_map(|t| t.points().map(|(_, y)| y));
    (padded(xs), padded(ys))
}

fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::figures;
    use crate::checkpoint::CheckpointSchedule;
    use crate::dataset::Series;

    #[test]
    fn test_padded_empty_range() {
        assert_eq!(padded(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn test_padded_single_value() {
        assert_eq!(padded([2.0].into_iter()), 1.5..2.5);
    }

    #[test]
    fn test_padded_ignores_non_finite() {
        let range = padded([0.0, f64::NAN, 10.0].into_iter());
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_render_model_fit_svg() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("model_fit.svg");
        let figure = figures::model_fit(
            &Series::train(),
            &Series::test(),
            &CheckpointSchedule::default(),
        );

        render_svg(&figure, &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Model fit result"));
    }

    #[test]
    fn test_render_empty_loss_surface_svg() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("loss_surface.svg");

        render_svg(&figures::loss_surface(), &path).unwrap();

        assert!(std::fs::read_to_string(&path).unwrap().contains("loss surface"));
    }

    #[test]
    fn test_render_into_missing_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("out.svg");

        let err = render_svg(&figures::loss_surface(), &path).unwrap_err();
        assert!(matches!(err, ChartError::Render(_)));
    }
}
