use std::path::Path;
use plotters::prelude::{ChartBuilder, Circle, DrawingArea, DrawingBackend, IntoDrawingArea, PathElement, Polygon, RGBColor, SVGBackend};
use plotters::prelude::{WHITE, BLACK as INK};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::style::{Color as _, RGBAColor, ShapeStyle};
use super::{Figure, Mark, Orientation, Dash, Style, PlotError};

fn backend<E>(e : DrawingAreaErrorKind<E>) -> PlotError
where
    E : std::error::Error + Send + Sync
{
    PlotError::Backend(e.to_string())
}

fn rgba(style : &Style) -> RGBAColor {
    let c = style.color;
    RGBColor(c.0, c.1, c.2).mix(style.alpha)
}

// Data range widened by 5% on each side; one unit wide when degenerate.
fn padded(r : (f64, f64)) -> (f64, f64) {
    let span = r.1 - r.0;
    if span > 0.0 {
        (r.0 - 0.05 * span, r.1 + 0.05 * span)
    } else {
        (r.0 - 0.5, r.1 + 0.5)
    }
}

fn finite_points(x : &[f64], y : &[f64]) -> Vec<(f64, f64)> {
    x.iter().zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite() )
        .map(|(a, b)| (*a, *b) )
        .collect()
}

/// Splits a polyline into the pieces that are drawn under the dash pattern. Lengths are
/// measured relative to span (the plotted data range), so patterns look alike irrespective
/// of the axis scales.
fn dash_pieces(points : &[(f64, f64)], span : (f64, f64), dash : Dash) -> Vec<Vec<(f64, f64)>> {
    let (on, off) = match dash {
        Dash::Solid => return vec![points.to_vec()],
        Dash::Dashed => (0.02, 0.012),
        Dash::Dotted => (0.004, 0.008)
    };
    let mut pieces = Vec::new();
    if points.is_empty() {
        return pieces;
    }
    let mut current = vec![points[0]];
    let mut drawing = true;
    let mut left = on;
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg = (((b.0 - a.0) / span.0).powi(2) + ((b.1 - a.1) / span.1).powi(2)).sqrt();
        let mut pos = 0.0;
        while seg - pos > left {
            pos += left;
            let t = pos / seg;
            let p = (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1));
            if drawing {
                current.push(p);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![p];
            }
            drawing = !drawing;
            left = if drawing { on } else { off };
        }
        left -= seg - pos;
        if drawing {
            current.push(b);
        }
    }
    if drawing && current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}

impl Figure {

    /// Renders the recorded marks as a SVG document.
    pub fn to_svg_string(&self) -> Result<String, PlotError> {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, self.size()).into_drawing_area();
            self.render(&root)?;
        }
        Ok(buf)
    }

    pub fn save_svg(&self, path : impl AsRef<Path>) -> Result<(), PlotError> {
        let root = SVGBackend::new(path.as_ref(), self.size()).into_drawing_area();
        self.render(&root)?;
        tracing::info!(path = %path.as_ref().display(), "figure saved");
        Ok(())
    }

    fn render<DB>(&self, root : &DrawingArea<DB, Shift>) -> Result<(), PlotError>
    where
        DB : DrawingBackend
    {
        let b = self.bounds().ok_or(PlotError::Empty("figure has no finite coordinates"))?;
        let (x0, x1) = padded(b.x);
        let (y0, y1) = padded(b.y);
        let span = (x1 - x0, y1 - y0);
        root.fill(&WHITE).map_err(backend)?;

        let mut builder = ChartBuilder::on(root);
        builder.margin(10).x_label_area_size(40).y_label_area_size(50);
        if let Some(title) = self.title() {
            builder.caption(title, ("sans-serif", 20));
        }
        let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1).map_err(backend)?;
        let (x_desc, y_desc) = self.labels();
        chart.configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()
            .map_err(backend)?;

        let mut labelled = false;
        for m in self.marks().iter() {
            match m {
                Mark::Line { x, y, style } => {
                    let shape : ShapeStyle = rgba(style).stroke_width(style.width);
                    let pieces = dash_pieces(&finite_points(x, y), span, style.dash);
                    let anno = chart.draw_series(pieces.into_iter().map(|p| PathElement::new(p, shape) ))
                        .map_err(backend)?;
                    if let Some(label) = &style.label {
                        anno.label(label.as_str())
                            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], shape) );
                        labelled = true;
                    }
                },
                Mark::Band { along, lower, upper, orientation, style } => {
                    let mut outline = Vec::with_capacity(2 * along.len());
                    let fwd = along.iter().zip(lower.iter());
                    let bwd = along.iter().zip(upper.iter()).rev();
                    for (a, v) in fwd.chain(bwd) {
                        if a.is_finite() && v.is_finite() {
                            match orientation {
                                Orientation::Vertical => outline.push((*a, *v)),
                                Orientation::Horizontal => outline.push((*v, *a))
                            }
                        }
                    }
                    chart.draw_series(std::iter::once(Polygon::new(outline, rgba(style).filled())))
                        .map_err(backend)?;
                },
                Mark::Contour { segments, color, .. } => {
                    let shape = RGBColor(color.0, color.1, color.2).stroke_width(1);
                    chart.draw_series(segments.iter().map(|s| PathElement::new(vec![s[0], s[1]], shape) ))
                        .map_err(backend)?;
                },
                Mark::Scatter { x, y, style } => {
                    let fill = rgba(style).filled();
                    chart.draw_series(finite_points(x, y).into_iter().map(|p| Circle::new(p, 2, fill) ))
                        .map_err(backend)?;
                }
            }
        }
        if labelled {
            chart.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(INK)
                .draw()
                .map_err(backend)?;
        }
        root.present().map_err(backend)?;
        Ok(())
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::plot::{Canvas, BLUE, RED};

    #[test]
    fn renders_svg_document() {
        let mut fig = Figure::new(400, 300).with_title("test");
        fig.line(&[0., 1., 2.], &[0., 1., 0.], &Style::new(BLUE).label("tent")).unwrap();
        fig.band(&[0., 2.], &[0., 0.], &[1., 1.], Orientation::Vertical, &Style::new(RED).alpha(0.2)).unwrap();
        fig.set_labels("x", "y");
        let svg = fig.to_svg_string().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn empty_figure_is_an_error() {
        match Figure::default().to_svg_string() {
            Err(PlotError::Empty(_)) => { },
            other => panic!("Unexpected result: {:?}", other)
        }
    }

    #[test]
    fn dashes_split_polyline() {
        let pts = vec![(0., 0.), (1., 0.)];
        assert_eq!(dash_pieces(&pts, (1., 1.), Dash::Solid).len(), 1);
        let pieces = dash_pieces(&pts, (1., 1.), Dash::Dashed);
        assert!(pieces.len() > 20);
        assert!(pieces.iter().all(|p| p.len() >= 2 && p.iter().all(|q| q.0 >= 0. && q.0 <= 1.) ));
    }

}
