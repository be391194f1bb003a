use nalgebra::*;
use thiserror::Error;
use crate::prob::ProbError;

/// Piecewise-constant ("shelf") rendering of binned heights.
mod shelf;

pub use shelf::*;

/// Level lines of tabulated surfaces (marching squares).
mod contour;

pub use contour::*;

/// Rendering of recorded figures through the plotters SVG backend.
mod svg;

mod bvn;

pub use bvn::*;

mod chain;

pub use chain::*;

mod posterior;

pub use posterior::*;

#[derive(Debug, Error)]
pub enum PlotError {

    #[error("Mismatched coordinate lengths: {0} vs. {1}")]
    Mismatch(usize, usize),

    #[error("Nothing to draw: {0}")]
    Empty(&'static str),

    #[error("Drawing backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Prob(#[from] ProbError)

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BLUE : Color = Color(31, 119, 180);

pub const GREEN : Color = Color(44, 160, 44);

pub const RED : Color = Color(214, 39, 40);

pub const CYAN : Color = Color(23, 190, 207);

pub const BLACK : Color = Color(0, 0, 0);

pub const GRAY : Color = Color(127, 127, 127);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    Dotted
}

/// Appearance of a mark. Built from a color, then refined with the
/// builder-style methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {

    pub color : Color,

    /// Opacity in [0, 1].
    pub alpha : f64,

    pub width : u32,

    pub dash : Dash,

    /// Legend entry, if any.
    pub label : Option<String>

}

impl Style {

    pub fn new(color : Color) -> Self {
        Self { color, alpha : 1.0, width : 1, dash : Dash::Solid, label : None }
    }

    pub fn alpha(mut self, alpha : f64) -> Self {
        self.alpha = alpha.max(0.0).min(1.0);
        self
    }

    pub fn width(mut self, width : u32) -> Self {
        self.width = width;
        self
    }

    pub fn dash(mut self, dash : Dash) -> Self {
        self.dash = dash;
        self
    }

    pub fn label(mut self, label : impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

}

/// Direction along which a band is filled: Vertical fills between two curves
/// y = lower(x) and y = upper(x); Horizontal fills between x = lower(y) and x = upper(y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal
}

/// A drawing surface. Plotting routines receive the surface explicitly and
/// never hold state of their own, so that several plots can target the same
/// surface (e.g. curves stacked with a vertical offset) or independent surfaces.
pub trait Canvas {

    fn line(&mut self, x : &[f64], y : &[f64], style : &Style) -> Result<(), PlotError>;

    /// Shaded region between lower and upper, both tabulated at the coordinates in along.
    fn band(
        &mut self,
        along : &[f64],
        lower : &[f64],
        upper : &[f64],
        orientation : Orientation,
        style : &Style
    ) -> Result<(), PlotError>;

    /// Level lines of z, tabulated with 'xy' indexing (z[(j, i)] is the value at (x[i], y[j])).
    /// Colors are cycled over the levels.
    fn contour(
        &mut self,
        x : &DVector<f64>,
        y : &DVector<f64>,
        z : &DMatrix<f64>,
        levels : &[f64],
        colors : &[Color]
    ) -> Result<(), PlotError>;

    fn scatter(&mut self, x : &[f64], y : &[f64], style : &Style) -> Result<(), PlotError>;

    fn set_labels(&mut self, x_desc : &str, y_desc : &str);

}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Line { x : Vec<f64>, y : Vec<f64>, style : Style },
    Band { along : Vec<f64>, lower : Vec<f64>, upper : Vec<f64>, orientation : Orientation, style : Style },
    Contour { level : f64, segments : Vec<Segment>, color : Color },
    Scatter { x : Vec<f64>, y : Vec<f64>, style : Style }
}

/// Data-space rectangle [x.0, x.1] x [y.0, y.1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {

    pub x : (f64, f64),

    pub y : (f64, f64)

}

impl Bounds {

    fn include(&mut self, x : f64, y : f64) {
        if x.is_finite() {
            self.x = (self.x.0.min(x), self.x.1.max(x));
        }
        if y.is_finite() {
            self.y = (self.y.0.min(y), self.y.1.max(y));
        }
    }

}

/// Figure that records the marks drawn on it, in drawing order. A figure is
/// rendered only when saved, so the recorded marks can also be inspected directly.
#[derive(Debug, Clone)]
pub struct Figure {

    title : Option<String>,

    x_desc : String,

    y_desc : String,

    size : (u32, u32),

    marks : Vec<Mark>

}

impl Default for Figure {

    fn default() -> Self {
        Figure::new(800, 600)
    }

}

impl Figure {

    pub fn new(width : u32, height : u32) -> Self {
        Self { title : None, x_desc : String::new(), y_desc : String::new(), size : (width, height), marks : Vec::new() }
    }

    pub fn with_title(mut self, title : impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn labels(&self) -> (&str, &str) {
        (&self.x_desc, &self.y_desc)
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Smallest rectangle containing every finite coordinate drawn so far.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut b = Bounds { x : (f64::INFINITY, f64::NEG_INFINITY), y : (f64::INFINITY, f64::NEG_INFINITY) };
        for m in self.marks.iter() {
            match m {
                Mark::Line { x, y, .. } | Mark::Scatter { x, y, .. } => {
                    for (xi, yi) in x.iter().zip(y.iter()) {
                        b.include(*xi, *yi);
                    }
                },
                Mark::Band { along, lower, upper, orientation, .. } => {
                    for ((a, l), u) in along.iter().zip(lower.iter()).zip(upper.iter()) {
                        match orientation {
                            Orientation::Vertical => { b.include(*a, *l); b.include(*a, *u); },
                            Orientation::Horizontal => { b.include(*l, *a); b.include(*u, *a); }
                        }
                    }
                },
                Mark::Contour { segments, .. } => {
                    for s in segments.iter() {
                        b.include(s[0].0, s[0].1);
                        b.include(s[1].0, s[1].1);
                    }
                }
            }
        }
        if b.x.0 <= b.x.1 && b.y.0 <= b.y.1 {
            Some(b)
        } else {
            None
        }
    }

}

fn check_lengths(a : &[f64], b : &[f64]) -> Result<(), PlotError> {
    if a.len() != b.len() {
        Err(PlotError::Mismatch(a.len(), b.len()))
    } else {
        Ok(())
    }
}

impl Canvas for Figure {

    fn line(&mut self, x : &[f64], y : &[f64], style : &Style) -> Result<(), PlotError> {
        check_lengths(x, y)?;
        self.marks.push(Mark::Line { x : x.to_vec(), y : y.to_vec(), style : style.clone() });
        Ok(())
    }

    fn band(
        &mut self,
        along : &[f64],
        lower : &[f64],
        upper : &[f64],
        orientation : Orientation,
        style : &Style
    ) -> Result<(), PlotError> {
        check_lengths(along, lower)?;
        check_lengths(along, upper)?;
        self.marks.push(Mark::Band {
            along : along.to_vec(),
            lower : lower.to_vec(),
            upper : upper.to_vec(),
            orientation,
            style : style.clone()
        });
        Ok(())
    }

    fn contour(
        &mut self,
        x : &DVector<f64>,
        y : &DVector<f64>,
        z : &DMatrix<f64>,
        levels : &[f64],
        colors : &[Color]
    ) -> Result<(), PlotError> {
        if z.nrows() != y.nrows() {
            return Err(PlotError::Mismatch(z.nrows(), y.nrows()));
        }
        if z.ncols() != x.nrows() {
            return Err(PlotError::Mismatch(z.ncols(), x.nrows()));
        }
        for (i, level) in levels.iter().enumerate() {
            let color = if colors.is_empty() { BLACK } else { colors[i % colors.len()] };
            let segments = contour_segments(x, y, z, *level);
            self.marks.push(Mark::Contour { level : *level, segments, color });
        }
        Ok(())
    }

    fn scatter(&mut self, x : &[f64], y : &[f64], style : &Style) -> Result<(), PlotError> {
        check_lengths(x, y)?;
        self.marks.push(Mark::Scatter { x : x.to_vec(), y : y.to_vec(), style : style.clone() });
        Ok(())
    }

    fn set_labels(&mut self, x_desc : &str, y_desc : &str) {
        self.x_desc = x_desc.to_string();
        self.y_desc = y_desc.to_string();
    }

}
