use crate::prob::{ProbError, check_finite};
use super::{Canvas, Style, PlotError};

/// Polyline traced left-to-right, as two equal-length coordinate sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {

    pub x : Vec<f64>,

    pub y : Vec<f64>

}

impl Polyline {

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

}

/// Step ("shelf") rendering of N heights over N equal-width bins spanning [lo, hi).
/// Height i is held constant over bin i, and consecutive bins are joined by
/// vertical jumps at the shared edge, so the result can be drawn with a plain line
/// primitive:
///
/// x = [e0, e1, e1, e2, e2, ..., eN]
/// y = [h0, h0, h1, h1, ..., hN-1, hN-1]
///
/// where ei = lo + i (hi - lo) / N. An offset shifts every height (to stack
/// several curves on one surface), and the end flag closes the shape down to
/// zero at lo and hi (for filled regions).
#[derive(Debug, Clone, PartialEq)]
pub struct Shelves {

    lo : f64,

    hi : f64,

    offset : f64,

    ends : bool

}

impl Default for Shelves {

    fn default() -> Self {
        Self { lo : 0.0, hi : 1.0, offset : 0.0, ends : false }
    }

}

impl Shelves {

    pub fn new(lo : f64, hi : f64) -> Result<Self, ProbError> {
        let lo = check_finite("lo", lo)?;
        let hi = check_finite("hi", hi)?;
        if lo >= hi {
            return Err(ProbError::invalid("hi", format!("upper limit {} should exceed lower limit {}", hi, lo)));
        }
        if !(hi - lo).is_finite() {
            return Err(ProbError::invalid("hi", format!("width of [{}, {}) overflows", lo, hi)));
        }
        Ok(Self { lo, hi, ..Default::default() })
    }

    pub fn offset(mut self, offset : f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn ends(mut self, ends : bool) -> Self {
        self.ends = ends;
        self
    }

    pub fn limits(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn polyline(&self, heights : &[f64]) -> Result<Polyline, ProbError> {
        if heights.is_empty() {
            return Err(ProbError::invalid("heights", "at least one bin height is required"));
        }
        let n = heights.len();
        let step = (self.hi - self.lo) / n as f64;
        let cap = if self.ends { 2 * n + 2 } else { 2 * n };
        let mut x = Vec::with_capacity(cap);
        let mut y = Vec::with_capacity(cap);
        if self.ends {
            x.push(self.lo);
            y.push(0.0);
        }
        for (i, h) in heights.iter().enumerate() {
            let left = self.lo + i as f64 * step;
            let right = if i == n - 1 { self.hi } else { self.lo + (i + 1) as f64 * step };
            x.push(left);
            x.push(right);
            y.push(h + self.offset);
            y.push(h + self.offset);
        }
        if self.ends {
            x.push(self.hi);
            y.push(0.0);
        }
        Ok(Polyline { x, y })
    }

    /// Draws the step polyline on the canvas, returning the coordinates drawn.
    pub fn draw<C>(&self, canvas : &mut C, heights : &[f64], style : &Style) -> Result<Polyline, PlotError>
    where
        C : Canvas + ?Sized
    {
        let line = self.polyline(heights)?;
        canvas.line(&line.x, &line.y, style)?;
        Ok(line)
    }

}
