use rand::Rng;
use crate::prob::{BivariateNormal, ProbError, check_positive};
use super::*;

/// Options for drawing a bivariate normal.
#[derive(Debug, Clone)]
pub struct BvnPlot {

    /// Points per axis of the tabulation grid.
    pub grid_points : usize,

    /// Half-width of the grid, in standard deviations.
    pub extent : f64,

    /// Contour levels of the log-density, relative to its peak.
    pub levels : Vec<f64>,

    /// When informed, marks the conditional mean of y at x = mean_x + regress sig_x
    /// with guides dropping to the axes.
    pub regress : Option<f64>,

    /// Number of random draws overlaid as a scatter (none when zero).
    pub samples : usize

}

impl Default for BvnPlot {

    fn default() -> Self {
        Self { grid_points : 100, extent : 5.0, levels : vec![-9., -4., -1.], regress : None, samples : 0 }
    }

}

/// Draws a bivariate normal on the canvas: contours of the log-density relative to
/// its peak (at -9, -4 and -1 by default, i.e. 3, 2 and 1 Mahalanobis units), both
/// regression lines with their +-1 conditional sigma bands (E(y|x) over x, E(x|y) over y),
/// the dashed major axis of the contours, the optional regression guide, and optionally
/// a scatter of draws.
pub fn plot_bvn<C, R>(canvas : &mut C, bvn : &BivariateNormal, opts : &BvnPlot, rng : &mut R) -> Result<(), PlotError>
where
    C : Canvas + ?Sized,
    R : Rng + ?Sized
{
    if opts.grid_points < 2 {
        return Err(ProbError::invalid("grid_points", "at least two points per axis are required").into());
    }
    check_positive("extent", opts.extent)?;
    let grid = bvn.grid(opts.grid_points, opts.extent);
    let (x, y) = (grid.x.as_slice(), grid.y.as_slice());

    let log_dens = grid.xg.zip_map(&grid.yg, |a, b| bvn.log_pdf([a, b]) );
    let peak = log_dens.iter().cloned().filter(|v| v.is_finite() ).fold(f64::NEG_INFINITY, f64::max);
    if peak.is_finite() {
        let rel = log_dens.map(|v| v - peak );
        canvas.contour(&grid.x, &grid.y, &rel, &opts.levels, &[BLUE, GREEN, RED])?;
    } else {
        tracing::warn!(rho = bvn.rho(), "degenerate bivariate normal has no density contours");
    }

    let y_x : Vec<f64> = x.iter().map(|xi| bvn.conditional_mean_y_given_x(*xi) ).collect();
    let csig_y = bvn.conditional_sd_y();
    let lower : Vec<f64> = y_x.iter().map(|m| m - csig_y ).collect();
    let upper : Vec<f64> = y_x.iter().map(|m| m + csig_y ).collect();
    canvas.band(x, &lower, &upper, Orientation::Vertical, &Style::new(BLUE).alpha(0.2))?;
    canvas.line(x, &y_x, &Style::new(BLUE).width(2).label("E(y|x)"))?;

    let x_y : Vec<f64> = y.iter().map(|yi| bvn.conditional_mean_x_given_y(*yi) ).collect();
    let csig_x = bvn.conditional_sd_x();
    let lower : Vec<f64> = x_y.iter().map(|m| m - csig_x ).collect();
    let upper : Vec<f64> = x_y.iter().map(|m| m + csig_x ).collect();
    canvas.band(y, &lower, &upper, Orientation::Horizontal, &Style::new(GREEN).alpha(0.2))?;
    canvas.line(&x_y, y, &Style::new(GREEN).width(2).label("E(x|y)"))?;

    let axis : Vec<f64> = x.iter().map(|xi| bvn.major_axis(*xi) ).collect();
    canvas.line(x, &axis, &Style::new(BLACK).dash(Dash::Dashed))?;

    if let Some(k) = opts.regress {
        let xr = bvn.means()[0] + k * bvn.sigs()[0];
        let yr = bvn.conditional_mean_y_given_x(xr);
        let (xl, yl) = (x[0], y[0]);
        canvas.line(&[xr, xr, xl], &[yl, yr, yr], &Style::new(CYAN).width(2).dash(Dash::Dotted))?;
    }

    if opts.samples > 0 {
        let s = bvn.sample(opts.samples, rng);
        let sx : Vec<f64> = s.column(0).iter().cloned().collect();
        let sy : Vec<f64> = s.column(1).iter().cloned().collect();
        canvas.scatter(&sx, &sy, &Style::new(BLACK).alpha(0.4))?;
    }

    canvas.set_labels("x", "y");
    Ok(())
}
