use super::*;
use crate::calc::{linspace, meshgrid, sign};
use std::f64::consts::PI;

/// Bivariate normal described by its marginal means, marginal standard deviations
/// and the correlation coefficient rho. Besides the joint density, the structure
/// caches the two regression lines implied by the joint:
///
/// E[y|x] = int_y + slope_y * x, with slope_y = rho * sig_y / sig_x and int_y = mean_y - slope_y * mean_x;
///
/// E[x|y] = int_x + slope_x * y, with slope_x = rho * sig_x / sig_y and int_x = mean_x - slope_x * mean_y;
///
/// and the conditional standard deviations sig_y * sqrt(1 - rho^2) and sig_x * sqrt(1 - rho^2),
/// which do not depend on the conditioning value. Both regression lines pass through the joint
/// mean, and neither coincides with the major axis of the density contours unless |rho| = 1
/// (regression to the mean).
///
/// |rho| = 1 is accepted: the conditionals degenerate to zero spread and the joint density
/// collapses onto the major axis. The density is then zero off the axis and infinite on it.
#[derive(Debug, Clone)]
pub struct BivariateNormal {

    means : Vector2<f64>,

    sigs : Vector2<f64>,

    rho : f64,

    cov : Matrix2<f64>,

    // Lower-triangular factor L with L L^T = cov, written in closed form so that
    // it remains valid at |rho| = 1.
    chol : Matrix2<f64>,

    slope_y : f64,

    int_y : f64,

    csig_y : f64,

    slope_x : f64,

    int_x : f64,

    csig_x : f64

}

/// Coordinates for tabulating a function of (x, y): the axis vectors and
/// the coordinate matrices in 'xy' indexing (a row runs over x values).
#[derive(Debug, Clone)]
pub struct Grid {

    pub x : DVector<f64>,

    pub y : DVector<f64>,

    pub xg : DMatrix<f64>,

    pub yg : DMatrix<f64>

}

impl Grid {

    /// Tabulates f over the grid, returning a matrix with the same
    /// layout as xg and yg.
    pub fn evaluate<F, E>(&self, f : F) -> Result<DMatrix<f64>, E>
    where
        F : Fn(f64, f64) -> Result<f64, E>
    {
        let mut z = DMatrix::zeros(self.y.nrows(), self.x.nrows());
        for j in 0..self.y.nrows() {
            for i in 0..self.x.nrows() {
                z[(j, i)] = f(self.x[i], self.y[j])?;
            }
        }
        Ok(z)
    }

}

impl BivariateNormal {

    pub fn new(means : [f64; 2], sigs : [f64; 2], rho : f64) -> Result<Self, ProbError> {
        check_finite("means", means[0])?;
        check_finite("means", means[1])?;
        check_positive("sigs", sigs[0])?;
        check_positive("sigs", sigs[1])?;
        if !rho.is_finite() || rho.abs() > 1.0 {
            return Err(ProbError::invalid(
                "rho",
                format!("correlation {} outside [-1, 1] yields a covariance that is not positive semi-definite", rho)
            ));
        }
        let (sx, sy) = (sigs[0], sigs[1]);
        let cross = rho * sx * sy;
        let cov = Matrix2::new(sx.powf(2.), cross, cross, sy.powf(2.));
        let resid = (1. - rho.powf(2.)).sqrt();
        let chol = Matrix2::new(sx, 0., rho * sy, sy * resid);

        let slope_y = rho * sy / sx;
        let int_y = means[1] - slope_y * means[0];
        let slope_x = rho * sx / sy;
        let int_x = means[0] - slope_x * means[1];
        tracing::debug!(rho, slope_y, slope_x, "bivariate normal");
        Ok(Self {
            means : Vector2::new(means[0], means[1]),
            sigs : Vector2::new(sx, sy),
            rho,
            cov,
            chol,
            slope_y,
            int_y,
            csig_y : sy * resid,
            slope_x,
            int_x,
            csig_x : sx * resid
        })
    }

    pub fn means(&self) -> &Vector2<f64> {
        &self.means
    }

    pub fn sigs(&self) -> &Vector2<f64> {
        &self.sigs
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn cov(&self) -> &Matrix2<f64> {
        &self.cov
    }

    pub fn slope_y(&self) -> f64 {
        self.slope_y
    }

    pub fn intercept_y(&self) -> f64 {
        self.int_y
    }

    pub fn slope_x(&self) -> f64 {
        self.slope_x
    }

    pub fn intercept_x(&self) -> f64 {
        self.int_x
    }

    pub fn conditional_sd_y(&self) -> f64 {
        self.csig_y
    }

    pub fn conditional_sd_x(&self) -> f64 {
        self.csig_x
    }

    /// Conditional expectation of y given x.
    pub fn conditional_mean_y_given_x(&self, x : f64) -> f64 {
        self.int_y + self.slope_y * x
    }

    /// Conditional expectation of x given y.
    pub fn conditional_mean_x_given_y(&self, y : f64) -> f64 {
        self.int_x + self.slope_x * y
    }

    /// Symmetry (major) axis of the density contours, expressed as y at x.
    /// Horizontal when rho = 0.
    pub fn major_axis(&self, x : f64) -> f64 {
        self.means[1] + sign(self.rho) * self.sigs[1] * (x - self.means[0]) / self.sigs[0]
    }

    pub fn marginal_x(&self) -> Normal {
        Normal::new_unchecked(self.means[0], self.sigs[0])
    }

    pub fn marginal_y(&self) -> Normal {
        Normal::new_unchecked(self.means[1], self.sigs[1])
    }

    /// p(y|x); fails when |rho| = 1, since the conditional has zero spread.
    pub fn conditional_y_given_x(&self, x : f64) -> Result<Normal, ProbError> {
        Normal::new(self.conditional_mean_y_given_x(x), self.csig_y)
    }

    /// p(x|y); fails when |rho| = 1, since the conditional has zero spread.
    pub fn conditional_x_given_y(&self, y : f64) -> Result<Normal, ProbError> {
        Normal::new(self.conditional_mean_x_given_y(y), self.csig_x)
    }

    pub fn log_pdf(&self, xy : [f64; 2]) -> f64 {
        let zx = (xy[0] - self.means[0]) / self.sigs[0];
        let zy = (xy[1] - self.means[1]) / self.sigs[1];
        let resid = 1. - self.rho.powf(2.);
        if resid <= 0.0 {
            // All mass on the line zy = rho zx.
            let off = (zy - self.rho * zx).abs();
            let tol = 4. * f64::EPSILON * zx.abs().max(zy.abs()).max(1.);
            return if off <= tol { f64::INFINITY } else { f64::NEG_INFINITY };
        }
        let mahalanobis = (zx.powf(2.) - 2. * self.rho * zx * zy + zy.powf(2.)) / resid;
        -(2. * PI * self.sigs[0] * self.sigs[1]).ln() - 0.5 * resid.ln() - 0.5 * mahalanobis
    }

    /// Joint density at the point (xy[0], xy[1]).
    pub fn pdf(&self, xy : [f64; 2]) -> f64 {
        self.log_pdf(xy).exp()
    }

    /// Draws n points, returned over the rows of a n x 2 matrix.
    pub fn sample<R>(&self, n : usize, rng : &mut R) -> DMatrix<f64>
    where
        R : Rng + ?Sized
    {
        let mut s = DMatrix::zeros(n, 2);
        for i in 0..n {
            let z = Vector2::new(
                rng.sample::<f64, _>(rand_distr::StandardNormal),
                rng.sample::<f64, _>(rand_distr::StandardNormal)
            );
            let xy = self.means + self.chol * z;
            s[(i, 0)] = xy[0];
            s[(i, 1)] = xy[1];
        }
        s
    }

    /// Square grid with n points per axis, spanning mean +- fac standard deviations
    /// in each dimension.
    pub fn grid(&self, n : usize, fac : f64) -> Grid {
        let x = linspace(self.means[0] - fac * self.sigs[0], self.means[0] + fac * self.sigs[0], n);
        let y = linspace(self.means[1] - fac * self.sigs[1], self.means[1] + fac * self.sigs[1], n);
        let (xg, yg) = meshgrid(&x, &y);
        Grid { x, y, xg, yg }
    }

    /// Joint density tabulated over a grid.
    pub fn pdf_grid(&self, grid : &Grid) -> DMatrix<f64> {
        grid.xg.zip_map(&grid.yg, |x, y| self.pdf([x, y]) )
    }

}
