use nalgebra::*;
use rand::Rng;
use crate::prob::*;
use crate::calc::{self, trapz, cumtrapz};
use statrs::function::factorial::ln_factorial;

/// Closed-form posterior for a normal mean with known scale.
pub mod conjugate;

pub use conjugate::*;

// Tolerance on the trapezoidal normalization of a tabulated posterior, above
// which a warning is issued (the grid is probably too coarse or too narrow).
const NORM_TOL : f64 = 1E-6;

/// Posterior for a scalar parameter tabulated over a grid. The prior density and
/// the likelihood are evaluated at each grid point; the marginal likelihood (the
/// normalization constant of prior x likelihood) is obtained by the trapezoidal rule,
/// and so are the posterior mean and the cumulative distribution used to draw
/// variates by inversion. Between grid points, the posterior density is linearly
/// interpolated; it is zero outside the grid.
#[derive(Debug, Clone)]
pub struct GridPosterior {

    grid : DVector<f64>,

    prior : DVector<f64>,

    like : DVector<f64>,

    mlike : f64,

    post : DVector<f64>,

    // Cumulative trapezoid of post, rescaled to end exactly at 1.
    cdf : DVector<f64>,

    // Trapezoidal integral of post before the rescaling.
    norm : f64,

    mean : f64

}

impl GridPosterior {

    pub fn new<P, L>(grid : DVector<f64>, prior : &P, likelihood : L) -> Result<Self, ProbError>
    where
        P : Univariate,
        L : Fn(f64) -> Result<f64, ProbError>
    {
        if grid.nrows() < 2 {
            return Err(ProbError::invalid("grid", "at least two points are required"));
        }
        if grid.as_slice().windows(2).any(|w| !(w[1] > w[0]) ) {
            return Err(ProbError::invalid("grid", "points must be strictly increasing"));
        }
        let prior_vals = prior.pdf_over(&grid)?;
        let mut like = DVector::zeros(grid.nrows());
        for (l, g) in like.iter_mut().zip(grid.iter()) {
            *l = likelihood(*g)?;
        }
        let joint = prior_vals.component_mul(&like);
        let mlike = trapz(joint.as_slice(), grid.as_slice());
        if !mlike.is_finite() || mlike <= 0.0 {
            return Err(ProbError::invalid(
                "likelihood",
                format!("marginal likelihood {} over the grid is not positive", mlike)
            ));
        }
        let post = joint.unscale(mlike);
        let mut cdf = cumtrapz(post.as_slice(), grid.as_slice());
        let total = cdf[cdf.nrows() - 1];
        if (total - 1.).abs() > NORM_TOL {
            tracing::warn!(total, "tabulated posterior does not integrate to one");
        }
        cdf.unscale_mut(total);
        let moment = grid.component_mul(&post);
        let mean = trapz(moment.as_slice(), grid.as_slice());
        tracing::debug!(mlike, mean, points = grid.nrows(), "grid posterior");
        Ok(Self { grid, prior : prior_vals, like, mlike, post, cdf, norm : total, mean })
    }

    pub fn grid(&self) -> &DVector<f64> {
        &self.grid
    }

    /// Prior density tabulated over the grid.
    pub fn prior(&self) -> &DVector<f64> {
        &self.prior
    }

    /// Likelihood tabulated over the grid.
    pub fn likelihood(&self) -> &DVector<f64> {
        &self.like
    }

    /// Posterior density tabulated over the grid.
    pub fn posterior(&self) -> &DVector<f64> {
        &self.post
    }

    /// Marginal likelihood, the integral of prior x likelihood over the grid.
    pub fn mlike(&self) -> f64 {
        self.mlike
    }

    /// Trapezoidal integral of the posterior (should be one up to roundoff).
    pub fn normalization(&self) -> f64 {
        self.norm
    }

    pub fn post_mean(&self) -> f64 {
        self.mean
    }

    /// Posterior probability mass over [lo, hi], with the limits clamped to the grid.
    pub fn mass_between(&self, lo : f64, hi : f64) -> f64 {
        (self.cdf_at(hi) - self.cdf_at(lo)).max(0.0)
    }

    fn cdf_at(&self, x : f64) -> f64 {
        let n = self.grid.nrows();
        if x <= self.grid[0] {
            return 0.0;
        }
        if x >= self.grid[n - 1] {
            return 1.0;
        }
        let i = self.interval_of(x);
        let (x0, x1) = (self.grid[i], self.grid[i+1]);
        let (p0, p1) = (self.post[i], self.post[i+1]);
        let dx = x - x0;
        let px = p0 + (p1 - p0) * dx / (x1 - x0);
        (self.cdf[i] + 0.5 * dx * (p0 + px) / self.norm).min(1.0)
    }

    // Index i such that grid[i] <= x < grid[i+1], for x inside the grid.
    fn interval_of(&self, x : f64) -> usize {
        let n = self.grid.nrows();
        match self.grid.as_slice().binary_search_by(|g| g.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Less) ) {
            Ok(i) => i.min(n - 2),
            Err(i) => i.saturating_sub(1).min(n - 2)
        }
    }

    /// Inverts the (piecewise linear) cumulative distribution at probability q.
    pub fn quantile(&self, q : f64) -> Result<f64, ProbError> {
        if !(0.0..=1.0).contains(&q) {
            return Err(ProbError::invalid("q", format!("expected a probability in [0, 1], got {}", q)));
        }
        let n = self.cdf.nrows();
        let i = match self.cdf.as_slice().binary_search_by(|c| c.partial_cmp(&q).unwrap_or(std::cmp::Ordering::Less) ) {
            Ok(i) => return Ok(self.grid[i]),
            Err(i) => i.max(1).min(n - 1)
        };
        let (c0, c1) = (self.cdf[i-1], self.cdf[i]);
        let (x0, x1) = (self.grid[i-1], self.grid[i]);
        if c1 <= c0 {
            return Ok(x0);
        }
        Ok(x0 + (x1 - x0) * (q - c0) / (c1 - c0))
    }

}

impl Univariate for GridPosterior {

    fn name(&self) -> &'static str {
        "GridPosterior"
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        self.pdf(x).map(f64::ln)
    }

    fn pdf(&self, x : f64) -> Result<f64, ProbError> {
        let n = self.grid.nrows();
        if x < self.grid[0] || x > self.grid[n - 1] {
            return Ok(0.0);
        }
        let i = self.interval_of(x);
        let (x0, x1) = (self.grid[i], self.grid[i+1]);
        let w = (x - x0) / (x1 - x0);
        Ok(self.post[i] * (1. - w) + self.post[i+1] * w)
    }

    /// Draws by inverting the cumulative distribution at a uniform variate.
    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        let u : f64 = rng.gen();
        self.quantile(u)
    }

    fn mean(&self) -> Option<f64> {
        Some(self.mean)
    }

    fn var(&self) -> Option<f64> {
        let sq = self.grid.map(|g| (g - self.mean).powf(2.) ).component_mul(&self.post);
        Some(trapz(sq.as_slice(), self.grid.as_slice()))
    }

}

/// Posterior for a binomial success probability after `n` successes in `ntot` trials,
/// tabulated at the informed grid over [0, 1].
pub fn binomial_inference<P>(n : u64, ntot : u64, prior : &P, grid : DVector<f64>) -> Result<GridPosterior, ProbError>
where
    P : Univariate
{
    if n > ntot {
        return Err(ProbError::invalid("n", format!("{} successes exceed {} trials", n, ntot)));
    }
    GridPosterior::new(grid, prior, Binomial::likelihood(n, ntot))
}

/// Posterior for a Poisson rate r after counting n events over a duration,
/// tabulated over [0, r_upper] with the informed number of points.
/// The likelihood is (r T)^n exp(-r T) / n!.
pub fn poisson_rate_inference<P>(
    n : u64,
    duration : f64,
    prior : &P,
    r_upper : f64,
    points : usize
) -> Result<GridPosterior, ProbError>
where
    P : Univariate
{
    let duration = check_positive("duration", duration)?;
    let r_upper = check_positive("r_upper", r_upper)?;
    let log_fact = ln_factorial(n);
    let like = move |r : f64| -> Result<f64, ProbError> {
        let rt = r * duration;
        let n_f = n as f64;
        let log_like = if n == 0 { -rt } else { n_f * rt.ln() - rt - log_fact };
        Ok(log_like.exp())
    };
    GridPosterior::new(calc::linspace(0., r_upper, points), prior, like)
}

/// Posterior for the location of a Cauchy distribution with known scale,
/// given the observed data, tabulated over range with the informed number of points.
pub fn cauchy_location_inference<P>(
    scale : f64,
    data : &[f64],
    prior : &P,
    range : (f64, f64),
    points : usize
) -> Result<GridPosterior, ProbError>
where
    P : Univariate
{
    if data.is_empty() {
        return Err(ProbError::invalid("data", "at least one observation is required"));
    }
    let like = |x0 : f64| -> Result<f64, ProbError> {
        let c = Cauchy::new(x0, scale)?;
        let mut ll = 0.0;
        for d in data.iter() {
            ll += c.log_pdf(*d)?;
        }
        Ok(ll.exp())
    };
    GridPosterior::new(calc::linspace(range.0, range.1, points), prior, like)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn flat_prior_binomial_posterior_is_beta() {
        // With a flat prior, the posterior after 8 successes in 12 trials is Beta(9, 5).
        let post = binomial_inference(8, 12, &Beta::flat().unwrap(), calc::linspace(0., 1., 2001)).unwrap();
        let exact = Beta::new(9., 5.).unwrap();
        assert!((post.normalization() - 1.).abs() < 1E-10);
        assert!((post.post_mean() - 9. / 14.).abs() < 1E-4);
        assert!((post.pdf(0.6).unwrap() - exact.pdf(0.6).unwrap()).abs() < 1E-3);
        // Marginal likelihood under the flat prior is 1 / (ntot + 1).
        assert!((post.mlike() - 1. / 13.).abs() < 1E-5);
    }

    #[test]
    fn quantiles_invert_cdf() {
        let post = binomial_inference(5, 10, &Beta::flat().unwrap(), calc::linspace(0., 1., 401)).unwrap();
        assert!((post.quantile(0.5).unwrap() - 0.5).abs() < 1E-6);
        assert!(post.quantile(0.0).unwrap() < 1E-2);
        assert!(post.quantile(1.0).unwrap() > 0.99);
        assert!((post.mass_between(0., 0.5) - 0.5).abs() < 1E-6);
        assert!(post.quantile(1.5).is_err());
    }

    #[test]
    fn poisson_rate_posterior_mean() {
        // Flat prior: posterior is Gamma(n + 1, T), with mean (n + 1) / T.
        let post = poisson_rate_inference(16, 2., &Flat::improper(1E-5).unwrap(), 20., 2001).unwrap();
        assert!((post.post_mean() - 17. / 2.).abs() < 1E-2);
    }

    #[test]
    fn rejects_degenerate_grid() {
        let grid = DVector::from_column_slice(&[0., 0.5, 0.5, 1.]);
        assert!(GridPosterior::new(grid, &Beta::flat().unwrap(), Binomial::likelihood(1, 2)).is_err());
        assert!(binomial_inference(3, 2, &Beta::flat().unwrap(), calc::linspace(0., 1., 10)).is_err());
    }

}
