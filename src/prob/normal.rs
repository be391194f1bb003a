use super::*;
use std::f64::consts::PI;

/// Univariate gaussian, parametrized by its location and its scale (standard deviation).
#[derive(Debug, Clone)]
pub struct Normal {

    loc : f64,

    scale : f64

}

impl Normal {

    pub fn new(loc : f64, scale : f64) -> Result<Self, ProbError> {
        let loc = check_finite("loc", loc)?;
        let scale = check_positive("scale", scale)?;
        Ok(Self { loc, scale })
    }

    // For parameters already validated by the caller.
    pub(crate) fn new_unchecked(loc : f64, scale : f64) -> Self {
        Self { loc, scale }
    }

    pub fn standard() -> Self {
        Self { loc : 0.0, scale : 1.0 }
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

}

// based on stats::dnorm.ipp
pub(crate) fn normal_log_prob(x : f64, mu : f64, stddev : f64) -> f64 {
    let z = (x - mu) / stddev;
    -0.5 * (2.0*PI).ln() - stddev.ln() - z.powf(2.0) / 2.0
}

impl rand_distr::Distribution<f64> for Normal {

    fn sample<R>(&self, rng : &mut R) -> f64
    where
        R : rand::Rng + ?Sized
    {
        let z : f64 = rng.sample(rand_distr::StandardNormal);
        z * self.scale + self.loc
    }

}

impl Univariate for Normal {

    fn name(&self) -> &'static str {
        "Normal"
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        Ok(normal_log_prob(x, self.loc, self.scale))
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        Ok(rand_distr::Distribution::sample(self, rng))
    }

    fn mean(&self) -> Option<f64> {
        Some(self.loc)
    }

    fn var(&self) -> Option<f64> {
        Some(self.scale.powf(2.))
    }

}

impl Default for Normal {

    fn default() -> Self {
        Normal::standard()
    }

}
