use super::*;
use std::f64::consts::PI;

/// Cauchy (Lorentzian) distribution. Its heavy tails leave the mean and variance
/// undefined, which makes it the usual example of a location problem whose
/// posterior has no closed form.
#[derive(Debug, Clone)]
pub struct Cauchy {

    loc : f64,

    scale : f64,

    sampler : rand_distr::Cauchy<f64>

}

impl Cauchy {

    pub fn new(loc : f64, scale : f64) -> Result<Self, ProbError> {
        let loc = check_finite("loc", loc)?;
        let scale = check_positive("scale", scale)?;
        let sampler = rand_distr::Cauchy::new(loc, scale)
            .map_err(|e| ProbError::invalid("scale", format!("{}", e)) )?;
        Ok(Self { loc, scale, sampler })
    }

    pub fn loc(&self) -> f64 {
        self.loc
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

}

impl Univariate for Cauchy {

    fn name(&self) -> &'static str {
        "Cauchy"
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        let z = (x - self.loc) / self.scale;
        Ok(-(PI * self.scale).ln() - z.powf(2.).ln_1p())
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        Ok(rand_distr::Distribution::sample(&self.sampler, rng))
    }

    fn mean(&self) -> Option<f64> {
        None
    }

    fn var(&self) -> Option<f64> {
        None
    }

}
