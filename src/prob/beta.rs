use super::*;
use statrs::function::beta::ln_beta;

/// A beta distribution yields ratios over the interval [0, 1], produced by taking the
/// ratio of two independent gamma distributions: If u ~ Gamma(a, 1) and v ~ Gamma(b, 1)
/// then u / (u + v) ~ Beta(a, b). It is commonly used to model prior Bernoulli probabilities, where
/// a and b are the pseudo-counts of successes and failures. By setting a = b = 1, Beta equals
/// a uniform distribution bounded at [0,1] (the flat prior for a binomial success probability).
#[derive(Debug, Clone)]
pub struct Beta {

    a : f64,

    b : f64,

    // ln B(a, b), cached since it does not depend on the evaluated value.
    log_part : f64,

    sampler : rand_distr::Beta<f64>

}

impl Beta {

    pub fn new(a : f64, b : f64) -> Result<Self, ProbError> {
        let a = check_positive("a", a)?;
        let b = check_positive("b", b)?;
        let sampler = rand_distr::Beta::new(a, b)
            .map_err(|e| ProbError::invalid("a", format!("{}", e)) )?;
        Ok(Self { a, b, log_part : ln_beta(a, b), sampler })
    }

    /// Uniform distribution over [0, 1].
    pub fn flat() -> Result<Self, ProbError> {
        Self::new(1., 1.)
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

}

impl Univariate for Beta {

    fn name(&self) -> &'static str {
        "Beta"
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        if !(0.0..=1.0).contains(&x) {
            return Ok(f64::NEG_INFINITY);
        }
        Ok(xlogy(self.a - 1., x) + xlogy(self.b - 1., 1. - x) - self.log_part)
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        Ok(rand_distr::Distribution::sample(&self.sampler, rng))
    }

    fn mean(&self) -> Option<f64> {
        Some(self.a / (self.a + self.b))
    }

    fn var(&self) -> Option<f64> {
        let s = self.a + self.b;
        Some(self.a * self.b / (s.powf(2.) * (s + 1.)))
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn flat_beta_is_uniform() {
        let b = Beta::flat().unwrap();
        for x in [0.0, 0.25, 0.5, 1.0].iter() {
            assert!((b.pdf(*x).unwrap() - 1.0).abs() < 1E-12);
        }
        assert_eq!(b.pdf(1.5).unwrap(), 0.0);
    }

    #[test]
    fn beta_2_2_peak() {
        // 6 x (1 - x) at x = 0.5
        let b = Beta::new(2., 2.).unwrap();
        assert!((b.pdf(0.5).unwrap() - 1.5).abs() < 1E-10);
    }

}
