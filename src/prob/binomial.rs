use super::*;
use statrs::function::factorial::ln_binomial;

/// Number of successes in n independent trials with success probability p.
/// The density of this distribution is its probability mass function, which is
/// zero at any value that is not an integer in [0, n].
#[derive(Debug, Clone)]
pub struct Binomial {

    n : u64,

    p : f64,

    sampler : rand_distr::Binomial

}

impl Binomial {

    pub fn new(n : u64, p : f64) -> Result<Self, ProbError> {
        let p = check_probability("p", p)?;
        let sampler = rand_distr::Binomial::new(n, p)
            .map_err(|e| ProbError::invalid("p", format!("{:?}", e)) )?;
        Ok(Self { n, p, sampler })
    }

    pub fn trials(&self) -> u64 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Probability of exactly k successes.
    pub fn pmf(&self, k : u64) -> f64 {
        self.log_pmf(k).exp()
    }

    pub fn log_pmf(&self, k : u64) -> f64 {
        if k > self.n {
            return f64::NEG_INFINITY;
        }
        let (k_f, n_f) = (k as f64, self.n as f64);
        ln_binomial(self.n, k) + xlogy(k_f, self.p) + xlogy(n_f - k_f, 1. - self.p)
    }

    /// The likelihood function for the success probability after observing
    /// `successes` out of `trials`.
    pub fn likelihood(successes : u64, trials : u64) -> impl Fn(f64) -> Result<f64, ProbError> {
        move |alpha : f64| Binomial::new(trials, alpha).map(|b| b.pmf(successes) )
    }

}

impl Univariate for Binomial {

    fn name(&self) -> &'static str {
        "Binomial"
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        if x < 0.0 || x.fract() != 0.0 {
            return Ok(f64::NEG_INFINITY);
        }
        Ok(self.log_pmf(x as u64))
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        let k : u64 = rand_distr::Distribution::sample(&self.sampler, rng);
        Ok(k as f64)
    }

    fn mean(&self) -> Option<f64> {
        Some(self.n as f64 * self.p)
    }

    fn var(&self) -> Option<f64> {
        Some(self.n as f64 * self.p * (1. - self.p))
    }

}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn pmf_sums_to_one() {
        let b = Binomial::new(12, 0.3).unwrap();
        let total : f64 = (0..=12).map(|k| b.pmf(k) ).sum();
        assert!((total - 1.0).abs() < 1E-10);
        assert_eq!(b.pmf(13), 0.0);
        assert_eq!(b.pdf(2.5).unwrap(), 0.0);
    }

    #[test]
    fn degenerate_probabilities() {
        let b = Binomial::new(5, 0.0).unwrap();
        assert!((b.pmf(0) - 1.0).abs() < 1E-12);
        let b = Binomial::new(5, 1.0).unwrap();
        assert!((b.pmf(5) - 1.0).abs() < 1E-12);
        assert!(Binomial::new(5, 1.2).is_err());
    }

    #[test]
    fn likelihood_of_eight_in_twelve() {
        let like = Binomial::likelihood(8, 12);
        // 495 * 0.5^12
        assert!((like(0.5).unwrap() - 495. / 4096.).abs() < 1E-12);
    }

}
