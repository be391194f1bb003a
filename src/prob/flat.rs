use super::*;

#[derive(Debug, Clone)]
enum Support {

    // Proper uniform over [lo, hi).
    Bounded { lo : f64, hi : f64, sampler : rand_distr::Uniform<f64> },

    // Constant density over the real line. Usable as an (unnormalized) prior
    // density, but it cannot be sampled from.
    Unbounded

}

/// Flat prior density. The proper variant is a uniform distribution over a
/// bounded interval; the improper variant only carries a constant density value,
/// e.g. 1 / (prior range) for a prior whose range is much wider than the
/// likelihood, and fails with Capability::Sampling when asked for variates.
#[derive(Debug, Clone)]
pub struct Flat {

    density : f64,

    support : Support

}

impl Flat {

    pub fn new(lo : f64, hi : f64) -> Result<Self, ProbError> {
        let lo = check_finite("lo", lo)?;
        let hi = check_finite("hi", hi)?;
        if lo >= hi {
            return Err(ProbError::invalid("hi", format!("upper bound {} must exceed lower bound {}", hi, lo)));
        }
        if !(hi - lo).is_finite() {
            return Err(ProbError::invalid("hi", format!("range [{}, {}) is too wide to be represented", lo, hi)));
        }
        let sampler = rand_distr::Uniform::new(lo, hi);
        Ok(Self { density : 1. / (hi - lo), support : Support::Bounded { lo, hi, sampler } })
    }

    pub fn improper(density : f64) -> Result<Self, ProbError> {
        let density = check_positive("density", density)?;
        Ok(Self { density, support : Support::Unbounded })
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.support {
            Support::Bounded { lo, hi, .. } => Some((lo, hi)),
            Support::Unbounded => None
        }
    }

}

impl Univariate for Flat {

    fn name(&self) -> &'static str {
        "Flat"
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        match self.support {
            Support::Bounded { lo, hi, .. } if x < lo || x >= hi => Ok(f64::NEG_INFINITY),
            _ => Ok(self.density.ln())
        }
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        match &self.support {
            Support::Bounded { sampler, .. } => Ok(rand_distr::Distribution::sample(sampler, rng)),
            Support::Unbounded => Err(ProbError::missing(self.name(), Capability::Sampling))
        }
    }

    fn mean(&self) -> Option<f64> {
        self.bounds().map(|(lo, hi)| 0.5 * (lo + hi) )
    }

    fn var(&self) -> Option<f64> {
        self.bounds().map(|(lo, hi)| (hi - lo).powf(2.) / 12. )
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn proper_flat_draws_within_bounds() {
        let f = Flat::new(-2., 3.).unwrap();
        assert_eq!(f.bounds(), Some((-2., 3.)));
        assert!((f.pdf(0.).unwrap() - 0.2).abs() < 1E-15);
        assert_eq!(f.pdf(3.).unwrap(), 0.);
        let mut rng = StdRng::seed_from_u64(2);
        let s = f.sample(100, &mut rng).unwrap();
        assert!(s.iter().all(|x| *x >= -2. && *x < 3. ));
    }

    #[test]
    fn unrepresentable_range_is_rejected() {
        match Flat::new(-1E308, 1E308) {
            Err(ProbError::InvalidParameter { .. }) => { },
            other => panic!("Unexpected result: {:?}", other)
        }
        assert!(Flat::new(-1E307, 1E307).is_ok());
    }

}
