use super::*;
use crate::calc::running;

/// Distribution represented by a stored sample (e.g. the output of a simulation
/// or of a sampler over a posterior). Variates are drawn by resampling the stored
/// values with replacement. There is no density: a smoothed estimate is left to
/// the caller, who can tabulate one with Empirical::histogram.
#[derive(Debug, Clone)]
pub struct Empirical {

    sample : DVector<f64>,

    mean : f64,

    var : f64

}

impl Empirical {

    pub fn new(sample : DVector<f64>) -> Result<Self, ProbError> {
        if sample.nrows() == 0 {
            return Err(ProbError::invalid("sample", "empirical distributions require at least one value"));
        }
        if let Some(v) = sample.iter().find(|v| !v.is_finite() ) {
            return Err(ProbError::invalid("sample", format!("non-finite value {}", v)));
        }
        let (mean, var) = running::mean_variance(sample.iter().cloned(), sample.nrows(), false);
        Ok(Self { sample, mean, var })
    }

    pub fn from_slice(s : &[f64]) -> Result<Self, ProbError> {
        Self::new(DVector::from_column_slice(s))
    }

    pub fn len(&self) -> usize {
        self.sample.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.sample.nrows() == 0
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.sample
    }

    /// Density-normalized histogram with n_bins equal-width bins spanning [lo, hi),
    /// ready to be drawn with plot::Shelves over the same interval. Values outside
    /// the interval are counted towards the normalization but not allocated to any bin.
    pub fn histogram(&self, n_bins : usize, lo : f64, hi : f64) -> Result<DVector<f64>, ProbError> {
        if n_bins == 0 {
            return Err(ProbError::invalid("n_bins", "at least one bin is required"));
        }
        if !(lo < hi) {
            return Err(ProbError::invalid("hi", format!("upper bound {} must exceed lower bound {}", hi, lo)));
        }
        let intv = (hi - lo) / n_bins as f64;
        let mut bins = DVector::<f64>::zeros(n_bins);
        for s in self.sample.iter() {
            if *s < lo || *s >= hi {
                continue;
            }

            // Retrieves the discrete bin allocation for s as the ordered interval
            let b = (((*s - lo) / intv).floor() as usize).min(n_bins - 1);
            bins[b] += 1.;
        }
        bins.unscale_mut(self.len() as f64 * intv);
        Ok(bins)
    }

}

impl Univariate for Empirical {

    fn name(&self) -> &'static str {
        "Empirical"
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        let ix = rng.gen_range(0..self.sample.nrows());
        Ok(self.sample[ix])
    }

    fn mean(&self) -> Option<f64> {
        Some(self.mean)
    }

    fn var(&self) -> Option<f64> {
        Some(self.var)
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn resampling_stays_in_sample() {
        let e = Empirical::from_slice(&[1., 2., 3.]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let s = e.sample(100, &mut rng).unwrap();
        assert!(s.iter().all(|v| *v == 1. || *v == 2. || *v == 3. ));
        assert!(e.pdf(1.0).is_err());
    }

    #[test]
    fn histogram_integrates_to_one() {
        let e = Empirical::from_slice(&[0.1, 0.2, 0.6, 0.9]).unwrap();
        let h = e.histogram(4, 0., 1.).unwrap();
        assert_eq!(h.as_slice(), &[2., 0., 1., 1.]);
        let area : f64 = h.iter().map(|b| b * 0.25 ).sum();
        assert!((area - 1.).abs() < 1E-12);
    }

}
