use nalgebra::*;
use rand::Rng;
use std::fmt::{self, Debug, Display};
use thiserror::Error;

mod normal;

pub use normal::*;

mod beta;

pub use beta::*;

mod binomial;

pub use binomial::*;

mod cauchy;

pub use cauchy::*;

mod flat;

pub use flat::*;

/// Non-parametric distribution represented by a stored sample.
mod empirical;

pub use empirical::*;

/// Two-variable gaussian described by marginal moments and a correlation coefficient.
mod bivariate;

pub use bivariate::*;

/// Joint distribution composed of a marginal and a conditional factory.
mod joint;

pub use joint::*;

/// The two operations a distribution might offer to its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Density,
    Sampling
}

impl Display for Capability {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Capability::Density => write!(f, "density evaluation"),
            Capability::Sampling => write!(f, "sampling")
        }
    }

}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbError {

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name : &'static str, reason : String },

    #[error("Distribution {dist} does not support {capability}")]
    MissingCapability { dist : &'static str, capability : Capability }

}

impl ProbError {

    pub fn invalid(name : &'static str, reason : impl Into<String>) -> Self {
        ProbError::InvalidParameter { name, reason : reason.into() }
    }

    pub fn missing(dist : &'static str, capability : Capability) -> Self {
        ProbError::MissingCapability { dist, capability }
    }

}

/// Verifies a scale-like parameter is finite and strictly positive.
pub(crate) fn check_positive(name : &'static str, val : f64) -> Result<f64, ProbError> {
    if val.is_finite() && val > 0.0 {
        Ok(val)
    } else {
        Err(ProbError::invalid(name, format!("expected a finite positive value, got {}", val)))
    }
}

pub(crate) fn check_finite(name : &'static str, val : f64) -> Result<f64, ProbError> {
    if val.is_finite() {
        Ok(val)
    } else {
        Err(ProbError::invalid(name, format!("expected a finite value, got {}", val)))
    }
}

pub(crate) fn check_probability(name : &'static str, val : f64) -> Result<f64, ProbError> {
    if (0.0..=1.0).contains(&val) {
        Ok(val)
    } else {
        Err(ProbError::invalid(name, format!("expected a probability in [0, 1], got {}", val)))
    }
}

/// a * ln(x), taken to be zero when a is zero (so that boundary densities such
/// as Beta(1, b) at 0 stay finite).
pub(crate) fn xlogy(a : f64, x : f64) -> f64 {
    if a == 0.0 { 0.0 } else { a * x.ln() }
}

/// Trait shared by all one-dimensional distributions. A distribution offers
/// up to two capabilities: evaluating its density (or mass, for discrete
/// distributions) and drawing random variates. Both are fallible: implementors
/// override the methods for the capabilities they support, and the default
/// implementations fail with ProbError::MissingCapability, so that
/// composite structures (such as Joint) surface the missing capability the
/// first time it is required.
///
/// Randomness is always supplied by the caller, so that any computation can
/// be reproduced by seeding the generator.
pub trait Univariate
where
    Self : Debug
{

    /// Short name used in error messages.
    fn name(&self) -> &'static str;

    fn log_pdf(&self, _x : f64) -> Result<f64, ProbError> {
        Err(ProbError::missing(self.name(), Capability::Density))
    }

    fn pdf(&self, x : f64) -> Result<f64, ProbError> {
        self.log_pdf(x).map(f64::exp)
    }

    fn draw<R>(&self, _rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        Err(ProbError::missing(self.name(), Capability::Sampling))
    }

    /// Draws n independent variates.
    fn sample<R>(&self, n : usize, rng : &mut R) -> Result<DVector<f64>, ProbError>
    where
        R : Rng + ?Sized
    {
        let mut s = DVector::zeros(n);
        for i in 0..n {
            s[i] = self.draw(rng)?;
        }
        Ok(s)
    }

    /// Evaluates the density at every entry of xs.
    fn pdf_over(&self, xs : &DVector<f64>) -> Result<DVector<f64>, ProbError> {
        let mut p = DVector::zeros(xs.nrows());
        for (dst, x) in p.iter_mut().zip(xs.iter()) {
            *dst = self.pdf(*x)?;
        }
        Ok(p)
    }

    fn mean(&self) -> Option<f64>;

    fn var(&self) -> Option<f64>;

}

/// Closed set of the parametric and non-parametric distributions shipped with
/// this crate, dispatching Univariate to the wrapped variant.
#[derive(Debug, Clone)]
pub enum Dist {
    Normal(Normal),
    Beta(Beta),
    Binomial(Binomial),
    Cauchy(Cauchy),
    Flat(Flat),
    Empirical(Empirical)
}

macro_rules! dispatch {
    ($self:ident, $d:ident => $e:expr) => {
        match $self {
            Dist::Normal($d) => $e,
            Dist::Beta($d) => $e,
            Dist::Binomial($d) => $e,
            Dist::Cauchy($d) => $e,
            Dist::Flat($d) => $e,
            Dist::Empirical($d) => $e
        }
    }
}

impl Univariate for Dist {

    fn name(&self) -> &'static str {
        dispatch!(self, d => d.name())
    }

    fn log_pdf(&self, x : f64) -> Result<f64, ProbError> {
        dispatch!(self, d => d.log_pdf(x))
    }

    fn pdf(&self, x : f64) -> Result<f64, ProbError> {
        dispatch!(self, d => d.pdf(x))
    }

    fn draw<R>(&self, rng : &mut R) -> Result<f64, ProbError>
    where
        R : Rng + ?Sized
    {
        dispatch!(self, d => d.draw(rng))
    }

    fn mean(&self) -> Option<f64> {
        dispatch!(self, d => d.mean())
    }

    fn var(&self) -> Option<f64> {
        dispatch!(self, d => d.var())
    }

}

impl From<Normal> for Dist {
    fn from(d : Normal) -> Self { Dist::Normal(d) }
}

impl From<Beta> for Dist {
    fn from(d : Beta) -> Self { Dist::Beta(d) }
}

impl From<Binomial> for Dist {
    fn from(d : Binomial) -> Self { Dist::Binomial(d) }
}

impl From<Cauchy> for Dist {
    fn from(d : Cauchy) -> Self { Dist::Cauchy(d) }
}

impl From<Flat> for Dist {
    fn from(d : Flat) -> Self { Dist::Flat(d) }
}

impl From<Empirical> for Dist {
    fn from(d : Empirical) -> Self { Dist::Empirical(d) }
}

impl Display for Dist {

    fn fmt(&self, f : &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dist::Normal(n) => write!(f, "Normal(loc = {}, scale = {})", n.loc(), n.scale()),
            Dist::Beta(b) => write!(f, "Beta(a = {}, b = {})", b.a(), b.b()),
            Dist::Binomial(b) => write!(f, "Binomial(n = {}, p = {})", b.trials(), b.p()),
            Dist::Cauchy(c) => write!(f, "Cauchy(loc = {}, scale = {})", c.loc(), c.scale()),
            Dist::Flat(fl) => match fl.bounds() {
                Some((lo, hi)) => write!(f, "Flat[{}, {})", lo, hi),
                None => write!(f, "Flat(density = {}, improper)", fl.density())
            },
            Dist::Empirical(e) => write!(f, "Empirical(n = {})", e.len())
        }
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dispatch_reaches_variant() {
        let d : Dist = Normal::new(1.0, 2.0).unwrap().into();
        assert_eq!(d.name(), "Normal");
        assert_eq!(d.mean(), Some(1.0));
        assert_eq!(d.var(), Some(4.0));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(d.sample(5, &mut rng).unwrap().nrows(), 5);
    }

    #[test]
    fn missing_capability_is_reported() {
        let d : Dist = Flat::improper(0.001).unwrap().into();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            d.draw(&mut rng),
            Err(ProbError::missing("Flat", Capability::Sampling))
        );
        assert!((d.pdf(123.0).unwrap() - 0.001).abs() < 1E-12);
    }

    #[test]
    fn xlogy_at_boundary() {
        assert_eq!(xlogy(0.0, 0.0), 0.0);
        assert_eq!(xlogy(1.0, 1.0), 0.0);
        assert!(xlogy(2.0, 0.0).is_infinite());
    }

}
