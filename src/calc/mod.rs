use nalgebra::*;
use num_traits::Float;

/// Trapezoidal quadrature over sampled curves and surfaces.
pub mod integrate;

pub use integrate::*;

/// Returns n evenly spaced values over the closed interval [lo, hi]. The endpoints
/// are reproduced exactly; n = 1 yields [lo] and n = 0 an empty vector.
pub fn linspace(lo : f64, hi : f64, n : usize) -> DVector<f64> {
    match n {
        0 => DVector::zeros(0),
        1 => DVector::from_element(1, lo),
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            DVector::from_fn(n, |i, _| if i == n - 1 { hi } else { lo + step * i as f64 } )
        }
    }
}

/// Coordinate matrices over the cartesian product of x and y, using 'xy' indexing:
/// both outputs have y.len() rows and x.len() columns, with xg[(j, i)] = x[i] and
/// yg[(j, i)] = y[j] (a row runs over the x values).
pub fn meshgrid(x : &DVector<f64>, y : &DVector<f64>) -> (DMatrix<f64>, DMatrix<f64>) {
    let xg = DMatrix::from_fn(y.nrows(), x.nrows(), |_, i| x[i] );
    let yg = DMatrix::from_fn(y.nrows(), x.nrows(), |j, _| y[j] );
    (xg, yg)
}

/// Sign of v, with sign(0) = 0 (unlike f64::signum, which maps 0.0 to 1.0).
pub fn sign<F : Float>(v : F) -> F {
    if v > F::zero() {
        F::one()
    } else if v < F::zero() {
        -F::one()
    } else {
        F::zero()
    }
}

/// Single-pass univariate statistical calculations.
pub mod running {

    use std::borrow::Borrow;

    /// Returns the mean, the (biased) variance and the number of elements.
    pub fn single_pass_sum_sum_sq(sample : impl IntoIterator<Item=impl Borrow<f64>>) -> (f64, f64, usize) {
        let mut n = 0;
        let (sum, sum_sq) = sample.into_iter().fold((0.0, 0.0), |accum, d| {
            n += 1;
            (accum.0 + *d.borrow(), accum.1 + d.borrow().powf(2.))
        });
        let mean = sum / (n as f64);
        (mean, sum_sq / (n as f64) - mean.powf(2.), n)
    }

    pub fn mean(d : impl Iterator<Item=f64>, count : usize) -> f64 {
        d.sum::<f64>() / count as f64
    }

    pub fn mean_variance(d : impl Iterator<Item=f64>, count : usize, unbiased : bool) -> (f64, f64) {
        let (sum, sum_sq) = d.map(|s| (s, s.powf(2.)) )
            .fold((0.0, 0.0), |acc, s| (acc.0 + s.0, acc.1 + s.1) );
        let n = count as f64;
        let mean = sum / n;
        let var = (sum_sq - sum.powf(2.) / n) / if unbiased { n - 1. } else { n };
        (mean, var)
    }

    pub fn mean_variance_from_slice(d : &[f64], unbiased : bool) -> (f64, f64) {
        mean_variance(d.iter().cloned(), d.len(), unbiased)
    }

    /// Pearson correlation between paired samples. Returns NaN when either
    /// sample is constant or the samples are empty.
    pub fn correlation(x : &[f64], y : &[f64]) -> f64 {
        let n = x.len().min(y.len());
        if n == 0 {
            return f64::NAN;
        }
        let (mx, vx) = mean_variance(x.iter().take(n).cloned(), n, false);
        let (my, vy) = mean_variance(y.iter().take(n).cloned(), n, false);
        let cov = x.iter().zip(y.iter())
            .fold(0.0, |acc, (a, b)| acc + (a - mx) * (b - my) ) / n as f64;
        cov / (vx * vy).sqrt()
    }

}
