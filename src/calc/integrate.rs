use nalgebra::*;

/// Trapezoidal rule over the sampled curve (x[i], y[i]). The abscissas need not be
/// evenly spaced. If the slices differ in length, the trailing entries of the longer
/// one are ignored. Fewer than two points integrate to zero.
pub fn trapz(y : &[f64], x : &[f64]) -> f64 {
    let n = x.len().min(y.len());
    (1..n).fold(0.0, |area, i| area + 0.5 * (x[i] - x[i-1]) * (y[i] + y[i-1]) )
}

/// Running trapezoidal integral, starting at zero at x[0]; has the same length
/// as the shorter of the two slices.
pub fn cumtrapz(y : &[f64], x : &[f64]) -> DVector<f64> {
    let n = x.len().min(y.len());
    let mut acc = DVector::zeros(n);
    for i in 1..n {
        acc[i] = acc[i-1] + 0.5 * (x[i] - x[i-1]) * (y[i] + y[i-1]);
    }
    acc
}

/// Iterated trapezoidal rule over a surface tabulated with 'xy' indexing
/// (z[(j, i)] is the value at (x[i], y[j])).
pub fn trapz2(z : &DMatrix<f64>, x : &DVector<f64>, y : &DVector<f64>) -> f64 {
    let inner : Vec<f64> = z.row_iter()
        .map(|row| {
            let r : Vec<f64> = row.iter().cloned().collect();
            trapz(&r, x.as_slice())
        })
        .collect();
    trapz(&inner, y.as_slice())
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::calc::linspace;

    #[test]
    fn trapz_is_exact_for_linear() {
        let x = linspace(1., 2., 5);
        let y : Vec<f64> = x.iter().cloned().collect();
        let expected = 2f64.powf(2.) / 2. - 1. / 2.;
        assert!((trapz(&y, x.as_slice()) - expected).abs() < 1E-12);
    }

    #[test]
    fn trapz_approximates_quadratic() {
        let x = linspace(1., 2., 5);
        let y : Vec<f64> = x.iter().map(|v| v.powf(2.) ).collect();
        let expected = 8. / 3. - 1. / 3.;
        let area = trapz(&y, x.as_slice());
        assert!(area != expected);
        assert!(((area - expected) / expected).abs() < 0.01);
    }

    #[test]
    fn cumulative_ends_at_total() {
        let x = linspace(0., 1., 11);
        let y : Vec<f64> = x.iter().map(|v| 3. * v.powf(2.) ).collect();
        let c = cumtrapz(&y, x.as_slice());
        assert_eq!(c[0], 0.);
        assert!((c[10] - trapz(&y, x.as_slice())).abs() < 1E-12);
    }

    #[test]
    fn surface_of_constant() {
        let x = linspace(0., 2., 7);
        let y = linspace(0., 3., 4);
        let z = DMatrix::from_element(4, 7, 0.5);
        assert!((trapz2(&z, &x, &y) - 3.).abs() < 1E-12);
    }

}
