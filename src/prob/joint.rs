use super::*;
use std::marker::PhantomData;

/* Represents a joint distribution p(x, y) factored as p(x) p(y|x): a marginal
distribution for x and a factory that, given a realized x, builds the conditional
distribution for y. This is the directed representation of a two-node graph, and
the joint offers exactly the capabilities of its parts: density evaluation is the
product of the marginal and conditional densities, and sampling is ancestral (x is
drawn first, then y is drawn from the conditional built at the realized x). No
normalization check is performed: the factory must return proper conditional densities. */
pub struct Joint<M, F, C>
where
    M : Univariate,
    C : Univariate,
    F : Fn(f64) -> Result<C, ProbError>
{

    marginal : M,

    conditional : F,

    c : PhantomData<C>

}

impl<M, F, C> Joint<M, F, C>
where
    M : Univariate,
    C : Univariate,
    F : Fn(f64) -> Result<C, ProbError>
{

    pub fn new(marginal : M, conditional : F) -> Self {
        Self { marginal, conditional, c : PhantomData }
    }

    pub fn marginal(&self) -> &M {
        &self.marginal
    }

    /// Builds the conditional distribution p(y|x) at the informed x.
    pub fn conditional(&self, x : f64) -> Result<C, ProbError> {
        (self.conditional)(x)
    }

    /// Joint density p(x) p(y|x) at xy = [x, y].
    pub fn pdf(&self, xy : [f64; 2]) -> Result<f64, ProbError> {
        let y_cond = self.conditional(xy[0])?;
        Ok(self.marginal.pdf(xy[0])? * y_cond.pdf(xy[1])?)
    }

    pub fn log_pdf(&self, xy : [f64; 2]) -> Result<f64, ProbError> {
        let y_cond = self.conditional(xy[0])?;
        Ok(self.marginal.log_pdf(xy[0])? + y_cond.log_pdf(xy[1])?)
    }

    /// Ancestral sampling: n draws of x from the marginal, then one draw of y
    /// from the conditional at each realized x. Returns the x and y coordinates
    /// as two vectors of length n.
    pub fn sample<R>(&self, n : usize, rng : &mut R) -> Result<(DVector<f64>, DVector<f64>), ProbError>
    where
        R : Rng + ?Sized
    {
        let xs = match n {
            1 => DVector::from_element(1, self.marginal.draw(rng)?),
            n => self.marginal.sample(n, rng)?
        };
        let mut ys = DVector::zeros(xs.nrows());
        for (y, x) in ys.iter_mut().zip(xs.iter()) {
            *y = self.conditional(*x)?.draw(rng)?;
        }
        Ok((xs, ys))
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn density_is_product_of_factors() {
        let joint = Joint::new(Normal::standard(), |x : f64| Normal::new(2. * x, 1.) );
        let expected = Normal::standard().pdf(0.5).unwrap() * Normal::new(1., 1.).unwrap().pdf(0.2).unwrap();
        assert!((joint.pdf([0.5, 0.2]).unwrap() - expected).abs() < 1E-14);
        assert!((joint.log_pdf([0.5, 0.2]).unwrap() - expected.ln()).abs() < 1E-12);
    }

    #[test]
    fn single_draw() {
        let joint = Joint::new(Beta::flat().unwrap(), |x : f64| Binomial::new(10, x) );
        let mut rng = StdRng::seed_from_u64(3);
        let (x, y) = joint.sample(1, &mut rng).unwrap();
        assert_eq!((x.nrows(), y.nrows()), (1, 1));
        assert!(x[0] >= 0.0 && x[0] <= 1.0);
        assert!(y[0] >= 0.0 && y[0] <= 10.0 && y[0].fract() == 0.0);
    }

    #[test]
    fn missing_capability_surfaces_at_first_use() {
        let joint = Joint::new(Flat::improper(1.).unwrap(), |x : f64| Normal::new(x, 1.) );
        assert!(joint.pdf([0., 0.]).is_ok());
        let mut rng = StdRng::seed_from_u64(3);
        match joint.sample(10, &mut rng) {
            Err(ProbError::MissingCapability { capability, .. }) => assert_eq!(capability, Capability::Sampling),
            other => panic!("Unexpected result: {:?}", other)
        }

        let joint = Joint::new(Normal::standard(), |_ : f64| Empirical::from_slice(&[1., 2.]) );
        assert!(joint.pdf([0., 1.]).is_err());
        assert!(joint.sample(5, &mut rng).is_ok());
    }

}
