use nalgebra::*;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use crate::prob::{ProbError, check_probability};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Zero,
    One
}

impl State {

    pub fn index(&self) -> usize {
        match self {
            State::Zero => 0,
            State::One => 1
        }
    }

}

impl From<bool> for State {

    fn from(one : bool) -> Self {
        if one { State::One } else { State::Zero }
    }

}

/// Discrete-time, time-homogeneous Markov chain over the states {0, 1}, defined by
/// the probability p01 of jumping from 0 to 1 and the probability p10 of jumping from
/// 1 to 0. The transition matrix is
///
/// | 1 - p01   p01     |
/// | p10       1 - p10 |
///
/// whose second eigenvalue lambda = 1 - p01 - p10 governs how fast the chain forgets
/// its initial state: after t steps, P(state = 1) = pi1 + (P0(state = 1) - pi1) lambda^t,
/// where pi1 = p01 / (p01 + p10) is the stationary probability of state 1.
#[derive(Debug, Clone)]
pub struct TwoStateMarkovChain {

    p01 : f64,

    p10 : f64

}

/// Simulated sample paths, one path per row and one time step per column;
/// entries are the state indices 0 or 1.
#[derive(Debug, Clone)]
pub struct Paths {

    states : DMatrix<u8>

}

impl Paths {

    pub fn n_paths(&self) -> usize {
        self.states.nrows()
    }

    pub fn len(&self) -> usize {
        self.states.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &DMatrix<u8> {
        &self.states
    }

    /// The states visited by the i-th path, as f64 values (0.0 or 1.0) ready to be plotted.
    pub fn path(&self, i : usize) -> Option<Vec<f64>> {
        if i >= self.n_paths() {
            return None;
        }
        Some(self.states.row(i).iter().map(|s| *s as f64 ).collect())
    }

    /// Fraction of paths in state 1 at each time step.
    pub fn fraction_one(&self) -> DVector<f64> {
        let n = self.n_paths() as f64;
        DVector::from_iterator(
            self.len(),
            self.states.column_iter().map(|c| c.iter().map(|s| *s as f64 ).sum::<f64>() / n )
        )
    }

    /// Observed transition counts, with entry (i, j) counting the jumps from state i to state j
    /// over all paths.
    pub fn transition_counts(&self) -> Matrix2<u64> {
        let mut counts = Matrix2::<u64>::zeros();
        for row in self.states.row_iter() {
            for t in 1..row.len() {
                counts[(row[t-1] as usize, row[t] as usize)] += 1;
            }
        }
        counts
    }

}

impl TwoStateMarkovChain {

    pub fn new(p01 : f64, p10 : f64) -> Result<Self, ProbError> {
        let p01 = check_probability("p01", p01)?;
        let p10 = check_probability("p10", p10)?;
        Ok(Self { p01, p10 })
    }

    pub fn p01(&self) -> f64 {
        self.p01
    }

    pub fn p10(&self) -> f64 {
        self.p10
    }

    pub fn transition_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(1. - self.p01, self.p01, self.p10, 1. - self.p10)
    }

    /// Probability that the next state is 1, given the current state.
    pub fn prob_next_one(&self, current : State) -> f64 {
        match current {
            State::Zero => self.p01,
            State::One => 1. - self.p10
        }
    }

    pub fn step<R>(&self, current : State, rng : &mut R) -> State
    where
        R : Rng + ?Sized
    {
        let u : f64 = rng.gen();
        State::from(u < self.prob_next_one(current))
    }

    /// Stationary probability of state 1; None when the chain never moves
    /// (p01 = p10 = 0), in which case every distribution is stationary.
    pub fn stationary_one(&self) -> Option<f64> {
        let s = self.p01 + self.p10;
        if s > 0.0 { Some(self.p01 / s) } else { None }
    }

    /// Closed-form probability of being in state 1 after t steps, starting from a
    /// distribution that puts probability p_one on state 1.
    pub fn prob_one_after(&self, p_one : f64, t : usize) -> f64 {
        match self.stationary_one() {
            Some(pi1) => {
                let lambda = 1. - self.p01 - self.p10;
                pi1 + (p_one - pi1) * lambda.powf(t as f64)
            },
            None => p_one
        }
    }

    /// Simulates n_paths independent paths of length len. The first state of each path
    /// is drawn from init; every subsequent state follows from the transition probabilities.
    pub fn sim_paths<R, I>(&self, n_paths : usize, mut init : I, len : usize, rng : &mut R) -> Result<Paths, ProbError>
    where
        R : Rng + ?Sized,
        I : FnMut(&mut R) -> State
    {
        if n_paths == 0 {
            return Err(ProbError::invalid("n_paths", "at least one path is required"));
        }
        if len == 0 {
            return Err(ProbError::invalid("len", "paths must have at least one step"));
        }
        let mut states = DMatrix::<u8>::zeros(n_paths, len);
        for i in 0..n_paths {
            let mut s = init(rng);
            states[(i, 0)] = s.index() as u8;
            for t in 1..len {
                s = self.step(s, rng);
                states[(i, t)] = s.index() as u8;
            }
        }
        tracing::debug!(n_paths, len, p01 = self.p01, p10 = self.p10, "simulated two-state paths");
        Ok(Paths { states })
    }

    /// Maximum-likelihood transition probabilities given observed paths: the fraction
    /// of departures from each state that jumped to the other state.
    pub fn estimate(paths : &Paths) -> Result<Self, ProbError> {
        let c = paths.transition_counts();
        let from_zero = c[(0, 0)] + c[(0, 1)];
        let from_one = c[(1, 0)] + c[(1, 1)];
        if from_zero == 0 || from_one == 0 {
            return Err(ProbError::invalid("paths", "both states must be left at least once to estimate transitions"));
        }
        Self::new(c[(0, 1)] as f64 / from_zero as f64, c[(1, 0)] as f64 / from_one as f64)
    }

}

/// Initial-state sampler that always returns the same state.
pub fn init_at<R>(state : State) -> impl FnMut(&mut R) -> State
where
    R : Rng + ?Sized
{
    move |_ : &mut R| state
}

/// Initial-state sampler returning state 1 with probability p_one.
pub fn init_random<R>(p_one : f64) -> Result<impl FnMut(&mut R) -> State, ProbError>
where
    R : Rng + ?Sized
{
    let bern = Bernoulli::new(p_one)
        .map_err(|_| ProbError::invalid("p_one", format!("expected a probability in [0, 1], got {}", p_one)) )?;
    Ok(move |rng : &mut R| State::from(bern.sample(rng)))
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn paths_have_requested_shape() {
        let chain = TwoStateMarkovChain::new(0.07, 0.03).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let paths = chain.sim_paths(10, init_at(State::Zero), 30, &mut rng).unwrap();
        assert_eq!((paths.n_paths(), paths.len()), (10, 30));
        assert!(paths.states().column(0).iter().all(|s| *s == 0 ));
        assert!(paths.states().iter().all(|s| *s <= 1 ));
        let counts = paths.transition_counts();
        assert_eq!(counts.iter().sum::<u64>(), 10 * 29);
    }

    #[test]
    fn absorbing_and_alternating_chains() {
        let mut rng = StdRng::seed_from_u64(0);
        let stuck = TwoStateMarkovChain::new(0.0, 0.0).unwrap();
        let paths = stuck.sim_paths(3, init_at(State::One), 5, &mut rng).unwrap();
        assert!(paths.states().iter().all(|s| *s == 1 ));
        assert_eq!(stuck.stationary_one(), None);
        assert_eq!(stuck.prob_one_after(0.3, 10), 0.3);

        let flip = TwoStateMarkovChain::new(1.0, 1.0).unwrap();
        let paths = flip.sim_paths(1, init_at(State::Zero), 4, &mut rng).unwrap();
        assert_eq!(paths.path(0).unwrap(), vec![0., 1., 0., 1.]);
        assert!(paths.path(1).is_none());
    }

    #[test]
    fn closed_form_relaxes_to_stationary() {
        let chain = TwoStateMarkovChain::new(0.07, 0.03).unwrap();
        assert!((chain.stationary_one().unwrap() - 0.7).abs() < 1E-12);
        assert_eq!(chain.prob_one_after(0.0, 0), 0.0);
        assert!((chain.prob_one_after(0.0, 1) - 0.07).abs() < 1E-12);
        assert!((chain.prob_one_after(0.0, 2000) - 0.7).abs() < 1E-9);
        assert!((chain.prob_one_after(0.0, 1 << 31) - 0.7).abs() < 1E-12);
        let flip = TwoStateMarkovChain::new(1.0, 1.0).unwrap();
        assert_eq!(flip.prob_one_after(1.0, (1 << 31) + 1), 0.0);
    }

    #[test]
    fn transition_matrix_rows_are_distributions() {
        let chain = TwoStateMarkovChain::new(0.07, 0.03).unwrap();
        let m = chain.transition_matrix();
        assert!((m - Matrix2::new(0.93, 0.07, 0.03, 0.97)).norm() < 1E-15);
        for r in 0..2 {
            assert!((m.row(r).sum() - 1.0).abs() < 1E-15);
        }
        let pi = RowVector2::new(0.3, 0.7);
        assert!((pi * m - pi).norm() < 1E-12);
    }

    #[test]
    fn rejects_invalid_probabilities() {
        assert!(TwoStateMarkovChain::new(-0.1, 0.5).is_err());
        assert!(TwoStateMarkovChain::new(0.1, 1.5).is_err());
        assert!(init_random::<StdRng>(2.0).is_err());
        let chain = TwoStateMarkovChain::new(0.1, 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(chain.sim_paths(0, init_at(State::Zero), 5, &mut rng).is_err());
        assert!(chain.sim_paths(2, init_at(State::Zero), 0, &mut rng).is_err());
    }

}
