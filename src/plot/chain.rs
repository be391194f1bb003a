use crate::markov::{TwoStateMarkovChain, Paths};
use crate::prob::ProbError;
use super::*;

/// Draws the evolution of simulated two-state paths: every path as a faint trace
/// (with opacity alpha_trace), the empirical fraction of paths in state 1 at each step,
/// and the closed-form expectation of that fraction starting from the observed
/// initial fraction. The stationary probability is marked when it exists.
pub fn plot_evol<C>(canvas : &mut C, chain : &TwoStateMarkovChain, paths : &Paths, alpha_trace : f64) -> Result<(), PlotError>
where
    C : Canvas + ?Sized
{
    if !(0.0..=1.0).contains(&alpha_trace) {
        return Err(ProbError::invalid("alpha_trace", format!("opacity {} outside [0, 1]", alpha_trace)).into());
    }
    if paths.is_empty() {
        return Err(PlotError::Empty("no simulated paths"));
    }
    let t : Vec<f64> = (0..paths.len()).map(|i| i as f64 ).collect();
    let trace = Style::new(BLUE).alpha(alpha_trace);
    for i in 0..paths.n_paths() {
        if let Some(p) = paths.path(i) {
            canvas.line(&t, &p, &trace)?;
        }
    }
    let frac = paths.fraction_one();
    canvas.line(&t, frac.as_slice(), &Style::new(BLACK).width(2).label("fraction in state 1"))?;
    let expected : Vec<f64> = (0..paths.len()).map(|i| chain.prob_one_after(frac[0], i) ).collect();
    canvas.line(&t, &expected, &Style::new(RED).width(2).dash(Dash::Dashed).label("P(state 1)"))?;
    if let Some(pi1) = chain.stationary_one() {
        let last = t[t.len() - 1];
        canvas.line(&[0., last], &[pi1, pi1], &Style::new(GRAY).dash(Dash::Dotted))?;
    }
    canvas.set_labels("t", "state");
    Ok(())
}
