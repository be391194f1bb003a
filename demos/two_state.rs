use bda::markov::*;
use bda::plot::{plot_evol, Figure};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(2);
    let chain = TwoStateMarkovChain::new(0.07, 0.03)?;
    let paths = chain.sim_paths(200, init_at(State::Zero), 150, &mut rng)?;
    let frac = paths.fraction_one();
    for t in (0..paths.len()).step_by(25) {
        println!("t = {:3}: observed {:.3}, expected {:.3}", t, frac[t], chain.prob_one_after(0., t));
    }
    let est = TwoStateMarkovChain::estimate(&paths)?;
    println!("Estimated p01 = {:.4}, p10 = {:.4}", est.p01(), est.p10());

    let mut fig = Figure::new(900, 500).with_title("Two-state chain");
    plot_evol(&mut fig, &chain, &paths, 0.05)?;
    fig.save_svg("two_state.svg")?;
    Ok(())
}
