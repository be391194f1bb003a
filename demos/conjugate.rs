use bda::prob::*;
use bda::inference::*;
use bda::calc::linspace;
use bda::plot::{plot_inference, Figure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Proportion: 8 successes in 12 trials under a Beta(2, 2) prior.
    let post = binomial_inference(8, 12, &Beta::new(2., 2.)?, linspace(0., 1., 1001))?;
    println!("Binomial: mean {:.4}, 90% interval [{:.4}, {:.4}]", post.post_mean(), post.quantile(0.05)?, post.quantile(0.95)?);

    // Rate: 16 events in 2 time units under a flat improper prior.
    let rate = poisson_rate_inference(16, 2., &Flat::improper(1.)?, 20., 2001)?;
    println!("Poisson rate: mean {:.4}", rate.post_mean());

    // Cauchy location with a wide normal prior.
    let data = [-0.4, 0.1, 0.3, 2.5, 0.2];
    let loc = cauchy_location_inference(1., &data, &Normal::new(0., 10.)?, (-10., 10.), 2001)?;
    println!("Cauchy location: mean {:.4}, median {:.4}", loc.post_mean(), loc.quantile(0.5)?);

    // Normal mean with known scale, closed form.
    let norm = normal_normal(&Normal::new(0., 10.)?, &[4.8, 5.3, 5.1, 4.6], 0.5)?;
    println!("Normal mean: N({:.4}, {:.4})", norm.loc(), norm.scale());

    let mut fig = Figure::new(800, 500).with_title("Binomial proportion");
    plot_inference(&mut fig, &post)?;
    fig.save_svg("binomial.svg")?;
    Ok(())
}
