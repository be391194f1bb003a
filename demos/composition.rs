use bda::prob::*;
use bda::calc::running;
use bda::plot::{Figure, Shelves, Style, BLUE};
use rand::SeedableRng;
use rand::rngs::StdRng;

// Builds joint distributions from a marginal and a conditional, then draws
// from them by ancestral sampling.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);

    println!("Beta-binomial:");
    let bb = Joint::new(Beta::new(2., 5.)?, |p : f64| Binomial::new(20, p) );
    let (p, k) = bb.sample(5000, &mut rng)?;
    let (mk, vk) = running::mean_variance_from_slice(k.as_slice(), true);
    println!("\tE(p) = {:.4}, E(k) = {:.3}, Var(k) = {:.3}", p.mean(), mk, vk);
    println!("\tp(0.3, 6) = {:.5}", bb.pdf([0.3, 6.])?);
    let hist = Empirical::new(p)?.histogram(25, 0., 1.)?;
    let mut fig = Figure::new(700, 400).with_title("Draws of p");
    Shelves::default().ends(true).draw(&mut fig, hist.as_slice(), &Style::new(BLUE).width(2))?;
    fig.save_svg("composition.svg")?;

    println!("Hierarchical normal:");
    let hn = Joint::new(Normal::new(0., 1.)?, |mu : f64| Normal::new(mu, 0.5) );
    let (x, y) = hn.sample(5000, &mut rng)?;
    println!("\tcorr(x, y) = {:.4} (expected {:.4})", running::correlation(x.as_slice(), y.as_slice()), 1. / 1.25f64.sqrt());

    println!("Empirical marginal:");
    let emp = Empirical::from_slice(&[0.1, 0.4, 0.5, 0.9])?;
    let ej = Joint::new(emp, |mu : f64| Normal::new(mu, 0.1) );
    let (_, y) = ej.sample(3, &mut rng)?;
    println!("\tdraws: {:?}", y.as_slice());
    match ej.pdf([0.4, 0.4]) {
        Err(e) => println!("\tdensity unavailable: {}", e),
        Ok(d) => println!("\tdensity: {}", d)
    }
    Ok(())
}
