use bda::prob::BivariateNormal;
use bda::plot::{plot_bvn, BvnPlot, Figure};
use bda::calc::trapz2;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bvn = BivariateNormal::new([1., -1.], [1., 2.], 0.7)?;
    println!("E(y|x) = {:.3} + {:.3} x", bvn.intercept_y(), bvn.slope_y());
    println!("E(x|y) = {:.3} + {:.3} y", bvn.intercept_x(), bvn.slope_x());

    let grid = bvn.grid(200, 6.);
    let mass = trapz2(&bvn.pdf_grid(&grid), &grid.x, &grid.y);
    println!("Density integrates to {:.6} over the grid", mass);

    let mut fig = Figure::new(700, 700).with_title("Bivariate normal");
    let opts = BvnPlot { regress : Some(1.0), samples : 300, ..Default::default() };
    plot_bvn(&mut fig, &bvn, &opts, &mut StdRng::seed_from_u64(1))?;
    fig.save_svg("bvn.svg")?;
    Ok(())
}
