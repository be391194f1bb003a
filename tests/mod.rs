use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::DMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use bda::prob::*;
use bda::calc::{self, running, trapz2};
use bda::inference::*;
use bda::markov::*;
use bda::plot::*;

const EPS : f64 = 1E-10;

#[test]
fn shelves_over_unit_interval() {
    let line = Shelves::default().polyline(&[1., 3., 2.]).unwrap();
    let expected = [0., 1. / 3., 1. / 3., 2. / 3., 2. / 3., 1.];
    for (x, e) in line.x.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*x, *e, epsilon = EPS);
    }
    assert_eq!(line.y, vec![1., 1., 3., 3., 2., 2.]);

    let closed = Shelves::default().ends(true).polyline(&[1., 3., 2.]).unwrap();
    assert_eq!(closed.len(), 8);
    assert_eq!((closed.x[0], closed.y[0]), (0., 0.));
    assert_eq!((closed.x[7], closed.y[7]), (1., 0.));
}

#[test]
fn stacked_shelves_share_a_figure() {
    let mut fig = Figure::default();
    for (i, h) in [[0.1, 0.5, 0.2], [0.3, 0.3, 0.6]].iter().enumerate() {
        Shelves::default().offset(i as f64).draw(&mut fig, h, &Style::new(BLUE)).unwrap();
    }
    assert_eq!(fig.marks().len(), 2);
    let b = fig.bounds().unwrap();
    assert_abs_diff_eq!(b.y.1, 1.6, epsilon = EPS);
    assert!(fig.to_svg_string().unwrap().contains("<svg"));
}

#[test]
fn bivariate_normal_regressions() {
    let bvn = BivariateNormal::new([0., 0.], [1., 1.], 0.5).unwrap();
    assert_abs_diff_eq!(bvn.conditional_mean_y_given_x(1.0), 0.5, epsilon = EPS);
    assert_abs_diff_eq!(bvn.conditional_mean_x_given_y(1.0), 0.5, epsilon = EPS);
    assert_abs_diff_eq!(bvn.slope_y(), 0.5, epsilon = EPS);
    assert_abs_diff_eq!(bvn.conditional_sd_y(), 0.75f64.sqrt(), epsilon = EPS);

    let shifted = BivariateNormal::new([1., 2.], [2., 3.], -0.4).unwrap();
    let slope = -0.4 * 3. / 2.;
    assert_abs_diff_eq!(shifted.conditional_mean_y_given_x(3.), 2. + slope * 2., epsilon = EPS);
    assert_abs_diff_eq!(shifted.cov()[(0, 1)], -0.4 * 2. * 3., epsilon = EPS);
}

#[test]
fn bivariate_normal_density_integrates_to_one() {
    let bvn = BivariateNormal::new([1., -2.], [0.5, 2.], 0.8).unwrap();
    let grid = bvn.grid(200, 6.);
    assert_eq!(grid.xg.shape(), (200, 200));
    assert_eq!(grid.xg[(3, 7)], grid.x[7]);
    assert_eq!(grid.yg[(3, 7)], grid.y[3]);
    let mass = trapz2(&bvn.pdf_grid(&grid), &grid.x, &grid.y);
    assert_abs_diff_eq!(mass, 1.0, epsilon = 1E-2);
}

#[test]
fn bivariate_normal_sample_moments() {
    let bvn = BivariateNormal::new([1., -1.], [2., 0.5], -0.6).unwrap();
    let s = bvn.sample(20_000, &mut StdRng::seed_from_u64(7));
    let x : Vec<f64> = s.column(0).iter().cloned().collect();
    let y : Vec<f64> = s.column(1).iter().cloned().collect();
    let (mx, vx) = running::mean_variance_from_slice(&x, true);
    let (my, vy) = running::mean_variance_from_slice(&y, true);
    assert_abs_diff_eq!(mx, 1., epsilon = 0.05);
    assert_abs_diff_eq!(my, -1., epsilon = 0.05);
    assert_relative_eq!(vx, 4., max_relative = 0.05);
    assert_relative_eq!(vy, 0.25, max_relative = 0.05);
    assert_abs_diff_eq!(running::correlation(&x, &y), -0.6, epsilon = 0.03);
}

#[test]
fn correlation_bounds_are_enforced() {
    assert!(BivariateNormal::new([0., 0.], [1., 1.], 1.2).is_err());
    assert!(BivariateNormal::new([0., 0.], [0., 1.], 0.2).is_err());
    let degenerate = BivariateNormal::new([0., 0.], [1., 1.], 1.0).unwrap();
    assert_eq!(degenerate.conditional_sd_y(), 0.0);
    match degenerate.conditional_y_given_x(1.) {
        Err(ProbError::InvalidParameter { .. }) => { },
        other => panic!("Unexpected result: {:?}", other)
    }
}

#[test]
fn hierarchical_normal_by_ancestral_sampling() {
    // x ~ N(0, 1), y | x ~ N(x, 0.5): Var(y) = 1.25, corr(x, y) = 1 / sqrt(1.25).
    let joint = Joint::new(Normal::new(0., 1.).unwrap(), |x : f64| Normal::new(x, 0.5) );
    let (x, y) = joint.sample(20_000, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!((x.nrows(), y.nrows()), (20_000, 20_000));
    let (mx, vx) = running::mean_variance_from_slice(x.as_slice(), true);
    assert_abs_diff_eq!(mx, 0., epsilon = 0.05);
    assert_relative_eq!(vx, 1., max_relative = 0.05);
    assert_abs_diff_eq!(running::mean(x.iter().cloned(), x.nrows()), mx, epsilon = EPS);
    let (my, vy) = running::mean_variance_from_slice(y.as_slice(), true);
    assert_abs_diff_eq!(my, 0., epsilon = 0.05);
    assert_relative_eq!(vy, 1.25, max_relative = 0.05);
    assert_abs_diff_eq!(running::correlation(x.as_slice(), y.as_slice()), 1. / 1.25f64.sqrt(), epsilon = 0.02);

    let expected = Normal::new(0., 1.).unwrap().pdf(0.3).unwrap() * Normal::new(0.3, 0.5).unwrap().pdf(0.1).unwrap();
    assert_relative_eq!(joint.pdf([0.3, 0.1]).unwrap(), expected, max_relative = EPS);

    let (x0, y0) = joint.sample(0, &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(x0.is_empty() && y0.is_empty());
}

#[test]
fn joint_reports_missing_capabilities() {
    let no_draw = Joint::new(Flat::improper(1.).unwrap(), |x : f64| Normal::new(x, 1.) );
    assert!(no_draw.pdf([0., 0.]).is_ok());
    match no_draw.sample(3, &mut StdRng::seed_from_u64(0)) {
        Err(ProbError::MissingCapability { capability : Capability::Sampling, .. }) => { },
        other => panic!("Unexpected result: {:?}", other)
    }

    let no_density = Joint::new(Empirical::from_slice(&[1., 2.]).unwrap(), |x : f64| Normal::new(x, 1.) );
    assert!(no_density.sample(3, &mut StdRng::seed_from_u64(0)).is_ok());
    match no_density.pdf([1., 1.]) {
        Err(ProbError::MissingCapability { capability : Capability::Density, .. }) => { },
        other => panic!("Unexpected result: {:?}", other)
    }
}

#[test]
fn two_state_chain_reaches_stationarity() {
    let chain = TwoStateMarkovChain::new(0.07, 0.03).unwrap();
    let paths = chain.sim_paths(2000, init_at(State::Zero), 300, &mut StdRng::seed_from_u64(5)).unwrap();
    let frac = paths.fraction_one();
    assert_eq!(frac[0], 0.);
    assert_abs_diff_eq!(frac[299], 0.7, epsilon = 0.05);
    for t in [5usize, 20, 50].iter() {
        assert_abs_diff_eq!(frac[*t], chain.prob_one_after(0., *t), epsilon = 0.05);
    }
    let est = TwoStateMarkovChain::estimate(&paths).unwrap();
    assert_abs_diff_eq!(est.p01(), 0.07, epsilon = 0.01);
    assert_abs_diff_eq!(est.p10(), 0.03, epsilon = 0.01);
}

#[test]
fn random_initial_state() {
    let chain = TwoStateMarkovChain::new(0.0, 0.0).unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let paths = chain.sim_paths(4000, init_random(0.25).unwrap(), 3, &mut rng).unwrap();
    let frac = paths.fraction_one();
    assert_abs_diff_eq!(frac[0], 0.25, epsilon = 0.03);
    assert_eq!(frac[0], frac[2]);
}

#[test]
fn grid_and_conjugate_posteriors_agree() {
    let prior = Normal::new(0., 2.).unwrap();
    let data = [1.2, 0.7, 1.9, 1.1];
    let sigma = 1.0;
    let closed = normal_normal(&prior, &data, sigma).unwrap();
    let like = |mu : f64| -> Result<f64, ProbError> {
        let n = Normal::new(mu, sigma)?;
        let mut ll = 0.0;
        for d in data.iter() {
            ll += n.log_pdf(*d)?;
        }
        Ok(ll.exp())
    };
    let post = GridPosterior::new(calc::linspace(-8., 8., 4001), &prior, like).unwrap();
    assert_abs_diff_eq!(post.post_mean(), closed.loc(), epsilon = 1E-4);
    assert_abs_diff_eq!(post.var().unwrap().sqrt(), closed.scale(), epsilon = 1E-4);
    assert_abs_diff_eq!(post.normalization(), 1., epsilon = 1E-8);
}

#[test]
fn grid_posterior_draws_follow_posterior() {
    let post = binomial_inference(3, 20, &Beta::flat().unwrap(), calc::linspace(0., 1., 1001)).unwrap();
    let draws = post.sample(10_000, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!(draws.iter().all(|d| (0.0..=1.0).contains(d) ));
    // Exact posterior is Beta(4, 18).
    assert_abs_diff_eq!(draws.mean(), 4. / 22., epsilon = 0.01);
    assert_abs_diff_eq!(post.post_mean(), 4. / 22., epsilon = 1E-4);
}

#[test]
fn cauchy_location_is_robust() {
    let data = [0.1, -0.2, 0.3, 0.0, 25.];
    let post = cauchy_location_inference(1., &data, &Flat::improper(1.).unwrap(), (-10., 30.), 4001).unwrap();
    let median = post.quantile(0.5).unwrap();
    assert!(median.abs() < 1.0);
    assert!(Cauchy::new(0., 1.).unwrap().mean().is_none());
}

#[test]
fn dist_dispatches_to_variants() {
    let dists : Vec<Dist> = vec![
        Normal::new(0., 1.).unwrap().into(),
        Beta::new(2., 2.).unwrap().into(),
        Flat::new(-1., 1.).unwrap().into()
    ];
    let names : Vec<String> = dists.iter().map(|d| d.to_string() ).collect();
    assert_eq!(names, vec!["Normal(loc = 0, scale = 1)", "Beta(a = 2, b = 2)", "Flat[-1, 1)"]);
    let mut rng = StdRng::seed_from_u64(4);
    for d in dists.iter() {
        assert!(d.pdf(0.5).unwrap() > 0.);
        assert!(d.draw(&mut rng).unwrap().is_finite());
    }
}

#[test]
fn bvn_figure_renders() {
    let bvn = BivariateNormal::new([0., 0.], [1., 2.], 0.3).unwrap();
    let mut fig = Figure::new(400, 400);
    let opts = BvnPlot { grid_points : 40, samples : 50, regress : Some(1.), ..Default::default() };
    plot_bvn(&mut fig, &bvn, &opts, &mut StdRng::seed_from_u64(0)).unwrap();
    let svg = fig.to_svg_string().unwrap();
    assert!(svg.contains("<svg") && svg.contains("</svg>"));
    let bounds = fig.bounds().unwrap();
    assert!(bounds.x.0 <= -5. && bounds.x.1 >= 5.);
    let _ : &DMatrix<f64> = &bvn.pdf_grid(&bvn.grid(5, 1.));
}
