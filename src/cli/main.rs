use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, bail};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;
use bda::prob::*;
use bda::calc;
use bda::inference::{self, GridPosterior};
use bda::markov::{self, TwoStateMarkovChain, State};
use bda::plot::{self, Canvas, Figure, Shelves, Style, BvnPlot, Dash};
use bda::config::LabConfig;

/// Runs the worked examples of the Bayesian data analysis course, printing numeric
/// summaries and writing the figures as SVG files.
#[derive(StructOpt, Debug)]
#[structopt(name = "bda")]
pub struct Bda {

    /// JSON configuration file (seed, output directory, figure size, grid resolution).
    #[structopt(short, long)]
    config : Option<PathBuf>,

    /// Seed for the random number generator, overriding the configuration.
    #[structopt(long)]
    seed : Option<u64>,

    /// Directory where figures are written, overriding the configuration.
    #[structopt(long)]
    out_dir : Option<PathBuf>,

    #[structopt(subcommand)]
    cmd : Command

}

#[derive(StructOpt, Debug)]
pub enum Command {

    /// Draws bin heights as a step (shelf) curve over [lo, hi).
    Shelves {

        heights : Vec<f64>,

        #[structopt(long, default_value = "0")]
        lo : f64,

        #[structopt(long, default_value = "1")]
        hi : f64,

        /// Vertical offset added to every height.
        #[structopt(long, default_value = "0")]
        offset : f64,

        /// Close the curve down to zero at both ends.
        #[structopt(long)]
        ends : bool,

        #[structopt(short, long)]
        output : Option<PathBuf>
    },

    /// Draws a bivariate normal: density contours, both regression lines and random draws.
    Bvn {

        #[structopt(long, default_value = "0")]
        mean_x : f64,

        #[structopt(long, default_value = "0")]
        mean_y : f64,

        #[structopt(long, default_value = "1")]
        sig_x : f64,

        #[structopt(long, default_value = "1")]
        sig_y : f64,

        #[structopt(long, default_value = "0.5")]
        rho : f64,

        /// Marks E(y|x) at x = mean_x + regress sig_x.
        #[structopt(long)]
        regress : Option<f64>,

        #[structopt(long, default_value = "200")]
        samples : usize,

        #[structopt(short, long)]
        output : Option<PathBuf>
    },

    /// Simulates a two-state Markov chain and draws the evolution of its paths.
    Markov {

        #[structopt(long, default_value = "0.07")]
        p01 : f64,

        #[structopt(long, default_value = "0.03")]
        p10 : f64,

        #[structopt(long, default_value = "100")]
        paths : usize,

        #[structopt(long, default_value = "100")]
        len : usize,

        /// Probability of starting at state 1 (paths start at state 0 when absent).
        #[structopt(long)]
        p_init : Option<f64>,

        #[structopt(long, default_value = "0.05")]
        alpha : f64,

        #[structopt(short, long)]
        output : Option<PathBuf>
    },

    /// Grid posterior for a binomial proportion under a beta prior.
    Binomial {

        /// Number of successes.
        n : u64,

        /// Number of trials.
        ntot : u64,

        #[structopt(long, default_value = "1")]
        a : f64,

        #[structopt(long, default_value = "1")]
        b : f64,

        #[structopt(short, long)]
        output : Option<PathBuf>
    },

    /// Normal mean with known scale under a normal prior, comparing the conjugate
    /// update with the grid posterior.
    Conjugate {

        data : Vec<f64>,

        #[structopt(long, default_value = "0")]
        mu0 : f64,

        #[structopt(long, default_value = "10")]
        tau0 : f64,

        #[structopt(long, default_value = "1")]
        sigma : f64,

        #[structopt(short, long)]
        output : Option<PathBuf>
    }

}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bda=info") );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn save(fig : &Figure, path : &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()) )?;
        }
    }
    fig.save_svg(path).with_context(|| format!("writing {}", path.display()) )?;
    println!("Figure written to {}", path.display());
    Ok(())
}

fn output_or(output : Option<PathBuf>, cfg : &LabConfig, name : &str) -> PathBuf {
    output.unwrap_or_else(|| cfg.figure_path(name) )
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Bda::from_args();
    let mut cfg = match &args.config {
        Some(path) => LabConfig::load_from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()) )?,
        None => LabConfig::default()
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(dir) = args.out_dir {
        cfg.out_dir = dir;
    }
    let mut rng = cfg.rng();
    let mut fig = Figure::new(cfg.width, cfg.height);
    match args.cmd {
        Command::Shelves { heights, lo, hi, offset, ends, output } => {
            let shelves = Shelves::new(lo, hi)?.offset(offset).ends(ends);
            let line = shelves.draw(&mut fig, &heights, &Style::new(plot::BLUE).width(2))?;
            fig.set_labels("x", "height");
            println!("{} vertices, x in [{}, {}]", line.len(), lo, hi);
            save(&fig, &output_or(output, &cfg, "shelves.svg"))
        },
        Command::Bvn { mean_x, mean_y, sig_x, sig_y, rho, regress, samples, output } => {
            let bvn = BivariateNormal::new([mean_x, mean_y], [sig_x, sig_y], rho)?;
            println!("E(y|x) = {:.4} + {:.4} x (sd {:.4})", bvn.intercept_y(), bvn.slope_y(), bvn.conditional_sd_y());
            println!("E(x|y) = {:.4} + {:.4} y (sd {:.4})", bvn.intercept_x(), bvn.slope_x(), bvn.conditional_sd_x());
            let opts = BvnPlot { grid_points : cfg.grid_points, regress, samples, ..Default::default() };
            plot::plot_bvn(&mut fig, &bvn, &opts, &mut rng)?;
            save(&fig, &output_or(output, &cfg, "bvn.svg"))
        },
        Command::Markov { p01, p10, paths, len, p_init, alpha, output } => {
            let chain = TwoStateMarkovChain::new(p01, p10)?;
            let sim = match p_init {
                Some(p) => chain.sim_paths(paths, markov::init_random(p)?, len, &mut rng)?,
                None => chain.sim_paths(paths, markov::init_at(State::Zero), len, &mut rng)?
            };
            let frac = sim.fraction_one();
            println!("Fraction in state 1 at the last step: {:.4}", frac[frac.nrows() - 1]);
            if let Some(pi1) = chain.stationary_one() {
                println!("Stationary probability of state 1: {:.4}", pi1);
            }
            match TwoStateMarkovChain::estimate(&sim) {
                Ok(est) => println!("Estimated p01 = {:.4}, p10 = {:.4}", est.p01(), est.p10()),
                Err(e) => tracing::warn!("{}", e)
            }
            plot::plot_evol(&mut fig, &chain, &sim, alpha)?;
            save(&fig, &output_or(output, &cfg, "markov.svg"))
        },
        Command::Binomial { n, ntot, a, b, output } => {
            let prior = Beta::new(a, b)?;
            let grid = calc::linspace(0., 1., cfg.grid_points.max(2));
            let post = inference::binomial_inference(n, ntot, &prior, grid)?;
            println!("Marginal likelihood: {:.6}", post.mlike());
            println!("Posterior mean: {:.4} (conjugate Beta({}, {}) mean {:.4})", post.post_mean(), a + n as f64, b + (ntot - n) as f64, (a + n as f64) / (a + b + ntot as f64));
            println!("95% interval: [{:.4}, {:.4}]", post.quantile(0.025)?, post.quantile(0.975)?);
            plot::plot_inference(&mut fig, &post)?;
            save(&fig, &output_or(output, &cfg, "binomial.svg"))
        },
        Command::Conjugate { data, mu0, tau0, sigma, output } => {
            if data.is_empty() {
                bail!("At least one observation is required");
            }
            let prior = Normal::new(mu0, tau0)?;
            let closed = inference::normal_normal(&prior, &data, sigma)?;
            let (xbar, _) = calc::running::mean_variance_from_slice(&data, false);
            let half = 5. * tau0.max(sigma);
            let grid = calc::linspace(xbar.min(mu0) - half, xbar.max(mu0) + half, cfg.grid_points.max(2) * 10);
            let log_like = |mu : f64| -> Result<f64, ProbError> {
                let like = Normal::new(mu, sigma)?;
                let mut ll = 0.0;
                for d in data.iter() {
                    ll += like.log_pdf(*d)?;
                }
                Ok(ll)
            };

            // Likelihood relative to its peak at the sample mean, so that it does not underflow.
            let peak = log_like(xbar)?;
            let post = GridPosterior::new(grid, &prior, |mu : f64| Ok((log_like(mu)? - peak).exp()) )?;
            println!("Conjugate posterior: N({:.4}, {:.4})", closed.loc(), closed.scale());
            println!("Grid posterior mean: {:.4}, sd: {:.4}", post.post_mean(), post.var().unwrap_or(f64::NAN).sqrt());
            plot::plot_inference(&mut fig, &post)?;
            let grid = post.grid().clone();
            let exact = closed.pdf_over(&grid)?;
            fig.line(grid.as_slice(), exact.as_slice(), &Style::new(plot::GREEN).dash(Dash::Dashed).label("Conjugate"))?;
            save(&fig, &output_or(output, &cfg, "conjugate.svg"))
        }
    }
}
