/// Univariate distribution interface and the concrete distributions used throughout
/// the course (normal, beta, binomial, Cauchy, flat priors and empirical samples),
/// plus the bivariate normal and joint-from-conditional helpers.
pub mod prob;

/// Grids, trapezoidal quadrature and single-pass sample summaries.
pub mod calc;

/// Posterior evaluation over a one-dimensional parameter grid, and the closed-form
/// conjugate update for a normal mean with known scale.
pub mod inference;

/// Discrete-time, two-state Markov chain simulation.
pub mod markov;

/// Drawing surfaces (a recording figure rendered to SVG) and the plotting
/// routines that consume the distribution helpers.
pub mod plot;

/// JSON configuration read by the command-line front-end.
pub mod config;
