use crate::inference::GridPosterior;
use super::*;

/// Draws the prior, the likelihood and the posterior tabulated by a grid posterior,
/// plus a marker at the posterior mean. The likelihood is not a density over the
/// parameter, so it is rescaled to share the posterior peak.
pub fn plot_inference<C>(canvas : &mut C, post : &GridPosterior) -> Result<(), PlotError>
where
    C : Canvas + ?Sized
{
    let grid = post.grid().as_slice();
    let peak = post.posterior().max();
    let like_peak = post.likelihood().max();
    canvas.line(grid, post.prior().as_slice(), &Style::new(BLUE).width(2).label("Prior"))?;
    if like_peak > 0.0 {
        let like = post.likelihood().scale(peak / like_peak);
        canvas.line(grid, like.as_slice(), &Style::new(RED).alpha(0.5).width(2).label("Likelihood (scaled)"))?;
    }
    canvas.line(grid, post.posterior().as_slice(), &Style::new(BLACK).alpha(0.7).width(2).label("Posterior"))?;
    let m = post.post_mean();
    canvas.line(&[m, m], &[0., peak], &Style::new(GRAY).dash(Dash::Dotted))?;
    canvas.set_labels("parameter", "density");
    Ok(())
}
