use crate::prob::*;
use crate::calc::running;

/// Normal-normal conjugate update: given a normal prior N(mu0, tau0) for the mean of
/// normally distributed data with known standard deviation sigma, the posterior for the
/// mean is normal, with precision 1/tau0^2 + n/sigma^2 and mean
/// (mu0/tau0^2 + sum(x)/sigma^2) / precision. Precisions add, and the posterior mean is
/// the precision-weighted average of the prior mean and the sample mean.
/// Without data, the prior is returned unchanged.
pub fn normal_normal(prior : &Normal, data : &[f64], sigma : f64) -> Result<Normal, ProbError> {
    let sigma = check_positive("sigma", sigma)?;
    if data.is_empty() {
        return Ok(prior.clone());
    }
    let (xbar, _, n) = running::single_pass_sum_sum_sq(data.iter());
    let prior_prec = 1. / prior.scale().powf(2.);
    let data_prec = n as f64 / sigma.powf(2.);
    let prec = prior_prec + data_prec;
    let mean = (prior.loc() * prior_prec + xbar * data_prec) / prec;
    tracing::debug!(n, mean, sd = prec.sqrt().recip(), "normal-normal update");
    Normal::new(mean, prec.sqrt().recip())
}
