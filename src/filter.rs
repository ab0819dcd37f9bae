use anyhow::{anyhow, Result};
use biquad::{Biquad, Coefficients, DirectForm1, ToHertz, Type, Q_BUTTERWORTH_F64};

use crate::vector::sum;

/// Runs `filter` over `signal` forwards and then backwards, cancelling its
/// phase shift.
pub fn forward_backward_filter<F: Biquad<f64>>(signal: &mut [f64], filter: &mut F) {
    signal.iter_mut().for_each(|x| *x = filter.run(*x));
    filter.reset_state();
    signal.reverse();
    signal.iter_mut().for_each(|x| *x = filter.run(*x));
    filter.reset_state();
    signal.reverse();
}

pub fn make_coefficients(f_type: Type<f64>, fs: f64, freq: f64, q: f64) -> Result<Coefficients<f64>> {
    Coefficients::<f64>::from_params(f_type, fs.hz(), freq.hz(), q)
        .map_err(|_| anyhow!("Failed to create filter coefficients for {}Hz at {}Hz", freq, fs))
}

/// Zero-phase Butterworth low-pass at `cutoff` Hz.
pub fn lowpass(signal: &[f64], sample_rate: f64, cutoff: f64) -> Result<Vec<f64>> {
    let coeffs = make_coefficients(Type::LowPass, sample_rate, cutoff, Q_BUTTERWORTH_F64)?;
    let mut lpf = DirectForm1::<f64>::new(coeffs);
    let mut out = signal.to_vec();
    forward_backward_filter(&mut out, &mut lpf);
    Ok(out)
}

/// One-pole smoother: `y[0] = alpha*x[0]`, `y[i] = y[i-1] + alpha*(x[i]-y[i-1])`.
pub fn exponential(x: &[f64], alpha: f64) -> Vec<f64> {
    let mut y = Vec::with_capacity(x.len());
    let mut prev = 0.0;
    for &v in x {
        prev += alpha * (v - prev);
        y.push(prev);
    }
    y
}

/// Centred moving average, `y[i] = sum(x[i-w..i+w]) / 2w`. The first and last
/// `w` outputs are zero; `w == 0` returns `x` unchanged.
pub fn mov_avg(x: &[f64], w: usize) -> Vec<f64> {
    if w == 0 {
        return x.to_vec();
    }
    let mut y = vec![0.0; x.len()];
    for i in w..x.len().saturating_sub(w) {
        y[i] = sum(&x[i - w..i + w]) / (2 * w) as f64;
    }
    y
}

/// In-place running version of [`mov_avg`]. The first `w` samples are zeroed
/// and each window reads the already smoothed samples to its left. The last
/// `w` samples are left as they are.
pub fn smooth(x: &mut [f64], w: usize) {
    if w == 0 {
        return;
    }
    let head = w.min(x.len());
    x[..head].fill(0.0);
    for i in w..x.len().saturating_sub(w) {
        x[i] = sum(&x[i - w..i + w]) / (2 * w) as f64;
    }
}
