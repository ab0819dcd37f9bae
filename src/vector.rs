use crate::error::{Error, Result};

/// Returns 2^x, or `None` when it does not fit in a `usize`.
pub fn pow2(x: u32) -> Option<usize> {
    1usize.checked_shl(x)
}

/// Integer log base 2, rounded down. `log2(12) == 3`, `log2(0) == 0`.
pub fn log2(n: usize) -> u32 {
    n.checked_ilog2().unwrap_or(0)
}

pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Keeps every `n`th sample of `x`, starting with the first.
///
/// Fails unless `len(x)` is an exact multiple of `n`.
pub fn down_sample(x: &[f64], n: usize) -> Result<Vec<f64>> {
    if n == 0 || x.len() % n != 0 {
        return Err(Error::InvalidFactor { len: x.len(), factor: n });
    }
    Ok(x.iter().step_by(n).copied().collect())
}

/// Down-samples every vector to the length of the shortest one.
pub fn down_sample_all(xs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let Some(shortest) = xs.iter().map(Vec::len).min() else {
        return Ok(Vec::new());
    };
    if shortest == 0 {
        return Err(Error::EmptyInput("shortest vector"));
    }
    xs.iter().map(|x| down_sample(x, x.len() / shortest)).collect()
}

/// Maps integer samples onto `[-1.0, 1.0]` by dividing by `i64::MAX`.
pub fn ints_to_floats(x: &[i64]) -> Vec<f64> {
    let scale = i64::MAX as f64;
    x.iter().map(|&e| e as f64 / scale).collect()
}

pub fn sum(x: &[f64]) -> f64 {
    x.iter().sum()
}

pub fn average(x: &[f64]) -> Option<f64> {
    if x.is_empty() {
        None
    } else {
        Some(sum(x) / x.len() as f64)
    }
}

pub fn abs(x: &[f64]) -> Vec<f64> {
    x.iter().map(|f| f.abs()).collect()
}

/// Returns `x / max(x)`. An empty input stays empty.
pub fn normalise(x: &[f64]) -> Vec<f64> {
    match find_max(x) {
        Some((max, _)) => x.iter().map(|f| f / max).collect(),
        None => Vec::new(),
    }
}

/// Subtracts the mean and clamps negative results to zero.
pub fn remove_avg(x: &[f64]) -> Vec<f64> {
    let Some(avg) = average(x) else {
        return Vec::new();
    };
    x.iter().map(|f| (f - avg).max(0.0)).collect()
}

pub fn sub(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch { left: x.len(), right: y.len() });
    }
    Ok(x.iter().zip(y).map(|(a, b)| a - b).collect())
}

/// Value and index of the first element equal to the maximum of `x`.
pub fn find_max(x: &[f64]) -> Option<(f64, usize)> {
    let (&first, rest) = x.split_first()?;
    let mut best = (first, 0);
    for (i, &v) in rest.iter().enumerate() {
        if v > best.0 {
            best = (v, i + 1);
        }
    }
    Some(best)
}

/// Interleaves equally long channels frame by frame.
pub fn multiplex(channels: &[Vec<f64>]) -> Result<Vec<f64>> {
    let Some(first) = channels.first() else {
        return Ok(Vec::new());
    };
    if let Some(other) = channels.iter().find(|c| c.len() != first.len()) {
        return Err(Error::LengthMismatch { left: first.len(), right: other.len() });
    }
    let mut buf = Vec::with_capacity(channels.len() * first.len());
    for i in 0..first.len() {
        buf.extend(channels.iter().map(|c| c[i]));
    }
    Ok(buf)
}

/// Cross-correlation of `x` with `y` for delays `0..max_delay`:
/// `corr[k] = sum(x[n] * y[n+k]) / len(x)`.
///
/// `y` must be at least as long as `x`.
pub fn xcorr(x: &[f64], y: &[f64], max_delay: usize) -> Result<Vec<f64>> {
    if x.is_empty() {
        return Err(Error::EmptyInput("cross-correlation input"));
    }
    if y.len() < x.len() {
        return Err(Error::LengthMismatch { left: x.len(), right: y.len() });
    }
    let n = x.len();
    let corr = (0..max_delay)
        .map(|k| {
            let mut c = 0.0;
            for i in 0..n.saturating_sub(k) {
                c += x[i] * y[i + k];
            }
            c / n as f64
        })
        .collect();
    Ok(corr)
}
