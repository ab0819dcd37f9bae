//! In-place Daubechies-4 lifting steps (after Ripples in Mathematics, 3.4).
//!
//! Every function works on one window `s` of even length; the approximation
//! half ends up in `s[..n/2]` and the detail half in `s[n/2..]`.

use std::f64::consts::SQRT_2;

const SQRT_3: f64 = 1.732_050_807_568_877_2;
const PREDICT_0: f64 = SQRT_3 / 4.0;
const PREDICT_1: f64 = (SQRT_3 - 2.0) / 4.0;
const NORM_LO: f64 = (SQRT_3 - 1.0) / SQRT_2;
const NORM_HI: f64 = (SQRT_3 + 1.0) / SQRT_2;

/// Moves even-indexed samples to the front half and odd-indexed samples to the
/// back half, keeping their order.
pub fn split(s: &mut [f64]) {
    let half = s.len() / 2;
    let odd: Vec<f64> = s.iter().skip(1).step_by(2).copied().collect();
    for i in 1..half {
        s[i] = s[2 * i];
    }
    s[half..half + odd.len()].copy_from_slice(&odd);
}

/// Inverse of [`split`].
pub fn merge(s: &mut [f64]) {
    let half = s.len() / 2;
    let even = s[..half].to_vec();
    let odd = s[half..].to_vec();
    for (i, (e, o)) in even.into_iter().zip(odd).enumerate() {
        s[2 * i] = e;
        s[2 * i + 1] = o;
    }
}

pub fn forward(s: &mut [f64]) {
    let half = s.len() / 2;
    if half == 0 {
        return;
    }
    let (lo, hi) = s.split_at_mut(half);

    // update 1
    for (l, h) in lo.iter_mut().zip(hi.iter()) {
        *l += SQRT_3 * *h;
    }

    // predict
    hi[0] = hi[0] - PREDICT_0 * lo[0] - PREDICT_1 * lo[half - 1];
    for n in 1..half {
        hi[n] = hi[n] - PREDICT_0 * lo[n] - PREDICT_1 * lo[n - 1];
    }

    // update 2
    for n in 0..half - 1 {
        lo[n] -= hi[n + 1];
    }
    lo[half - 1] -= hi[0];

    lo.iter_mut().for_each(|x| *x *= NORM_LO);
    hi.iter_mut().for_each(|x| *x *= NORM_HI);
}

/// Undoes [`forward`], step by step in reverse order.
pub fn inverse(s: &mut [f64]) {
    let half = s.len() / 2;
    if half == 0 {
        return;
    }
    let (lo, hi) = s.split_at_mut(half);

    lo.iter_mut().for_each(|x| *x /= NORM_LO);
    hi.iter_mut().for_each(|x| *x /= NORM_HI);

    for n in 0..half - 1 {
        lo[n] += hi[n + 1];
    }
    lo[half - 1] += hi[0];

    hi[0] = hi[0] + PREDICT_0 * lo[0] + PREDICT_1 * lo[half - 1];
    for n in 1..half {
        hi[n] = hi[n] + PREDICT_0 * lo[n] + PREDICT_1 * lo[n - 1];
    }

    for (l, h) in lo.iter_mut().zip(hi.iter()) {
        *l -= SQRT_3 * *h;
    }
}
