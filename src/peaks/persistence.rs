//! Peak detection by persistent homology.
//!
//! A horizontal line is lowered across the signal. Each sample it reaches
//! either starts a new peak, extends the peak next to it, or joins two peaks,
//! in which case the peak with the lower birth value dies at that sample.
//! A peak's persistence is its birth value minus its death value.

use log::debug;
use std::borrow::Cow;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::vector::ints_to_floats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    born: usize,
    died: Option<usize>,
    left: usize,
    right: usize,
}

impl Peak {
    fn new(idx: usize) -> Self {
        Self { born: idx, died: None, left: idx, right: idx }
    }

    /// Index of the local maximum that started this peak.
    pub fn born(&self) -> usize {
        self.born
    }

    /// Saddle index where a higher peak absorbed this one, `None` if it
    /// survived the whole sweep.
    pub fn died(&self) -> Option<usize> {
        self.died
    }

    /// Inclusive span of samples owned by the peak when the sweep ended or
    /// the peak died.
    pub fn span(&self) -> RangeInclusive<usize> {
        self.left..=self.right
    }

    pub fn persistence(&self, seq: &[f64]) -> f64 {
        match self.died {
            Some(died) => seq[self.born] - seq[died],
            None => f64::INFINITY,
        }
    }
}

/// Peaks of a sequence in increasing order of `born`, together with the
/// sequence they were found in.
#[derive(Debug, Clone)]
pub struct Peaks<'a> {
    peaks: Vec<Peak>,
    seq: Cow<'a, [f64]>,
}

/// Runs the descending sweep over `seq`.
///
/// Samples of equal value are visited in index order. When two peaks meet and
/// their birth values are equal, the left one dies.
pub fn get_peaks(seq: &[f64]) -> Result<Peaks<'_>> {
    let peaks = sweep(seq)?;
    Ok(Peaks { peaks, seq: Cow::Borrowed(seq) })
}

/// Converts `seq` with [`ints_to_floats`] and runs [`get_peaks`]. The
/// returned [`Peaks`] owns the converted samples.
pub fn get_peaks_int(seq: &[i64]) -> Result<Peaks<'static>> {
    let floats = ints_to_floats(seq);
    let peaks = sweep(&floats)?;
    Ok(Peaks { peaks, seq: Cow::Owned(floats) })
}

fn sweep(seq: &[f64]) -> Result<Vec<Peak>> {
    if let Some(index) = seq.iter().position(|v| v.is_nan()) {
        return Err(Error::NanInSequence { index });
    }

    let mut peaks: Vec<Peak> = Vec::new();
    let mut idx_to_peak: Vec<Option<usize>> = vec![None; seq.len()];

    let mut order: Vec<usize> = (0..seq.len()).collect();
    // adding 0.0 turns -0.0 into 0.0 so signed zeros tie
    order.sort_by(|&a, &b| (seq[b] + 0.0).total_cmp(&(seq[a] + 0.0)));

    for idx in order {
        let il = if idx > 0 { idx_to_peak[idx - 1] } else { None };
        let ir = idx_to_peak.get(idx + 1).copied().flatten();

        match (il, ir) {
            (None, None) => {
                peaks.push(Peak::new(idx));
                idx_to_peak[idx] = Some(peaks.len() - 1);
            }
            (Some(il), None) => {
                peaks[il].right += 1;
                idx_to_peak[idx] = Some(il);
            }
            (None, Some(ir)) => {
                peaks[ir].left -= 1;
                idx_to_peak[idx] = Some(ir);
            }
            (Some(il), Some(ir)) => {
                if seq[peaks[il].born] > seq[peaks[ir].born] {
                    peaks[ir].died = Some(idx);
                    peaks[il].right = peaks[ir].right;
                    idx_to_peak[peaks[il].right] = Some(il);
                    idx_to_peak[idx] = Some(il);
                } else {
                    peaks[il].died = Some(idx);
                    peaks[ir].left = peaks[il].left;
                    idx_to_peak[peaks[ir].left] = Some(ir);
                    idx_to_peak[idx] = Some(ir);
                }
            }
        }
    }

    peaks.sort_by_key(|p| p.born);
    debug!("persistence sweep: {} samples, {} peaks", seq.len(), peaks.len());
    Ok(peaks)
}

impl<'a> Peaks<'a> {
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn sequence(&self) -> &[f64] {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Persistence of every peak, in peak order.
    pub fn persistences(&self) -> Vec<f64> {
        self.peaks.iter().map(|p| p.persistence(&self.seq)).collect()
    }

    /// Born indices of the peaks whose persistence is at least
    /// `frac_of_max_persistence` times the largest finite persistence.
    /// Peaks that never died always qualify.
    pub fn indices(&self, frac_of_max_persistence: f64) -> Vec<usize> {
        let (_, max) = self.min_max_persistence();
        self.peaks
            .iter()
            .filter(|pk| {
                let prs = pk.persistence(&self.seq);
                if prs.is_infinite() {
                    return true;
                }
                // equal to the max counts as 1.0 even when the max is zero
                let ratio = if prs == max { 1.0 } else { prs / max };
                ratio >= frac_of_max_persistence
            })
            .map(|pk| pk.born)
            .collect()
    }

    /// The qualifying index (see [`Peaks::indices`]) with the highest value.
    /// Ties go to the lower index.
    pub fn max(&self, frac_of_max_persistence: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for idx in self.indices(frac_of_max_persistence) {
            if best.map_or(true, |b| self.seq[idx] > self.seq[b]) {
                best = Some(idx);
            }
        }
        best
    }

    /// Smallest persistence (possibly infinite) and largest finite
    /// persistence. An empty set gives `(inf, -inf)`.
    pub fn min_max_persistence(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for prs in self.persistences() {
            if prs > max && prs.is_finite() {
                max = prs;
            }
            if prs < min {
                min = prs;
            }
        }
        (min, max)
    }
}
