//! Sectioned discrete wavelet transform.
//!
//! The input is cut into power-of-two sections (see [`section::partition`])
//! and each section is decomposed independently with the Daubechies-4 lifting
//! scheme, so signals of any length can be transformed without padding.

pub mod lifting;
pub mod section;

use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{Error, Result};
use crate::vector::down_sample;
pub use section::{Section, DEFAULT_SECTION_MARGIN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    st: Vec<f64>,
    level: usize,
    margin: usize,
    sections: Vec<Section>,
}

impl Transform {
    /// Daubechies-4 transform of `s` to `level` with the default section margin.
    ///
    /// A section needs at least `64 * 2^level` samples, so short inputs are
    /// left untransformed and their bands come back empty: eight samples at
    /// level 1 give one empty band. Use [`Transform::daubechies4_with_margin`]
    /// with a margin of 1 to transform such inputs.
    pub fn daubechies4(s: &[f64], level: i32) -> Result<Self> {
        Self::daubechies4_with_margin(s, level, DEFAULT_SECTION_MARGIN)
    }

    /// Like [`Transform::daubechies4`], but a section must hold at least
    /// `margin * 2^level` samples instead of `64 * 2^level`.
    pub fn daubechies4_with_margin(s: &[f64], level: i32, margin: usize) -> Result<Self> {
        if level < 0 {
            return Err(Error::NegativeLevel(level));
        }
        if margin == 0 {
            return Err(Error::InvalidSectionMargin(margin));
        }
        if section::min_section_size(level as usize, margin).is_none() {
            return Err(Error::LevelTooDeep { level, margin });
        }
        let level = level as usize;
        let sections = section::partition(s.len(), level, margin);
        let mut st = s.to_vec();

        for sec in &sections {
            let window = &mut st[sec.range()];
            let mut max = window.len();
            for _ in 0..level {
                lifting::split(&mut window[..max]);
                lifting::forward(&mut window[..max]);
                max /= 2;
            }
        }

        let t = Self { st, level, margin, sections };
        debug!(
            "D4 transform: {} samples, level {}, {} sections, tail {}",
            s.len(),
            level,
            t.sections.len(),
            t.tail().len()
        );
        Ok(t)
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Samples at the end of the input that did not fill a section and were
    /// left as they are.
    pub fn tail(&self) -> Range<usize> {
        let start = self.sections.last().map_or(0, Section::end);
        start..self.st.len()
    }

    /// Detail coefficients per level, finest first. Band `l - 1` holds level
    /// `l` of every section, concatenated in section order.
    pub fn coefficients(&self) -> Vec<Vec<f64>> {
        (1..=self.level)
            .map(|l| {
                self.sections
                    .iter()
                    .flat_map(|sec| {
                        let band = sec.band(l);
                        &self.st[sec.start + band.start..sec.start + band.end]
                    })
                    .copied()
                    .collect()
            })
            .collect()
    }

    /// [`Transform::coefficients`] with every band decimated to the length of
    /// the deepest one.
    pub fn down_sampled_coefficients(&self) -> Result<Vec<Vec<f64>>> {
        let mut cfs = self.coefficients();
        let Some(min_n) = cfs.last().map(Vec::len) else {
            return Ok(cfs);
        };
        if min_n == 0 {
            return Ok(cfs);
        }
        let deepest = cfs.len() - 1;
        for cf in &mut cfs[..deepest] {
            *cf = down_sample(cf, cf.len() / min_n)?;
        }
        Ok(cfs)
    }

    /// The working buffer: transformed sections followed by the raw tail.
    pub fn decomposition(&self) -> &[f64] {
        &self.st
    }

    /// Inverts the transform and returns the original samples.
    pub fn reconstruct(&self) -> Vec<f64> {
        let mut out = self.st.clone();
        for sec in &self.sections {
            let window = &mut out[sec.range()];
            for l in (0..self.level).rev() {
                let max = window.len() >> l;
                lifting::inverse(&mut window[..max]);
                lifting::merge(&mut window[..max]);
            }
        }
        out
    }
}
