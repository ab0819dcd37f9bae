use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::vector::{log2, pow2};

/// Default multiplier in the rule `remaining >= margin * 2^level`.
pub const DEFAULT_SECTION_MARGIN: usize = 64;

/// A contiguous power-of-two run of the input that is transformed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub start: usize,
    pub size: usize,
}

impl Section {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.size
    }

    pub fn end(&self) -> usize {
        self.start + self.size
    }

    /// Detail band of decomposition level `l` (1 = finest) relative to the
    /// start of the section.
    pub fn band(&self, l: usize) -> Range<usize> {
        let hi = self.size >> (l - 1);
        (hi / 2)..hi
    }
}

/// `margin * 2^level`, or `None` when that does not fit in a `usize`.
pub fn min_section_size(level: usize, margin: usize) -> Option<usize> {
    u32::try_from(level)
        .ok()
        .and_then(pow2)
        .and_then(|p| p.checked_mul(margin))
}

/// Greedily cuts `len` samples into the largest power-of-two sections that are
/// at least `margin * 2^level` long. Whatever is left is an untransformed tail.
pub fn partition(len: usize, level: usize, margin: usize) -> Vec<Section> {
    let Some(min_size) = min_section_size(level, margin) else {
        return Vec::new();
    };

    let mut sections = Vec::new();
    let mut start = 0;
    while len - start >= min_size.max(1) {
        let remaining = len - start;
        // log2 of a nonzero usize always fits the shift
        let size = 1usize << log2(remaining);
        sections.push(Section { start, size });
        start += size;
    }
    sections
}
