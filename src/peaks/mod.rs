//! Maxima detection on 1-D sequences.

pub mod persistence;
pub mod window;

pub use persistence::{get_peaks, get_peaks_int, Peak, Peaks};
