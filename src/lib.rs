//! Signal-processing toolkit: a sectioned Daubechies-4 lifting wavelet
//! transform and persistent-homology peak detection, plus histogram
//! clustering and the vector, filter and I/O helpers the `ripple` binary builds on.

pub mod args;
pub mod audio;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod dwt;
pub mod error;
pub mod filter;
pub mod peaks;
pub mod textio;
pub mod vector;

pub use dwt::{Section, Transform};
pub use error::{Error, Result};
pub use peaks::{get_peaks, Peak, Peaks};
