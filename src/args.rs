use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sectioned Daubechies-4 wavelet transform and persistent-homology peak detection.")]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// KDL config file; defaults to the per-user config if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decompose a signal and write one text file per coefficient band.
    Dwt(DwtArgs),
    /// Find significant peaks in a signal or in one of its wavelet bands.
    Peaks(PeaksArgs),
    /// Cluster the occupied bins of a histogram with DBSCAN.
    Cluster(ClusterArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Args, Clone, Default)]
pub struct SignalArgs {
    /// `.txt` vector (one value per line) or any audio file.
    pub input: PathBuf,
    /// Audio channel to analyse.
    #[arg(long, default_value_t = 0)]
    pub channel: usize,
}

#[derive(Args, Clone, Default)]
pub struct TransformArgs {
    #[arg(short, long)]
    pub level: Option<i32>,
    #[arg(long)]
    pub section_margin: Option<usize>,
    /// Ignore and do not write the `.d4t` transform cache.
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args, Clone, Default)]
pub struct DwtArgs {
    #[command(flatten)]
    pub signal: SignalArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    /// Decimate every band to the length of the deepest one.
    #[arg(long)]
    pub downsample: bool,
    /// Output prefix; bands go to `<out>_<i>.txt`.
    #[arg(short, long)]
    pub out: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct PeaksArgs {
    #[command(flatten)]
    pub signal: SignalArgs,
    #[command(flatten)]
    pub transform: TransformArgs,
    /// Minimum persistence as a fraction of the largest finite persistence.
    #[arg(short, long)]
    pub fraction: Option<f64>,
    /// Search the 1-based down-sampled coefficient band instead of the signal.
    #[arg(short, long)]
    pub band: Option<usize>,
    /// Use the sliding-window finder with this half-width instead.
    #[arg(short, long)]
    pub separation: Option<usize>,
    /// Take absolute values before searching.
    #[arg(long)]
    pub abs: bool,
    /// Centred moving-average half-width applied before searching.
    #[arg(long)]
    pub smooth: Option<usize>,
    /// One-pole smoothing factor applied before searching.
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Zero-phase low-pass cutoff in Hz (audio input only).
    #[arg(long)]
    pub cutoff: Option<f64>,
    /// Print only the highest qualifying peak.
    #[arg(long)]
    pub max: bool,
    /// Also write the indices to this file.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct ClusterArgs {
    /// Histogram as a `.txt` vector of counts, one bin per line.
    pub input: PathBuf,
    /// Neighbourhood radius in bins.
    #[arg(short, long, default_value_t = 1)]
    pub eps: usize,
    /// Occupied bins a neighbourhood needs to start a cluster.
    #[arg(short, long, default_value_t = 2)]
    pub min_pts: usize,
    /// Also write the clusters to this file.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
