use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::args::{ClusterArgs, DwtArgs, PeaksArgs, SignalArgs, TransformArgs};
use crate::audio;
use crate::cluster::{self, Cluster};
use crate::config::RippleConfig;
use crate::dwt::Transform;
use crate::filter;
use crate::peaks::{self, window};
use crate::textio;
use crate::vector;

const CACHE_EXT: &str = "d4t";

/// A loaded input signal and, for audio, its sample rate.
pub struct Signal {
    pub samples: Vec<f64>,
    pub sample_rate: Option<u32>,
}

fn is_text(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

pub fn load_signal(args: &SignalArgs) -> Result<Signal> {
    if is_text(&args.input) {
        let samples = textio::load_floats(&args.input)
            .with_context(|| format!("Failed to load vector from {}", args.input.display()))?;
        return Ok(Signal { samples, sample_rate: None });
    }

    let audio = audio::load_audio(&args.input)
        .with_context(|| format!("Failed to load audio from {}", args.input.display()))?;
    let samples = audio
        .channel(args.channel)
        .with_context(|| format!("Channel {} not present ({} channels)", args.channel, audio.channels.len()))?
        .to_vec();
    Ok(Signal { samples, sample_rate: Some(audio.sample_rate) })
}

/// Cached transform of one channel, keyed by a checksum of its samples.
#[derive(Serialize, Deserialize)]
struct CachedTransform {
    checksum: u64,
    transform: Transform,
}

/// `<file>.d4t` for text vectors, `<file>.<channel>.d4t` for audio.
fn cache_path(signal: &SignalArgs) -> PathBuf {
    let source = &signal.input;
    let mut name = source.file_name().unwrap_or_default().to_os_string();
    if !is_text(source) {
        name.push(format!(".{}", signal.channel));
    }
    name.push(".");
    name.push(CACHE_EXT);
    source.with_file_name(name)
}

fn checksum(samples: &[f64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    samples.len().hash(&mut hasher);
    for s in samples {
        s.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

fn read_cache(path: &Path) -> Result<CachedTransform> {
    let buf = fs::read(path)?;
    Ok(bincode::deserialize::<CachedTransform>(&buf)?)
}

/// Builds the transform of `samples`, reusing the `.d4t` cache next to the
/// input when it was built from the same samples with the same level and
/// margin.
pub fn transform(
    signal: &SignalArgs,
    samples: &[f64],
    args: &TransformArgs,
    config: &RippleConfig,
) -> Result<Transform> {
    let defaults = config.dwt();
    let level = args.level.unwrap_or(defaults.level);
    let margin = args.section_margin.unwrap_or(defaults.section_margin);
    let cache = cache_path(signal);
    let sum = checksum(samples);

    if !args.no_cache && cache.exists() {
        match read_cache(&cache) {
            Ok(c) if c.checksum == sum
                && i32::try_from(c.transform.level()) == Ok(level)
                && c.transform.margin() == margin
                && c.transform.decomposition().len() == samples.len() =>
            {
                info!("Loading transform from {}", cache.display());
                return Ok(c.transform);
            }
            Ok(_) => debug!("Cached transform in {} does not match, rebuilding", cache.display()),
            Err(e) => warn!("Ignoring unreadable cache {}: {}", cache.display(), e),
        }
    }

    info!("Running D4 transform: level={}, section margin={}", level, margin);
    let t = Transform::daubechies4_with_margin(samples, level, margin)?;

    if !args.no_cache {
        let cached = CachedTransform { checksum: sum, transform: t };
        let bin = bincode::serialize(&cached)?;
        fs::write(&cache, bin).with_context(|| format!("Failed to write cache {}", cache.display()))?;
        return Ok(cached.transform);
    }
    Ok(t)
}

pub fn run_dwt(args: &DwtArgs, config: &RippleConfig) -> Result<Vec<Vec<f64>>> {
    let signal = load_signal(&args.signal)?;
    let t = transform(&args.signal, &signal.samples, &args.transform, config)?;

    let bands = if args.downsample || config.dwt().downsample {
        t.down_sampled_coefficients()?
    } else {
        t.coefficients()
    };

    if let Some(prefix) = &args.out {
        textio::write_all_floats(prefix, &bands)
            .with_context(|| format!("Failed to write bands to {}_*.txt", prefix))?;
    }
    Ok(bands)
}

pub fn run_peaks(args: &PeaksArgs, config: &RippleConfig) -> Result<Vec<usize>> {
    let settings = config.peaks();
    let filtering = config.filter();
    let signal = load_signal(&args.signal)?;
    let mut seq = signal.samples;

    let cutoff = args.cutoff.unwrap_or(filtering.cutoff);
    if cutoff > 0.0 {
        match signal.sample_rate {
            Some(fs) => seq = filter::lowpass(&seq, fs as f64, cutoff)?,
            None => warn!("Ignoring low-pass cutoff: {} has no sample rate", args.signal.input.display()),
        }
    }

    if let Some(band) = args.band {
        let t = transform(&args.signal, &seq, &args.transform, config)?;
        let mut bands = t.down_sampled_coefficients()?;
        if band == 0 || band > bands.len() {
            bail!("Band {} out of range 1..={}", band, bands.len());
        }
        seq = bands.swap_remove(band - 1);
    }

    if args.abs {
        seq = vector::abs(&seq);
    }
    if let Some(w) = args.smooth {
        seq = filter::mov_avg(&seq, w);
    }
    let alpha = args.alpha.unwrap_or(filtering.alpha);
    if alpha > 0.0 {
        seq = filter::exponential(&seq, alpha);
    }

    let separation = args.separation.unwrap_or(settings.separation);
    let fraction = args.fraction.unwrap_or(settings.fraction);

    let indices = if separation > 0 {
        let found = window::find(&seq, separation);
        if args.max {
            found
                .into_iter()
                .reduce(|b, i| if seq[i] > seq[b] { i } else { b })
                .into_iter()
                .collect()
        } else {
            found
        }
    } else {
        let pks = peaks::get_peaks(&seq)?;
        let (min, max) = pks.min_max_persistence();
        debug!("{} peaks, persistence min={} max={}", pks.len(), min, max);
        if args.max {
            pks.max(fraction).into_iter().collect()
        } else {
            pks.indices(fraction)
        }
    };

    info!("{} peaks at fraction {}", indices.len(), fraction);
    if let Some(out) = &args.out {
        textio::write_ints(out, &indices)
            .with_context(|| format!("Failed to write peaks to {}", out.display()))?;
    }
    Ok(indices)
}

pub fn run_cluster(args: &ClusterArgs) -> Result<Vec<Cluster>> {
    let h = textio::load_ints(&args.input)
        .with_context(|| format!("Failed to load histogram from {}", args.input.display()))?;
    let clusters = cluster::histogram(&h, args.eps, args.min_pts);
    info!("{} clusters in {} bins", clusters.len(), h.len());
    if let Some(out) = &args.out {
        cluster::write_clusters(out, &clusters)
            .with_context(|| format!("Failed to write clusters to {}", out.display()))?;
    }
    Ok(clusters)
}

pub fn describe_config(config: &RippleConfig, path: Option<&Path>) -> String {
    let source = match path {
        Some(p) => p.display().to_string(),
        None => crate::config::default_path()
            .filter(|p| p.exists())
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
    };
    let dwt = config.dwt();
    let peaks = config.peaks();
    let filter = config.filter();
    format!(
        "source: {}\ndwt level={} section-margin={} downsample={}\npeaks fraction={} separation={}\nfilter alpha={} cutoff={}",
        source,
        dwt.level,
        dwt.section_margin,
        dwt.downsample,
        peaks.fraction,
        peaks.separation,
        filter.alpha,
        filter.cutoff
    )
}
