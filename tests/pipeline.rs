mod helpers;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ripple::args::{ClusterArgs, DwtArgs, PeaksArgs, SignalArgs, TransformArgs};
use ripple::cluster::Cluster;
use ripple::commands;
use ripple::config::RippleConfig;
use ripple::dwt::section::partition;
use ripple::dwt::DEFAULT_SECTION_MARGIN;
use ripple::{get_peaks, textio, vector, Transform};

#[test]
fn test_random_signals_reconstruct() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let len = rng.gen_range(0..20_000);
        let level = rng.gen_range(0..6);
        let x: Vec<f64> = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();

        let t = Transform::daubechies4(&x, level).unwrap();
        let covered: usize = t.sections().iter().map(|s| s.size).sum();
        assert!(covered <= len);
        assert!(t.sections().iter().all(|s| s.size.is_power_of_two()));
        assert_eq!(covered, t.tail().start);

        let y = t.reconstruct();
        for (a, b) in y.iter().zip(&x) {
            assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_partition_property() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let len = rng.gen_range(0..5_000_000);
        let level = rng.gen_range(0..10);
        let sections = partition(len, level, DEFAULT_SECTION_MARGIN);
        let total: usize = sections.iter().map(|s| s.size).sum();
        assert!(total <= len);
        assert!(len - total < DEFAULT_SECTION_MARGIN << level);
    }
}

#[test]
fn test_band_peaks_find_impulses() {
    let mut x = vec![0.0; 4096];
    x[1000] = 1.0;
    x[3000] = 0.5;

    let t = Transform::daubechies4(&x, 1).unwrap();
    let bands = t.down_sampled_coefficients().unwrap();
    assert_eq!(bands.len(), 1);
    assert_eq!(bands[0].len(), 2048);

    let band = vector::abs(&bands[0]);
    let pks = get_peaks(&band).unwrap();
    assert_eq!(pks.max(0.0), Some(500));
    assert_eq!(pks.indices(0.5), vec![500, 1500]);
    assert_eq!(pks.indices(0.0), vec![0, 500, 1500]);
    let (min, max) = pks.min_max_persistence();
    assert_eq!(min, 0.0);
    assert!((max - band[1500]).abs() < 1e-15);
}

#[test]
fn test_dwt_command_writes_bands_and_cache() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("x.txt");
    let x: Vec<f64> = (0..2048 + 300).map(|i| (i as f64 * 0.05).sin()).collect();
    textio::write_floats(&input, &x).unwrap();

    let prefix = dir.path().join("band").to_str().unwrap().to_string();
    let args = DwtArgs {
        signal: SignalArgs { input: input.clone(), channel: 0 },
        transform: TransformArgs { level: Some(2), section_margin: None, no_cache: false },
        downsample: true,
        out: Some(prefix.clone()),
    };
    let config = RippleConfig::default();

    let bands = commands::run_dwt(&args, &config).unwrap();
    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0].len(), 576);
    assert_eq!(bands[1].len(), 576);
    assert!(dir.path().join("x.txt.d4t").exists());
    assert_eq!(textio::load_floats(format!("{}_1.txt", prefix)).unwrap().len(), 576);

    let again = commands::run_dwt(&args, &config).unwrap();
    assert_eq!(again.len(), bands.len());
    for (a, b) in again.iter().zip(&bands) {
        assert_eq!(a.len(), b.len());
    }

    let other_level = DwtArgs {
        transform: TransformArgs { level: Some(3), section_margin: None, no_cache: true },
        downsample: false,
        out: None,
        ..args
    };
    assert_eq!(commands::run_dwt(&other_level, &config).unwrap().len(), 3);
}

#[test]
fn test_peaks_command_on_wav_channel() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("two.wav");
    let left = helpers::triangle(1000, 700, 0.8);
    let right = helpers::triangle(1000, 300, 0.5);
    helpers::write_wav(&input, &[left, right], 8000).unwrap();

    let args = PeaksArgs {
        signal: SignalArgs { input: input.clone(), channel: 1 },
        max: true,
        ..Default::default()
    };
    let config = RippleConfig::default();
    assert_eq!(commands::run_peaks(&args, &config).unwrap(), vec![300]);

    let missing = PeaksArgs {
        signal: SignalArgs { input, channel: 2 },
        ..Default::default()
    };
    assert!(commands::run_peaks(&missing, &config).is_err());
}

#[test]
fn test_peaks_command_window_and_band() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("y.txt");
    let x = [1.0, 3.0, 2.0, 5.0, 2.0, 4.0, 1.0];
    textio::write_floats(&input, &x).unwrap();
    let config = RippleConfig::default();

    let persistence = PeaksArgs {
        signal: SignalArgs { input: input.clone(), channel: 0 },
        fraction: Some(0.6),
        out: Some(dir.path().join("pk.txt")),
        ..Default::default()
    };
    assert_eq!(commands::run_peaks(&persistence, &config).unwrap(), vec![3, 5]);
    assert_eq!(textio::load_ints(dir.path().join("pk.txt")).unwrap(), vec![3, 5]);

    let windowed = PeaksArgs {
        signal: SignalArgs { input: input.clone(), channel: 0 },
        separation: Some(2),
        ..Default::default()
    };
    assert_eq!(commands::run_peaks(&windowed, &config).unwrap(), vec![1, 3]);

    let tiny_band = PeaksArgs {
        signal: SignalArgs { input, channel: 0 },
        band: Some(1),
        transform: TransformArgs { level: Some(1), section_margin: Some(1), no_cache: true },
        ..Default::default()
    };
    assert!(commands::run_peaks(&tiny_band, &config).is_ok());
}

#[test]
fn test_cache_is_kept_per_channel() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("two.wav");
    let left = helpers::triangle(1024, 700, 0.8);
    let right = helpers::triangle(1024, 300, 0.5);
    helpers::write_wav(&input, &[left, right], 8000).unwrap();
    let config = RippleConfig::default();

    let dwt = |channel, no_cache| DwtArgs {
        signal: SignalArgs { input: input.clone(), channel },
        transform: TransformArgs { level: Some(1), section_margin: Some(1), no_cache },
        ..Default::default()
    };
    let ch0 = commands::run_dwt(&dwt(0, false), &config).unwrap();
    let ch1 = commands::run_dwt(&dwt(1, false), &config).unwrap();
    let ch1_fresh = commands::run_dwt(&dwt(1, true), &config).unwrap();
    assert_ne!(ch0, ch1);
    assert_eq!(ch1, ch1_fresh);
    assert!(dir.path().join("two.wav.0.d4t").exists());
    assert!(dir.path().join("two.wav.1.d4t").exists());

    let peaks = |channel, no_cache| PeaksArgs {
        signal: SignalArgs { input: input.clone(), channel },
        transform: TransformArgs { level: Some(1), section_margin: Some(1), no_cache },
        band: Some(1),
        abs: true,
        max: true,
        ..Default::default()
    };
    let p0 = commands::run_peaks(&peaks(0, false), &config).unwrap();
    let p1 = commands::run_peaks(&peaks(1, false), &config).unwrap();
    assert_eq!(p0, commands::run_peaks(&peaks(0, true), &config).unwrap());
    assert_eq!(p1, commands::run_peaks(&peaks(1, true), &config).unwrap());
}

#[test]
fn test_cluster_command_on_peak_histogram() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hist.txt");
    textio::write_ints(&input, &[0, 2, 3, 1, 0, 0, 0, 0, 1, 0, 0, 4, 0, 6, 0]).unwrap();

    let args = ClusterArgs {
        input,
        eps: 2,
        min_pts: 2,
        out: Some(dir.path().join("clusters.txt")),
    };
    let clusters = commands::run_cluster(&args).unwrap();
    assert_eq!(clusters, vec![Cluster { min: 1, max: 3 }, Cluster { min: 11, max: 13 }]);
    let written = std::fs::read_to_string(dir.path().join("clusters.txt")).unwrap();
    assert_eq!(written, "0, 1 3\n1, 11 13\n");
}

#[test]
fn test_peaks_command_smooths_before_search() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("z.txt");
    let x = [0.0, 2.0, 1.0, 3.0, 2.0, 4.0, 3.0, 2.0, 1.0, 0.0];
    textio::write_floats(&input, &x).unwrap();
    let config = RippleConfig::default();

    let raw = PeaksArgs {
        signal: SignalArgs { input: input.clone(), channel: 0 },
        fraction: Some(0.0),
        ..Default::default()
    };
    assert_eq!(commands::run_peaks(&raw, &config).unwrap(), vec![1, 3, 5]);

    let smoothed = PeaksArgs { smooth: Some(1), ..raw };
    assert_eq!(commands::run_peaks(&smoothed, &config).unwrap(), vec![6]);
}
