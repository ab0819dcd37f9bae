use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, ReadOnlySource};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

/// Decoded audio, one vector per channel.
#[derive(Debug, Clone)]
pub struct Audio {
    pub channels: Vec<Vec<f64>>,
    pub sample_rate: u32,
}

impl Audio {
    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }
}

/// Splits interleaved frames into `n` channel vectors.
pub fn deinterleave(interleaved: &[f64], n: usize, channels: &mut [Vec<f64>]) {
    for frame in interleaved.chunks_exact(n) {
        for (ch, &s) in channels.iter_mut().zip(frame) {
            ch.push(s);
        }
    }
}

pub fn load_audio<P: AsRef<Path>>(path: P) -> Result<Audio> {
    let path = path.as_ref();
    info!("Loading audio from {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    let mss = MediaSourceStream::new(Box::new(ReadOnlySource::new(BufReader::new(file))), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .context("Failed to probe audio format")?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No supported audio tracks found")?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let mut decoder = get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut channels: Vec<Vec<f64>> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::ResetRequired) => {
                debug!("Decoder reset required");
                continue;
            }
            Err(_) => break,
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let duration = decoded.capacity() as u64;
                if duration == 0 {
                    continue;
                }

                let n = spec.channels.count();
                if channels.is_empty() {
                    channels = vec![Vec::new(); n];
                }

                let mut sample_buf = SampleBuffer::<f64>::new(duration, spec);
                sample_buf.copy_interleaved_ref(decoded);
                deinterleave(sample_buf.samples(), n, &mut channels);
            }
            Err(symphonia::core::errors::Error::DecodeError(_)) => {
                debug!("Decode error encountered, skipping packet");
                continue;
            }
            Err(symphonia::core::errors::Error::ResetRequired) => {
                debug!("Decoder reset required during decode");
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!("Decode error: {}", e));
            }
        }
    }

    info!(
        "Loaded {} channels x {} samples at {}Hz",
        channels.len(),
        channels.first().map_or(0, Vec::len),
        sample_rate
    );
    Ok(Audio { channels, sample_rate })
}
