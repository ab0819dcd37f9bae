//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes interleaved 16-bit PCM.
pub fn write_wav(path: &Path, channels: &[Vec<f64>], sample_rate: u32) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    let num_channels = channels.len() as u16;
    let frames = channels.first().map_or(0, Vec::len);
    let bits_per_sample = 16u16;
    let block_align = num_channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (frames * block_align as usize) as u32;

    file.write_all(b"RIFF")?;
    file.write_all(&(36 + data_size).to_le_bytes())?;
    file.write_all(b"WAVE")?;

    file.write_all(b"fmt ")?;
    file.write_all(&16u32.to_le_bytes())?;
    file.write_all(&1u16.to_le_bytes())?;
    file.write_all(&num_channels.to_le_bytes())?;
    file.write_all(&sample_rate.to_le_bytes())?;
    file.write_all(&byte_rate.to_le_bytes())?;
    file.write_all(&block_align.to_le_bytes())?;
    file.write_all(&bits_per_sample.to_le_bytes())?;

    file.write_all(b"data")?;
    file.write_all(&data_size.to_le_bytes())?;

    for i in 0..frames {
        for ch in channels {
            let clamped = ch[i].clamp(-1.0, 1.0);
            let int_sample = (clamped * 32767.0) as i16;
            file.write_all(&int_sample.to_le_bytes())?;
        }
    }
    Ok(())
}

/// A triangle of height `amp` peaking at `top`, zero at both ends.
pub fn triangle(len: usize, top: usize, amp: f64) -> Vec<f64> {
    (0..len)
        .map(|i| {
            if i <= top {
                amp * i as f64 / top as f64
            } else {
                amp * (len - 1 - i) as f64 / (len - 1 - top) as f64
            }
        })
        .collect()
}
