//! Text vectors: one value per line.

use log::info;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

fn load<T: FromStr, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut values = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let parsed = value.parse::<T>().map_err(|_| Error::Parse {
            line: i + 1,
            value: value.to_string(),
        })?;
        values.push(parsed);
    }
    info!("Loaded {} values from {}", values.len(), path.display());
    Ok(values)
}

pub fn load_floats<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    load(path)
}

pub fn load_ints<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    load(path)
}

pub(crate) fn write<T: std::fmt::Display, P: AsRef<Path>>(path: P, x: &[T]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    for v in x {
        writeln!(out, "{}", v)?;
    }
    out.flush()?;
    info!("Wrote {} values to {}", x.len(), path.display());
    Ok(())
}

pub fn write_floats<P: AsRef<Path>>(path: P, x: &[f64]) -> Result<()> {
    write(path, x)
}

pub fn write_ints<P: AsRef<Path>>(path: P, x: &[usize]) -> Result<()> {
    write(path, x)
}

/// Writes `xs[i]` to `<prefix>_<i>.txt`.
pub fn write_all_floats(prefix: &str, xs: &[Vec<f64>]) -> Result<()> {
    for (i, x) in xs.iter().enumerate() {
        write_floats(format!("{}_{}.txt", prefix, i), x)?;
    }
    Ok(())
}
