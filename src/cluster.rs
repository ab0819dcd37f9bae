//! DBSCAN clustering of histogram bins.
//!
//! A bin is a point when its count is positive. Two points are neighbours
//! when their bin indices are at most `eps` apart, and a point is a core point
//! when it has at least `min_pts` neighbours, itself included.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::textio;

/// Inclusive range of bins that belong to one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub min: usize,
    pub max: usize,
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Undefined,
    Noise,
    Member(usize),
}

fn neighbours(h: &[i64], point: usize, eps: usize) -> Vec<usize> {
    let from = point.saturating_sub(eps);
    let to = point.saturating_add(eps).min(h.len() - 1);
    (from..=to).filter(|&i| h[i] > 0).collect()
}

/// Clusters the occupied bins of `h`, ordered by their first bin.
pub fn histogram(h: &[i64], eps: usize, min_pts: usize) -> Vec<Cluster> {
    let mut labels = vec![Label::Undefined; h.len()];
    let mut count = 0;

    for p in 0..h.len() {
        if h[p] <= 0 || labels[p] != Label::Undefined {
            continue;
        }
        let near = neighbours(h, p, eps);
        if near.len() < min_pts {
            labels[p] = Label::Noise;
            continue;
        }

        let id = count;
        count += 1;
        labels[p] = Label::Member(id);
        let mut seeds: VecDeque<usize> = near.into_iter().filter(|&q| q != p).collect();
        while let Some(q) = seeds.pop_front() {
            match labels[q] {
                Label::Member(_) => continue,
                // border point: joins the cluster but does not grow it
                Label::Noise => {
                    labels[q] = Label::Member(id);
                    continue;
                }
                Label::Undefined => labels[q] = Label::Member(id),
            }
            let near = neighbours(h, q, eps);
            if near.len() >= min_pts {
                seeds.extend(near);
            }
        }
    }

    let mut clusters: Vec<Option<Cluster>> = vec![None; count];
    for (i, label) in labels.iter().enumerate() {
        if let Label::Member(id) = *label {
            let c = clusters[id].get_or_insert(Cluster { min: i, max: i });
            c.min = c.min.min(i);
            c.max = c.max.max(i);
        }
    }
    let mut clusters: Vec<Cluster> = clusters.into_iter().flatten().collect();
    clusters.sort_by_key(|c| c.min);
    debug!("DBSCAN eps={} min_pts={}: {} clusters over {} bins", eps, min_pts, clusters.len(), h.len());
    clusters
}

/// Writes one `<index>, <min> <max>` line per cluster.
pub fn write_clusters<P: AsRef<Path>>(path: P, clusters: &[Cluster]) -> Result<()> {
    let lines: Vec<String> = clusters.iter().enumerate().map(|(i, c)| format!("{}, {}", i, c)).collect();
    textio::write(path, &lines)
}
