/// Indices of the samples that dominate a window of `sep` samples on each side.
///
/// A sample must be strictly greater than everything to its left and at least
/// as large as everything to its right, so a plateau reports its first index.
pub fn find(x: &[f64], sep: usize) -> Vec<usize> {
    (0..x.len()).filter(|&i| is_max(x, i, sep)).collect()
}

fn is_max(x: &[f64], i: usize, sep: usize) -> bool {
    let lo = i.saturating_sub(sep);
    let hi = i.saturating_add(sep).clamp(i + 1, x.len());
    x[lo..i].iter().all(|&v| v < x[i]) && x[i + 1..hi].iter().all(|&v| v <= x[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        let x = [1.0, 3.0, 2.0, 5.0, 2.0, 4.0, 1.0];
        assert_eq!(find(&x, 1), vec![0, 1, 3, 5]);
        assert_eq!(find(&x, 2), vec![1, 3]);
        assert_eq!(find(&x, 3), vec![3]);
        assert_eq!(find(&x, 0).len(), x.len());
    }

    #[test]
    fn test_plateau_reports_first_index() {
        let x = [0.0, 2.0, 2.0, 2.0, 0.0];
        assert_eq!(find(&x, 2), vec![1]);
    }

    #[test]
    fn test_empty() {
        assert!(find(&[], 4).is_empty());
    }
}
