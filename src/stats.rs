use serde::Serialize;

/// Box-plot summary of one network's traffic values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub network: String,
    pub count: usize,
    pub min: i64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: i64,
    pub mean: f64,
    /// Values beyond 1.5 × IQR from the quartiles.
    pub outliers: usize,
}

pub fn box_stats(network: &str, values: &[i64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let fence = 1.5 * (q3 - q1);
    let outliers = sorted
        .iter()
        .filter(|value| {
            let value = **value as f64;
            value < q1 - fence || value > q3 + fence
        })
        .count();
    let sum = sorted.iter().map(|value| *value as f64).sum::<f64>();
    Some(BoxStats {
        network: network.to_string(),
        count: sorted.len(),
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        mean: sum / sorted.len() as f64,
        outliers,
    })
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[i64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] as f64 + (sorted[upper] - sorted[lower]) as f64 * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_stats_interpolates_quartiles() {
        let stats = box_stats("RER", &[4, 1, 3, 2]).expect("stats");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 4);
        assert!((stats.q1 - 1.75).abs() < f64::EPSILON);
        assert!((stats.median - 2.5).abs() < f64::EPSILON);
        assert!((stats.q3 - 3.25).abs() < f64::EPSILON);
        assert_eq!(stats.outliers, 0);
    }

    #[test]
    fn box_stats_counts_outliers() {
        let stats = box_stats("Métro", &[10, 11, 12, 13, 14, 1_000]).expect("stats");
        assert_eq!(stats.outliers, 1);
        assert_eq!(stats.max, 1_000);
    }

    #[test]
    fn box_stats_single_value() {
        let stats = box_stats("Val", &[7]).expect("stats");
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.outliers, 0);
    }

    #[test]
    fn box_stats_empty_is_none() {
        assert!(box_stats("Val", &[]).is_none());
    }
}
