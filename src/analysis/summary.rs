use crate::dataset::Dataset;

use super::error::EngineError;
use super::models::StatisticalSummary;

/// Descriptive statistics over the harvested areas of `crop`
///
/// Fails with [`EngineError::EmptySeries`] when the crop has no
/// municipalities, since mean, median and the extremes are undefined.
pub fn statistical_summary(
    dataset: &Dataset,
    crop: &str,
) -> Result<StatisticalSummary, EngineError> {
    let table = dataset
        .crop(crop)
        .ok_or_else(|| EngineError::CropNotFound(crop.to_string()))?;

    let values: Vec<f64> = table.values().map(|r| r.harvested_area).collect();
    if values.is_empty() {
        return Err(EngineError::EmptySeries(crop.to_string()));
    }

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let count = values.len();
    let total: f64 = values.iter().sum();
    let mean = total / count as f64;
    let (q1, q3) = match quartiles(&sorted) {
        Some((q1, q3)) => (Some(q1), Some(q3)),
        None => (None, None),
    };

    Ok(StatisticalSummary {
        mean,
        median: median(&sorted),
        mode: mode(&values),
        std_dev: sample_std_dev(&values, mean),
        min: sorted[0],
        max: sorted[count - 1],
        q1,
        q3,
        total,
        count,
    })
}

/// Median of a non-empty sorted slice
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value; ties go to the value seen first
///
/// `None` when every value is distinct.
fn mode(values: &[f64]) -> Option<f64> {
    // (value, occurrences) in first-seen order
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    if counts.len() == values.len() {
        return None;
    }

    let mut best: Option<(f64, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, best_n)| n > best_n) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value)
}

/// Sample standard deviation (n - 1 denominator), 0 for a single value
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// First and third quartile cut points, exclusive method
///
/// Positions are taken over `n + 1` slots and linearly interpolated between
/// neighbours. Requires at least four values.
fn quartiles(sorted: &[f64]) -> Option<(f64, f64)> {
    let n = sorted.len();
    if n < 4 {
        return None;
    }

    let m = n + 1;
    let cut = |i: usize| {
        let j = i * m / 4;
        let delta = (i * m - j * 4) as f64;
        (sorted[j - 1] * (4.0 - delta) + sorted[j] * delta) / 4.0
    };

    Some((cut(1), cut(3)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn single_crop(areas: &[f64]) -> crate::dataset::Dataset {
        let codes: Vec<String> = (0..areas.len()).map(|i| format!("M{i:03}")).collect();
        let rows: Vec<(&str, &str, &str, f64)> = codes
            .iter()
            .zip(areas)
            .map(|(code, area)| (code.as_str(), "Name", "GO", *area))
            .collect();
        fixtures::dataset(&[("crop", &rows)])
    }

    #[test]
    fn test_two_values() {
        let summary = statistical_summary(&fixtures::soy_and_corn(), "soy").unwrap();
        assert_eq!(summary.mean, 200.0);
        assert_eq!(summary.median, 200.0);
        assert_eq!(summary.min, 100.0);
        assert_eq!(summary.max, 300.0);
        assert_eq!(summary.total, 400.0);
        assert_eq!(summary.count, 2);
        assert!(approx_eq(summary.std_dev, 20000f64.sqrt()));
        assert_eq!(summary.mode, None);
        assert_eq!(summary.q1, None);
        assert_eq!(summary.q3, None);
    }

    #[test]
    fn test_single_value() {
        let summary = statistical_summary(&fixtures::soy_and_corn(), "corn").unwrap();
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.mean, 50.0);
        assert_eq!(summary.median, 50.0);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_quartiles_exclusive_method() {
        // 1..=8: q1 = 2.25, q3 = 6.75
        let dataset = single_crop(&[5.0, 1.0, 8.0, 3.0, 2.0, 7.0, 4.0, 6.0]);
        let summary = statistical_summary(&dataset, "crop").unwrap();
        assert!(approx_eq(summary.q1.unwrap(), 2.25));
        assert!(approx_eq(summary.q3.unwrap(), 6.75));
        assert_eq!(summary.median, 4.5);
    }

    #[test]
    fn test_quartiles_four_values() {
        // [1, 2, 3, 4]: q1 = 1.25, q3 = 3.75
        let dataset = single_crop(&[4.0, 3.0, 2.0, 1.0]);
        let summary = statistical_summary(&dataset, "crop").unwrap();
        assert!(approx_eq(summary.q1.unwrap(), 1.25));
        assert!(approx_eq(summary.q3.unwrap(), 3.75));
    }

    #[test]
    fn test_mode_picks_most_frequent() {
        let dataset = single_crop(&[10.0, 20.0, 20.0, 30.0, 10.0, 20.0]);
        let summary = statistical_summary(&dataset, "crop").unwrap();
        assert_eq!(summary.mode, Some(20.0));
    }

    #[test]
    fn test_mode_tie_takes_first_seen() {
        let dataset = single_crop(&[7.0, 3.0, 3.0, 7.0]);
        let summary = statistical_summary(&dataset, "crop").unwrap();
        assert_eq!(summary.mode, Some(7.0));
    }

    #[test]
    fn test_odd_median() {
        let dataset = single_crop(&[9.0, 1.0, 5.0]);
        let summary = statistical_summary(&dataset, "crop").unwrap();
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q1, None);
    }

    #[test]
    fn test_empty_series() {
        let dataset = fixtures::dataset(&[("cotton", &[])]);
        assert_eq!(
            statistical_summary(&dataset, "cotton"),
            Err(EngineError::EmptySeries("cotton".to_string()))
        );
    }

    #[test]
    fn test_missing_crop() {
        assert_eq!(
            statistical_summary(&fixtures::soy_and_corn(), "wheat"),
            Err(EngineError::CropNotFound("wheat".to_string()))
        );
    }
}
