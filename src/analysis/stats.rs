// src/analysis/stats.rs

/// Percentile with "midpoint" interpolation: the mean of the two order
/// statistics around rank `p/100 * (n-1)`.
pub fn percentile_midpoint(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some((sorted[lo] + sorted[hi]) / 2.0)
}

/// Fences for IQR outlier removal: values at or beyond them are outliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub lower: f64,
    pub upper: f64,
}

pub fn iqr_fences(values: &[f64]) -> Option<IqrFences> {
    let q1 = percentile_midpoint(values, 25.0)?;
    let q3 = percentile_midpoint(values, 75.0)?;
    let iqr = q3 - q1;
    if iqr <= 0.0 {
        // Fences would collapse onto the quartiles and drop the bulk of the data.
        return None;
    }
    Some(IqrFences {
        lower: q1 - 1.5 * iqr,
        upper: q3 + 1.5 * iqr,
    })
}

/// Keeps the items whose key lies strictly inside the IQR fences.
pub fn remove_iqr_outliers<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let values: Vec<f64> = items.iter().map(&key).collect();
    let Some(fences) = iqr_fences(&values) else {
        return items;
    };

    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let v = key(item);
            v > fences.lower && v < fences.upper
        })
        .collect();
    log::debug!(
        "IQR filter dropped {} of {before} values (fences {:.1} .. {:.1})",
        before - kept.len(),
        fences.lower,
        fences.upper
    );
    kept
}
