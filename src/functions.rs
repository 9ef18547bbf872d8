/// Arithmetic mean, or `None` for an empty sequence.
pub fn mean(xs: impl Iterator<Item = f64>) -> Option<f64> {
    let mut count = 0;
    let mut total = 0.0;
    for x in xs {
        count += 1;
        total += x;
    }
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

/// Population mean and variance.
#[cfg(test)]
pub fn mean_and_variance(xs: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = xs.clone().count() as f64;
    let m = mean(xs.clone()).expect("non-empty sample");
    let v = xs.map(|x| (x - m).powi(2)).sum::<f64>() / n;
    (m, v)
}
