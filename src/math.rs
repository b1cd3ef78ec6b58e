use itertools::Itertools;

pub fn sum(v: &[f64]) -> f64 {
    let mut o = 0.;
    for e in v.iter() {
        o += *e;
    }
    o
}

/// Dot product over the common length of `a` and `b`.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    let mut o = 0.;
    for (&a, &b) in a.iter().zip(b) {
        o += a * b;
    }
    o
}

pub fn rmse(target: &[f64], yhat: &[f64]) -> f64 {
    let rmse: f64 = yhat
        .iter()
        .zip(target.iter())
        .map(|(&a, &b)| (a - b).powi(2))
        .sum();
    (rmse / target.len() as f64).sqrt()
}

/// Smallest and largest finite values, or None if there are none.
pub fn min_max(v: &[f64]) -> Option<(f64, f64)> {
    v.iter()
        .cloned()
        .filter(|x| x.is_finite())
        .minmax_by(|a, b| a.total_cmp(b))
        .into_option()
}
