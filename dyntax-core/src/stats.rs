//! Summary statistics shared by the environment, the agents and evaluation

/// Arithmetic mean; zero for an empty sequence, NaN if any value is NaN
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
