/// Half squared error, the loss minimized by the momentum update.
pub struct HalfSquaredError;

impl HalfSquaredError {
    /// Scalar loss: Σ (expected - predicted)² / 2
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(&p, &y)| Self::term(p, y))
            .sum()
    }

    /// Contribution of one output: (expected - predicted)² / 2
    pub fn term(predicted: f64, expected: f64) -> f64 {
        let diff = expected - predicted;
        diff * diff / 2.0
    }

    /// Negative gradient w.r.t. one output: expected - predicted
    pub fn signal(predicted: f64, expected: f64) -> f64 {
        expected - predicted
    }
}
