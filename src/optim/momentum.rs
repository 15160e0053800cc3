/// Momentum coefficient given to every neuron at construction.
pub const DEFAULT_MOMENTUM: f64 = 0.9;

/// Weight change for one connection:
/// `error * input + momentum * previous_delta`.
///
/// The result is added to the weight as-is. There is no learning-rate factor;
/// the error term already points along the negative gradient of the squared
/// error, so adding the delta descends it.
pub fn momentum_delta(error: f64, input: f64, momentum: f64, previous_delta: f64) -> f64 {
    error * input + momentum * previous_delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_step_has_no_history() {
        assert_abs_diff_eq!(momentum_delta(0.5, 0.4, DEFAULT_MOMENTUM, 0.0), 0.2);
    }

    #[test]
    fn history_decays_without_error() {
        let mut delta = 1.0;
        for _ in 0..3 {
            delta = momentum_delta(0.0, 1.0, DEFAULT_MOMENTUM, delta);
        }
        assert_abs_diff_eq!(delta, 0.9 * 0.9 * 0.9, epsilon = 1e-12);
    }
}
