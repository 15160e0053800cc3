use crate::{
    dataset::sample::Sample,
    error::{Error, Result},
    loss::squared_error::HalfSquaredError,
    network::network::Network,
};

/// One backpropagation step on a single example. Returns the example's loss.
///
/// Order: forward pass, zero every error, output errors, then each layer
/// from the output down pushes its errors into the layer below and updates
/// its own weights. A layer only propagates once the layer above it has
/// finished, so its errors are complete.
///
/// The attached activation and both vectors are checked before anything is
/// touched.
pub fn train_example(network: &mut Network, sample: &Sample) -> Result<f64> {
    let activation = network.require_activation()?;
    network.check_input(&sample.data)?;
    if sample.label.len() != network.output_size() {
        return Err(Error::LabelSizeMismatch {
            expected: network.output_size(),
            actual: sample.label.len(),
        });
    }

    network.feed_forward(&sample.data, &activation);

    for layer in &mut network.layers {
        layer.zero_errors();
    }

    let execution = network.execution();
    let last = network.layers.len() - 1;
    let mut loss = 0.0;

    // Backward pass: layers[i] feeds its errors into layers[i - 1].
    for i in (1..=last).rev() {
        let (lower, upper) = network.layers.split_at_mut(i);
        if i == last {
            loss = upper[0].set_output_errors(&sample.label, &activation);
        }
        upper[0].propagate(&mut lower[i - 1], &activation, execution);
    }

    Ok(loss)
}

/// One pass over `dataset` in order. Returns the mean per-example loss.
///
/// The first bad example aborts the epoch; updates made by the examples
/// before it are kept.
pub fn train_epoch(network: &mut Network, dataset: &[Sample]) -> Result<f64> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }
    network.require_activation()?;

    let mut total_loss = 0.0;
    for sample in dataset {
        total_loss += train_example(network, sample)?;
    }

    Ok(total_loss / dataset.len() as f64)
}

/// Mean loss over `dataset` without changing any weight.
pub fn evaluate(network: &mut Network, dataset: &[Sample]) -> Result<f64> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut total_loss = 0.0;
    for sample in dataset {
        let output = network.compute_output(&sample.data)?;
        if sample.label.len() != output.len() {
            return Err(Error::LabelSizeMismatch {
                expected: output.len(),
                actual: sample.label.len(),
            });
        }
        total_loss += HalfSquaredError::loss(&output, &sample.label);
    }

    Ok(total_loss / dataset.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::Activation;
    use crate::layers::dense::Execution;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn network(sizes: &[usize], seed: u64) -> Network {
        Network::new(sizes, Activation::Sigmoid, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn xor() -> Vec<Sample> {
        vec![
            Sample::new(vec![1.0, 0.0], vec![1.0]),
            Sample::new(vec![1.0, 1.0], vec![0.0]),
            Sample::new(vec![0.0, 1.0], vec![1.0]),
            Sample::new(vec![0.0, 0.0], vec![0.0]),
        ]
    }

    #[test]
    fn example_loss_matches_forward_output() {
        let mut net = network(&[2, 3, 1], 1);
        let sample = Sample::new(vec![0.4, 0.6], vec![0.9]);
        let out = net.compute_output(&sample.data).unwrap();
        let loss = train_example(&mut net, &sample).unwrap();
        assert_abs_diff_eq!(loss, (0.9 - out[0]).powi(2) / 2.0);
    }

    #[test]
    fn single_step_reduces_example_loss() {
        let mut net = network(&[2, 4, 1], 8);
        let sample = Sample::new(vec![0.3, 0.7], vec![0.1]);
        let before = evaluate(&mut net, std::slice::from_ref(&sample)).unwrap();
        train_example(&mut net, &sample).unwrap();
        let after = evaluate(&mut net, std::slice::from_ref(&sample)).unwrap();
        assert!(after < before, "{after} >= {before}");
    }

    #[test]
    fn input_weights_stay_fixed() {
        let mut net = network(&[2, 3, 1], 2);
        for _ in 0..3 {
            train_epoch(&mut net, &xor()).unwrap();
        }
        for neuron in &net.layers[0].neurons {
            assert_eq!(neuron.weights, vec![1.0]);
            assert_eq!(neuron.delta_weights, vec![0.0]);
        }
    }

    #[test]
    fn momentum_memory_is_recorded() {
        let mut net = network(&[2, 3, 1], 2);
        train_epoch(&mut net, &xor()).unwrap();
        assert!(net.layers[2].neurons[0].delta_weights.iter().any(|&d| d != 0.0));
    }

    #[test]
    fn learning_rate_does_not_change_updates() {
        let mut plain = network(&[2, 3, 1], 6);
        let mut tagged = plain.clone();
        for neuron in tagged.layers.iter_mut().flat_map(|l| l.neurons.iter_mut()) {
            neuron.learning_rate = 0.5;
        }
        train_epoch(&mut plain, &xor()).unwrap();
        train_epoch(&mut tagged, &xor()).unwrap();
        assert_eq!(plain.layers[1].neurons[0].weights, tagged.layers[1].neurons[0].weights);
    }

    #[test]
    fn parallel_training_matches_sequential() {
        let mut seq = network(&[2, 6, 5, 1], 13);
        let mut par = seq.clone();
        par.set_execution(Execution::Parallel);

        for _ in 0..10 {
            let a = train_epoch(&mut seq, &xor()).unwrap();
            let b = train_epoch(&mut par, &xor()).unwrap();
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
        for (ls, lp) in seq.layers.iter().zip(&par.layers) {
            for (ns, np) in ls.neurons.iter().zip(&lp.neurons) {
                for (ws, wp) in ns.weights.iter().zip(&np.weights) {
                    assert_abs_diff_eq!(ws, wp, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn bad_example_aborts_the_epoch() {
        let mut net = network(&[2, 3, 1], 4);
        let mut data = xor();
        data.insert(2, Sample::new(vec![0.5], vec![1.0]));
        assert!(matches!(
            train_epoch(&mut net, &data),
            Err(Error::InputSizeMismatch { expected: 2, actual: 1 })
        ));

        data[2] = Sample::new(vec![0.5, 0.5], vec![1.0, 0.0]);
        assert!(matches!(
            train_epoch(&mut net, &data),
            Err(Error::LabelSizeMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut net = network(&[2, 3, 1], 4);
        assert!(matches!(train_epoch(&mut net, &[]), Err(Error::EmptyDataset)));
        assert!(matches!(evaluate(&mut net, &[]), Err(Error::EmptyDataset)));
    }
}
