use std::f64::consts::PI;

use momentum_nn::{Activation, Execution, Network, Sample};
use rand::Rng;

fn main() -> momentum_nn::Result<()> {
    env_logger::init();

    let mut rng = rand::thread_rng();
    let mut network = Network::new(&[1, 8, 1], Activation::Sigmoid, &mut rng)?;
    network.set_execution(Execution::Parallel);

    let dataset: Vec<Sample> = (0..1000)
        .map(|_| {
            let x: f64 = rng.gen();
            Sample::new(vec![x], vec![(x * PI).sin()])
        })
        .collect();

    let epochs = 200;
    let mut epoch = 0;
    network.train(&dataset, |loss| {
        if epoch % 20 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
        epoch += 1;
        epoch < epochs
    })?;

    for i in 0..=10 {
        let x = i as f64 / 10.0;
        let out = network.compute_output(&[x])?[0];
        println!("sin({x:.1} * pi) = {:.4} -> {out:.4}", (x * PI).sin());
    }

    let path = std::env::temp_dir().join("sine-network.json");
    network.save_json(&path)?;
    let mut reloaded = Network::load_json(&path)?;
    reloaded.resolve_activation()?;
    println!("reloaded from {}: {:?}", path.display(), reloaded.compute_output(&[0.5])?);

    Ok(())
}
