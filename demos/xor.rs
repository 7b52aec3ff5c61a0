use ferrite_synapse::{
    train_loop, ActivationFunction, Network, NetworkConfig, NetworkError, TrainConfig, UpdateMode,
};

fn main() -> Result<(), NetworkError> {
    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    for mode in [UpdateMode::Streaming, UpdateMode::RoundBuffered] {
        let config = NetworkConfig::default()
            .with_alpha(0.5)
            .with_update_mode(mode)
            .with_seed(2024);
        let mut network = Network::with_config(2, ActivationFunction::Sigmoid, config);
        network.add_layer(2, "input")?;
        network.add_layer(3, "hidden")?;
        network.add_layer(1, "output")?;

        let loss = train_loop(&mut network, &inputs, &expected_outputs, &TrainConfig::new(5000))?;
        println!("{mode:?}: final epoch loss = {loss:.6}");

        for input in &inputs {
            network.set_inputs(input)?;
            println!("  Input: {:?} -> Output: {:.4}", input, network.forward()[0]);
        }
    }

    Ok(())
}
