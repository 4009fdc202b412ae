/// Classic four-row XOR truth table, trained full-batch with a hand-written
/// loop over `forward` / `backward` / `step` / `zero_grad`.
///
/// Run with:
///   cargo run --example xor
use ferrite_xor::{
    ActivationFunction, BceLoss, LayerSpec, Matrix, Model, NetworkSpec, Sequential, Sgd,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() -> ferrite_xor::Result<()> {
    let spec = NetworkSpec {
        name: "truth_table".into(),
        layers: vec![
            LayerSpec::new(3, 2, ActivationFunction::Tanh),
            LayerSpec::new(1, 3, ActivationFunction::Sigmoid),
        ],
        learning_rate: 0.5,
    };
    let mut network = Sequential::from_spec(&spec, &mut StdRng::seed_from_u64(1))?;
    println!("{}", network);

    let inputs = Matrix::from_data(vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ]);
    let expected = Matrix::column(&[1.0, 0.0, 1.0, 0.0]);

    let optimizer = Sgd::new(spec.learning_rate);
    let epochs = 5000;

    for epoch in 0..epochs {
        let output = network.forward(&inputs);
        let loss = BceLoss::loss(&output, &expected);
        network.backward(&BceLoss::derivative(&output, &expected));
        optimizer.step(&mut network);
        optimizer.zero_grad(&mut network);
        if epoch % 500 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    let output = network.forward(&inputs);
    for (input, p) in inputs.data.iter().zip(output.col(0)) {
        println!("Input: {:?} -> Output: {:.4}", input, p);
    }
    Ok(())
}
