use neuron::{ActivationFunction, Network, NetworkConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};

const TRAINING_STEPS: usize = 15000;
const SEEDS: [u64; 4] = [0xC0FFEE, 1, 2, 3];

type TruthTable = [([f64; 2], [f64; 1]); 4];

/// Trains a fresh 2-5-1 sigmoid network on random rows of `table`.
fn train_gate(table: &TruthTable, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = Network::with_rng(&NetworkConfig::new(vec![2, 5, 1]), &mut rng).unwrap();
    assert_eq!(network.activation(), ActivationFunction::Sigmoid);
    assert_eq!(network.learning_rate(), 0.1);

    for _ in 0..TRAINING_STEPS {
        let (input, target) = &table[rng.gen_range(0..table.len())];
        network.train(input, target).unwrap();
    }
    network
}

fn assert_learned(table: &TruthTable, name: &str) {
    for seed in SEEDS {
        let network = train_gate(table, seed);
        for (input, target) in table {
            let output = network.evaluate(input).unwrap()[0];
            if target[0] > 0.5 {
                assert!(output > 0.5, "{} seed {} {:?} gave {}", name, seed, input, output);
            } else {
                assert!(output < 0.5, "{} seed {} {:?} gave {}", name, seed, input, output);
            }
        }
    }
}

#[test]
fn logic_gate_and() {
    assert_learned(
        &[
            ([0.0, 0.0], [0.0]),
            ([1.0, 0.0], [0.0]),
            ([0.0, 1.0], [0.0]),
            ([1.0, 1.0], [1.0]),
        ],
        "AND",
    );
}

#[test]
fn logic_gate_or() {
    assert_learned(
        &[
            ([0.0, 0.0], [0.0]),
            ([1.0, 0.0], [1.0]),
            ([0.0, 1.0], [1.0]),
            ([1.0, 1.0], [1.0]),
        ],
        "OR",
    );
}

#[test]
fn logic_gate_xor() {
    assert_learned(
        &[
            ([0.0, 0.0], [0.0]),
            ([1.0, 0.0], [1.0]),
            ([0.0, 1.0], [1.0]),
            ([1.0, 1.0], [0.0]),
        ],
        "XOR",
    );
}

#[test]
fn logic_gate_xnor() {
    assert_learned(
        &[
            ([0.0, 0.0], [1.0]),
            ([1.0, 0.0], [0.0]),
            ([0.0, 1.0], [0.0]),
            ([1.0, 1.0], [1.0]),
        ],
        "XNOR",
    );
}

#[test]
fn tanh_network_learns_sign() {
    let config = NetworkConfig {
        activation: ActivationFunction::Tanh,
        ..NetworkConfig::new(vec![1, 4, 1])
    };
    let mut rng = StdRng::seed_from_u64(17);
    let mut network = Network::with_rng(&config, &mut rng).unwrap();
    for _ in 0..5000 {
        let x: f64 = rng.gen_range(-1.0..1.0);
        network.train(&[x], &[x.signum() * 0.8]).unwrap();
    }
    assert!(network.evaluate(&[0.9]).unwrap()[0] > 0.0);
    assert!(network.evaluate(&[-0.9]).unwrap()[0] < 0.0);
}
