use gridfit::{
    ActivationType,
    Dataset,
    Error,
    Layer,
    LayerConfig,
    Model,
    NUM_CLASSES,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn stack(layer_configs: &[(usize, usize)]) -> Model {
    let configs = layer_configs
        .iter()
        .map(|&(inputs, neurons)| LayerConfig {
            inputs,
            neurons,
            activation: ActivationType::ReLU,
        })
        .collect();
    Model::new(configs, &mut StdRng::seed_from_u64(0)).unwrap()
}

#[test]
fn test_parameter_count_accuracy() {
    let test_cases = vec![
        // Weights: 10 * 5 + 5 * 3 = 65, biases: 5 + 3 = 8
        (vec![(10, 5), (5, 3)], 73),
        // Weights: 320 + 192 + 96 + 32 = 640, biases: 40
        (vec![(20, 16), (16, 12), (12, 8), (8, 4)], 680),
        // Weights: 150 + 70 + 35 = 255, biases: 22
        (vec![(15, 10), (10, 7), (7, 5)], 277),
    ];

    for (layer_configs, expected_params) in test_cases {
        let model = stack(&layer_configs);
        assert_eq!(
            model.parameter_count(),
            expected_params,
            "Parameter count mismatch for model with {:?}",
            layer_configs
        );
    }
}

#[test]
fn test_mismatched_layers_rejected() {
    let configs = vec![
        LayerConfig { inputs: 4, neurons: 3, activation: ActivationType::ReLU },
        LayerConfig { inputs: 2, neurons: 1, activation: ActivationType::Linear },
    ];
    let err = Model::new(configs, &mut StdRng::seed_from_u64(0)).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));

    assert!(Model::new(vec![], &mut StdRng::seed_from_u64(0)).is_err());
}

#[test]
fn test_classifier_output_width_is_fixed() {
    for hidden_units in [1, 25, 50, 100, 300] {
        let model = Model::classifier(hidden_units, 7).unwrap();
        assert_eq!(model.input_width(), 784);
        assert_eq!(model.output_width(), NUM_CLASSES);
        assert_eq!(model.layers[0].params().neurons, hidden_units);
        assert_eq!(model.layers[0].params().activation, ActivationType::Sigmoid);
        assert_eq!(model.output_activation(), Some(ActivationType::Softmax));
        assert_eq!(
            model.parameter_count(),
            784 * hidden_units + hidden_units + hidden_units * 10 + 10
        );
    }
}

#[test]
fn test_classifier_rejects_zero_hidden_units() {
    assert!(matches!(
        Model::classifier(0, 7),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_classifier_is_reproducible_under_seed() {
    let a = Model::classifier(25, 42).unwrap();
    let b = Model::classifier(25, 42).unwrap();
    let c = Model::classifier(25, 43).unwrap();

    for (la, lb) in a.layers.iter().zip(&b.layers) {
        assert_eq!(la.params().weights, lb.params().weights);
    }
    assert_ne!(a.layers[0].params().weights, c.layers[0].params().weights);
}

#[test]
fn test_predictions_are_distributions() {
    let model = Model::classifier(25, 1).unwrap();
    let data = Dataset::separable_toy(12).unwrap();

    let output = model.predict(&data.features());
    assert_eq!(output.dim(), (12, NUM_CLASSES));
    for row in output.rows() {
        assert!((row.sum() - 1.0).abs() < 1e-5);
        assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }
}

#[test]
fn test_forward_matches_predict() {
    let mut model = Model::classifier(10, 3).unwrap();
    let data = Dataset::separable_toy(4).unwrap();

    let predicted = model.predict(&data.features());
    let trained_path = model.forward(&data.features());
    assert_eq!(predicted, trained_path);
}

#[test]
fn test_compile_binds_learning_rate() {
    let compiled = Model::classifier(25, 0).unwrap().compile(0.5).unwrap();
    assert_eq!(compiled.optimizer().learning_rate(), 0.5);

    let rebound = compiled.recompile(10.0).unwrap();
    assert_eq!(rebound.optimizer().learning_rate(), 10.0);
}

#[test]
fn test_compile_rejects_bad_learning_rate() {
    for lr in [0.0, -0.5, f32::NAN] {
        let result = Model::classifier(25, 0).unwrap().compile(lr);
        assert!(matches!(result, Err(Error::Configuration(_))), "lr {lr}");
    }
}

#[test]
fn test_compile_requires_softmax_output() {
    let model = stack(&[(3, 2)]);
    assert!(matches!(model.compile(0.1), Err(Error::Configuration(_))));
}
