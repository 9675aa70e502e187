use digitpad_inference::format::{to_fixed_point_listing, to_mcu_listing};
use digitpad_inference::{
    load_weights, save_weights, Activation, InferenceError, Layer, Network, NetworkShape, WeightFormat, WeightTables,
};
use digitpad_vision::FeatureVector;
use tempfile::TempDir;

/// Hidden unit `h` copies input `h`; output unit `d` reads hidden unit `d`
fn pass_through_weights() -> WeightTables {
    let mut weights = WeightTables::zeros(NetworkShape::default());
    for unit in 0..10 {
        weights.set_weight(Layer::Hidden, unit, unit, 1.0).unwrap();
        weights.set_weight(Layer::Output, unit, unit, 1.0 + unit as f64 / 100.0).unwrap();
    }
    weights
}

#[test]
fn test_mcu_file_round_trip_preserves_classification() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.txt");
    let weights = pass_through_weights();

    save_weights(&weights, &path, WeightFormat::McuText).unwrap();
    let loaded = load_weights(&path, WeightFormat::from_path(&path), NetworkShape::default()).unwrap();
    assert_eq!(loaded, weights);

    let network = Network::new(loaded, Activation::Identity);
    let mut features = FeatureVector::new();
    features.set(0, 6);
    assert_eq!(network.classify(&features).unwrap(), 6);

    // inputs 2, 6 and 7 on: unit 7 has the largest output gain
    features.set(0, 2);
    features.set(0, 7);
    assert_eq!(network.classify(&features).unwrap(), 7);
}

#[test]
fn test_json_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.json");
    let weights = pass_through_weights();

    save_weights(&weights, &path, WeightFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["hidden"].as_array().unwrap().len(), 10);
    assert_eq!(json["hidden"][0].as_array().unwrap().len(), 257);
    assert!((json["output"][9][9].as_f64().unwrap() - 1.09).abs() < 1e-12);

    let loaded = load_weights(&path, WeightFormat::Json, NetworkShape::default()).unwrap();
    assert_eq!(loaded, weights);
}

#[test]
fn test_json_with_wrong_shape_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weights.json");
    std::fs::write(&path, r#"{ "hidden": [[0.0, 0.0, 0.0]], "output": [[1.0, 0.5]] }"#).unwrap();

    match load_weights(&path, WeightFormat::Json, NetworkShape::default()) {
        Err(InferenceError::ShapeMismatch { what, expected, actual }) => {
            assert_eq!(what, "input units");
            assert_eq!(expected, 256);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_weights(&dir.path().join("absent.txt"), WeightFormat::McuText, NetworkShape::default());
    assert!(matches!(result, Err(InferenceError::Io(_))));
}

#[test]
fn test_listings_cover_every_weight() {
    let weights = pass_through_weights();
    let total = 10 * 257 + 10 * 11;

    let mcu = to_mcu_listing(&weights);
    assert_eq!(mcu.lines().filter(|l| l.starts_with("weights[")).count(), total);

    let fixed = to_fixed_point_listing(&weights);
    let addresses: Vec<&str> = fixed.lines().filter(|l| l.starts_with('@')).collect();
    assert_eq!(addresses.len(), total);
    assert!(addresses[total - 1].starts_with(&format!("@{} ", total - 1)));
    // hidden unit 0, input 0 = 1.0 => 1024 => 0x400
    assert_eq!(addresses[0], "@0 0x400\t\t// 1.00000");
}
