//! Tests for loading and saving configuration documents.

use gillespie_ssa::{
    errors::LoadError,
    simulation::{Configuration, NegativeCountPolicy, StopCondition, TerminationReason},
};
use std::io::Write;
use tempfile::NamedTempFile;

const TWO_REGIME: &str = r#"{
    "network": {
        "species": ["A", "B"],
        "regimes": [
            {
                "name": "grow",
                "reactions": [
                    {"name": "birth", "rule": {"order": "unimolecular", "rate": 1.0, "species": 0}, "change": [1, 0]},
                    {"rule": {"order": "bimolecular", "rate": 0.01, "a": 0, "b": 1}, "change": [-1, 1]}
                ]
            },
            {
                "name": "decay",
                "reactions": [
                    {"rule": {"order": "unimolecular", "rate": 0.5, "species": 0}, "change": [-1, 0]},
                    {"rule": {"order": "unimolecular", "rate": 0.5, "species": 1}, "change": [0, -1]}
                ]
            }
        ]
    },
    "initial_counts": [30, 5],
    "run": {
        "stop": {"iterations": 500},
        "fixed_reagents": [1],
        "rescale": {"threshold": 10000, "target_size": 1000},
        "oscillation": {"intervals": {"grow": 1.5, "decay": 0.5}},
        "negative_counts": "clamp",
        "seed": 17
    }
}"#;

#[test]
fn test_load_from_file_and_run() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TWO_REGIME.as_bytes()).unwrap();

    let config = Configuration::from_json_file(file.path()).unwrap();
    assert_eq!(config.network.n_regimes(), 2);
    assert_eq!(config.network.species(), &["A".to_string(), "B".to_string()]);
    assert_eq!(config.run.stop, StopCondition::Iterations(500));
    assert_eq!(config.run.negative_counts, NegativeCountPolicy::Clamp);

    let mut sim = config.build().unwrap();
    let reason = sim.run();
    assert!(matches!(
        reason,
        TerminationReason::StopConditionReached | TerminationReason::NoFeasibleReaction
    ));
    assert!(sim.history().snapshots().iter().all(|s| s[1] == 5));
}

#[test]
fn test_seeded_document_is_reproducible() {
    let config = Configuration::from_json_str(TWO_REGIME).unwrap();
    let mut a = config.build().unwrap();
    let mut b = config.build().unwrap();
    a.run();
    b.run();
    assert_eq!(a.into_result(), b.into_result());
}

#[test]
fn test_round_trip_preserves_behaviour() {
    let config = Configuration::from_json_str(TWO_REGIME).unwrap();
    let reloaded = Configuration::from_json_str(&config.to_json().unwrap()).unwrap();

    let mut a = config.build().unwrap();
    let mut b = reloaded.build().unwrap();
    a.run();
    b.run();
    assert_eq!(a.history(), b.history());
}

#[test]
fn test_invalid_network_rejected_on_load() {
    // Change vector too short for two species
    let bad = TWO_REGIME.replace("\"change\": [1, 0]", "\"change\": [1]");
    let err = Configuration::from_json_str(&bad).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
    assert!(err.to_string().contains("length 1"));
}

#[test]
fn test_missing_file() {
    let err = Configuration::from_json_file("/nonexistent/ssa-config.json").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_invalid_run_settings_rejected_on_build() {
    let bad = TWO_REGIME.replace("\"decay\": 0.5", "\"other\": 0.5");
    let config = Configuration::from_json_str(&bad).unwrap();
    assert!(config.build().is_err());
}

#[test]
fn test_result_serializes() {
    let config = Configuration::from_json_str(TWO_REGIME).unwrap();
    let mut sim = config.build().unwrap();
    sim.run_for(10);
    let json = sim.into_result().to_json().unwrap();
    assert!(json.contains("\"history\""));
    assert!(json.contains("\"grow\""));
}
