//! Determinism verification tests
//!
//! Identical seeds and parameters must reproduce every generation exactly.

use corruption_core::{ModelConfig, Simulation};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn config(population: usize) -> ModelConfig {
    ModelConfig {
        population,
        ..ModelConfig::default()
    }
}

#[test]
fn test_same_seed_same_reports() {
    let mut sim1 = Simulation::new(config(200), 42).unwrap();
    let mut sim2 = Simulation::new(config(200), 42).unwrap();

    let reports1 = sim1.run(10).unwrap();
    let reports2 = sim2.run(10).unwrap();

    assert_eq!(reports1, reports2, "Reports should be identical with same seed");
    assert_eq!(sim1.agents(), sim2.agents());
}

#[test]
fn test_same_seed_same_json() {
    let mut sim1 = Simulation::new(config(50), 7).unwrap();
    let mut sim2 = Simulation::new(config(50), 7).unwrap();

    for _ in 0..5 {
        let json1 = sim1.step().unwrap().to_json().unwrap();
        let json2 = sim2.step().unwrap().to_json().unwrap();
        assert_eq!(json1, json2);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut sim1 = Simulation::new(config(100), 42).unwrap();
    let mut sim2 = Simulation::new(config(100), 43).unwrap();

    let q1 = sim1.step().unwrap().aggregates.corruption_index;
    let q2 = sim2.step().unwrap().aggregates.corruption_index;

    assert_ne!(q1, q2, "Different seeds should produce different histories");
}

#[test]
fn test_with_rng_matches_seeded_constructor() {
    let mut sim1 = Simulation::new(config(30), 99).unwrap();
    let mut sim2 = Simulation::with_rng(config(30), SmallRng::seed_from_u64(99)).unwrap();

    assert_eq!(sim1.run(3).unwrap(), sim2.run(3).unwrap());
}

#[test]
fn test_founders_identical_before_first_step() {
    let sim1 = Simulation::new(config(25), 5).unwrap();
    let sim2 = Simulation::new(config(25), 5).unwrap();

    let agents = sim1.agents();
    assert_eq!(agents, sim2.agents());
    let ids: Vec<u64> = agents.iter().map(|a| a.agent_id).collect();
    assert_eq!(ids, (0..25).collect::<Vec<u64>>());
}
