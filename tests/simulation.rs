use std::path::PathBuf;

use approx::assert_relative_eq;
use mars_colony::{
    scenario::ScenarioLoader, Individual, MonthlyStatistics, Population, ScriptedDraws, Simulation,
    SimulationConfig,
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> PathBuf {
    PathBuf::from("scenarios/mars_colony.yaml")
}

#[test]
fn scenario_loader_reads_fixture() {
    let config = scenario_loader().load(scenario_path()).expect("scenario parses");
    assert_eq!(config.name, "mars_colony");
    assert_eq!(config.initial_population, 100);
    assert_eq!(config.months, 120);
    assert_eq!(config.seed, Some(2024));
}

#[test]
fn seeded_scenario_runs_deterministically() {
    let config = scenario_loader().load(scenario_path()).unwrap();

    let mut first = Simulation::new(config.clone()).unwrap();
    first.run(config.months);
    let mut second = Simulation::new(config.clone()).unwrap();
    second.run(config.months);

    assert_eq!(first.history(), second.history());
    assert_eq!(first.history().len(), config.months as usize);
}

#[test]
fn cohort_size_is_reported_even_after_everyone_dies() {
    let config = scenario_loader().load(scenario_path()).unwrap();
    let mut simulation = Simulation::new(config).unwrap();
    simulation.run(120);

    let census = simulation.population().census();
    assert_eq!(census.alive(), 0, "ten years without supplies is fatal");
    let stats = simulation.statistics();
    assert_eq!(stats.population_size, 100);
    assert_eq!(stats.average_health, 0.0);
    assert_eq!(stats.month, 120);
}

#[test]
fn empty_colony_end_to_end() {
    let mut population = Population::new(0);
    population.simulate_month(&mut ScriptedDraws::constant(10.0));
    assert_eq!(
        population.statistics(),
        MonthlyStatistics {
            month: 1,
            population_size: 0,
            average_health: 0.0,
            diseased_count: 0,
        }
    );
}

#[test]
fn single_colonist_with_fixed_draws() {
    let config = SimulationConfig {
        initial_population: 1,
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::with_rng(config, ScriptedDraws::constant(10.0)).unwrap();

    let mut lines = Vec::new();
    simulation.run_with_hook(2, |stats| lines.push(stats.to_string()));

    let colonist: &Individual = &simulation.population().individuals()[0];
    assert_eq!(colonist.hydration(), 80.0);
    assert_eq!(colonist.hunger(), 80.0);
    assert_eq!(colonist.health(), 110.0);
    assert_relative_eq!(colonist.age(), 2.0 / 12.0, epsilon = 1e-12);
    assert_eq!(
        lines,
        vec![
            "Month 1: Population = 1, Avg Health = 105.00, Diseased = 0",
            "Month 2: Population = 1, Avg Health = 110.00, Diseased = 0",
        ]
    );
}

#[test]
fn run_zero_months_matches_construction() {
    let mut simulation = Simulation::new(SimulationConfig {
        initial_population: 5,
        ..SimulationConfig::default()
    })
    .unwrap();
    let before = simulation.statistics();
    simulation.run(0);
    assert_eq!(simulation.month(), 0);
    assert_eq!(simulation.statistics(), before);
}
