use mars_colony::{
    export::{import_csv, HistoryRow},
    ParameterForm, Simulation, SimulationConfig,
};
use tempfile::tempdir;

#[test]
fn csv_round_trip_after_a_run() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("reports").join("colony.csv");

    let mut simulation = Simulation::new(SimulationConfig {
        seed: Some(77),
        initial_population: 40,
        ..SimulationConfig::default()
    })
    .unwrap();
    simulation.run(24);
    simulation.export_csv(&path).expect("export succeeds");

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("Month,Population Size,Average Health")
    );
    assert_eq!(text.lines().count(), 25);

    let rows: Vec<HistoryRow> = import_csv(&path).expect("import succeeds");
    assert_eq!(rows, simulation.history());
    assert!(rows.iter().all(|row| row.population_size == 40));
    assert_eq!(rows.first().map(|row| row.month), Some(1));
    assert_eq!(rows.last().map(|row| row.month), Some(24));
}

#[test]
fn reset_history_exports_header_only() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("empty.csv");

    let mut simulation = Simulation::new(SimulationConfig {
        seed: Some(3),
        ..SimulationConfig::default()
    })
    .unwrap();
    simulation.run(6);
    simulation
        .apply(&ParameterForm {
            initial_population: "12".to_string(),
            ..ParameterForm::default()
        })
        .unwrap();
    simulation.export_csv(&path).unwrap();

    assert!(import_csv(&path).unwrap().is_empty());
    assert_eq!(simulation.population().len(), 12);
}
