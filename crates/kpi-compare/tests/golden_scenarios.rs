use kpi_compare::{build_model, Comparison};
use lever_core::{KpiId, LeverInputs, ModelConfig, ModelKind};

/// (name, lever values in canonical order, co2, circularity, roi, opex, margin)
fn lever_vectors() -> Vec<(&'static str, [f64; 8], [f64; 5])> {
    vec![
        (
            "baseline",
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0, 0.0],
            [21_300.0, 16.7, 2.21, 1.9, 0.18],
        ),
        (
            "documented scenario",
            [20.0, 40.0, 30.0, 20.0, 40.0, 30.0, 100.0, 10.0],
            [10_224.0, 26.2, 2.12, 2.4, 0.168],
        ),
        (
            "slider defaults",
            [20.0, 30.0, 10.0, 15.0, 40.0, 25.0, 100.0, 20.0],
            [13_525.5, 27.95, 2.145, 2.325, 0.17],
        ),
        // linear extrapolation is not clamped at zero emissions
        (
            "every lever at max",
            [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 150.0, 100.0],
            [-17_040.0, 76.7, 1.91, 3.4, 0.165],
        ),
    ]
}

fn assert_close(name: &str, kpi: KpiId, got: f64, want: f64) {
    assert!(
        (got - want).abs() <= 1e-9 * want.abs().max(1.0),
        "{name}: {kpi} = {got}, expected {want}"
    );
}

#[test]
fn lever_model_golden_vectors() {
    let model = build_model(ModelKind::Lever, ModelConfig::default());
    for (name, values, expected) in lever_vectors() {
        let inputs = LeverInputs::new(values).unwrap();
        let comparison = Comparison::run(model.as_ref(), &inputs).unwrap();
        for (kpi, want) in ModelKind::Lever.kpis().iter().zip(expected) {
            let got = comparison.scenario.headline(*kpi).unwrap();
            assert_close(name, *kpi, got, want);
        }
    }
}

#[test]
fn documented_scenario_delta() {
    let model = build_model(ModelKind::Lever, ModelConfig::default());
    let inputs = LeverInputs::new([20.0, 40.0, 30.0, 20.0, 40.0, 30.0, 100.0, 10.0]).unwrap();
    let comparison = Comparison::run(model.as_ref(), &inputs).unwrap();
    let co2 = comparison.deltas[&KpiId::Co2Emissions].as_ref().unwrap();
    assert_close("co2 delta", KpiId::Co2Emissions, co2.absolute, -11_076.0);
    assert_close("co2 delta", KpiId::Co2Emissions, co2.percent.unwrap(), -52.0);
}

#[test]
fn trajectory_final_step_for_slider_defaults() {
    let model = build_model(ModelKind::Trajectory, ModelConfig::default());
    let comparison = Comparison::run(model.as_ref(), &LeverInputs::slider_defaults()).unwrap();
    let expected = [
        (KpiId::EmissionsPerUnit, 15_710.0 / 11_356_850.0),
        (KpiId::CircularityIndex, 824.0 / 319.0),
        (KpiId::EnergyCostPerUnit, 7_800.0 / 11_356_850.0),
        (KpiId::ProfitMargin, 8_958_100.0 / 11_356_850.0),
        (KpiId::SustainabilityRoi, 4_290.0 / (398_750.0 + 1e-3)),
    ];
    for (kpi, want) in expected {
        let got = comparison.scenario.headline(kpi).unwrap();
        assert!(
            (got - want).abs() <= 1e-9 * want.abs().max(1e-3),
            "{kpi} = {got}, expected {want}"
        );
    }
}
