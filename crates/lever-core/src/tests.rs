use crate::format::{display_value, group_thousands, signed_percent};
use crate::{
    EffectMatrix, KpiError, KpiId, KpiResult, KpiValue, LeverId, LeverInputs, ModelConfig,
    ModelKind, StateVector, ValidationError,
};
use rand::Rng;
use std::collections::BTreeMap;

#[test]
fn baseline_inputs_are_zero_effort_at_list_price() {
    let baseline = LeverInputs::baseline();
    for (lever, value) in baseline.iter() {
        if lever == LeverId::PricingLevel {
            assert_eq!(value, 100.0);
        } else {
            assert_eq!(value, 0.0);
        }
    }
}

#[test]
fn missing_lever_is_rejected() {
    let mut map: BTreeMap<LeverId, f64> = LeverInputs::slider_defaults().iter().collect();
    map.remove(&LeverId::CircularRd);
    assert_eq!(
        LeverInputs::from_map(&map),
        Err(ValidationError::MissingLever(LeverId::CircularRd))
    );
}

#[test]
fn out_of_range_and_non_finite_values_are_rejected() {
    let defaults = LeverInputs::slider_defaults();
    assert!(matches!(
        defaults.with(LeverId::PricingLevel, 40.0),
        Err(ValidationError::OutOfRange { lever: LeverId::PricingLevel, .. })
    ));
    assert!(matches!(
        defaults.with(LeverId::GreenMarketing, 100.5),
        Err(ValidationError::OutOfRange { .. })
    ));
    assert_eq!(
        defaults.with(LeverId::LocalSourcing, f64::NAN),
        Err(ValidationError::NonFinite(LeverId::LocalSourcing))
    );
    assert!(defaults.with(LeverId::PricingLevel, 150.0).is_ok());
    assert!(defaults.with(LeverId::MaterialGreening, 0.0).is_ok());
}

#[test]
fn random_in_range_values_are_accepted() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let values = LeverId::ALL.map(|l| {
            let (min, max) = l.bounds();
            rng.gen_range(min..=max)
        });
        let inputs = LeverInputs::new(values).expect("in range");
        for lever in LeverId::ALL {
            assert_eq!(inputs.get(lever), values[lever.index()]);
        }
    }
}

#[test]
fn unknown_lever_name_is_rejected() {
    let err = LeverInputs::from_pairs([("carbon_tax", 10.0)]).unwrap_err();
    assert_eq!(err, ValidationError::UnknownLever("carbon_tax".into()));
}

#[test]
fn inputs_deserialize_from_named_object() {
    let json = r#"{
        "material_greening": 20, "energy_optimization": 40,
        "takeback_incentives": 30, "recycling_investment": 20,
        "local_sourcing": 40, "green_marketing": 30,
        "pricing_level": 100, "circular_rd": 10
    }"#;
    let inputs: LeverInputs = serde_json::from_str(json).unwrap();
    assert_eq!(inputs.get(LeverId::EnergyOptimization), 40.0);
    assert_eq!(inputs.get(LeverId::CircularRd), 10.0);

    let back: LeverInputs = serde_json::from_str(&serde_json::to_string(&inputs).unwrap()).unwrap();
    assert_eq!(back, inputs);

    let bad = r#"{ "material_greening": 20 }"#;
    assert!(serde_json::from_str::<LeverInputs>(bad).is_err());
}

#[test]
fn pricing_normalizes_to_one_at_list_price() {
    let u = LeverInputs::baseline().normalized();
    assert_eq!(u[LeverId::PricingLevel.index()], 1.0);
    assert_eq!(u.iter().sum::<f64>(), 1.0);
}

#[test]
fn effect_matrix_is_linear() {
    let b = EffectMatrix::standard();
    let zero = b.apply(&[0.0; 8]);
    assert!(zero.iter().all(|x| *x == 0.0));

    let mut only_energy = [0.0; 8];
    only_energy[LeverId::EnergyOptimization.index()] = 1.0;
    let dx = b.apply(&only_energy);
    assert_eq!(dx[0], -1000.0);
    assert_eq!(dx[1], -3000.0);
    assert_eq!(dx[8], 30_000.0);

    let next = StateVector::initial().advanced_by(&dx);
    assert_eq!(next[0], 19_000.0);
}

#[test]
fn kpi_result_reports_missing_and_failed_kpis() {
    let mut result = KpiResult::new(ModelKind::Trajectory);
    result.insert(KpiId::ProfitMargin, Ok(KpiValue::Series(vec![0.8, 0.79])));
    result.insert(
        KpiId::EmissionsPerUnit,
        Err(KpiError::DivisionByZero {
            kpi: KpiId::EmissionsPerUnit,
            step: 3,
        }),
    );
    assert_eq!(result.headline(KpiId::ProfitMargin), Ok(0.79));
    assert!(matches!(
        result.headline(KpiId::EmissionsPerUnit),
        Err(KpiError::DivisionByZero { step: 3, .. })
    ));
    assert_eq!(
        result.headline(KpiId::GreenOpex),
        Err(KpiError::Unavailable { kpi: KpiId::GreenOpex })
    );
    assert_eq!(result.failures().count(), 1);
    let order: Vec<_> = result.iter().map(|(k, _)| k).collect();
    assert_eq!(order, vec![KpiId::EmissionsPerUnit, KpiId::ProfitMargin]);
}

#[test]
fn names_parse_back() {
    for kpi in KpiId::ALL {
        assert_eq!(kpi.name().parse::<KpiId>(), Ok(kpi));
    }
    for lever in LeverId::ALL {
        assert_eq!(lever.to_string().parse::<LeverId>(), Ok(lever));
    }
    assert_eq!("Trajectory".parse::<ModelKind>(), Ok(ModelKind::Trajectory));
    assert!("stochastic".parse::<ModelKind>().is_err());
}

#[test]
fn config_sections_default_independently() {
    let cfg: ModelConfig = serde_json::from_str(r#"{ "trajectory": { "horizon": 24 } }"#).unwrap();
    assert_eq!(cfg.trajectory.horizon, 24);
    assert_eq!(cfg.trajectory.energy_price_factor, 0.2);
    assert_eq!(cfg.lever.co2_base, 21_300.0);
    assert_eq!(cfg.baseline, LeverInputs::baseline());
    assert!(ModelConfig::default().with_horizon(0).is_err());
}

#[test]
fn summary_formatting_matches_dashboard_cards() {
    assert_eq!(group_thousands(1_234_567.4), "1,234,567");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(-1_000.0), "-1,000");
    assert_eq!(signed_percent(0.0), "+0.0%");
    assert_eq!(signed_percent(-0.0), "+0.0%");
    assert_eq!(signed_percent(-41.4), "-41.4%");
    assert_eq!(
        display_value(ModelKind::Trajectory, KpiId::CircularityIndex, 0.0909),
        "9.1 %"
    );
    assert_eq!(
        display_value(ModelKind::Trajectory, KpiId::EmissionsPerUnit, 0.002),
        "0.00 kg/unit"
    );
    assert_eq!(
        display_value(ModelKind::Trajectory, KpiId::EnergyCostPerUnit, 1234.6),
        "1,235 FCFA"
    );
}

#[test]
fn example_config_loads_to_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/model.example.json");
    assert_eq!(ModelConfig::load(path).unwrap(), ModelConfig::default());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = ModelConfig::load("/nonexistent/lever-sim.json").unwrap_err();
    assert!(matches!(err, crate::ConfigError::Io { .. }));
}

#[test]
fn non_finite_parameters_are_rejected() {
    assert_eq!(ModelConfig::default().validate(), Ok(()));

    let mut cfg = ModelConfig::default();
    cfg.trajectory.roi_epsilon = f64::NAN;
    assert_eq!(
        cfg.validate(),
        Err(ValidationError::NonFiniteParameter("trajectory.roi_epsilon".into()))
    );

    let mut cfg = ModelConfig::default();
    cfg.trajectory.energy_price_factor = f64::INFINITY;
    assert!(matches!(cfg.validate(), Err(ValidationError::NonFiniteParameter(_))));

    let mut cfg = ModelConfig::default();
    cfg.trajectory.effect_matrix.0[7][6] = f64::NEG_INFINITY;
    assert_eq!(
        cfg.validate(),
        Err(ValidationError::NonFiniteParameter("trajectory.effect_matrix[7][6]".into()))
    );

    let mut cfg = ModelConfig::default();
    cfg.lever.co2_base = f64::NAN;
    assert_eq!(
        cfg.validate(),
        Err(ValidationError::NonFiniteParameter("lever.co2_base".into()))
    );
}
