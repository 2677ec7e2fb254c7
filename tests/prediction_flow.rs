mod common;

use carprice::application::ml::{Estimate, InferenceAdapter, ModelArtifact, ModelLoader};
use carprice::domain::car::{BodyStyle, CarFeatureRecord, Doors, FuelType, Make, Transmission};
use carprice::domain::errors::{LoadError, ValidationWarning};
use common::{CountingPredictor, synthetic_fleet, write_fixture_artifact};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::io::Write;
use std::sync::Arc;
use std::thread;

type CountingAdapter = InferenceAdapter<CountingPredictor<ModelArtifact>>;

fn loaded_adapter() -> (tempfile::TempDir, CountingAdapter) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture_artifact(dir.path());
    let artifact = ModelLoader::load(&path).expect("fixture artifact loads");
    let adapter = InferenceAdapter::new(Arc::new(CountingPredictor::new(artifact)));
    (dir, adapter)
}

fn assert_currency_format(text: &str) {
    let digits = text.strip_prefix('$').expect("leading dollar sign");
    let (whole, cents) = digits.split_once('.').expect("decimal point");
    assert_eq!(cents.len(), 2, "two decimal places in {}", text);
    assert!(cents.chars().all(|c| c.is_ascii_digit()));
    for (i, group) in whole.split(',').enumerate() {
        assert!(group.chars().all(|c| c.is_ascii_digit()), "{}", text);
        if i == 0 {
            assert!((1..=3).contains(&group.len()), "{}", text);
        } else {
            assert_eq!(group.len(), 3, "{}", text);
        }
    }
}

#[test]
fn test_scenario_a_default_sedan_gets_a_price() {
    let (_dir, adapter) = loaded_adapter();
    let record = CarFeatureRecord {
        year: 2020,
        mileage: 50_000,
        make: Make::Toyota,
        fuel_type: FuelType::Gasoline,
        transmission: Transmission::Automatic,
        engine_size: 2.0,
        body_style: BodyStyle::Sedan,
        doors: Doors::Four,
    };

    let estimate = adapter.estimate(&record).expect("prediction succeeds");
    let result = match estimate {
        Estimate::Price(result) => result,
        other => panic!("valid record was rejected: {:?}", other),
    };

    assert!(result.price >= Decimal::ZERO);
    assert_currency_format(&result.formatted());
    assert_eq!(adapter.predictor().calls(), 1);
}

#[test]
fn test_scenario_b_old_year_is_gated() {
    let (_dir, adapter) = loaded_adapter();
    let record = CarFeatureRecord {
        year: 1985,
        ..Default::default()
    };

    let estimate = adapter.estimate(&record).expect("gate never errors");
    assert_eq!(
        estimate,
        Estimate::Rejected(vec![ValidationWarning::YearBeforeMinimum {
            year: 1985,
            min: 1990
        }])
    );
    assert_eq!(adapter.predictor().calls(), 0);
}

#[test]
fn test_scenario_c_zero_mileage_is_gated() {
    let (_dir, adapter) = loaded_adapter();
    let record = CarFeatureRecord {
        mileage: 0,
        ..Default::default()
    };

    let estimate = adapter.estimate(&record).expect("gate never errors");
    assert_eq!(
        estimate,
        Estimate::Rejected(vec![ValidationWarning::NonPositiveMileage { mileage: 0 }])
    );
    assert_eq!(adapter.predictor().calls(), 0);
}

#[test]
fn test_scenario_d_missing_artifact_halts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = ModelLoader::load(dir.path().join("random_forest_model.json")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(err.user_message().contains("random_forest_model.json"));
}

#[test]
fn test_corrupt_artifact_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"{\"format_version\": 1, \"model\": [1, 2, 3]}")
        .expect("write");
    let err = ModelLoader::load(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt { .. }));
}

#[test]
fn test_prediction_is_deterministic() {
    let (_dir, adapter) = loaded_adapter();
    let record = CarFeatureRecord {
        make: Make::Audi,
        body_style: BodyStyle::Coupe,
        ..Default::default()
    };

    let first = adapter.predict(&record).expect("first prediction");
    let second = adapter.predict(&record).expect("second prediction");
    assert_eq!(first, second);
}

#[test]
fn test_every_categorical_combination_yields_one_price() {
    let (_dir, adapter) = loaded_adapter();
    let prices: Vec<f64> = synthetic_fleet().iter().map(|(_, p)| *p).collect();
    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = Decimal::from_f64(min).expect("min").floor();
    let max = Decimal::from_f64(max).expect("max").ceil();

    for make in Make::ALL {
        for fuel_type in FuelType::ALL {
            for body_style in BodyStyle::ALL {
                let record = CarFeatureRecord {
                    make: *make,
                    fuel_type: *fuel_type,
                    body_style: *body_style,
                    ..Default::default()
                };
                let result = adapter.predict(&record).expect("valid record predicts");
                // A forest averages leaf means, so it never leaves the target range
                assert!(result.price >= min && result.price <= max, "{}", result);
            }
        }
    }

    let expected = Make::ALL.len() * FuelType::ALL.len() * BodyStyle::ALL.len();
    assert_eq!(adapter.predictor().calls(), expected);
}

#[test]
fn test_loaded_model_is_shared_across_threads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture_artifact(dir.path());
    let adapter = InferenceAdapter::new(Arc::new(ModelLoader::load(&path).expect("loads")));
    let record = CarFeatureRecord::default();
    let expected = adapter.predict(&record).expect("baseline");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let adapter = adapter.clone();
            let record = record.clone();
            thread::spawn(move || adapter.predict(&record))
        })
        .collect();

    for handle in handles {
        let result = handle.join().expect("thread").expect("prediction");
        assert_eq!(result, expected);
    }
}
