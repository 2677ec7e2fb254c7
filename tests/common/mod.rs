use carprice::application::ml::{ModelArtifact, PricePredictor};
use carprice::domain::car::{BodyStyle, CarFeatureRecord, Doors, FuelType, Make, Transmission};
use carprice::domain::errors::PredictionError;
use carprice::domain::schema::FeatureSchema;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FIXTURE_ROWS: usize = 240;

/// Deterministic synthetic fleet covering every categorical level.
pub fn synthetic_fleet() -> Vec<(CarFeatureRecord, f64)> {
    (0..FIXTURE_ROWS)
        .map(|i| {
            let record = CarFeatureRecord {
                year: 1995 + ((i * 7) % 30) as u16,
                mileage: 5_000 + ((i * 7919) % 200_000) as u32,
                make: Make::ALL[i % Make::ALL.len()],
                fuel_type: FuelType::ALL[(i / 3) % FuelType::ALL.len()],
                transmission: Transmission::ALL[(i / 2) % Transmission::ALL.len()],
                engine_size: 1.0 + ((i * 3) % 50) as f64 / 10.0,
                body_style: BodyStyle::ALL[(i / 5) % BodyStyle::ALL.len()],
                doors: Doors::ALL[i % Doors::ALL.len()],
            };
            let premium = match record.make {
                Make::Bmw | Make::Mercedes | Make::Audi => 9_000.0,
                Make::Toyota | Make::Honda => 2_500.0,
                _ => 0.0,
            };
            let price = 8_000.0 + f64::from(record.year - 1990) * 900.0
                - f64::from(record.mileage) * 0.04
                + record.engine_size * 1_500.0
                + premium;
            (record, price.max(1_500.0))
        })
        .collect()
}

/// Fits a small forest on [`synthetic_fleet`] with the form's schema.
pub fn fit_fixture_artifact() -> ModelArtifact {
    let schema = FeatureSchema::car_default();
    let fleet = synthetic_fleet();

    let x: Vec<Vec<f64>> = fleet
        .iter()
        .map(|(record, _)| schema.encode(&record.to_row()).expect("fixture row encodes"))
        .collect();
    let y: Vec<f64> = fleet.iter().map(|(_, price)| *price).collect();
    let n_features = schema.width();

    let x = DenseMatrix::from_2d_vec(&x).expect("fixture matrix");
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(20)
        .with_max_depth(8)
        .with_min_samples_split(2);
    let model = RandomForestRegressor::fit(&x, &y, params).expect("fixture forest fits");

    ModelArtifact::new("fixture-forest", "test", schema, n_features, model)
}

/// Writes a freshly fitted fixture artifact into `dir`.
pub fn write_fixture_artifact(dir: &Path) -> PathBuf {
    let path = dir.join("random_forest_model.json");
    fit_fixture_artifact()
        .save(&path)
        .expect("fixture artifact saves");
    path
}

/// Delegating predictor that counts model invocations.
pub struct CountingPredictor<P: PricePredictor> {
    pub inner: P,
    pub calls: AtomicUsize,
}

impl<P: PricePredictor> CountingPredictor<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: PricePredictor> PricePredictor for CountingPredictor<P> {
    fn schema(&self) -> &FeatureSchema {
        self.inner.schema()
    }

    fn predict_row(&self, design: &[f64]) -> Result<Vec<f64>, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict_row(design)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn version(&self) -> &str {
        self.inner.version()
    }
}
