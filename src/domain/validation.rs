use crate::domain::car::{CarFeatureRecord, MIN_YEAR};
use crate::domain::errors::ValidationWarning;

/// Combined message shown whenever the gate rejects a record.
pub const VALIDATION_MESSAGE: &str =
    "Please ensure mileage is greater than 0 and year is 1990 or later.";

/// Pre-inference gate.
///
/// Only the two checks the form enforces before enabling prediction are made
/// here; widget bounds are the hosts' business.
pub struct InputGate;

impl InputGate {
    /// Returns every violated constraint. Empty means the model may be called.
    pub fn check(record: &CarFeatureRecord) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if record.mileage == 0 {
            warnings.push(ValidationWarning::NonPositiveMileage {
                mileage: record.mileage,
            });
        }

        if record.year < MIN_YEAR {
            warnings.push(ValidationWarning::YearBeforeMinimum {
                year: record.year,
                min: MIN_YEAR,
            });
        }

        warnings
    }

    pub fn is_valid(record: &CarFeatureRecord) -> bool {
        Self::check(record).is_empty()
    }
}
