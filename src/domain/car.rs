use crate::domain::schema::{FeatureValue, TabularRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Bounds of the form widgets. Hosts clamp user input to these.
pub const MIN_YEAR: u16 = 1990;
pub const MAX_YEAR: u16 = 2024;
pub const MAX_MILEAGE: u32 = 500_000;
pub const MIN_ENGINE_SIZE: f64 = 1.0;
pub const MAX_ENGINE_SIZE: f64 = 6.0;
pub const ENGINE_SIZE_STEP: f64 = 0.1;

/// Column names produced by [`CarFeatureRecord::to_row`], in form order.
pub const CAR_FEATURE_NAMES: &[&str] = &[
    "year",
    "mileage",
    "make",
    "fuel_type",
    "transmission",
    "engine_size",
    "body_style",
    "doors",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {field}: '{value}'. Expected one of: {expected}")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// Generates a closed categorical enum whose wire value is the label shown in the form.
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn labels() -> Vec<String> {
                Self::ALL.iter().map(|v| v.as_str().to_string()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ParseFieldError {
                        field: $field,
                        value: s.to_string(),
                        expected: Self::labels().join(", "),
                    })
            }
        }
    };
}

categorical!(
    /// Manufacturer offered in the form.
    Make, "make", {
        Toyota => "Toyota",
        Honda => "Honda",
        Ford => "Ford",
        Bmw => "BMW",
        Mercedes => "Mercedes",
        Audi => "Audi",
        Chevrolet => "Chevrolet",
        Nissan => "Nissan",
        Hyundai => "Hyundai",
        Kia => "Kia",
    }
);

categorical!(FuelType, "fuel_type", {
    Gasoline => "Gasoline",
    Diesel => "Diesel",
    Electric => "Electric",
    Hybrid => "Hybrid",
});

categorical!(Transmission, "transmission", {
    Automatic => "Automatic",
    Manual => "Manual",
});

categorical!(BodyStyle, "body_style", {
    Sedan => "Sedan",
    Suv => "SUV",
    Coupe => "Coupe",
    Truck => "Truck",
    Van => "Van",
});

/// Door count. Sent to the model as an integer, not a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Doors {
    Two,
    Four,
    Five,
}

impl Doors {
    pub const ALL: &'static [Doors] = &[Doors::Two, Doors::Four, Doors::Five];

    pub fn count(&self) -> u8 {
        match self {
            Doors::Two => 2,
            Doors::Four => 4,
            Doors::Five => 5,
        }
    }
}

impl TryFrom<u8> for Doors {
    type Error = ParseFieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.count() == value)
            .ok_or_else(|| ParseFieldError {
                field: "doors",
                value: value.to_string(),
                expected: "2, 4, 5".to_string(),
            })
    }
}

impl From<Doors> for u8 {
    fn from(doors: Doors) -> Self {
        doors.count()
    }
}

impl fmt::Display for Doors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl FromStr for Doors {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFieldError {
            field: "doors",
            value: s.to_string(),
            expected: "2, 4, 5".to_string(),
        };
        let count: u8 = s.trim().parse().map_err(|_| invalid())?;
        Doors::try_from(count).map_err(|_| invalid())
    }
}

/// Rounds an engine displacement to the form's 0.1 L step.
pub fn snap_engine_size(litres: f64) -> f64 {
    (litres / ENGINE_SIZE_STEP).round() * ENGINE_SIZE_STEP
}

/// One car described by the form. Built fresh for every prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarFeatureRecord {
    pub year: u16,
    pub mileage: u32,
    pub make: Make,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub engine_size: f64,
    pub body_style: BodyStyle,
    pub doors: Doors,
}

impl Default for CarFeatureRecord {
    /// Initial widget values of the form.
    fn default() -> Self {
        Self {
            year: 2020,
            mileage: 50_000,
            make: Make::Toyota,
            fuel_type: FuelType::Gasoline,
            transmission: Transmission::Automatic,
            engine_size: 2.0,
            body_style: BodyStyle::Sedan,
            doors: Doors::Four,
        }
    }
}

impl CarFeatureRecord {
    /// Builds the single named row handed to the model.
    pub fn to_row(&self) -> TabularRow {
        let mut row = TabularRow::new();
        row.insert("year", FeatureValue::Integer(i64::from(self.year)));
        row.insert("mileage", FeatureValue::Integer(i64::from(self.mileage)));
        row.insert("make", FeatureValue::category(self.make.as_str()));
        row.insert("fuel_type", FeatureValue::category(self.fuel_type.as_str()));
        row.insert(
            "transmission",
            FeatureValue::category(self.transmission.as_str()),
        );
        row.insert("engine_size", FeatureValue::Float(self.engine_size));
        row.insert("body_style", FeatureValue::category(self.body_style.as_str()));
        row.insert("doors", FeatureValue::Integer(i64::from(self.doors.count())));
        row
    }

    /// (label, value) pairs for the "Input Features" table.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("year", self.year.to_string()),
            ("mileage", self.mileage.to_string()),
            ("make", self.make.to_string()),
            ("fuel_type", self.fuel_type.to_string()),
            ("transmission", self.transmission.to_string()),
            ("engine_size", format!("{:.1}", self.engine_size)),
            ("body_style", self.body_style.to_string()),
            ("doors", self.doors.to_string()),
        ]
    }
}

impl fmt::Display for CarFeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.display_rows() {
            writeln!(f, "  {:<13} {}", label, value)?;
        }
        Ok(())
    }
}
