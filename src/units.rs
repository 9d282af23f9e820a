use crate::CookAlongError;
use std::fmt;
use std::str::FromStr;

/// Millilitres per unit
pub const ML_PER_CUP: f64 = 240.0;
pub const ML_PER_TBSP: f64 = 15.0;
pub const ML_PER_TSP: f64 = 5.0;
pub const ML_PER_FL_OZ: f64 = 29.5735;
pub const ML_PER_PINT: f64 = 473.176;
pub const ML_PER_QUART: f64 = 946.353;
pub const ML_PER_GALLON: f64 = 3785.41;

/// Grams per unit
pub const G_PER_OZ: f64 = 28.3495;
pub const G_PER_LB: f64 = 453.592;
pub const G_PER_KG: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Cup,
    Tbsp,
    Tsp,
    Ml,
    FlOz,
    Pint,
    Quart,
    Gallon,
    Oz,
    Lb,
    G,
    Kg,
    Fahrenheit,
    Celsius,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    Volume,
    Weight,
    Temperature,
}

impl Unit {
    pub const ALL: [Unit; 14] = [
        Unit::Cup,
        Unit::Tbsp,
        Unit::Tsp,
        Unit::Ml,
        Unit::FlOz,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::Oz,
        Unit::Lb,
        Unit::G,
        Unit::Kg,
        Unit::Fahrenheit,
        Unit::Celsius,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Unit::Cup => "cup",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::Ml => "ml",
            Unit::FlOz => "floz",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Fahrenheit => "f",
            Unit::Celsius => "c",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Cup
            | Unit::Tbsp
            | Unit::Tsp
            | Unit::Ml
            | Unit::FlOz
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon => UnitCategory::Volume,
            Unit::Oz | Unit::Lb | Unit::G | Unit::Kg => UnitCategory::Weight,
            Unit::Fahrenheit | Unit::Celsius => UnitCategory::Temperature,
        }
    }

    /// Size of one unit in the category's base unit (ml or g)
    fn base_factor(&self) -> Option<f64> {
        match self {
            Unit::Cup => Some(ML_PER_CUP),
            Unit::Tbsp => Some(ML_PER_TBSP),
            Unit::Tsp => Some(ML_PER_TSP),
            Unit::Ml => Some(1.0),
            Unit::FlOz => Some(ML_PER_FL_OZ),
            Unit::Pint => Some(ML_PER_PINT),
            Unit::Quart => Some(ML_PER_QUART),
            Unit::Gallon => Some(ML_PER_GALLON),
            Unit::Oz => Some(G_PER_OZ),
            Unit::Lb => Some(G_PER_LB),
            Unit::G => Some(1.0),
            Unit::Kg => Some(G_PER_KG),
            Unit::Fahrenheit | Unit::Celsius => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Unit {
    type Err = CookAlongError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized = tag.trim().to_ascii_lowercase();
        let unit = match normalized.as_str() {
            "fl oz" | "fl. oz" => Some(Unit::FlOz),
            "°f" => Some(Unit::Fahrenheit),
            "°c" => Some(Unit::Celsius),
            other => Unit::ALL.into_iter().find(|unit| unit.tag() == other),
        };
        unit.ok_or_else(|| CookAlongError::Validation(format!("Unknown unit '{}'", tag.trim())))
    }
}

/// Round to two decimal places for display
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Convert without rounding.
pub fn convert_exact(amount: f64, from: Unit, to: Unit) -> Result<f64, CookAlongError> {
    if !amount.is_finite() {
        return Err(CookAlongError::Validation(format!(
            "Cannot convert {} {}",
            amount, from
        )));
    }

    let result = match (from, to) {
        (Unit::Fahrenheit, Unit::Celsius) => (amount - 32.0) * 5.0 / 9.0,
        (Unit::Celsius, Unit::Fahrenheit) => amount * 9.0 / 5.0 + 32.0,
        (Unit::Fahrenheit, Unit::Fahrenheit) | (Unit::Celsius, Unit::Celsius) => amount,
        _ if from.category() == to.category() => match (from.base_factor(), to.base_factor()) {
            (Some(from_factor), Some(to_factor)) => amount * from_factor / to_factor,
            _ => return Err(unsupported(from, to)),
        },
        _ => return Err(unsupported(from, to)),
    };

    if !result.is_finite() {
        return Err(CookAlongError::Validation(format!(
            "{} {} is out of range when converted from '{}' to '{}'",
            amount, from, from, to
        )));
    }
    Ok(result)
}

/// Convert and round to two decimals.
pub fn convert(amount: f64, from: Unit, to: Unit) -> Result<f64, CookAlongError> {
    convert_exact(amount, from, to).map(round2)
}

/// Convert using unit tags such as "cup" or "kg".
pub fn convert_tags(amount: f64, from: &str, to: &str) -> Result<f64, CookAlongError> {
    let (from_unit, to_unit) = match (from.parse::<Unit>(), to.parse::<Unit>()) {
        (Ok(from_unit), Ok(to_unit)) => (from_unit, to_unit),
        _ => {
            return Err(CookAlongError::Validation(format!(
                "Cannot convert from '{}' to '{}'",
                from.trim(),
                to.trim()
            )))
        }
    };
    convert(amount, from_unit, to_unit)
}

fn unsupported(from: Unit, to: Unit) -> CookAlongError {
    CookAlongError::Validation(format!("Cannot convert from '{}' to '{}'", from, to))
}
