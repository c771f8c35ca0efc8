//! Unit-tagged physical quantities.
//!
//! A [`Quantity`] pairs a magnitude with the [`Unit`] it is expressed in. The magnitude is kept
//! exactly as written (e.g., `1.5` with [`Unit::PicoFarad`]), the SI value is only computed on
//! demand.
//!
//! # Examples
//!
//! ```
//! use dpi_params::units::{Dimension, Quantity, Unit};
//!
//! let cmem = Quantity::new(1.5, Unit::PicoFarad);
//! assert_eq!(cmem.dimension(), Dimension::Capacitance);
//! assert_eq!(cmem.to_string(), "1.5 pF");
//! assert_eq!("1.5 pF".parse::<Quantity>().unwrap(), cmem);
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// The physical dimension measured by a unit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Dimension {
    Dimensionless,
    Capacitance,
    Current,
    Time,
    Voltage,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Dimension::Dimensionless => "dimensionless",
            Dimension::Capacitance => "capacitance",
            Dimension::Current => "current",
            Dimension::Time => "time",
            Dimension::Voltage => "voltage",
        };
        write!(f, "{}", name)
    }
}

/// The units a parameter value can be tagged with.
/// Serialized by symbol, the dimensionless unit by the empty string.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "")]
    Dimensionless,
    #[serde(rename = "F")]
    Farad,
    #[serde(rename = "pF")]
    PicoFarad,
    #[serde(rename = "s")]
    Second,
    #[serde(rename = "ms")]
    MilliSecond,
    #[serde(rename = "A")]
    Ampere,
    #[serde(rename = "pA")]
    PicoAmpere,
    #[serde(rename = "nA")]
    NanoAmpere,
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "mV")]
    MilliVolt,
}

impl Unit {
    /// All supported units.
    pub const ALL: [Unit; 10] = [
        Unit::Dimensionless,
        Unit::Farad,
        Unit::PicoFarad,
        Unit::Second,
        Unit::MilliSecond,
        Unit::Ampere,
        Unit::PicoAmpere,
        Unit::NanoAmpere,
        Unit::Volt,
        Unit::MilliVolt,
    ];

    /// Returns the dimension measured by the unit.
    pub const fn dimension(&self) -> Dimension {
        match self {
            Unit::Dimensionless => Dimension::Dimensionless,
            Unit::Farad | Unit::PicoFarad => Dimension::Capacitance,
            Unit::Second | Unit::MilliSecond => Dimension::Time,
            Unit::Ampere | Unit::PicoAmpere | Unit::NanoAmpere => Dimension::Current,
            Unit::Volt | Unit::MilliVolt => Dimension::Voltage,
        }
    }

    /// Returns the factor to apply to a magnitude in this unit to obtain its SI value.
    pub const fn scale(&self) -> f64 {
        match self {
            Unit::Dimensionless | Unit::Farad | Unit::Second | Unit::Ampere | Unit::Volt => 1.0,
            Unit::MilliSecond | Unit::MilliVolt => 1e-3,
            Unit::NanoAmpere => 1e-9,
            Unit::PicoFarad | Unit::PicoAmpere => 1e-12,
        }
    }

    /// Returns the unit symbol, empty for dimensionless values.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::Dimensionless => "",
            Unit::Farad => "F",
            Unit::PicoFarad => "pF",
            Unit::Second => "s",
            Unit::MilliSecond => "ms",
            Unit::Ampere => "A",
            Unit::PicoAmpere => "pA",
            Unit::NanoAmpere => "nA",
            Unit::Volt => "V",
            Unit::MilliVolt => "mV",
        }
    }

    /// Returns the unit with the given symbol.
    pub fn from_symbol(symbol: &str) -> Result<Unit, ParamError> {
        Unit::ALL
            .iter()
            .find(|unit| unit.symbol() == symbol)
            .copied()
            .ok_or_else(|| ParamError::InvalidUnit(symbol.to_string()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A magnitude tagged with a unit.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a new quantity.
    pub const fn new(magnitude: f64, unit: Unit) -> Self {
        Quantity { magnitude, unit }
    }

    /// Create a new dimensionless quantity.
    pub const fn dimensionless(magnitude: f64) -> Self {
        Quantity::new(magnitude, Unit::Dimensionless)
    }

    /// Returns the magnitude, expressed in the quantity's own unit.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the unit of the quantity.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the dimension of the quantity.
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Returns true if the magnitude is a finite number, i.e., neither infinite nor NaN.
    pub fn is_finite(&self) -> bool {
        self.magnitude.is_finite()
    }

    /// Returns the value of the quantity in SI base units (farad, ampere, second, volt).
    pub fn si_value(&self) -> f64 {
        self.magnitude * self.unit.scale()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.magnitude),
            unit => write!(f, "{} {}", self.magnitude, unit),
        }
    }
}

impl FromStr for Quantity {
    type Err = ParamError;

    /// Parse a quantity of the form `"<magnitude> <symbol>"`, or a bare magnitude for
    /// dimensionless values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let magnitude = tokens
            .next()
            .ok_or_else(|| ParamError::InvalidQuantity(s.to_string()))?
            .parse::<f64>()
            .map_err(|e| ParamError::InvalidQuantity(format!("{}: {}", s, e)))?;
        if !magnitude.is_finite() {
            return Err(ParamError::InvalidQuantity(format!("{}: non-finite magnitude", s)));
        }
        let unit = match tokens.next() {
            Some(symbol) => Unit::from_symbol(symbol)?,
            None => Unit::Dimensionless,
        };
        if tokens.next().is_some() {
            return Err(ParamError::InvalidQuantity(s.to_string()));
        }
        Ok(Quantity::new(magnitude, unit))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_unit_dimension() {
        assert_eq!(Unit::PicoFarad.dimension(), Dimension::Capacitance);
        assert_eq!(Unit::NanoAmpere.dimension(), Dimension::Current);
        assert_eq!(Unit::PicoAmpere.dimension(), Dimension::Current);
        assert_eq!(Unit::MilliSecond.dimension(), Dimension::Time);
        assert_eq!(Unit::MilliVolt.dimension(), Dimension::Voltage);
        assert_eq!(Unit::Dimensionless.dimension(), Dimension::Dimensionless);
    }

    #[test]
    fn test_unit_symbols_are_unique() {
        for unit in Unit::ALL {
            assert_eq!(Unit::from_symbol(unit.symbol()), Ok(unit));
        }
        assert_eq!(
            Unit::from_symbol("uF"),
            Err(ParamError::InvalidUnit("uF".to_string()))
        );
    }

    #[test]
    fn test_quantity_si_value() {
        assert_relative_eq!(Quantity::new(1.5, Unit::PicoFarad).si_value(), 1.5e-12);
        assert_relative_eq!(Quantity::new(1.0, Unit::NanoAmpere).si_value(), 1e-9);
        assert_relative_eq!(Quantity::new(25.0, Unit::MilliVolt).si_value(), 0.025);
        assert_relative_eq!(Quantity::new(1.0, Unit::MilliSecond).si_value(), 1e-3);
        assert_relative_eq!(Quantity::dimensionless(0.75).si_value(), 0.75);
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::new(1.5, Unit::PicoFarad).to_string(), "1.5 pF");
        assert_eq!(Quantity::new(1.0, Unit::NanoAmpere).to_string(), "1 nA");
        assert_eq!(Quantity::dimensionless(0.66).to_string(), "0.66");
    }

    #[test]
    fn test_quantity_from_str() {
        assert_eq!(
            "0.6 pA".parse::<Quantity>(),
            Ok(Quantity::new(0.6, Unit::PicoAmpere))
        );
        assert_eq!("  2   ms ".parse::<Quantity>(), Ok(Quantity::new(2.0, Unit::MilliSecond)));
        assert_eq!("0.75".parse::<Quantity>(), Ok(Quantity::dimensionless(0.75)));
        assert!(matches!(
            "abc pA".parse::<Quantity>(),
            Err(ParamError::InvalidQuantity(_))
        ));
        assert!(matches!(
            "".parse::<Quantity>(),
            Err(ParamError::InvalidQuantity(_))
        ));
        assert_eq!(
            "1.0 pA extra".parse::<Quantity>(),
            Err(ParamError::InvalidQuantity("1.0 pA extra".to_string()))
        );
        assert!(matches!(
            "inf pA".parse::<Quantity>(),
            Err(ParamError::InvalidQuantity(_))
        ));
        assert!(matches!(
            "NaN pA".parse::<Quantity>(),
            Err(ParamError::InvalidQuantity(_))
        ));
        assert!(matches!(
            "-inf".parse::<Quantity>(),
            Err(ParamError::InvalidQuantity(_))
        ));
        assert_eq!(
            "1.0 uA".parse::<Quantity>(),
            Err(ParamError::InvalidUnit("uA".to_string()))
        );
    }

    #[test]
    fn test_quantity_serde() {
        let quantity = Quantity::new(1.5, Unit::PicoFarad);
        let json = serde_json::to_string(&quantity).unwrap();
        assert_eq!(json, r#"{"magnitude":1.5,"unit":"pF"}"#);

        let kappa: Quantity = serde_json::from_str(r#"{"magnitude":0.75,"unit":""}"#).unwrap();
        assert_eq!(kappa, Quantity::dimensionless(0.75));
    }
}
