//! This crate provides the default circuit parameters of the Differential Pair Integrator (DPI)
//! neuron and its synapses, as implemented on the DYNAP-SE chip.
//!
//! Values are estimated empirically and are meant as a starting point for a given experiment.
//! Every value is a [`Quantity`](units::Quantity), i.e., a magnitude tagged with its physical unit.
//!
//! # Default Parameters
//!
//! ```rust
//! use dpi_params::parameter_set::ParameterSet;
//! use dpi_params::units::{Quantity, Unit};
//!
//! let params = ParameterSet::dynapse();
//!
//! assert_eq!(params.len(), 40);
//! assert_eq!(params.get("Cmem"), Some(Quantity::new(1.5, Unit::PicoFarad)));
//! assert_eq!(params.get("refP"), Some(Quantity::new(1.0, Unit::MilliSecond)));
//! ```
//!
//! # Synapses
//!
//! ```rust
//! use dpi_params::parameter_set::ParameterSet;
//! use dpi_params::schema::SynapseKind;
//! use dpi_params::units::{Quantity, Unit};
//!
//! let params = ParameterSet::dynapse();
//! let shunt = params.synapse(SynapseKind::Shunt).unwrap();
//!
//! assert_eq!(shunt.base_weight, Quantity::new(50.0, Unit::PicoAmpere));
//! assert_eq!(shunt.output_init, dpi_params::IO);
//! ```
//!
//! # Overriding Values
//!
//! ```rust
//! use dpi_params::parameter_set::ParameterSet;
//! use dpi_params::units::{Quantity, Unit};
//!
//! let params = ParameterSet::dynapse()
//!     .with_override("Itau", Quantity::new(4.0, Unit::PicoAmpere))
//!     .unwrap();
//! assert_eq!(params.get("Itau"), Some(Quantity::new(4.0, Unit::PicoAmpere)));
//!
//! // A capacitance cannot be replaced by a current
//! assert!(params.with_override("Cmem", Quantity::new(1.0, Unit::PicoAmpere)).is_err());
//! ```

pub mod error;
pub mod parameter_set;
pub mod schema;
pub mod units;

use units::{Quantity, Unit};

/// Subthreshold slope factor of n-type transistors.
pub const KAPPA_N: Quantity = Quantity::dimensionless(0.75);
/// Subthreshold slope factor of p-type transistors.
pub const KAPPA_P: Quantity = Quantity::dimensionless(0.66);
/// Thermal voltage at room temperature.
pub const UT: Quantity = Quantity::new(25.0, Unit::MilliVolt);
/// Dark current of the transistors.
pub const IO: Quantity = Quantity::new(0.5, Unit::PicoAmpere);
