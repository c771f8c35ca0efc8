//! The parameter set of a DPI neuron, i.e., a mapping from parameter key to unit-tagged value.
//!
//! A [`ParameterSet`] always holds exactly the keys of the [schema](crate::schema), each with a
//! value of the expected dimension. Every way of building one (defaults, pairs, JSON, overrides)
//! enforces it.
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParamError;
use crate::schema::{self, Group, SynapseField, SynapseKind};
use crate::units::{Quantity, Unit};
use crate::{IO, KAPPA_N, KAPPA_P, UT};

/// The five parameters of one synapse type.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SynapseParams {
    /// The synapse type these parameters belong to.
    pub kind: SynapseKind,
    /// Synaptic capacitance.
    pub capacitance: Quantity,
    /// Time constant current.
    pub tau: Quantity,
    /// Base weight current.
    pub base_weight: Quantity,
    /// Threshold / gain current.
    pub threshold: Quantity,
    /// Initial value of the output current.
    pub output_init: Quantity,
}

impl SynapseParams {
    /// Returns the value of the given field.
    pub fn field(&self, field: SynapseField) -> Quantity {
        match field {
            SynapseField::Capacitance => self.capacitance,
            SynapseField::TimeConstant => self.tau,
            SynapseField::BaseWeight => self.base_weight,
            SynapseField::Threshold => self.threshold,
            SynapseField::OutputInit => self.output_init,
        }
    }
}

/// Default value of a synapse field on the DYNAP-SE chip, identical for all synapse types.
fn dynapse_synapse_value(field: SynapseField) -> Quantity {
    match field {
        SynapseField::Capacitance => Quantity::new(1.5, Unit::PicoFarad),
        SynapseField::TimeConstant => Quantity::new(10.0, Unit::PicoAmpere),
        SynapseField::BaseWeight => Quantity::new(50.0, Unit::PicoAmpere),
        SynapseField::Threshold => Quantity::new(10.0, Unit::PicoAmpere),
        SynapseField::OutputInit => IO,
    }
}

/// Default values of the membrane, adaptation and positive feedback parameters.
const DYNAPSE_SOMA: [(&str, Quantity); 20] = [
    ("kn", KAPPA_N),
    ("kp", KAPPA_P),
    ("Ut", UT),
    ("Io", IO),
    ("Cmem", Quantity::new(1.5, Unit::PicoFarad)),
    ("Ispkthr", Quantity::new(1.0, Unit::NanoAmpere)),
    ("refP", Quantity::new(1.0, Unit::MilliSecond)),
    ("Ireset", Quantity::new(0.6, Unit::PicoAmpere)),
    ("Iconst", IO),
    ("Itau", Quantity::new(8.0, Unit::PicoAmpere)),
    ("Ishunt", IO),
    ("Ith", Quantity::new(0.9, Unit::PicoAmpere)),
    ("Ica", Quantity::new(2.0, Unit::PicoAmpere)),
    ("Itauahp", Quantity::new(1.0, Unit::PicoAmpere)),
    ("Ithahp", Quantity::new(1.0, Unit::PicoAmpere)),
    ("Cahp", Quantity::new(1.0, Unit::PicoFarad)),
    ("Iahp", IO),
    ("Iath", Quantity::new(0.5, Unit::NanoAmpere)),
    ("Iagain", Quantity::new(50.0, Unit::PicoAmpere)),
    ("Ianorm", Quantity::new(10.0, Unit::PicoAmpere)),
];

/// A complete set of DPI neuron parameters.
#[derive(Debug, PartialEq, Clone)]
pub struct ParameterSet {
    params: BTreeMap<String, Quantity>,
}

impl ParameterSet {
    /// Returns the default parameters of the DPI neuron as implemented on the DYNAP-SE chip.
    pub fn dynapse() -> Self {
        let mut params: BTreeMap<String, Quantity> = DYNAPSE_SOMA
            .iter()
            .map(|&(key, value)| (key.to_string(), value))
            .collect();
        for kind in SynapseKind::ALL {
            for field in SynapseField::ALL {
                params.insert(field.key(kind), dynapse_synapse_value(field));
            }
        }
        ParameterSet { params }
    }

    /// Build a parameter set from (key, value) pairs.
    /// Returns an error if a key is unknown, repeated or missing, or if a value is not finite or
    /// has the wrong dimension.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (K, Quantity)>,
        K: Into<String>,
    {
        let mut params = BTreeMap::new();
        for (key, value) in pairs {
            let key = key.into();
            check_value(&key, &value)?;
            if params.contains_key(&key) {
                return Err(ParamError::DuplicateKey(key));
            }
            params.insert(key, value);
        }
        if let Some(missing) = schema::keys().find(|key| !params.contains_key(*key)) {
            return Err(ParamError::MissingKey(missing.to_string()));
        }
        Ok(ParameterSet { params })
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if the set holds no parameter.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Returns the value of the given parameter, if any.
    pub fn get(&self, key: &str) -> Option<Quantity> {
        self.params.get(key).copied()
    }

    /// Returns the value of the given parameter, or an error if the key is unknown.
    pub fn try_get(&self, key: &str) -> Result<Quantity, ParamError> {
        self.get(key)
            .ok_or_else(|| ParamError::UnknownKey(key.to_string()))
    }

    /// Returns an iterator over the keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the (key, value) pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Quantity)> + '_ {
        schema::schema()
            .filter_map(|spec| self.params.get(spec.key).map(|value| (spec.key, *value)))
    }

    /// Returns the (key, value) pairs of the given group, in declaration order.
    pub fn group(&self, group: Group) -> Vec<(&'static str, Quantity)> {
        schema::schema()
            .filter(|spec| spec.group == group)
            .filter_map(|spec| self.get(spec.key).map(|value| (spec.key, value)))
            .collect()
    }

    /// Returns the parameters of the given synapse type.
    pub fn synapse(&self, kind: SynapseKind) -> Result<SynapseParams, ParamError> {
        let get = |field: SynapseField| self.try_get(&field.key(kind));
        Ok(SynapseParams {
            kind,
            capacitance: get(SynapseField::Capacitance)?,
            tau: get(SynapseField::TimeConstant)?,
            base_weight: get(SynapseField::BaseWeight)?,
            threshold: get(SynapseField::Threshold)?,
            output_init: get(SynapseField::OutputInit)?,
        })
    }

    /// Returns a copy of the parameter set with the given parameter replaced.
    /// The key must be part of the schema and the new value must have the same dimension.
    pub fn with_override(&self, key: &str, value: Quantity) -> Result<Self, ParamError> {
        self.with_overrides([(key, value)])
    }

    /// Returns a copy of the parameter set with the given parameters replaced, in order.
    /// Nothing is replaced if any of the overrides is invalid.
    pub fn with_overrides<I, K>(&self, overrides: I) -> Result<Self, ParamError>
    where
        I: IntoIterator<Item = (K, Quantity)>,
        K: AsRef<str>,
    {
        let mut params = self.params.clone();
        for (key, value) in overrides {
            let key = key.as_ref();
            check_value(key, &value)?;
            if let Some(previous) = params.insert(key.to_string(), value) {
                log::debug!("Override {}: {} -> {}", key, previous, value);
            }
        }
        Ok(ParameterSet { params })
    }

    /// Serialize the parameter set to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, ParamError> {
        serde_json::to_string_pretty(self).map_err(|e| ParamError::SerializationError(e.to_string()))
    }

    /// Deserialize a parameter set from a JSON string.
    /// Schema violations are reported with their own error variants, e.g., `MissingKey`.
    pub fn from_json(json: &str) -> Result<Self, ParamError> {
        let pairs: RawPairs =
            serde_json::from_str(json).map_err(|e| ParamError::SerializationError(e.to_string()))?;
        ParameterSet::from_pairs(pairs.0)
    }

    /// Save the parameter set to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ParamError> {
        let file = File::create(path.as_ref()).map_err(|e| ParamError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| ParamError::SerializationError(e.to_string()))?;
        writer.flush().map_err(|e| ParamError::IOError(e.to_string()))?;
        log::debug!("Parameters saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a parameter set from a file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ParamError> {
        let file = File::open(path.as_ref()).map_err(|e| ParamError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        let pairs: RawPairs = serde_json::from_reader(reader)
            .map_err(|e| ParamError::SerializationError(e.to_string()))?;
        let params = ParameterSet::from_pairs(pairs.0)?;
        log::debug!(
            "{} parameters loaded from {}",
            params.len(),
            path.as_ref().display()
        );
        Ok(params)
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet::dynapse()
    }
}

/// Check that the key is part of the schema and that the value is finite and has the expected
/// dimension.
fn check_value(key: &str, value: &Quantity) -> Result<(), ParamError> {
    let spec = schema::spec(key).ok_or_else(|| ParamError::UnknownKey(key.to_string()))?;
    if !value.is_finite() {
        return Err(ParamError::InvalidQuantity(format!("{} = {}", key, value)));
    }
    if spec.dimension != value.dimension() {
        return Err(ParamError::DimensionMismatch {
            key: key.to_string(),
            expected: spec.dimension,
            found: value.dimension(),
        });
    }
    Ok(())
}

/// One line per parameter under its group header.
/// The alternate form (`{:#}`) appends the description of each parameter.
impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for group in Group::ALL {
            writeln!(f, "[{}]", group)?;
            for spec in schema::schema().filter(|spec| spec.group == group) {
                let Some(value) = self.get(spec.key) else {
                    continue;
                };
                if f.alternate() {
                    let value = value.to_string();
                    writeln!(f, "  {:<16}{:<10}# {}", spec.key, value, spec.description)?;
                } else {
                    writeln!(f, "  {:<16}{}", spec.key, value)?;
                }
            }
        }
        Ok(())
    }
}

// Serialized as a JSON object in declaration order.
impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// The (key, value) entries of a JSON object, in file order and with repeated keys kept.
struct RawPairs(Vec<(String, Quantity)>);

struct RawPairsVisitor;

impl<'de> Visitor<'de> for RawPairsVisitor {
    type Value = RawPairs;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map from parameter key to quantity")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs: Vec<(String, Quantity)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Quantity>()? {
            pairs.push((key, value));
        }
        Ok(RawPairs(pairs))
    }
}

impl<'de> Deserialize<'de> for RawPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawPairsVisitor)
    }
}

impl<'de> Deserialize<'de> for ParameterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = RawPairs::deserialize(deserializer)?;
        ParameterSet::from_pairs(pairs.0).map_err(de::Error::custom)
    }
}
