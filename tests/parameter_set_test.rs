use std::collections::HashSet;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;

use dpi_params::error::ParamError;
use dpi_params::parameter_set::ParameterSet;
use dpi_params::schema::{self, Group, SynapseField, SynapseKind};
use dpi_params::units::{Dimension, Quantity, Unit};

#[test]
fn test_key_set_is_fixed() {
    let params = ParameterSet::dynapse();
    let keys: Vec<&str> = params.keys().collect();
    let expected = vec![
        "kn", "kp", "Ut", "Io", "Cmem", "Ispkthr", "refP", "Ireset", "Iconst", "Itau", "Ishunt",
        "Ith", "Ica", "Itauahp", "Ithahp", "Cahp", "Iahp", "Iath", "Iagain", "Ianorm",
        "C_syn_exc", "I_tau_syn_exc", "I_wo_syn_exc", "I_th_syn_exc", "I_syn_exc",
        "C_syn_exc2", "I_tau_syn_exc2", "I_wo_syn_exc2", "I_th_syn_exc2", "I_syn_exc2",
        "C_syn_inh", "I_tau_syn_inh", "I_wo_syn_inh", "I_th_syn_inh", "I_syn_inh",
        "C_syn_shunt", "I_tau_syn_shunt", "I_wo_syn_shunt", "I_th_syn_shunt", "I_syn_shunt",
    ];
    assert_eq!(keys, expected);
    assert_eq!(keys.iter().collect::<HashSet<_>>().len(), keys.len());
}

#[test]
fn test_dimensions_match_key_names() {
    let params = ParameterSet::dynapse();
    for (key, value) in params.iter() {
        let expected = if key.starts_with('C') {
            Dimension::Capacitance
        } else if key.starts_with('I') {
            Dimension::Current
        } else {
            match key {
                "refP" => Dimension::Time,
                "Ut" => Dimension::Voltage,
                "kn" | "kp" => Dimension::Dimensionless,
                _ => panic!("Unexpected key {}", key),
            }
        };
        assert_eq!(value.dimension(), expected, "{}", key);
        assert_eq!(schema::spec(key).unwrap().dimension, expected, "{}", key);
    }
}

#[test]
fn test_synapse_groups_share_sub_schema() {
    let params = ParameterSet::dynapse();
    let reference = params.synapse(SynapseKind::Exc).unwrap();
    for kind in SynapseKind::ALL {
        let keys: Vec<&str> = params
            .group(Group::Synapse(kind))
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        let expected: Vec<String> = SynapseField::ALL.iter().map(|field| field.key(kind)).collect();
        assert_eq!(keys, expected);

        let synapse = params.synapse(kind).unwrap();
        assert_eq!(synapse.kind, kind);
        for field in SynapseField::ALL {
            assert_eq!(synapse.field(field), reference.field(field));
            assert_eq!(synapse.field(field).dimension(), field.dimension());
        }
    }
}

#[test]
fn test_si_values() {
    let params = ParameterSet::dynapse();
    assert_relative_eq!(params.get("Cmem").unwrap().si_value(), 1.5e-12);
    assert_relative_eq!(params.get("Ispkthr").unwrap().si_value(), 1e-9);
    assert_relative_eq!(params.get("refP").unwrap().si_value(), 1e-3);
    assert_relative_eq!(params.get("Ut").unwrap().si_value(), 0.025);
    assert_relative_eq!(params.get("Io").unwrap().si_value(), 0.5e-12);
    // The feedback threshold is a fraction of the spiking threshold
    assert!(params.get("Iath").unwrap().si_value() < params.get("Ispkthr").unwrap().si_value());
}

#[test]
fn test_json_round_trip() {
    let params = ParameterSet::dynapse()
        .with_override("Ireset", Quantity::new(0.1, Unit::NanoAmpere))
        .unwrap();
    let json = params.to_json().unwrap();
    let reloaded = ParameterSet::from_json(&json).unwrap();

    assert_eq!(reloaded, params);
    for ((key, value), (new_key, new_value)) in params.iter().zip(reloaded.iter()) {
        assert_eq!(key, new_key);
        assert_eq!(value.magnitude(), new_value.magnitude());
        assert_eq!(value.unit(), new_value.unit());
    }
}

#[test]
fn test_file_round_trip() {
    let params = ParameterSet::dynapse();
    let file = NamedTempFile::new().unwrap();

    params.save_to(file.path()).unwrap();
    let reloaded = ParameterSet::load_from(file.path()).unwrap();

    assert_eq!(reloaded, params);
}

#[test]
fn test_file_keeps_declaration_order() {
    let file = NamedTempFile::new().unwrap();
    ParameterSet::dynapse().save_to(file.path()).unwrap();

    let content = std::fs::read_to_string(file.path()).unwrap();
    let kn = content.find("\"kn\"").unwrap();
    let cmem = content.find("\"Cmem\"").unwrap();
    let shunt = content.find("\"I_syn_shunt\"").unwrap();
    assert!(kn < cmem && cmem < shunt);
    assert!(content.contains("\"unit\": \"pF\""));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ParameterSet::load_from(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ParamError::IOError(_))));
}

#[test]
fn test_load_incomplete_file() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), r#"{"kn": {"magnitude": 0.75, "unit": ""}}"#).unwrap();
    let result = ParameterSet::load_from(file.path());
    assert_eq!(result, Err(ParamError::MissingKey("kp".to_string())));
}

#[test]
fn test_load_wrong_dimension_file() {
    let file = NamedTempFile::new().unwrap();
    let json = ParameterSet::dynapse()
        .to_json()
        .unwrap()
        .replace(r#""unit": "ms""#, r#""unit": "mV""#);
    std::fs::write(file.path(), json).unwrap();
    assert_eq!(
        ParameterSet::load_from(file.path()),
        Err(ParamError::DimensionMismatch {
            key: "refP".to_string(),
            expected: Dimension::Time,
            found: Dimension::Voltage,
        })
    );
}

#[test]
fn test_non_finite_override_cannot_reach_a_file() {
    let params = ParameterSet::dynapse();
    let inf: Result<Quantity, ParamError> = "inf pA".parse();
    assert!(matches!(inf, Err(ParamError::InvalidQuantity(_))));
    assert!(matches!(
        params.with_override("Itau", Quantity::new(f64::NAN, Unit::PicoAmpere)),
        Err(ParamError::InvalidQuantity(_))
    ));

    // The stored set is untouched and still round-trips through a file
    let file = NamedTempFile::new().unwrap();
    params.save_to(file.path()).unwrap();
    assert_eq!(ParameterSet::load_from(file.path()), Ok(params));
}
