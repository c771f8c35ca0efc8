//! The fixed set of parameter keys recognized by the DPI neuron model.
//!
//! Every key belongs to a [`Group`] and is expected to hold a value of a given [`Dimension`].
//! The four synapse groups share the same five-field sub-schema, see [`SynapseField`].
use std::fmt;

use crate::units::Dimension;

/// The synapse types of a DPI neuron.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SynapseKind {
    /// Excitatory synapse.
    Exc,
    /// Secondary excitatory synapse.
    Exc2,
    /// Subtractive inhibitory synapse.
    Inh,
    /// Shunting (divisive) inhibitory synapse.
    Shunt,
}

impl SynapseKind {
    pub const ALL: [SynapseKind; 4] = [
        SynapseKind::Exc,
        SynapseKind::Exc2,
        SynapseKind::Inh,
        SynapseKind::Shunt,
    ];

    /// Returns the suffix appended to the keys of this synapse type.
    pub const fn suffix(&self) -> &'static str {
        match self {
            SynapseKind::Exc => "exc",
            SynapseKind::Exc2 => "exc2",
            SynapseKind::Inh => "inh",
            SynapseKind::Shunt => "shunt",
        }
    }
}

impl fmt::Display for SynapseKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// The five fields every synapse group repeats.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SynapseField {
    /// Synaptic capacitance.
    Capacitance,
    /// Time-constant current; the time constant is inversely proportional to it.
    TimeConstant,
    /// Base weight current, scaled by the connection weight.
    BaseWeight,
    /// Threshold / gain current.
    Threshold,
    /// Initial value of the output current.
    OutputInit,
}

impl SynapseField {
    pub const ALL: [SynapseField; 5] = [
        SynapseField::Capacitance,
        SynapseField::TimeConstant,
        SynapseField::BaseWeight,
        SynapseField::Threshold,
        SynapseField::OutputInit,
    ];

    const fn prefix(&self) -> &'static str {
        match self {
            SynapseField::Capacitance => "C_syn_",
            SynapseField::TimeConstant => "I_tau_syn_",
            SynapseField::BaseWeight => "I_wo_syn_",
            SynapseField::Threshold => "I_th_syn_",
            SynapseField::OutputInit => "I_syn_",
        }
    }

    /// Returns the key of this field for the given synapse type, e.g., `I_tau_syn_inh`.
    pub fn key(&self, kind: SynapseKind) -> String {
        format!("{}{}", self.prefix(), kind.suffix())
    }

    /// Returns the dimension of the field's value, the same for every synapse type.
    pub const fn dimension(&self) -> Dimension {
        match self {
            SynapseField::Capacitance => Dimension::Capacitance,
            _ => Dimension::Current,
        }
    }
}

/// The conceptual group a parameter belongs to.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Group {
    Membrane,
    Adaptation,
    PositiveFeedback,
    Synapse(SynapseKind),
}

impl Group {
    /// All groups, in declaration order.
    pub const ALL: [Group; 7] = [
        Group::Membrane,
        Group::Adaptation,
        Group::PositiveFeedback,
        Group::Synapse(SynapseKind::Exc),
        Group::Synapse(SynapseKind::Exc2),
        Group::Synapse(SynapseKind::Inh),
        Group::Synapse(SynapseKind::Shunt),
    ];
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Group::Membrane => write!(f, "membrane"),
            Group::Adaptation => write!(f, "adaptation"),
            Group::PositiveFeedback => write!(f, "positive feedback"),
            Group::Synapse(kind) => write!(f, "synapse ({})", kind),
        }
    }
}

/// Descriptor of a single parameter key.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ParamSpec {
    pub key: &'static str,
    pub group: Group,
    pub dimension: Dimension,
    pub description: &'static str,
}

const fn param(
    key: &'static str,
    group: Group,
    dimension: Dimension,
    description: &'static str,
) -> ParamSpec {
    ParamSpec {
        key,
        group,
        dimension,
        description,
    }
}

const fn synapse_params(kind: SynapseKind, keys: [&'static str; 5]) -> [ParamSpec; 5] {
    let group = Group::Synapse(kind);
    [
        param(
            keys[0],
            group,
            Dimension::Capacitance,
            "Synaptic capacitance, fixed at layout time",
        ),
        param(
            keys[1],
            group,
            Dimension::Current,
            "Synaptic time constant current, the time constant is inversely proportional to it",
        ),
        param(
            keys[2],
            group,
            Dimension::Current,
            "Base synaptic weight current, scaled by the connection weight",
        ),
        param(
            keys[3],
            group,
            Dimension::Current,
            "Threshold / gain current, scaling factor for the synaptic weight",
        ),
        param(
            keys[4],
            group,
            Dimension::Current,
            "Output current initial value",
        ),
    ]
}

const MEMBRANE: [ParamSpec; 12] = [
    param("kn", Group::Membrane, Dimension::Dimensionless, "Subthreshold slope factor (n-type transistors)"),
    param("kp", Group::Membrane, Dimension::Dimensionless, "Subthreshold slope factor (p-type transistors)"),
    param("Ut", Group::Membrane, Dimension::Voltage, "Thermal voltage"),
    param("Io", Group::Membrane, Dimension::Current, "Dark current"),
    param("Cmem", Group::Membrane, Dimension::Capacitance, "Membrane capacitance, fixed at layout time"),
    param("Ispkthr", Group::Membrane, Dimension::Current, "Spiking threshold current"),
    param("refP", Group::Membrane, Dimension::Time, "Refractory period, limits the maximum firing rate"),
    param("Ireset", Group::Membrane, Dimension::Current, "Reset current after spike generation"),
    param("Iconst", Group::Membrane, Dimension::Current, "Constant current injection"),
    param("Itau", Group::Membrane, Dimension::Current, "Membrane time constant current, the time constant is inversely proportional to it"),
    param("Ishunt", Group::Membrane, Dimension::Current, "Shunting inhibitory current"),
    param("Ith", Group::Membrane, Dimension::Current, "Threshold / gain current, scaling factor for the membrane current"),
];

const ADAPTATION: [ParamSpec; 5] = [
    param("Ica", Group::Adaptation, Dimension::Current, "Spike-frequency adaptation weight current"),
    param("Itauahp", Group::Adaptation, Dimension::Current, "Spike-frequency adaptation time constant current"),
    param("Ithahp", Group::Adaptation, Dimension::Current, "Spike-frequency adaptation threshold current"),
    param("Cahp", Group::Adaptation, Dimension::Capacitance, "Spike-frequency adaptation capacitance"),
    param("Iahp", Group::Adaptation, Dimension::Current, "Spike-frequency adaptation output current"),
];

const POSITIVE_FEEDBACK: [ParamSpec; 3] = [
    param("Iath", Group::PositiveFeedback, Dimension::Current, "Feedback threshold current, typically a fraction of Ispkthr"),
    param("Iagain", Group::PositiveFeedback, Dimension::Current, "Feedback gain current"),
    param("Ianorm", Group::PositiveFeedback, Dimension::Current, "Feedback normalization current"),
];

const SYN_EXC: [ParamSpec; 5] = synapse_params(
    SynapseKind::Exc,
    ["C_syn_exc", "I_tau_syn_exc", "I_wo_syn_exc", "I_th_syn_exc", "I_syn_exc"],
);
const SYN_EXC2: [ParamSpec; 5] = synapse_params(
    SynapseKind::Exc2,
    ["C_syn_exc2", "I_tau_syn_exc2", "I_wo_syn_exc2", "I_th_syn_exc2", "I_syn_exc2"],
);
const SYN_INH: [ParamSpec; 5] = synapse_params(
    SynapseKind::Inh,
    ["C_syn_inh", "I_tau_syn_inh", "I_wo_syn_inh", "I_th_syn_inh", "I_syn_inh"],
);
const SYN_SHUNT: [ParamSpec; 5] = synapse_params(
    SynapseKind::Shunt,
    ["C_syn_shunt", "I_tau_syn_shunt", "I_wo_syn_shunt", "I_th_syn_shunt", "I_syn_shunt"],
);

/// The number of keys in the schema.
pub const NUM_PARAMS: usize = 40;

static SCHEMA: [&[ParamSpec]; 7] = [
    &MEMBRANE,
    &ADAPTATION,
    &POSITIVE_FEEDBACK,
    &SYN_EXC,
    &SYN_EXC2,
    &SYN_INH,
    &SYN_SHUNT,
];

/// Returns an iterator over all parameter descriptors, in declaration order.
pub fn schema() -> impl Iterator<Item = &'static ParamSpec> {
    SCHEMA.iter().flat_map(|group| group.iter())
}

/// Returns an iterator over all parameter keys, in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    schema().map(|spec| spec.key)
}

/// Returns the descriptor of the given key, if it is part of the schema.
pub fn spec(key: &str) -> Option<&'static ParamSpec> {
    schema().find(|spec| spec.key == key)
}

/// Split a synapse key into its synapse type and field, e.g., `I_wo_syn_exc2` into
/// `(SynapseKind::Exc2, SynapseField::BaseWeight)`.
pub fn parse_synapse_key(key: &str) -> Option<(SynapseKind, SynapseField)> {
    SynapseKind::ALL.iter().find_map(|&kind| {
        SynapseField::ALL
            .iter()
            .find(|field| field.key(kind) == key)
            .map(|&field| (kind, field))
    })
}
