use thiserror::Error;

use crate::network::NeuronId;

/// Wiring or setup mistakes. These are programming errors: the network never
/// retries or repairs, it refuses to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("link_counts has {found} entries, expected one per neuron ({expected})")]
    LinkCountLength { expected: usize, found: usize },

    #[error("thresholds has {found} entries, expected one per neuron ({expected})")]
    ThresholdLength { expected: usize, found: usize },

    #[error("link arrays must hold {expected} entries (sum of link_counts), got {targets} targets and {biases} biases")]
    LinkArrayLength {
        expected: usize,
        targets: usize,
        biases: usize,
    },

    #[error("link {link} targets neuron {target}, but the network has {neurons} neurons")]
    TargetOutOfRange {
        link: usize,
        target: NeuronId,
        neurons: usize,
    },

    #[error("permanent_count {permanent} exceeds neuron count {neurons}")]
    PermanentCountOutOfRange { permanent: usize, neurons: usize },

    #[error("neuron {neuron} out of range (network has {neurons} neurons)")]
    NeuronOutOfRange { neuron: NeuronId, neurons: usize },

    #[error("link offsets are stale; call rebuild_offsets() after editing the link graph")]
    StaleOffsets,
}
