#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::level::{Activation, Level};
use crate::network::{LinkIndex, NeuronId};
use crate::prng::Prng;

/// Setup-time wiring of a network.
///
/// Links are stored the way the engine stores them: grouped by source neuron,
/// `link_counts[i]` consecutive entries of `targets`/`biases` per neuron, in
/// neuron order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkConfig<A = Activation> {
    pub neurons: usize,
    /// Neurons `0..permanent_count` keep their activation across steps while
    /// at/above threshold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub permanent_count: usize,
    pub thresholds: Vec<A>,
    pub link_counts: Vec<LinkIndex>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub targets: Vec<NeuronId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub biases: Vec<A>,
}

impl<A: Level> NetworkConfig<A> {
    /// An unwired network of `neurons` volatile neurons, every threshold one.
    pub fn with_size(neurons: usize) -> Self {
        Self {
            neurons,
            permanent_count: 0,
            thresholds: vec![A::ONE; neurons],
            link_counts: vec![0; neurons],
            targets: Vec::new(),
            biases: Vec::new(),
        }
    }

    pub fn with_permanent_count(mut self, permanent_count: usize) -> Self {
        self.permanent_count = permanent_count;
        self
    }

    /// Set the threshold of one neuron.
    ///
    /// # Panics
    /// Panics if `neuron` is out of range.
    pub fn with_threshold(mut self, neuron: NeuronId, threshold: A) -> Self {
        assert!(
            neuron < self.neurons,
            "neuron {} out of range ({} neurons)",
            neuron,
            self.neurons
        );
        self.thresholds[neuron] = threshold;
        self
    }

    /// Append a link `from -> to`, keeping links grouped by source.
    ///
    /// `to` is not checked here; [`NetworkConfig::validate`] rejects bad targets.
    ///
    /// # Panics
    /// Panics if `from` is out of range.
    pub fn with_link(mut self, from: NeuronId, to: NeuronId, bias: A) -> Self {
        assert!(
            from < self.neurons,
            "source neuron {} out of range ({} neurons)",
            from,
            self.neurons
        );
        let at: usize = self.link_counts[..=from].iter().map(|&c| c as usize).sum();
        self.targets.insert(at, to);
        self.biases.insert(at, bias);
        self.link_counts[from] += 1;
        self
    }

    pub fn total_links(&self) -> usize {
        self.link_counts.iter().map(|&c| c as usize).sum()
    }

    /// Check every wiring invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.permanent_count > self.neurons {
            return Err(ConfigError::PermanentCountOutOfRange {
                permanent: self.permanent_count,
                neurons: self.neurons,
            });
        }
        if self.thresholds.len() != self.neurons {
            return Err(ConfigError::ThresholdLength {
                expected: self.neurons,
                found: self.thresholds.len(),
            });
        }
        if self.link_counts.len() != self.neurons {
            return Err(ConfigError::LinkCountLength {
                expected: self.neurons,
                found: self.link_counts.len(),
            });
        }
        validate_links(
            self.neurons,
            self.total_links(),
            &self.targets,
            self.biases.len(),
        )
    }
}

impl NetworkConfig<Activation> {
    /// Seeded random wiring: `links_per_neuron` outgoing links from every
    /// neuron, biases in `-2..=2`, thresholds in `0..=2`. Self-loops and
    /// parallel links are allowed.
    pub fn random(neurons: usize, permanent_count: usize, links_per_neuron: usize, seed: u64) -> Self {
        let mut rng = Prng::new(seed);
        let links_per_neuron = if neurons == 0 { 0 } else { links_per_neuron };

        let thresholds = (0..neurons).map(|_| rng.gen_range_i8(0, 2)).collect();
        let mut targets = Vec::with_capacity(neurons * links_per_neuron);
        let mut biases = Vec::with_capacity(neurons * links_per_neuron);
        for _ in 0..neurons * links_per_neuron {
            targets.push(rng.gen_range_usize(0, neurons));
            biases.push(rng.gen_range_i8(-2, 2));
        }

        Self {
            neurons,
            permanent_count: permanent_count.min(neurons),
            thresholds,
            link_counts: vec![links_per_neuron as LinkIndex; neurons],
            targets,
            biases,
        }
    }
}

pub(crate) fn validate_links(
    neurons: usize,
    total_links: usize,
    targets: &[NeuronId],
    biases: usize,
) -> Result<(), ConfigError> {
    if targets.len() != total_links || biases != total_links {
        return Err(ConfigError::LinkArrayLength {
            expected: total_links,
            targets: targets.len(),
            biases,
        });
    }
    if let Some((link, &target)) = targets.iter().enumerate().find(|(_, t)| **t >= neurons) {
        return Err(ConfigError::TargetOutOfRange {
            link,
            target,
            neurons,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_link_keeps_links_grouped_by_source() {
        let cfg = NetworkConfig::<i8>::with_size(4)
            .with_link(2, 0, 1)
            .with_link(0, 3, -1)
            .with_link(2, 3, 1)
            .with_link(1, 2, 5);

        assert_eq!(cfg.link_counts, vec![1, 1, 2, 0]);
        assert_eq!(cfg.targets, vec![3, 2, 0, 3]);
        assert_eq!(cfg.biases, vec![-1, 5, 1, 1]);
        assert_eq!(cfg.total_links(), 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_wiring() {
        let base = NetworkConfig::<i8>::with_size(3).with_link(0, 1, 1);

        let cfg = base.clone().with_permanent_count(4);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::PermanentCountOutOfRange {
                permanent: 4,
                neurons: 3
            })
        );

        let mut cfg = base.clone();
        cfg.link_counts.pop();
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::LinkCountLength {
                expected: 3,
                found: 2
            })
        );

        let mut cfg = base.clone();
        cfg.thresholds.push(1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ThresholdLength { .. })
        ));

        let mut cfg = base.clone();
        cfg.biases.push(1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::LinkArrayLength {
                expected: 1,
                targets: 1,
                biases: 2
            })
        );

        let cfg = base.with_link(2, 3, 1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::TargetOutOfRange {
                link: 1,
                target: 3,
                neurons: 3
            })
        );
    }

    #[test]
    fn random_wiring_is_seeded_and_valid() {
        let a = NetworkConfig::random(64, 8, 3, 42);
        let b = NetworkConfig::random(64, 8, 3, 42);
        let c = NetworkConfig::random(64, 8, 3, 43);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.validate().is_ok());
        assert_eq!(a.total_links(), 64 * 3);

        let empty = NetworkConfig::random(0, 5, 3, 1);
        assert_eq!(empty.permanent_count, 0);
        assert!(empty.validate().is_ok());
    }

    #[cfg(all(feature = "std", feature = "serde"))]
    #[test]
    fn config_parses_from_json() {
        let json = r#"{
            "neurons": 4,
            "permanent_count": 1,
            "thresholds": [1, 1, 1, 1],
            "link_counts": [0, 0, 2, 0],
            "targets": [0, 3],
            "biases": [1, 1]
        }"#;
        let cfg: NetworkConfig<i8> = serde_json::from_str(json).unwrap();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.total_links(), 2);
    }
}
