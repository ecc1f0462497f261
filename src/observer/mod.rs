use crate::level::Level;
use crate::network::{Diagnostics, Hooks, Network, NeuronId};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A read-only snapshot of what the network is doing.
///
/// Design intent:
/// - Observers cannot mutate or step the network.
/// - Snapshotting is on-demand and allocates; `step()` stays untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NetworkSnapshot<A> {
    pub steps: u64,
    pub fired_last_step: usize,
    pub diagnostics: Diagnostics,
    pub active: Vec<NeuronId>,
    pub permanent: Vec<A>,
    pub embedding: Vec<A>,
}

pub struct NetworkAdapter<'a, A, H> {
    network: &'a Network<A, H>,
}

impl<'a, A: Level, H: Hooks<A>> NetworkAdapter<'a, A, H> {
    pub fn new(network: &'a Network<A, H>) -> Self {
        Self { network }
    }

    pub fn snapshot(&self) -> NetworkSnapshot<A> {
        let net = self.network;
        NetworkSnapshot {
            steps: net.steps(),
            fired_last_step: net.fired_last_step(),
            diagnostics: net.diagnostics(),
            active: net.active_neurons(),
            permanent: net.activations()[..net.permanent_count()].to_vec(),
            embedding: net.embedding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::network::NoHooks;

    #[test]
    fn snapshot_reflects_latched_state() {
        let cfg = NetworkConfig::<i8>::with_size(4)
            .with_permanent_count(2)
            .with_threshold(3, 0)
            .with_link(3, 1, 1);
        let mut net = Network::from_config(&cfg, NoHooks).unwrap();
        net.step().unwrap();
        net.step().unwrap();

        let snap = NetworkAdapter::new(&net).snapshot();
        assert_eq!(snap.steps, 2);
        assert_eq!(snap.fired_last_step, 2);
        assert_eq!(snap.active, vec![1, 3]);
        assert_eq!(snap.permanent, vec![0, 2]);
        assert_eq!(snap.embedding, snap.permanent);
        assert_eq!(snap.diagnostics.link_count, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_serializes_to_json() {
        let cfg = NetworkConfig::<i8>::with_size(2).with_permanent_count(1);
        let net = Network::from_config(&cfg, NoHooks).unwrap();
        let json = serde_json::to_value(NetworkAdapter::new(&net).snapshot()).unwrap();
        assert_eq!(json["steps"], 0);
        assert_eq!(json["permanent"], serde_json::json!([0]));
        assert_eq!(json["diagnostics"]["neuron_count"], 2);
    }
}
