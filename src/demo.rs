//! Small hand-wired networks used by the `semnet` binary and the tests.

use crate::config::NetworkConfig;
use crate::console::{build_console_network, ConsoleConfig, ConsoleError, ConsoleHooks, EffectorSpec};
use crate::network::Network;

/// Seven-neuron oscillator that prints `a`, `b`, `a`, `b`, ... forever.
///
/// ```text
/// [n].threshold
/// [0].1 latch: "next is b"        (permanent)
/// [1].1 reset                     (sentinel, sensor "reset")
/// [2].0 always active
/// [3].2 gate for b
/// [4].1 gate for a
/// [5].1 "a" (effector)
/// [6].1 "b" (effector)
/// ```
///
/// The latch flips every step, so the permanent state never settles and the
/// network never asks for input after the first step.
pub fn periodic_config() -> NetworkConfig<i8> {
    NetworkConfig {
        neurons: 7,
        permanent_count: 1,
        thresholds: vec![1, 1, 0, 2, 1, 1, 1],
        link_counts: vec![2, 0, 2, 2, 2, 0, 0],
        targets: vec![3, 4, 4, 3, 0, 6, 0, 5],
        biases: vec![1, -1, 1, 1, -1, 1, 1, 1],
    }
}

pub fn periodic_console() -> ConsoleConfig {
    ConsoleConfig {
        sensors: [("reset".to_string(), 1)].into_iter().collect(),
        effectors: vec![
            EffectorSpec {
                neuron: 6,
                text: "b".into(),
            },
            EffectorSpec {
                neuron: 5,
                text: "a".into(),
            },
        ],
        ..Default::default()
    }
}

pub fn periodic_network() -> Result<Network<i8, ConsoleHooks>, ConsoleError> {
    build_console_network(&periodic_config(), &periodic_console())
}
