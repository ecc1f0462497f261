//! # semnet
//!
//! A small, hand-wired, threshold-firing activation network.
//!
//! Neurons hold a small signed activation and fire when it reaches their
//! threshold, pushing a signed bias along each outgoing link. A prefix of the
//! neuron range is *permanent*: an active permanent neuron keeps its value
//! across steps, which gives the network short-term memory. Everything else
//! is *volatile* and is wiped at the start of every step.
//!
//! ## Quick Start
//!
//! ```
//! use semnet::prelude::*;
//!
//! // 4 neurons, neuron 0 is permanent, neuron 2 latches neuron 0 and drives neuron 3.
//! let cfg = NetworkConfig::<i8>::with_size(4)
//!     .with_permanent_count(1)
//!     .with_link(2, 0, 1)
//!     .with_link(2, 3, 1);
//!
//! let mut net = Network::from_config(&cfg, NoHooks).unwrap();
//! net.set_activation(2, 1).unwrap();
//! let fired = net.step().unwrap();
//! assert_eq!(fired, 0); // volatile neuron 2 was wiped before propagation
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support, console collaborator, observer
//! - `serde` (default): Serialization of configs and snapshots
//! - `cli` (default): The `semnet` and `semnet-cli` binaries
//!
//! ## no_std Support
//!
//! The engine, configuration and symbol tables only need `alloc`:
//! ```toml
//! semnet = { version = "0.1", default-features = false }
//! ```
//!
//! ## Modules
//!
//! - [`network`]: Propagation engine and the `Hooks` seam
//! - [`config`]: Setup-time wiring and validation
//! - [`symbols`]: Token to neuron sensor and effector tables
//! - [`console`]: Text collaborator (tokenizer, output buffer, settle loop)
//! - [`observer`]: Read-only snapshots

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[path = "core/level.rs"]
pub mod level;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/network.rs"]
pub mod network;

#[path = "core/symbols.rs"]
pub mod symbols;

#[cfg(feature = "std")]
pub mod console;

#[cfg(feature = "std")]
pub mod demo;

#[cfg(feature = "std")]
pub mod observer;

/// Prelude module for convenient imports.
///
/// ```
/// use semnet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::NetworkConfig;
    pub use crate::error::ConfigError;
    pub use crate::level::{Activation, Level};
    pub use crate::network::{
        Diagnostics, FnHooks, Hooks, LinkIndex, Network, NetworkView, NeuronId, NoHooks, Stimulus,
    };
    pub use crate::symbols::{EffectorTable, SensorTable};

    #[cfg(feature = "std")]
    pub use crate::console::{ConsoleConfig, ConsoleError, ConsoleHooks};
    #[cfg(feature = "std")]
    pub use crate::observer::{NetworkAdapter, NetworkSnapshot};
}
