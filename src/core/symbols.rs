//! Token ↔ neuron tables used by text collaborators.
//!
//! Sensors map an input token to the neuron it excites; effectors map a
//! neuron to the text emitted while that neuron is active. Neither table
//! takes part in propagation.

#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(not(feature = "std"))]
use alloc::{
    string::{String, ToString},
    vec::Vec,
};
#[cfg(not(feature = "std"))]
use hashbrown::HashMap;

use crate::error::ConfigError;
use crate::level::Level;
use crate::network::{NetworkView, NeuronId, Stimulus};

#[derive(Debug, Clone, Default)]
pub struct SensorTable {
    by_token: HashMap<String, NeuronId>,
}

impl SensorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: &str, neuron: NeuronId) -> Option<NeuronId> {
        self.by_token.insert(token.to_string(), neuron)
    }

    pub fn get(&self, token: &str) -> Option<NeuronId> {
        self.by_token.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    /// Excite the sensor neuron of every known token (activation set to its
    /// threshold). Unknown tokens are ignored. Returns the excited neurons in
    /// token order.
    pub fn activate<'t, A, I>(&self, tokens: I, input: &mut Stimulus<'_, A>) -> Vec<NeuronId>
    where
        A: Level,
        I: IntoIterator<Item = &'t str>,
    {
        tokens
            .into_iter()
            .filter_map(|t| self.get(t))
            .filter(|&n| input.excite(n))
            .collect()
    }

    /// `(token, neuron)` pairs sorted by token.
    pub fn sorted(&self) -> Vec<(&str, NeuronId)> {
        let mut v: Vec<_> = self
            .by_token
            .iter()
            .map(|(k, &n)| (k.as_str(), n))
            .collect();
        v.sort_unstable();
        v
    }

    pub fn validate(&self, neurons: usize) -> Result<(), ConfigError> {
        match self.by_token.values().find(|&&n| n >= neurons) {
            Some(&neuron) => Err(ConfigError::NeuronOutOfRange { neuron, neurons }),
            None => Ok(()),
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, NeuronId)> for SensorTable {
    fn from_iter<T: IntoIterator<Item = (S, NeuronId)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (token, neuron) in iter {
            table.insert(token.as_ref(), neuron);
        }
        table
    }
}

/// Effectors keep insertion order; that order is the order their text is
/// emitted within one step.
#[derive(Debug, Clone, Default)]
pub struct EffectorTable {
    entries: Vec<(NeuronId, String)>,
}

impl EffectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, neuron: NeuronId, text: &str) {
        self.entries.push((neuron, text.to_string()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NeuronId, &str)> + '_ {
        self.entries.iter().map(|(n, t)| (*n, t.as_str()))
    }

    /// Append the text of every active effector to `out`.
    pub fn collect<A: Level>(&self, view: &NetworkView<'_, A>, out: &mut String) {
        for (neuron, text) in &self.entries {
            if view.is_active(*neuron) {
                out.push_str(text);
            }
        }
    }

    /// `(neuron, text)` pairs sorted by text.
    pub fn sorted(&self) -> Vec<(NeuronId, &str)> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(&b.0)));
        v
    }

    pub fn validate(&self, neurons: usize) -> Result<(), ConfigError> {
        match self.entries.iter().find(|(n, _)| *n >= neurons) {
            Some(&(neuron, _)) => Err(ConfigError::NeuronOutOfRange { neuron, neurons }),
            None => Ok(()),
        }
    }
}

impl<S: AsRef<str>> FromIterator<(NeuronId, S)> for EffectorTable {
    fn from_iter<T: IntoIterator<Item = (NeuronId, S)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (neuron, text) in iter {
            table.push(neuron, text.as_ref());
        }
        table
    }
}
