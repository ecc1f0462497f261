#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tracing::{debug, trace};

use crate::config::{validate_links, NetworkConfig};
use crate::error::ConfigError;
use crate::level::{Activation, Level};

pub type NeuronId = usize;

/// Per-neuron outgoing link count.
pub type LinkIndex = u32;

/// Collaborator callbacks invoked from inside [`Network::step`].
///
/// `load_input` runs at most once per step, only while the permanent state is
/// quiescent, and after volatile neurons were wiped, so whatever it injects
/// takes part in this step's propagation. `push_output` runs exactly once per
/// step, after propagation has converged.
///
/// Hooks never see the network itself, only a [`Stimulus`] or a
/// [`NetworkView`], so they cannot re-enter `step()`.
pub trait Hooks<A: Level = Activation> {
    fn load_input(&mut self, input: &mut Stimulus<'_, A>);

    fn push_output(&mut self, view: &NetworkView<'_, A>);

    /// Readout used by [`Network::embedding`]. Defaults to the permanent
    /// activations.
    fn embedding(&self, view: &NetworkView<'_, A>) -> Vec<A> {
        view.permanent().to_vec()
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<A: Level> Hooks<A> for NoHooks {
    fn load_input(&mut self, _input: &mut Stimulus<'_, A>) {}

    fn push_output(&mut self, _view: &NetworkView<'_, A>) {}
}

/// Hooks built from a pair of closures.
pub struct FnHooks<L, P> {
    load: L,
    push: P,
}

impl<L, P> FnHooks<L, P> {
    pub fn new(load: L, push: P) -> Self {
        Self { load, push }
    }
}

impl<A, L, P> Hooks<A> for FnHooks<L, P>
where
    A: Level,
    L: FnMut(&mut Stimulus<'_, A>),
    P: FnMut(&NetworkView<'_, A>),
{
    fn load_input(&mut self, input: &mut Stimulus<'_, A>) {
        (self.load)(input)
    }

    fn push_output(&mut self, view: &NetworkView<'_, A>) {
        (self.push)(view)
    }
}

/// Write access handed to [`Hooks::load_input`].
pub struct Stimulus<'a, A> {
    activations: &'a mut [A],
    thresholds: &'a [A],
}

impl<'a, A: Level> Stimulus<'a, A> {
    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    pub fn activation(&self, neuron: NeuronId) -> Option<A> {
        self.activations.get(neuron).copied()
    }

    pub fn threshold(&self, neuron: NeuronId) -> Option<A> {
        self.thresholds.get(neuron).copied()
    }

    /// Returns `false` if `neuron` is out of range.
    pub fn set(&mut self, neuron: NeuronId, value: A) -> bool {
        match self.activations.get_mut(neuron) {
            Some(a) => {
                *a = value;
                true
            }
            None => false,
        }
    }

    /// Raise `neuron` exactly to its threshold so it fires this step.
    pub fn excite(&mut self, neuron: NeuronId) -> bool {
        match self.thresholds.get(neuron) {
            Some(&t) => self.set(neuron, t),
            None => false,
        }
    }
}

/// Read-only view of neuron state, handed to [`Hooks::push_output`].
#[derive(Clone, Copy)]
pub struct NetworkView<'a, A> {
    activations: &'a [A],
    thresholds: &'a [A],
    permanent_count: usize,
}

impl<'a, A: Level> NetworkView<'a, A> {
    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    pub fn activations(&self) -> &'a [A] {
        self.activations
    }

    pub fn thresholds(&self) -> &'a [A] {
        self.thresholds
    }

    pub fn permanent(&self) -> &'a [A] {
        let activations: &'a [A] = self.activations;
        &activations[..self.permanent_count]
    }

    pub fn is_active(&self, neuron: NeuronId) -> bool {
        match (self.activations.get(neuron), self.thresholds.get(neuron)) {
            (Some(a), Some(t)) => a >= t,
            _ => false,
        }
    }

    pub fn active_neurons(&self) -> impl Iterator<Item = NeuronId> + 'a {
        let (activations, thresholds) = (self.activations, self.thresholds);
        activations
            .iter()
            .zip(thresholds)
            .enumerate()
            .filter(|(_, (a, t))| a >= t)
            .map(|(i, _)| i)
    }
}

/// CSR (Compressed Sparse Row) link storage.
///
/// Neuron `i` owns links `offsets[i]..offsets[i] + counts[i]` of the flat
/// `targets`/`biases` arrays.
#[derive(Debug, Clone)]
struct LinkGraph<A> {
    counts: Vec<LinkIndex>,
    offsets: Vec<usize>,
    targets: Vec<NeuronId>,
    biases: Vec<A>,
    total: usize,
    // Set whenever counts/targets/biases change; step() refuses to run until
    // rebuild() succeeds.
    stale: bool,
}

impl<A> LinkGraph<A> {
    fn empty(neurons: usize) -> Self {
        Self {
            counts: vec![0; neurons],
            offsets: vec![0; neurons],
            targets: Vec::new(),
            biases: Vec::new(),
            total: 0,
            stale: true,
        }
    }

    fn rebuild(&mut self, neurons: usize) -> Result<(), ConfigError> {
        self.stale = true;
        if self.counts.len() != neurons {
            return Err(ConfigError::LinkCountLength {
                expected: neurons,
                found: self.counts.len(),
            });
        }

        // Exclusive prefix sum.
        self.offsets.clear();
        let mut total = 0usize;
        for &c in &self.counts {
            self.offsets.push(total);
            total += c as usize;
        }
        self.total = total;

        validate_links(neurons, total, &self.targets, self.biases.len())?;
        self.stale = false;
        Ok(())
    }

    #[inline]
    fn range(&self, neuron: NeuronId) -> Range<usize> {
        let start = self.offsets[neuron];
        start..start + self.counts[neuron] as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    pub neuron_count: usize,
    pub permanent_count: usize,
    pub link_count: usize,
    pub active_count: usize,
    pub fired_last_step: usize,
    pub steps: u64,
}

/// The propagation engine.
///
/// Owns all neuron state and the link graph. Independent networks are
/// independent values; nothing is shared between instances.
pub struct Network<A = Activation, H = NoHooks> {
    activations: Vec<A>,
    thresholds: Vec<A>,
    // Per-step "already fired" flags.
    sent: Vec<bool>,
    permanent_count: usize,
    // Permanent activations as recorded by the last input gate that saw a change.
    last_permanent: Vec<A>,
    graph: LinkGraph<A>,
    hooks: H,

    steps: u64,
    fired_last_step: usize,
}

impl<A: Level, H: Hooks<A>> Network<A, H> {
    /// A network of `neurons` zeroed, unwired, volatile neurons.
    ///
    /// Wire it with the `set_*` methods and call
    /// [`Network::rebuild_offsets`] before the first [`Network::step`].
    pub fn new(neurons: usize, hooks: H) -> Self {
        Self {
            activations: vec![A::ZERO; neurons],
            thresholds: vec![A::ZERO; neurons],
            sent: vec![false; neurons],
            permanent_count: 0,
            last_permanent: Vec::new(),
            graph: LinkGraph::empty(neurons),
            hooks,
            steps: 0,
            fired_last_step: 0,
        }
    }

    /// Build a ready-to-step network from a validated config.
    pub fn from_config(cfg: &NetworkConfig<A>, hooks: H) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let mut net = Self::new(cfg.neurons, hooks);
        net.set_permanent_count(cfg.permanent_count)?;
        net.set_thresholds(&cfg.thresholds)?;
        net.set_link_counts(cfg.link_counts.clone());
        net.set_links(cfg.targets.clone(), cfg.biases.clone());
        net.rebuild_offsets()?;
        Ok(net)
    }

    pub fn len(&self) -> usize {
        self.activations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activations.is_empty()
    }

    pub fn permanent_count(&self) -> usize {
        self.permanent_count
    }

    pub fn set_permanent_count(&mut self, permanent_count: usize) -> Result<(), ConfigError> {
        if permanent_count > self.len() {
            return Err(ConfigError::PermanentCountOutOfRange {
                permanent: permanent_count,
                neurons: self.len(),
            });
        }
        self.permanent_count = permanent_count;
        self.last_permanent = vec![A::ZERO; permanent_count];
        Ok(())
    }

    pub fn set_threshold(&mut self, neuron: NeuronId, threshold: A) -> Result<(), ConfigError> {
        let neurons = self.len();
        let t = self
            .thresholds
            .get_mut(neuron)
            .ok_or(ConfigError::NeuronOutOfRange { neuron, neurons })?;
        *t = threshold;
        Ok(())
    }

    pub fn set_thresholds(&mut self, thresholds: &[A]) -> Result<(), ConfigError> {
        if thresholds.len() != self.len() {
            return Err(ConfigError::ThresholdLength {
                expected: self.len(),
                found: thresholds.len(),
            });
        }
        self.thresholds.copy_from_slice(thresholds);
        Ok(())
    }

    pub fn set_activation(&mut self, neuron: NeuronId, value: A) -> Result<(), ConfigError> {
        let neurons = self.len();
        let a = self
            .activations
            .get_mut(neuron)
            .ok_or(ConfigError::NeuronOutOfRange { neuron, neurons })?;
        *a = value;
        Ok(())
    }

    /// Replace the per-neuron link counts. Offsets become stale.
    pub fn set_link_counts(&mut self, counts: Vec<LinkIndex>) {
        self.graph.counts = counts;
        self.graph.stale = true;
    }

    /// Replace the flat link arrays. Offsets become stale.
    pub fn set_links(&mut self, targets: Vec<NeuronId>, biases: Vec<A>) {
        self.graph.targets = targets;
        self.graph.biases = biases;
        self.graph.stale = true;
    }

    /// Recompute link offsets from the link counts and validate the graph.
    pub fn rebuild_offsets(&mut self) -> Result<(), ConfigError> {
        self.graph.rebuild(self.len())?;
        debug!(
            neurons = self.len(),
            links = self.graph.total,
            "link offsets rebuilt"
        );
        Ok(())
    }

    pub fn total_links(&self) -> usize {
        self.graph.total
    }

    pub fn link_counts(&self) -> &[LinkIndex] {
        &self.graph.counts
    }

    pub fn link_offsets(&self) -> &[usize] {
        &self.graph.offsets
    }

    /// Outgoing `(target, bias)` pairs of `neuron`.
    ///
    /// Empty while offsets are stale or `neuron` is out of range.
    pub fn links_from(&self, neuron: NeuronId) -> impl Iterator<Item = (NeuronId, A)> + '_ {
        let range = if self.graph.stale || neuron >= self.len() {
            0..0
        } else {
            self.graph.range(neuron)
        };
        self.graph.targets[range.clone()]
            .iter()
            .copied()
            .zip(self.graph.biases[range].iter().copied())
    }

    pub fn activations(&self) -> &[A] {
        &self.activations
    }

    pub fn thresholds(&self) -> &[A] {
        &self.thresholds
    }

    /// Permanent activations recorded by the input gate, used to decide
    /// whether the network is quiescent.
    pub fn last_permanent(&self) -> &[A] {
        &self.last_permanent
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn fired_last_step(&self) -> usize {
        self.fired_last_step
    }

    pub fn view(&self) -> NetworkView<'_, A> {
        NetworkView {
            activations: &self.activations,
            thresholds: &self.thresholds,
            permanent_count: self.permanent_count,
        }
    }

    #[inline]
    fn is_active(&self, neuron: NeuronId) -> bool {
        self.activations[neuron] >= self.thresholds[neuron]
    }

    /// Index of the neuron whose firing resets the whole network: the first
    /// volatile neuron. `None` when every neuron is permanent.
    ///
    /// With `permanent_count == 0` this is neuron 0, so any firing of neuron 0
    /// resets the network on the following step.
    pub fn reset_sentinel(&self) -> Option<NeuronId> {
        (self.permanent_count < self.len()).then_some(self.permanent_count)
    }

    /// Request a full reset. Takes effect at the start of the next `step()`,
    /// not immediately. Returns `false` if there is no sentinel neuron.
    pub fn reset_signal(&mut self) -> bool {
        match self.reset_sentinel() {
            Some(r) => {
                self.activations[r] = A::ONE;
                true
            }
            None => false,
        }
    }

    fn full_reset(&mut self) {
        self.activations.fill(A::ZERO);
        self.sent.fill(false);
        self.last_permanent.fill(A::ZERO);
    }

    /// All neurons at or above threshold.
    pub fn active_neurons(&self) -> Vec<NeuronId> {
        self.view().active_neurons().collect()
    }

    /// State readout; the permanent activations unless the hooks override it.
    pub fn embedding(&self) -> Vec<A> {
        self.hooks.embedding(&self.view())
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            neuron_count: self.len(),
            permanent_count: self.permanent_count,
            link_count: self.graph.total,
            active_count: self.view().active_neurons().count(),
            fired_last_step: self.fired_last_step,
            steps: self.steps,
        }
    }

    #[inline]
    fn fire(&mut self, neuron: NeuronId) {
        self.sent[neuron] = true;
        for k in self.graph.range(neuron) {
            let target = self.graph.targets[k];
            self.activations[target] = self.activations[target].saturating_add(self.graph.biases[k]);
        }
    }

    /// Advance the network by one discrete step and return how many neurons
    /// fired (at most `len()`; every neuron fires at most once per step).
    ///
    /// Order: reset check, permanent decay, volatile wipe, input gate, one
    /// pass over all neurons, then repeated passes over volatile neurons
    /// until nothing new fires, then `push_output`.
    pub fn step(&mut self) -> Result<usize, ConfigError> {
        if self.graph.stale {
            return Err(ConfigError::StaleOffsets);
        }

        let n = self.len();
        let p = self.permanent_count;

        if self.reset_sentinel().is_some_and(|r| self.is_active(r)) {
            debug!(step = self.steps, "reset sentinel fired; full reset");
            self.full_reset();
        } else {
            self.sent.fill(false);
        }

        // Sub-threshold permanent state does not persist.
        for i in 0..p {
            if self.activations[i] < self.thresholds[i] {
                self.activations[i] = A::ZERO;
            }
        }
        self.activations[p..].fill(A::ZERO);

        let quiescent = self.activations[..p] == self.last_permanent[..];
        if quiescent {
            self.hooks.load_input(&mut Stimulus {
                activations: &mut self.activations,
                thresholds: &self.thresholds,
            });
        } else {
            self.last_permanent.copy_from_slice(&self.activations[..p]);
        }

        let mut fired = 0usize;
        let mut any_fired = false;

        // First pass: every neuron, including permanent ones.
        for i in 0..n {
            if self.is_active(i) {
                self.fire(i);
                fired += 1;
                any_fired = true;
            }
        }

        // Wavefront: volatile neurons that have not fired yet. Permanent
        // neurons driven mid-step wait for the next step.
        let mut passes = 1usize;
        while any_fired {
            any_fired = false;
            passes += 1;
            for i in p..n {
                if self.sent[i] || !self.is_active(i) {
                    continue;
                }
                self.fire(i);
                fired += 1;
                any_fired = true;
            }
        }

        self.hooks.push_output(&NetworkView {
            activations: &self.activations,
            thresholds: &self.thresholds,
            permanent_count: p,
        });

        self.steps = self.steps.wrapping_add(1);
        self.fired_last_step = fired;
        trace!(step = self.steps, fired, passes, quiescent, "step complete");
        Ok(fired)
    }
}
