//! Text collaborator: turns typed text into stimulus one token per quiescent
//! step, and active effector neurons back into text.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write as _;
use std::io::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::error::ConfigError;
use crate::level::Level;
use crate::network::{Hooks, Network, NetworkView, NeuronId, Stimulus};
use crate::symbols::{EffectorTable, SensorTable};

pub const DEFAULT_MAX_SETTLE_STEPS: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid wiring file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("network did not settle within {steps} steps")]
    Unsettled { steps: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EffectorSpec {
    pub neuron: NeuronId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsoleConfig {
    pub sensors: BTreeMap<String, NeuronId>,
    pub effectors: Vec<EffectorSpec>,
    /// Print effector output as soon as it is produced. When false, output
    /// accumulates until [`ConsoleHooks::flush_output`].
    pub print_to_console: bool,
    pub max_settle_steps: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            sensors: BTreeMap::new(),
            effectors: Vec::new(),
            print_to_console: true,
            max_settle_steps: DEFAULT_MAX_SETTLE_STEPS,
        }
    }
}

/// A network wiring plus its console tables, as stored in a JSON file.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringFile {
    #[serde(flatten)]
    pub network: NetworkConfig<i8>,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[cfg(feature = "serde")]
impl WiringFile {
    pub fn from_json_str(s: &str) -> Result<Self, ConsoleError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConsoleError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn build(&self) -> Result<Network<i8, ConsoleHooks>, ConsoleError> {
        build_console_network(&self.network, &self.console)
    }
}

/// Build a network whose hooks are a [`ConsoleHooks`], checking that every
/// sensor and effector names an existing neuron.
pub fn build_console_network<A: Level>(
    network: &NetworkConfig<A>,
    console: &ConsoleConfig,
) -> Result<Network<A, ConsoleHooks>, ConsoleError> {
    let hooks = ConsoleHooks::from_config(console);
    hooks.sensors.validate(network.neurons)?;
    hooks.effectors.validate(network.neurons)?;
    Ok(Network::from_config(network, hooks)?)
}

/// Lowercase `text` and split it into tokens: runs of word characters
/// (alphanumeric or `_`), and every other non-whitespace character on its own.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            tokens.push(std::mem::take(&mut word));
        }
        if !c.is_whitespace() {
            tokens.push(c.to_string());
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

#[derive(Debug, Clone)]
pub struct ConsoleHooks {
    sensors: SensorTable,
    effectors: EffectorTable,
    pending: VecDeque<String>,
    output: String,
    print_to_console: bool,
    max_settle_steps: usize,
}

impl ConsoleHooks {
    pub fn new(sensors: SensorTable, effectors: EffectorTable) -> Self {
        Self {
            sensors,
            effectors,
            pending: VecDeque::new(),
            output: String::new(),
            print_to_console: true,
            max_settle_steps: DEFAULT_MAX_SETTLE_STEPS,
        }
    }

    pub fn from_config(cfg: &ConsoleConfig) -> Self {
        let sensors = cfg.sensors.iter().map(|(k, &n)| (k, n)).collect();
        let effectors = cfg
            .effectors
            .iter()
            .map(|e| (e.neuron, e.text.as_str()))
            .collect();
        Self::new(sensors, effectors)
            .with_print_to_console(cfg.print_to_console)
            .with_max_settle_steps(cfg.max_settle_steps)
    }

    pub fn with_print_to_console(mut self, print: bool) -> Self {
        self.print_to_console = print;
        self
    }

    pub fn with_max_settle_steps(mut self, steps: usize) -> Self {
        self.max_settle_steps = steps;
        self
    }

    pub fn set_print_to_console(&mut self, print: bool) {
        self.print_to_console = print;
    }

    pub fn sensors(&self) -> &SensorTable {
        &self.sensors
    }

    pub fn effectors(&self) -> &EffectorTable {
        &self.effectors
    }

    pub fn enqueue<I: IntoIterator<Item = String>>(&mut self, tokens: I) {
        self.pending.extend(tokens);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Take everything the effectors produced since the last flush.
    pub fn flush_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// `'token'->neuron` lines, sorted by token.
    pub fn describe_sensors(&self) -> String {
        let mut s = String::from("Sensors:\n");
        for (token, neuron) in self.sensors.sorted() {
            let _ = writeln!(s, "'{}'->{}", token, neuron);
        }
        s
    }

    /// `'text'->neuron` lines, sorted by text; newlines shown as `\n`.
    pub fn describe_effectors(&self) -> String {
        let mut s = String::from("Effectors:\n");
        for (neuron, text) in self.effectors.sorted() {
            let shown = if text == "\n" { "\\n" } else { text };
            let _ = writeln!(s, "'{}'->{}", shown, neuron);
        }
        s
    }
}

impl Default for ConsoleHooks {
    fn default() -> Self {
        Self::new(SensorTable::new(), EffectorTable::new())
    }
}

impl<A: Level> Hooks<A> for ConsoleHooks {
    fn load_input(&mut self, input: &mut Stimulus<'_, A>) {
        if let Some(token) = self.pending.pop_front() {
            let excited = self.sensors.activate([token.as_str()], input);
            debug!(token = %token, ?excited, "sensor input");
        }
    }

    fn push_output(&mut self, view: &NetworkView<'_, A>) {
        self.effectors.collect(view, &mut self.output);
        if self.print_to_console && !self.output.is_empty() {
            let text = self.flush_output();
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        }
    }
}

impl<A: Level> Network<A, ConsoleHooks> {
    /// Feed `text` to the network and run it until it settles.
    ///
    /// Steps until every token has been consumed (one per quiescent step),
    /// then keeps stepping until a step leaves the permanent state unchanged,
    /// so output triggered by the last token is complete before returning.
    /// Returns the number of steps taken.
    pub fn process_input(&mut self, text: &str) -> Result<usize, ConsoleError> {
        let cap = self.hooks().max_settle_steps;
        self.hooks_mut().enqueue(tokenize(text));

        let mut steps = 0usize;
        while self.hooks().pending() > 0 {
            if steps >= cap {
                return Err(self.unsettled(steps));
            }
            self.step()?;
            steps += 1;
        }

        let p = self.permanent_count();
        let mut previous = self.last_permanent().to_vec();
        loop {
            if steps >= cap {
                return Err(self.unsettled(steps));
            }
            self.step()?;
            steps += 1;
            let current = &self.activations()[..p];
            if current == previous.as_slice() {
                break;
            }
            previous.clear();
            previous.extend_from_slice(current);
        }
        Ok(steps)
    }

    fn unsettled(&mut self, steps: usize) -> ConsoleError {
        warn!(steps, pending = self.hooks().pending(), "network did not settle");
        self.hooks_mut().pending.clear();
        ConsoleError::Unsettled { steps }
    }

    /// Neuron/link counts, active count and mean fan-out.
    pub fn info(&self) -> String {
        let n = self.len();
        let links = self.total_links();
        let avg = if n == 0 { 0.0 } else { links as f64 / n as f64 };
        format!(
            "Neurons: {}\nLinks: {}\nActive neurons: {}\nAverage connectivity: {:.2}\n",
            n,
            links,
            self.active_neurons().len(),
            avg
        )
    }
}

/// Render activations compactly: `.` for zero, `|` every `column_every`
/// values within a row, `per_row` values per line.
pub fn format_activations<A: Level>(values: &[A], column_every: usize, per_row: usize) -> String {
    let per_row = per_row.max(1);
    let mut s = String::from("[");
    for (row, chunk) in values.chunks(per_row).enumerate() {
        if row > 0 {
            s.push_str("\n ");
        }
        for (i, v) in chunk.iter().enumerate() {
            if i > 0 && column_every > 0 && i % column_every == 0 {
                s.push('|');
            }
            if *v == A::ZERO {
                s.push('.');
            } else {
                let _ = write!(s, "{}", v);
            }
        }
    }
    s.push(']');
    s
}
