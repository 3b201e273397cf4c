use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::schedulers::FifoSelection;
use crate::{ConfigError, DEFAULT_LEVELS, DEFAULT_QUANTUM_MS, DEFAULT_TICK_MS};

/// The scheduling policies the simulator knows about
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    #[default]
    Fifo,
    Sjf,
    #[serde(rename = "rr")]
    RoundRobin,
    Mlfq,
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "sjf" => Ok(PolicyKind::Sjf),
            "rr" | "round_robin" => Ok(PolicyKind::RoundRobin),
            "mlfq" => Ok(PolicyKind::Mlfq),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Sjf => "sjf",
            PolicyKind::RoundRobin => "rr",
            PolicyKind::Mlfq => "mlfq",
        };
        write!(f, "{}", name)
    }
}

/// Settings of a scheduler instance
///
/// Missing fields take their defaults: 100ms ticks, 500ms quantum, three
/// MLFQ levels and shortest-burst FIFO selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub policy: PolicyKind,
    /// Tick granularity, in milliseconds
    pub tick_ms: u32,
    /// Time slice of RR and of every MLFQ level, in milliseconds
    pub quantum_ms: u32,
    /// Number of MLFQ levels
    pub levels: usize,
    pub fifo_selection: FifoSelection,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            policy: PolicyKind::default(),
            tick_ms: DEFAULT_TICK_MS,
            quantum_ms: DEFAULT_QUANTUM_MS,
            levels: DEFAULT_LEVELS,
            fifo_selection: FifoSelection::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn with_policy(policy: PolicyKind) -> SchedulerConfig {
        SchedulerConfig { policy, ..SchedulerConfig::default() }
    }

    /// Checks that a scheduler can be built from this configuration
    ///
    /// A quantum that is not a multiple of the tick is accepted, but
    /// preemption will then happen up to one tick late.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        let preemptive = matches!(self.policy, PolicyKind::RoundRobin | PolicyKind::Mlfq);
        if preemptive && self.quantum_ms == 0 {
            return Err(ConfigError::ZeroQuantum);
        }

        if self.policy == PolicyKind::Mlfq && self.levels == 0 {
            return Err(ConfigError::ZeroLevels);
        }

        if preemptive && self.quantum_ms % self.tick_ms != 0 {
            warn!(
                "quantum of {}ms is not a multiple of the {}ms tick, slices will overshoot",
                self.quantum_ms, self.tick_ms
            );
        }

        Ok(())
    }
}
