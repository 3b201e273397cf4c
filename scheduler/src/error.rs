use std::error::Error;
use std::fmt;
use std::io;

use crate::{Endpoint, Timestamp};

/// A completion message could not be delivered
#[derive(Debug)]
pub enum NotifyError {
    /// Nobody listens on this endpoint
    UnknownEndpoint(Endpoint),
    /// The endpoint accepted only part of the message
    ShortWrite { written: usize, expected: usize },
    Io(io::Error),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::UnknownEndpoint(endpoint) => write!(f, "unknown {}", endpoint),
            NotifyError::ShortWrite { written, expected } => {
                write!(f, "short write: {} of {} bytes", written, expected)
            }
            NotifyError::Io(err) => write!(f, "write failed: {}", err),
        }
    }
}

impl Error for NotifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NotifyError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for NotifyError {
    fn from(err: io::Error) -> Self {
        NotifyError::Io(err)
    }
}

/// A scheduler configuration that cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroTick,
    ZeroQuantum,
    ZeroLevels,
    UnknownPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTick => write!(f, "tick granularity must be greater than zero"),
            ConfigError::ZeroQuantum => write!(f, "quantum must be greater than zero"),
            ConfigError::ZeroLevels => write!(f, "MLFQ needs at least one level"),
            ConfigError::UnknownPolicy(name) => {
                write!(f, "unknown policy `{}`, expected one of fifo, sjf, rr, mlfq", name)
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The workload was still running when the tick budget ran out
    TickLimit { ticks: u64, now: Timestamp },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::TickLimit { ticks, now } => {
                write!(f, "workload not done after {} ticks (clock at {})", ticks, now)
            }
        }
    }
}

impl Error for SimulationError {}
