use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Default tick granularity, in milliseconds
pub const DEFAULT_TICK_MS: u32 = 100;
/// Default time slice for the preemptive policies, in milliseconds
pub const DEFAULT_QUANTUM_MS: u32 = 500;
/// Default number of MLFQ priority levels
pub const DEFAULT_LEVELS: usize = 3;

/// The MLFQ level every new arrival enters
pub const TOP_LEVEL: usize = 0;

/// A point on the simulated clock, in milliseconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp, in milliseconds
    pub fn new(time: u32) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Milliseconds passed since `earlier`
    ///
    /// The driver never moves the clock backwards, so a stamp from the
    /// future only shows up on a broken driver; it counts as zero.
    pub fn since(&self, earlier: Timestamp) -> u32 {
        debug_assert!(earlier.0 <= self.0, "clock went backwards");
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u32> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: u32) -> Self::Output {
        Timestamp::new(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Opaque handle of the channel a process listens on for its completion
/// message
///
/// The scheduling core never looks inside it, it only forwards it to the
/// completion notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint(u32);

impl Endpoint {
    pub fn new(handle: u32) -> Endpoint {
        Endpoint(handle)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint#{}", self.0)
    }
}
