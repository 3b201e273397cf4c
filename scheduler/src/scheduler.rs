use std::fmt;
use std::ops::Add;

use crate::notifier::CompletionNotifier;
use crate::{ProcessBlock, ReadyQueue, Timestamp};

/// The process identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(i32);

impl Pid {
    pub fn new(pid: i32) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

impl Add<i32> for Pid {
    type Output = Pid;

    fn add(self, rhs: i32) -> Self::Output {
        Pid::new(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The state of a process
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// Sitting in a ready queue
    Ready,
    /// Holding the CPU slot
    Running,
    /// Reached its burst time; only seen by the completion path right
    /// before the block is released
    Finished,
}

/// Read-only view over a process, used for listings
pub trait Process {
    fn pid(&self) -> Pid;
    fn state(&self) -> ProcessState;

    /// Returns the timings of the process as
    /// (burst time, elapsed run time), both in milliseconds
    fn timings(&self) -> (u32, u32);

    /// The MLFQ level of the process, 0 for the other policies
    fn priority(&self) -> usize;

    /// Policy specific details, may be empty
    fn extra(&self) -> String;
}

/// A CPU scheduling policy
///
/// The tick driver constructs one instance and calls [`Scheduler::schedule`]
/// once per tick with a non-decreasing `now`. All the state a policy keeps
/// between ticks lives in the instance, so independent instances never
/// interfere with each other.
pub trait Scheduler {
    /// Runs one scheduling round
    ///
    /// * `now` - the current simulated time
    /// * `ready` - the ready queue owned by the driver; for MLFQ this is the
    ///             intake queue that gets drained into the top level
    /// * `running` - the CPU slot
    /// * `notifier` - where completion messages are sent
    fn schedule(
        &mut self,
        now: Timestamp,
        ready: &mut ReadyQueue,
        running: &mut Option<ProcessBlock>,
        notifier: &mut dyn CompletionNotifier,
    );

    /// Short name of the policy, used in logs
    fn name(&self) -> &'static str;

    /// Returns the processes that the policy holds in its own queues
    ///
    /// Policies that only work on the driver's ready queue return nothing.
    fn list(&self) -> Vec<&dyn Process>;
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(
        &mut self,
        now: Timestamp,
        ready: &mut ReadyQueue,
        running: &mut Option<ProcessBlock>,
        notifier: &mut dyn CompletionNotifier,
    ) {
        (**self).schedule(now, ready, running, notifier)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn list(&self) -> Vec<&dyn Process> {
        (**self).list()
    }
}
