use crate::{Endpoint, Pid, ProcessState, Timestamp};

/// Scheduling operations the policies apply to a process control block
pub trait ProcessControlBlock {
    fn get_pid(&self) -> Pid;
    fn get_endpoint(&self) -> Endpoint;

    fn get_burst_time(&self) -> u32;
    fn get_elapsed_time(&self) -> u32;

    fn get_priority(&self) -> usize;
    fn set_priority(&mut self, level: usize);

    /// Moves the process one level down, without going past `lowest`
    ///
    /// Returns the new level.
    fn demote(&mut self, lowest: usize) -> usize;

    fn set_state(&mut self, state: ProcessState);
    fn set_running(&mut self);
    fn set_ready(&mut self);

    fn get_slice_start(&self) -> Timestamp;

    /// Stamps the beginning of a new execution slice
    ///
    /// * `now` - the tick at which the process got the CPU
    fn start_slice(&mut self, now: Timestamp);

    /// Adds `time` milliseconds of CPU time to the process
    fn execute(&mut self, time: u32);

    /// Whether the process got all the CPU time it asked for
    fn is_finished(&self) -> bool;
}
