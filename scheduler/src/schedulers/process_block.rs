use crate::{Endpoint, Pid, Process, ProcessControlBlock, ProcessState, Timestamp, TOP_LEVEL};

/// The process control block shared by all the policies
///
/// It is deliberately neither `Clone` nor `Copy`: whoever holds the value
/// (a ready queue or the CPU slot) owns the process, and dropping it is
/// the one and only release.
#[derive(Debug)]
pub struct ProcessBlock {
    pid: Pid,
    /// Where the completion message goes
    endpoint: Endpoint,
    state: ProcessState,
    /// Total CPU time the process needs, fixed at creation
    burst_time: u32,
    /// CPU time received so far
    elapsed_time: u32,
    /// MLFQ level; the other policies leave it at the top level
    priority: usize,
    /// The tick at which the current execution slice began
    slice_start: Timestamp,
}

impl ProcessBlock {
    /// Creates a new process control block, in `Ready` state
    ///
    /// * `pid` - pid of the new process
    /// * `burst_time` - total CPU time it needs, in milliseconds
    /// * `endpoint` - where its completion message will be sent
    pub fn new(pid: Pid, burst_time: u32, endpoint: Endpoint) -> ProcessBlock {
        ProcessBlock {
            pid,
            endpoint,
            state: ProcessState::Ready,
            burst_time,
            elapsed_time: 0,
            priority: TOP_LEVEL,
            slice_start: Timestamp::new(0),
        }
    }

    /// Remaining CPU time before the process finishes
    pub fn remaining_time(&self) -> u32 {
        self.burst_time.saturating_sub(self.elapsed_time)
    }
}

impl Process for ProcessBlock {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn timings(&self) -> (u32, u32) {
        (self.burst_time, self.elapsed_time)
    }

    fn priority(&self) -> usize {
        self.priority
    }

    fn extra(&self) -> String {
        return if self.state == ProcessState::Running {
            format!("slice_start={}", self.slice_start)
        } else {
            String::new()
        }
    }
}

impl ProcessControlBlock for ProcessBlock {
    fn get_pid(&self) -> Pid {
        self.pid
    }

    fn get_endpoint(&self) -> Endpoint {
        self.endpoint
    }

    fn get_burst_time(&self) -> u32 {
        self.burst_time
    }

    fn get_elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    fn get_priority(&self) -> usize {
        self.priority
    }

    fn set_priority(&mut self, level: usize) {
        self.priority = level;
    }

    fn demote(&mut self, lowest: usize) -> usize {
        if self.priority < lowest {
            self.priority += 1;
        }

        self.priority
    }

    fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    fn set_running(&mut self) {
        self.set_state(ProcessState::Running);
    }

    fn set_ready(&mut self) {
        self.set_state(ProcessState::Ready);
    }

    fn get_slice_start(&self) -> Timestamp {
        self.slice_start
    }

    fn start_slice(&mut self, now: Timestamp) {
        self.slice_start = now;
    }

    fn execute(&mut self, time: u32) {
        debug_assert!(
            self.elapsed_time < self.burst_time || self.burst_time == 0,
            "process {} executed after finishing",
            self.pid
        );
        self.elapsed_time = self.elapsed_time.saturating_add(time);
    }

    fn is_finished(&self) -> bool {
        self.elapsed_time >= self.burst_time
    }
}
