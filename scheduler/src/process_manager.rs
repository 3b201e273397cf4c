use crate::{Endpoint, Pid, ProcessBlock};

/// Creates process control blocks for newly registered processes
///
/// Pids are handed out sequentially, starting from 1, and are never reused.
pub struct Registrar {
    /// The pid of the next process that will be registered
    next_pid: Pid,
}

impl Registrar {
    pub fn new() -> Registrar {
        Registrar { next_pid: Pid::new(1) }
    }

    fn inc_pid(&mut self) {
        self.next_pid = self.next_pid + 1;
    }

    /// Returns the control block of a new process
    ///
    /// * `burst_time` - total CPU time the process needs, in milliseconds
    /// * `endpoint` - where its completion message will be sent
    pub fn register(&mut self, burst_time: u32, endpoint: Endpoint) -> ProcessBlock {
        let pcb = ProcessBlock::new(self.next_pid, burst_time, endpoint);
        self.inc_pid();

        pcb
    }

    /// Number of processes registered so far
    pub fn registered(&self) -> usize {
        (self.next_pid.get() - 1) as usize
    }
}

impl Default for Registrar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Process, ProcessControlBlock};

    #[test]
    fn hands_out_sequential_pids() {
        let mut registrar = Registrar::new();

        let first = registrar.register(300, Endpoint::new(10));
        let second = registrar.register(100, Endpoint::new(11));

        assert_eq!(first.pid(), Pid::new(1));
        assert_eq!(second.pid(), Pid::new(2));
        assert_eq!(second.get_endpoint(), Endpoint::new(11));
        assert_eq!(second.get_burst_time(), 100);
        assert_eq!(registrar.registered(), 2);
    }
}
