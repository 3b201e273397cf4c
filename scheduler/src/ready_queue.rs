use std::collections::VecDeque;

use crate::{Pid, ProcessBlock, ProcessControlBlock};

/// An ordered queue of processes waiting for the CPU
///
/// The queue owns the blocks it holds. Taking a block out, either from the
/// head or from the middle, hands ownership to the caller and leaves the
/// order of the others untouched.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    queue: VecDeque<ProcessBlock>,
}

impl ReadyQueue {
    pub fn new() -> ReadyQueue {
        ReadyQueue { queue: VecDeque::new() }
    }

    /// Appends a process to the tail of the queue
    ///
    /// * `pcb` - the process, which the queue takes ownership of
    pub fn push_back(&mut self, pcb: ProcessBlock) {
        debug_assert!(
            !self.contains(pcb.get_pid()),
            "process {} is already queued",
            pcb.get_pid()
        );
        self.queue.push_back(pcb);
    }

    /// Takes the process at the head of the queue
    pub fn pop_front(&mut self) -> Option<ProcessBlock> {
        self.queue.pop_front()
    }

    /// Takes the process found at position `index`, counting from the head
    ///
    /// The position usually comes from a scan such as
    /// [`ReadyQueue::position_of_shortest`].
    pub fn remove(&mut self, index: usize) -> Option<ProcessBlock> {
        self.queue.remove(index)
    }

    /// Position of the process with the smallest burst time
    ///
    /// When several processes share the smallest burst, the one closest to
    /// the head wins.
    pub fn position_of_shortest(&self) -> Option<usize> {
        let mut shortest: Option<(usize, u32)> = None;

        for (index, pcb) in self.queue.iter().enumerate() {
            let burst = pcb.get_burst_time();
            let better = match shortest {
                Some((_, min)) => burst < min,
                None => true,
            };

            if better {
                shortest = Some((index, burst));
            }
        }

        shortest.map(|(index, _)| index)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.queue.iter().any(|pcb| pcb.get_pid() == pid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessBlock> {
        self.queue.iter()
    }
}
