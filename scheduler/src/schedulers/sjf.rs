use log::debug;

use crate::common_funcs::{advance_running, dispatch};
use crate::notifier::CompletionNotifier;
use crate::{Process, ProcessBlock, ProcessControlBlock, ReadyQueue, Scheduler, Timestamp};

/// Non-preemptive Shortest Job First scheduler
///
/// Whenever the CPU is free, the whole ready queue is scanned once and the
/// process with the smallest total burst time is taken out, wherever it
/// sits. On equal bursts the process closer to the head wins.
pub struct ShortestJobFirst {
    /// Tick granularity, in milliseconds
    tick: u32,
}

impl ShortestJobFirst {
    pub fn new(tick: u32) -> ShortestJobFirst {
        ShortestJobFirst { tick }
    }
}

impl Scheduler for ShortestJobFirst {
    fn schedule(
        &mut self,
        now: Timestamp,
        ready: &mut ReadyQueue,
        running: &mut Option<ProcessBlock>,
        notifier: &mut dyn CompletionNotifier,
    ) {
        advance_running(now, self.tick, running, notifier);

        if running.is_some() {
            return;
        }

        let Some(index) = ready.position_of_shortest() else {
            return;
        };

        if let Some(pcb) = ready.remove(index) {
            debug!(
                "sjf picked process {} (burst {}ms) at position {}",
                pcb.get_pid(),
                pcb.get_burst_time(),
                index
            );
            dispatch(pcb, now, running);
        }
    }

    fn name(&self) -> &'static str {
        "sjf"
    }

    fn list(&self) -> Vec<&dyn Process> {
        Vec::new()
    }
}
