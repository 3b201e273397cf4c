use log::trace;
use serde::{Deserialize, Serialize};

use crate::common_funcs::{advance_running, dispatch};
use crate::notifier::CompletionNotifier;
use crate::{Process, ProcessBlock, ReadyQueue, Scheduler, Timestamp};

/// How the FIFO policy picks the next process once the CPU is free
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FifoSelection {
    /// The queued process with the smallest burst time, earliest arrival
    /// breaking ties
    #[default]
    ShortestBurst,
    /// The process at the head of the queue
    Arrival,
}

/// Non-preemptive first-come scheduler
///
/// Once a process gets the CPU it keeps it until it finishes.
pub struct FifoScheduler {
    /// Tick granularity, in milliseconds
    tick: u32,
    selection: FifoSelection,
}

impl FifoScheduler {
    pub fn new(tick: u32, selection: FifoSelection) -> FifoScheduler {
        FifoScheduler { tick, selection }
    }

    fn next_process(&self, ready: &mut ReadyQueue) -> Option<ProcessBlock> {
        match self.selection {
            FifoSelection::Arrival => ready.pop_front(),
            FifoSelection::ShortestBurst => {
                let index = ready.position_of_shortest()?;
                ready.remove(index)
            }
        }
    }
}

impl Scheduler for FifoScheduler {
    fn schedule(
        &mut self,
        now: Timestamp,
        ready: &mut ReadyQueue,
        running: &mut Option<ProcessBlock>,
        notifier: &mut dyn CompletionNotifier,
    ) {
        advance_running(now, self.tick, running, notifier);

        if running.is_some() || ready.is_empty() {
            return;
        }

        if let Some(pcb) = self.next_process(ready) {
            trace!("fifo picked {:?} out of {} queued", pcb, ready.len() + 1);
            dispatch(pcb, now, running);
        }
    }

    fn name(&self) -> &'static str {
        "fifo"
    }

    fn list(&self) -> Vec<&dyn Process> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;
    use crate::{Endpoint, Pid, ProcessControlBlock};

    fn queue_of(bursts: &[u32]) -> ReadyQueue {
        let mut queue = ReadyQueue::new();
        for (i, burst) in bursts.iter().enumerate() {
            queue.push_back(ProcessBlock::new(Pid::new(i as i32 + 1), *burst, Endpoint::new(i as u32)));
        }
        queue
    }

    fn running_pid(running: &Option<ProcessBlock>) -> Option<i32> {
        running.as_ref().map(|pcb| pcb.get_pid().get())
    }

    #[test]
    fn default_selection_takes_the_shortest_burst() {
        let mut scheduler = FifoScheduler::new(100, FifoSelection::default());
        let mut ready = queue_of(&[400, 200, 200]);
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        scheduler.schedule(Timestamp::new(0), &mut ready, &mut running, &mut notifier);

        assert_eq!(running_pid(&running), Some(2));
        assert_eq!(ready.len(), 2);
    }

    #[test]
    fn arrival_selection_takes_the_head() {
        let mut scheduler = FifoScheduler::new(100, FifoSelection::Arrival);
        let mut ready = queue_of(&[400, 200]);
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        scheduler.schedule(Timestamp::new(0), &mut ready, &mut running, &mut notifier);

        assert_eq!(running_pid(&running), Some(1));
    }

    #[test]
    fn runs_to_completion_without_preemption() {
        let mut scheduler = FifoScheduler::new(100, FifoSelection::Arrival);
        let mut ready = queue_of(&[800, 100]);
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        for t in (0..=700).step_by(100) {
            scheduler.schedule(Timestamp::new(t), &mut ready, &mut running, &mut notifier);
            assert_eq!(running_pid(&running), Some(1));
        }

        scheduler.schedule(Timestamp::new(800), &mut ready, &mut running, &mut notifier);
        assert_eq!(notifier.completion_of(Pid::new(1)), Some(Timestamp::new(800)));
        assert_eq!(running_pid(&running), Some(2));
    }
}
