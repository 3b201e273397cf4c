use log::debug;

use crate::common_funcs::{advance_running, dispatch, preempt, quantum_expired, Advance};
use crate::notifier::CompletionNotifier;
use crate::{Process, ProcessBlock, ProcessControlBlock, ReadyQueue, Scheduler, Timestamp, TOP_LEVEL};

/// Multi-Level Feedback Queue scheduler
///
/// Level 0 has the highest priority. New arrivals enter level 0; a process
/// that uses up a whole quantum without finishing moves one level down, and
/// stays on the lowest level once it gets there. There is no promotion.
pub struct MultiLevelFeedbackQueue {
    /// Ready processes for each level, index 0 being the highest priority
    levels: Vec<ReadyQueue>,
    /// Tick granularity, in milliseconds
    tick: u32,
    /// Time quanta, the same on every level
    quanta: u32,
}

impl MultiLevelFeedbackQueue {
    /// Creates the scheduler
    ///
    /// * `tick` - tick granularity, in milliseconds
    /// * `quanta` - how long a process may run before being demoted
    /// * `levels` - number of priority levels, at least one
    pub fn new(tick: u32, quanta: u32, levels: usize) -> MultiLevelFeedbackQueue {
        let levels = levels.max(1);

        MultiLevelFeedbackQueue {
            levels: (0..levels).map(|_| ReadyQueue::new()).collect(),
            tick,
            quanta,
        }
    }

    fn lowest_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of processes waiting on `level`
    pub fn queued_on(&self, level: usize) -> usize {
        self.levels.get(level).map_or(0, ReadyQueue::len)
    }

    /// Moves the new arrivals to the top level, keeping their order
    fn admit_arrivals(&mut self, intake: &mut ReadyQueue) {
        while let Some(mut pcb) = intake.pop_front() {
            pcb.set_priority(TOP_LEVEL);
            pcb.set_ready();
            self.levels[TOP_LEVEL].push_back(pcb);
        }
    }

    /// Moves the running process one level down, if its quanta expired
    fn demote_running(&mut self, now: Timestamp, running: &mut Option<ProcessBlock>) {
        let expired = match running {
            Some(pcb) => quantum_expired(pcb, now, self.quanta),
            None => false,
        };

        if !expired {
            return;
        }

        let lowest = self.lowest_level();
        if let Some(mut pcb) = preempt(running) {
            let level = pcb.demote(lowest);
            debug!(
                "mlfq moved process {} to level {} at {} ({}ms left)",
                pcb.get_pid(),
                level,
                now,
                pcb.remaining_time()
            );
            self.levels[level].push_back(pcb);
        }
    }

    /// Takes the head of the highest non-empty level
    fn dequeue_process(&mut self) -> Option<ProcessBlock> {
        for (level, queue) in self.levels.iter_mut().enumerate() {
            if let Some(mut pcb) = queue.pop_front() {
                pcb.set_priority(level);
                return Some(pcb);
            }
        }

        None
    }
}

impl Scheduler for MultiLevelFeedbackQueue {
    fn schedule(
        &mut self,
        now: Timestamp,
        ready: &mut ReadyQueue,
        running: &mut Option<ProcessBlock>,
        notifier: &mut dyn CompletionNotifier,
    ) {
        self.admit_arrivals(ready);

        if advance_running(now, self.tick, running, notifier) == Advance::Running {
            self.demote_running(now, running);
        }

        if running.is_some() {
            return;
        }

        if let Some(pcb) = self.dequeue_process() {
            dispatch(pcb, now, running);
        }
    }

    fn name(&self) -> &'static str {
        "mlfq"
    }

    fn list(&self) -> Vec<&dyn Process> {
        let mut procs: Vec<&dyn Process> = Vec::new();

        for queue in self.levels.iter() {
            for item in queue.iter() {
                procs.push(item);
            }
        }

        procs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;
    use crate::{Endpoint, Pid};

    fn arrival(pid: i32, burst: u32) -> ProcessBlock {
        ProcessBlock::new(Pid::new(pid), burst, Endpoint::new(pid as u32))
    }

    #[test]
    fn arrivals_land_on_the_top_level_in_order() {
        let mut scheduler = MultiLevelFeedbackQueue::new(100, 500, 3);
        let mut intake = ReadyQueue::new();
        intake.push_back(arrival(1, 1000));
        intake.push_back(arrival(2, 1000));
        intake.push_back(arrival(3, 1000));
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        scheduler.schedule(Timestamp::new(0), &mut intake, &mut running, &mut notifier);

        assert!(intake.is_empty());
        assert_eq!(running.as_ref().map(|pcb| pcb.get_pid()), Some(Pid::new(1)));
        let waiting: Vec<i32> = scheduler.list().iter().map(|p| p.pid().get()).collect();
        assert_eq!(waiting, vec![2, 3]);
        assert_eq!(scheduler.queued_on(TOP_LEVEL), 2);
    }

    #[test]
    fn expired_process_moves_down_one_level() {
        let mut scheduler = MultiLevelFeedbackQueue::new(100, 200, 3);
        let mut intake = ReadyQueue::new();
        intake.push_back(arrival(1, 1000));
        intake.push_back(arrival(2, 1000));
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        for t in (0..=200).step_by(100) {
            scheduler.schedule(Timestamp::new(t), &mut intake, &mut running, &mut notifier);
        }

        let pcb = running.as_ref().unwrap();
        assert_eq!(pcb.get_pid(), Pid::new(2));
        assert_eq!(pcb.get_priority(), 0);
        assert_eq!(scheduler.queued_on(1), 1);
    }

    #[test]
    fn new_arrival_wins_over_lower_levels() {
        let mut scheduler = MultiLevelFeedbackQueue::new(100, 100, 3);
        let mut intake = ReadyQueue::new();
        intake.push_back(arrival(1, 1000));
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        scheduler.schedule(Timestamp::new(0), &mut intake, &mut running, &mut notifier);
        intake.push_back(arrival(2, 1000));
        scheduler.schedule(Timestamp::new(100), &mut intake, &mut running, &mut notifier);

        assert_eq!(running.as_ref().map(|pcb| pcb.get_pid()), Some(Pid::new(2)));
        assert_eq!(scheduler.queued_on(1), 1);
    }

    #[test]
    fn single_level_behaves_like_round_robin() {
        let mut scheduler = MultiLevelFeedbackQueue::new(100, 200, 1);
        let mut intake = ReadyQueue::new();
        intake.push_back(arrival(1, 1000));
        intake.push_back(arrival(2, 1000));
        let mut running = None;
        let mut notifier = RecordingNotifier::new();

        let mut order = Vec::new();
        for t in (0..=400).step_by(100) {
            scheduler.schedule(Timestamp::new(t), &mut intake, &mut running, &mut notifier);
            let pcb = running.as_ref().unwrap();
            assert_eq!(pcb.get_priority(), 0);
            order.push(pcb.get_pid().get());
        }

        assert_eq!(order, vec![1, 1, 2, 2, 1]);
    }
}
