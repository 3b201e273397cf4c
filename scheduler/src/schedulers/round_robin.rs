use log::debug;

use crate::common_funcs::{advance_running, dispatch, preempt, quantum_expired, Advance};
use crate::notifier::CompletionNotifier;
use crate::{Process, ProcessBlock, ProcessControlBlock, ReadyQueue, Scheduler, Timestamp};

/// Preemptive Round Robin scheduler
///
/// Processes are served in strict arrival order. A process that uses up its
/// quanta without finishing goes back to the tail of the ready queue, with
/// the CPU time it already received.
pub struct RoundRobinScheduler {
	/// Tick granularity, in milliseconds
	tick: u32,
	/// Time quanta of the scheduler
	///
	/// The maximum time a process can run before being preempted
	quanta: u32,
}

impl RoundRobinScheduler {
	pub fn new(tick: u32, quanta: u32) -> RoundRobinScheduler {
		RoundRobinScheduler { tick, quanta }
	}

	/// Sends the running process to the back of the ready queue, if its
	/// quanta expired
	fn enqueue_running_process(&mut self, now: Timestamp, ready: &mut ReadyQueue, running: &mut Option<ProcessBlock>) {
		let expired = match running {
			Some(pcb) => quantum_expired(pcb, now, self.quanta),
			None => false,
		};

		if !expired {
			return;
		}

		if let Some(pcb) = preempt(running) {
			debug!(
				"rr preempted process {} at {} ({}ms left)",
				pcb.get_pid(),
				now,
				pcb.remaining_time()
			);
			ready.push_back(pcb);
		}
	}
}

impl Scheduler for RoundRobinScheduler {
	fn schedule(
		&mut self,
		now: Timestamp,
		ready: &mut ReadyQueue,
		running: &mut Option<ProcessBlock>,
		notifier: &mut dyn CompletionNotifier,
	) {
		if advance_running(now, self.tick, running, notifier) == Advance::Running {
			self.enqueue_running_process(now, ready, running);
		}

		if running.is_some() {
			return;
		}

		if let Some(pcb) = ready.pop_front() {
			dispatch(pcb, now, running);
		}
	}

	fn name(&self) -> &'static str {
		"rr"
	}

	fn list(&self) -> Vec<&dyn Process> {
		Vec::new()
	}
}
