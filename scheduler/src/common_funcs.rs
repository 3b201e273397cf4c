use log::{debug, error, info};

use crate::notifier::{CompletionMessage, CompletionNotifier};
use crate::{ProcessBlock, ProcessControlBlock, ProcessState, Timestamp};

/// What happened to the CPU slot while advancing it by one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The slot was empty
    Idle,
    /// The running process finished and was released
    Finished,
    /// The running process still needs CPU time
    Running,
}

/// Charges one tick to the running process and releases it if it finished
///
/// * `now` - the current tick, stamped on the completion message
/// * `tick` - the tick granularity, in milliseconds
/// * `running` - the CPU slot
/// * `notifier` - where the completion message goes
pub fn advance_running(
    now: Timestamp,
    tick: u32,
    running: &mut Option<ProcessBlock>,
    notifier: &mut dyn CompletionNotifier,
) -> Advance {
    let finished = match running.as_mut() {
        None => return Advance::Idle,
        Some(pcb) => {
            pcb.execute(tick);
            pcb.is_finished()
        }
    };

    if !finished {
        return Advance::Running;
    }

    if let Some(pcb) = running.take() {
        finish_process(pcb, now, notifier);
    }

    Advance::Finished
}

/// Sends the completion message of `pcb` and releases it
///
/// A failed delivery is logged and otherwise ignored: the block is dropped
/// either way and the message is never retried.
pub fn finish_process(mut pcb: ProcessBlock, now: Timestamp, notifier: &mut dyn CompletionNotifier) {
    pcb.set_state(ProcessState::Finished);

    let message = CompletionMessage::done(pcb.get_pid(), now);
    match notifier.notify(pcb.get_endpoint(), &message) {
        Ok(()) => info!(
            "process {} finished at {} after {}ms",
            pcb.get_pid(),
            now,
            pcb.get_elapsed_time()
        ),
        Err(err) => error!(
            "process {} finished at {} but its completion message was lost: {}",
            pcb.get_pid(),
            now,
            err
        ),
    }
}

/// Puts `pcb` on the CPU and starts its slice at `now`
pub fn dispatch(mut pcb: ProcessBlock, now: Timestamp, running: &mut Option<ProcessBlock>) {
    debug_assert!(running.is_none(), "dispatching onto a busy CPU");

    pcb.set_running();
    pcb.start_slice(now);
    debug!(
        "dispatch process {} at {} (level {}, {}ms left)",
        pcb.get_pid(),
        now,
        pcb.get_priority(),
        pcb.remaining_time()
    );

    *running = Some(pcb);
}

/// Whether the running process used up its time slice
pub fn quantum_expired(pcb: &ProcessBlock, now: Timestamp, quantum: u32) -> bool {
    now.since(pcb.get_slice_start()) >= quantum
}

/// Takes the running process off the CPU, back to `Ready` state
pub fn preempt(running: &mut Option<ProcessBlock>) -> Option<ProcessBlock> {
    let mut pcb = running.take()?;
    pcb.set_ready();
    Some(pcb)
}
