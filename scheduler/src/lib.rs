//! A CPU scheduling library.
//!
//! This library provides the policy core of a process scheduling simulator:
//! given the current simulated time, a ready queue and the single CPU slot,
//! a [`Scheduler`] decides which process runs next and for how long.
//!
//! Four policies are available: FIFO, Shortest Job First, Round Robin and
//! a Multi-Level Feedback Queue. A finished process is reported through a
//! [`CompletionNotifier`] and released right after.
//!

mod schedulers;

pub use schedulers::FifoScheduler;
pub use schedulers::FifoSelection;
pub use schedulers::MultiLevelFeedbackQueue;
pub use schedulers::ProcessBlock;
pub use schedulers::RoundRobinScheduler;
pub use schedulers::ShortestJobFirst;

mod scheduler;
pub use crate::scheduler::{Pid, Process, ProcessState, Scheduler};

mod common_types;
pub use crate::common_types::{Endpoint, Timestamp};
pub use crate::common_types::{DEFAULT_LEVELS, DEFAULT_QUANTUM_MS, DEFAULT_TICK_MS, TOP_LEVEL};

mod collector;
pub use crate::collector::collect_all;
pub use crate::collector::Collector;

mod process_control_block;
pub use process_control_block::ProcessControlBlock;

mod ready_queue;
pub use ready_queue::ReadyQueue;

mod error;
pub use error::{ConfigError, NotifyError, SimulationError};

pub mod notifier;
pub use notifier::{CompletionMessage, CompletionNotifier};

mod config;
pub use config::{PolicyKind, SchedulerConfig};

mod process_manager;
pub use process_manager::Registrar;

pub mod common_funcs;

mod simulation;
pub use simulation::Simulation;

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive FIFO policy
///
/// * `tick` - the tick granularity, in milliseconds
/// * `selection` - which queued process gets the CPU once it is free: the
///                 one with the shortest burst, or simply the oldest one
pub fn fifo(tick: u32, selection: FifoSelection) -> impl Scheduler {
    FifoScheduler::new(tick, selection)
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive Shortest Job First policy
///
/// * `tick` - the tick granularity, in milliseconds
pub fn sjf(tick: u32) -> impl Scheduler {
    ShortestJobFirst::new(tick)
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `tick` - the tick granularity, in milliseconds
/// * `quantum` - the time a process can run before it is preempted; it
///               should be a multiple of `tick`, otherwise preemption
///               happens up to one tick late
pub fn round_robin(tick: u32, quantum: u32) -> impl Scheduler {
    RoundRobinScheduler::new(tick, quantum)
}

/// Returns a structure that implements the `Scheduler` trait with a multi-level feedback queue policy
///
/// * `tick` - the tick granularity, in milliseconds
/// * `quantum` - the time a process can run on any level before it is
///               demoted to the next one
/// * `levels` - the number of priority levels, level 0 being the highest
pub fn mlfq(tick: u32, quantum: u32, levels: usize) -> impl Scheduler {
    MultiLevelFeedbackQueue::new(tick, quantum, levels)
}

/// Builds the scheduler described by `config`
pub fn build(config: &SchedulerConfig) -> Result<Box<dyn Scheduler>, ConfigError> {
    config.validate()?;

    let scheduler: Box<dyn Scheduler> = match config.policy {
        PolicyKind::Fifo => Box::new(fifo(config.tick_ms, config.fifo_selection)),
        PolicyKind::Sjf => Box::new(sjf(config.tick_ms)),
        PolicyKind::RoundRobin => Box::new(round_robin(config.tick_ms, config.quantum_ms)),
        PolicyKind::Mlfq => Box::new(mlfq(config.tick_ms, config.quantum_ms, config.levels)),
    };

    log::info!("built {} scheduler: {:?}", scheduler.name(), config);
    Ok(scheduler)
}
